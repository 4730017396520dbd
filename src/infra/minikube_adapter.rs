use crate::domain::{ClusterStatus, ClusterTool, ToolError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

pub const DEFAULT_MINIKUBE_BIN: &str = "/usr/local/bin/minikube";

#[derive(Debug, Clone)]
pub struct MinikubeCli {
    bin: PathBuf,
}

impl MinikubeCli {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    fn run(&self, action: &str) -> Result<(), ToolError> {
        let command = format!("{} {action}", self.bin.display());
        info!("{command}");

        let status = Command::new(&self.bin)
            .arg(action)
            .status()
            .map_err(|source| ToolError::Spawn {
                program: self.bin.display().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(ToolError::Status {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MinikubeCli {
    fn default() -> Self {
        Self::new(DEFAULT_MINIKUBE_BIN)
    }
}

impl ClusterTool for MinikubeCli {
    fn status(&self) -> Option<ClusterStatus> {
        // exit code is non-zero whenever the cluster isn't fully up; only the JSON matters
        let output = match Command::new(&self.bin)
            .args(["status", "--output=json"])
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!("minikube status unavailable: {e}");
                return None;
            }
        };

        parse_status(&output.stdout)
    }

    fn stop(&self) -> Result<(), ToolError> {
        self.run("stop")
    }

    fn delete(&self) -> Result<(), ToolError> {
        self.run("delete")
    }
}

fn parse_status(raw: &[u8]) -> Option<ClusterStatus> {
    let fields: HashMap<String, serde_json::Value> = match serde_json::from_slice(raw) {
        Ok(fields) => fields,
        Err(e) => {
            debug!("minikube status is not JSON: {e}");
            return None;
        }
    };

    let host = match fields.get("Host").or_else(|| fields.get("host")) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    Some(ClusterStatus::new(&host))
}
