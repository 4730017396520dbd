use crate::domain::{
    ContainerRecord, ContainerRuntime, LifecycleCommand, NetworkRecord, ToolError, VolumeRecord,
};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info};

pub const DEFAULT_DOCKER_BIN: &str = "/usr/local/bin/docker";

/// Runs the `docker` CLI (or anything speaking its `--format={{json .}}` output)
#[derive(Debug, Clone)]
pub struct DockerCli {
    bin: PathBuf,
}

impl DockerCli {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    fn list<T: DeserializeOwned>(&self, args: &[&str]) -> Result<Vec<T>, ToolError> {
        let command = self.command_line(args);
        debug!("{command}");

        let output = Command::new(&self.bin)
            .args(args)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.bin.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolError::Status {
                command,
                status: output.status.to_string(),
            });
        }

        decode_json_lines(&command, &output.stdout)
    }

    fn run(&self, args: &[&str]) -> Result<(), ToolError> {
        let command = self.command_line(args);
        info!("{command}");

        let status = Command::new(&self.bin)
            .args(args)
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

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.bin.display(), args.join(" "))
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_DOCKER_BIN)
    }
}

impl ContainerRuntime for DockerCli {
    fn list_containers(&self) -> Result<Vec<ContainerRecord>, ToolError> {
        self.list(&["container", "ls", "--all", "--no-trunc", "--format={{json .}}"])
    }

    fn list_networks(&self) -> Result<Vec<NetworkRecord>, ToolError> {
        self.list(&["network", "ls", "--no-trunc", "--format={{json .}}"])
    }

    fn list_volumes(&self) -> Result<Vec<VolumeRecord>, ToolError> {
        self.list(&["volume", "ls", "--format={{json .}}"])
    }

    fn apply(&self, command: LifecycleCommand, ids: &[String]) -> Result<(), ToolError> {
        let mut args = vec![command.as_str()];
        args.extend_from_slice(command.extra_args());
        args.extend(ids.iter().map(String::as_str));
        self.run(&args)
    }

    fn prune_build_cache(&self) -> Result<(), ToolError> {
        self.run(&["buildx", "prune", "--force"])
    }

    fn prune_system(&self) -> Result<(), ToolError> {
        self.run(&["system", "prune", "--force", "--volumes"])
    }
}

/// Decodes a stream of whitespace separated JSON objects
pub fn decode_json_lines<T: DeserializeOwned>(
    command: &str,
    stdout: &[u8],
) -> Result<Vec<T>, ToolError> {
    serde_json::Deserializer::from_slice(stdout)
        .into_iter::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ToolError::Decode {
            command: command.to_string(),
            source,
        })
}
