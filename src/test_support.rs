use crate::domain::{
    ClusterStatus, ClusterTool, ContainerRecord, ContainerRuntime, LifecycleCommand,
    NetworkRecord, ToolError, VolumeRecord,
};
#[cfg(unix)]
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory runtime that records every call it receives
#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<Vec<ContainerRecord>>,
    networks: RwLock<Vec<NetworkRecord>>,
    volumes: RwLock<Vec<VolumeRecord>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(Vec::new()),
            networks: RwLock::new(Vec::new()),
            volumes: RwLock::new(Vec::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
        }
    }

    /// Adds a container; `status` decides whether it counts as running
    pub fn add_container(&self, id: &str, name: &str, labels: &str, status: &str) {
        self.containers.write().unwrap().push(ContainerRecord {
            id: id.to_string(),
            names: name.to_string(),
            image: format!("{name}:latest"),
            labels: labels.to_string(),
            status: status.to_string(),
            state: String::new(),
            created_at: "2024-03-01 10:20:30 +0000 UTC".to_string(),
        });
    }

    pub fn add_record(&self, record: ContainerRecord) {
        self.containers.write().unwrap().push(record);
    }

    pub fn add_network(&self, driver: &str, name: &str) {
        self.networks.write().unwrap().push(NetworkRecord {
            id: format!("net-{name}"),
            name: name.to_string(),
            driver: driver.to_string(),
            scope: "local".to_string(),
        });
    }

    pub fn add_volume(&self, driver: &str, name: &str) {
        self.volumes.write().unwrap().push(VolumeRecord {
            name: name.to_string(),
            driver: driver.to_string(),
        });
    }

    /// Makes the named operation fail, e.g. `list_containers`, `stop`, `prune_build_cache`
    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    /// Recorded calls that would change runtime state
    pub fn mutations(&self) -> Vec<String> {
        self.get_commands()
            .into_iter()
            .filter(|cmd| !cmd.starts_with("list:"))
            .collect()
    }

    pub fn is_running(&self, id: &str) -> Option<bool> {
        self.containers
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(ContainerRecord::is_running)
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<(), ToolError> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                return Err(ToolError::Status {
                    command: format!("mock {operation}"),
                    status: "exit status: 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for MockRuntime {
    fn list_containers(&self) -> Result<Vec<ContainerRecord>, ToolError> {
        self.record_command("list:containers");
        self.check_fail("list_containers")?;
        Ok(self.containers.read().unwrap().clone())
    }

    fn list_networks(&self) -> Result<Vec<NetworkRecord>, ToolError> {
        self.record_command("list:networks");
        self.check_fail("list_networks")?;
        Ok(self.networks.read().unwrap().clone())
    }

    fn list_volumes(&self) -> Result<Vec<VolumeRecord>, ToolError> {
        self.record_command("list:volumes");
        self.check_fail("list_volumes")?;
        Ok(self.volumes.read().unwrap().clone())
    }

    fn apply(&self, command: LifecycleCommand, ids: &[String]) -> Result<(), ToolError> {
        self.record_command(&format!("{}:{}", command, ids.join(",")));
        self.check_fail(command.as_str())?;

        let mut containers = self.containers.write().unwrap();
        match command {
            LifecycleCommand::Rm => containers.retain(|c| !ids.contains(&c.id)),
            LifecycleCommand::Start | LifecycleCommand::Restart => {
                for c in containers.iter_mut().filter(|c| ids.contains(&c.id)) {
                    c.state = "running".to_string();
                    c.status = "Up Less than a second".to_string();
                }
            }
            LifecycleCommand::Stop | LifecycleCommand::Kill => {
                for c in containers.iter_mut().filter(|c| ids.contains(&c.id)) {
                    c.state = "exited".to_string();
                    c.status = "Exited (0) Less than a second ago".to_string();
                }
            }
        }
        Ok(())
    }

    fn prune_build_cache(&self) -> Result<(), ToolError> {
        self.record_command("prune:build_cache");
        self.check_fail("prune_build_cache")
    }

    fn prune_system(&self) -> Result<(), ToolError> {
        self.record_command("prune:system");
        self.check_fail("prune_system")
    }
}

/// Local cluster tool with a fixed status
#[derive(Debug, Default)]
pub struct MockCluster {
    host: RwLock<Option<String>>,
    commands: RwLock<Vec<String>>,
}

impl MockCluster {
    pub fn new(host: Option<&str>) -> Self {
        Self {
            host: RwLock::new(host.map(str::to_string)),
            commands: RwLock::new(Vec::new()),
        }
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }
}

impl ClusterTool for MockCluster {
    fn status(&self) -> Option<ClusterStatus> {
        self.host.read().unwrap().as_deref().map(ClusterStatus::new)
    }

    fn stop(&self) -> Result<(), ToolError> {
        self.commands.write().unwrap().push("cluster:stop".to_string());
        *self.host.write().unwrap() = Some("Stopped".to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), ToolError> {
        self.commands.write().unwrap().push("cluster:delete".to_string());
        *self.host.write().unwrap() = None;
        Ok(())
    }
}

/// Executable stand-in for an external CLI: appends its arguments to a log
/// and prints a canned stdout
#[cfg(unix)]
#[derive(Debug)]
pub struct FakeTool {
    bin: PathBuf,
    log: PathBuf,
}

#[cfg(unix)]
impl FakeTool {
    pub fn install(dir: &Path, name: &str, stdout: &str) -> std::io::Result<Self> {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let bin = dir.join(name);
        let log = dir.join(format!("{name}.log"));
        let out = dir.join(format!("{name}.out"));
        fs::write(&out, stdout)?;

        let script = format!(
            "#!/bin/sh\necho \"$*\" >> '{}'\ncat '{}'\n",
            log.display(),
            out.display()
        );
        fs::write(&bin, script)?;
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755))?;

        Ok(Self { bin, log })
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// One entry per call, arguments joined by spaces
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
