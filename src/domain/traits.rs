use super::{ContainerRecord, LifecycleCommand, NetworkRecord, ToolError, VolumeRecord};
use std::fmt::Debug;

/// Trait for container runtime operations.
///
/// One method per logical query or action, so services can run against a
/// mock without a real runtime installed.
pub trait ContainerRuntime: Send + Sync + Debug {
    /// List all containers, running or not
    fn list_containers(&self) -> Result<Vec<ContainerRecord>, ToolError>;

    /// List all networks
    fn list_networks(&self) -> Result<Vec<NetworkRecord>, ToolError>;

    /// List all volumes
    fn list_volumes(&self) -> Result<Vec<VolumeRecord>, ToolError>;

    /// Apply a lifecycle command to every id in one invocation
    fn apply(&self, command: LifecycleCommand, ids: &[String]) -> Result<(), ToolError>;

    /// Prune build cache
    fn prune_build_cache(&self) -> Result<(), ToolError>;

    /// Prune stopped containers, unused networks and unused volumes
    fn prune_system(&self) -> Result<(), ToolError>;
}

/// Host status reported by a local cluster tool such as minikube
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterStatus {
    /// Lowercased host state, e.g. `running` or `stopped`
    pub host: String,
}

impl ClusterStatus {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_lowercase(),
        }
    }

    /// Anything but an explicit `stopped` counts as running
    pub fn is_running(&self) -> bool {
        self.host != "stopped"
    }
}

/// Trait for the local cluster tool
pub trait ClusterTool: Send + Sync + Debug {
    /// Current status, `None` when the tool gave no structured answer
    fn status(&self) -> Option<ClusterStatus>;

    fn stop(&self) -> Result<(), ToolError>;

    fn delete(&self) -> Result<(), ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_status_running() {
        assert!(ClusterStatus::new("Running").is_running());
        assert!(ClusterStatus::new("Nonexistent").is_running());
        assert!(!ClusterStatus::new("Stopped").is_running());
        assert_eq!(ClusterStatus::new("Stopped").host, "stopped");
    }
}
