use crate::domain::{AgentError, Container, ContainerRuntime, LifecycleCommand};
use crate::services::SnapshotService;
use std::sync::Arc;
use tracing::{debug, info};

/// Ids of containers in `project` (all projects when `None` or empty) that
/// `command` applies to, in menu order
pub fn select_targets(
    command: LifecycleCommand,
    containers: &[Container],
    project: Option<&str>,
) -> Vec<String> {
    let project = project.filter(|name| !name.is_empty());

    containers
        .iter()
        .filter(|c| project.is_none_or(|name| c.project.name == name))
        .filter(|c| command.applies_to(c))
        .map(|c| c.id().to_string())
        .collect()
}

/// Sends lifecycle commands to the containers they apply to
pub struct Dispatcher {
    runtime: Arc<dyn ContainerRuntime>,
    snapshot: Arc<SnapshotService>,
}

impl Dispatcher {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, snapshot: Arc<SnapshotService>) -> Self {
        Self { runtime, snapshot }
    }

    /// Parses `command` and dispatches it; unknown names fail before any runtime call
    pub fn dispatch(
        &self,
        command: &str,
        project: Option<&str>,
    ) -> Result<Vec<String>, AgentError> {
        let command: LifecycleCommand = command.parse()?;
        self.dispatch_command(command, project)
    }

    /// Returns the affected ids; an empty result means nothing was sent
    pub fn dispatch_command(
        &self,
        command: LifecycleCommand,
        project: Option<&str>,
    ) -> Result<Vec<String>, AgentError> {
        let containers = self.snapshot.containers()?;
        let ids = select_targets(command, &containers, project);

        if ids.is_empty() {
            debug!("{command}: no eligible containers");
            return Ok(ids);
        }

        info!("{command}: {} container(s)", ids.len());
        self.runtime
            .apply(command, &ids)
            .map_err(|source| AgentError::Dispatch {
                command: command.to_string(),
                source,
            })?;

        Ok(ids)
    }
}
