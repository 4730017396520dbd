use crate::domain::{AgentError, ContainerRuntime, ToolError};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a prune run; failed steps don't stop the remaining ones
#[derive(Debug, Default)]
pub struct PruneReport {
    pub completed: Vec<&'static str>,
    pub failures: Vec<AgentError>,
}

impl PruneReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

type PruneStep = fn(&dyn ContainerRuntime) -> Result<(), ToolError>;

/// Irreversible removal of unused runtime data
pub struct CleanupService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl CleanupService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Prunes build cache, then stopped containers, unused networks and volumes
    pub fn prune(&self) -> PruneReport {
        let steps: [(&'static str, PruneStep); 2] = [
            ("build cache", |rt: &dyn ContainerRuntime| rt.prune_build_cache()),
            ("system", |rt: &dyn ContainerRuntime| rt.prune_system()),
        ];

        let mut report = PruneReport::default();
        for (action, step) in steps {
            info!("pruning {action}");

            match step(self.runtime.as_ref()) {
                Ok(()) => report.completed.push(action),
                Err(source) => {
                    let err = AgentError::PruneSubAction { action, source };
                    warn!("{err}: {}", source_message(&err));
                    report.failures.push(err);
                }
            }
        }

        report
    }
}

fn source_message(err: &AgentError) -> String {
    std::error::Error::source(err)
        .map(ToString::to_string)
        .unwrap_or_default()
}
