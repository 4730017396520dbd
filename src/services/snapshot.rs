use crate::domain::{
    AgentError, Container, ContainerRuntime, NetworkRecord, VolumeRecord, classify,
    order_containers, order_networks, order_volumes,
};
use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};
use tracing::debug;

/// Everything the menu shows, already classified and ordered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub containers: Vec<Container>,
    pub networks: Vec<NetworkRecord>,
    pub volumes: Vec<VolumeRecord>,
}

impl Snapshot {
    pub fn running_count(&self) -> usize {
        self.containers.iter().filter(|c| c.is_running()).count()
    }
}

/// Which inventories besides containers to query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub networks: bool,
    pub volumes: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            networks: true,
            volumes: true,
        }
    }
}

pub struct SnapshotService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl SnapshotService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Lists, classifies and orders all containers
    pub fn containers(&self) -> Result<Vec<Container>, AgentError> {
        let records = self
            .runtime
            .list_containers()
            .map_err(|source| AgentError::Query {
                what: "containers",
                source,
            })?;

        let mut containers: Vec<Container> = records.into_iter().map(classify).collect();
        order_containers(&mut containers);

        for c in &containers {
            debug!(
                id = c.id(),
                project = %c.project.kind,
                name = %c.project.name,
                created = %c.record.created_at(),
                "classified {}",
                c.name()
            );
        }

        Ok(containers)
    }

    pub fn networks(&self) -> Result<Vec<NetworkRecord>, AgentError> {
        let mut networks = self
            .runtime
            .list_networks()
            .map_err(|source| AgentError::Query {
                what: "networks",
                source,
            })?;
        order_networks(&mut networks);
        Ok(networks)
    }

    pub fn volumes(&self) -> Result<Vec<VolumeRecord>, AgentError> {
        let mut volumes = self
            .runtime
            .list_volumes()
            .map_err(|source| AgentError::Query {
                what: "volumes",
                source,
            })?;
        order_volumes(&mut volumes);
        Ok(volumes)
    }

    /// Runs the three listings in parallel; any failure fails the whole snapshot
    pub fn take(&self, options: SnapshotOptions) -> Result<Snapshot, AgentError> {
        let (containers, networks, volumes) = thread::scope(|s| {
            let containers = s.spawn(|| self.containers());
            let networks = s.spawn(|| {
                if options.networks {
                    self.networks()
                } else {
                    Ok(Vec::new())
                }
            });
            let volumes = s.spawn(|| {
                if options.volumes {
                    self.volumes()
                } else {
                    Ok(Vec::new())
                }
            });

            (join(containers), join(networks), join(volumes))
        });

        Ok(Snapshot {
            containers: containers?,
            networks: networks?,
            volumes: volumes?,
        })
    }
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
