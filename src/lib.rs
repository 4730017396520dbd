pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use cli::{Agent, AgentArgs, Invocation};
pub use domain::{
    AgentError, Container, ContainerRecord, ContainerRuntime, LifecycleCommand, Project,
    ProjectType, classify,
};
pub use infra::{AppConfig, DockerCli};
pub use services::{Dispatcher, Snapshot, SnapshotService};
