mod command;
mod container;
pub mod error;
pub mod ordering;
pub mod project;
pub mod traits;

pub use command::LifecycleCommand;
pub use container::{Container, ContainerRecord, NetworkRecord, VolumeRecord};
pub use error::{AgentError, ToolError};
pub use ordering::{order_containers, order_networks, order_volumes};
pub use project::{Project, ProjectType, classify};
pub use traits::{ClusterStatus, ClusterTool, ContainerRuntime};
