pub mod agent;
pub mod args;

pub use agent::Agent;
pub use args::{AgentArgs, ClusterAction, Invocation};
