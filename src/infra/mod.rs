pub mod config;
pub mod docker_adapter;
pub mod minikube_adapter;

pub use config::{AppConfig, ConfigError};
pub use docker_adapter::DockerCli;
pub use minikube_adapter::MinikubeCli;
