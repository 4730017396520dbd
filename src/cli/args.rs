use crate::domain::{AgentError, LifecycleCommand};
use crate::infra::config::default_config_dir;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dockerbar",
    version,
    about = "Status bar menu for local Docker containers",
    after_help = "Commands: start, stop, restart, kill, rm."
)]
pub struct AgentArgs {
    /// Config directory (default: ~/.config/dockerbar)
    #[arg(long, env = "DOCKERBAR_CONFIG_DIR", default_value_os_t = default_config_dir())]
    pub config_dir: PathBuf,

    /// Container runtime binary, overrides dockerbar.toml
    #[arg(long, env = "DOCKERBAR_DOCKER_BIN")]
    pub docker_bin: Option<PathBuf>,

    /// Restrict commands to one project (Compose project, Kubernetes namespace, Minikube profile, Talos cluster)
    #[arg(long)]
    pub project: Option<String>,

    /// Prune stopped containers, networks, volumes and caches afterwards
    #[arg(long)]
    pub prune: bool,

    /// Stop or delete the minikube cluster
    #[arg(long, value_enum)]
    pub minikube: Option<ClusterAction>,

    /// Lifecycle commands, applied in order
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClusterAction {
    Stop,
    Delete,
}

/// Validated form of the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub commands: Vec<LifecycleCommand>,
    pub project: Option<String>,
    pub prune: bool,
    pub cluster: Option<ClusterAction>,
}

impl Invocation {
    /// No commands and no cluster action: print the menu
    pub fn shows_menu(&self) -> bool {
        self.commands.is_empty() && self.cluster.is_none()
    }
}

impl AgentArgs {
    /// Checks every command name up front so a bad chain fails before any call
    pub fn invocation(&self) -> Result<Invocation, AgentError> {
        let commands = self
            .commands
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<LifecycleCommand>, _>>()?;

        if self.project.is_some() && commands.is_empty() {
            return Err(AgentError::Usage(
                "--project needs at least one command".to_string(),
            ));
        }

        Ok(Invocation {
            commands,
            project: self.project.clone(),
            prune: self.prune,
            cluster: self.minikube,
        })
    }
}
