use crate::cli::args::{ClusterAction, Invocation};
use crate::domain::{AgentError, ClusterTool, ContainerRuntime, LifecycleCommand};
use crate::infra::{AppConfig, DockerCli, MinikubeCli};
use crate::services::{
    CleanupService, Dispatcher, MenuContext, PruneReport, SnapshotOptions, SnapshotService, render,
};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// One invocation's worth of wiring between config, adapters and services
pub struct Agent {
    snapshot: Arc<SnapshotService>,
    dispatcher: Dispatcher,
    cleanup: CleanupService,
    cluster: Option<Arc<dyn ClusterTool>>,
    options: SnapshotOptions,
    menu: MenuContext,
}

impl Agent {
    pub fn new(config: &AppConfig) -> Self {
        let runtime = Arc::new(DockerCli::new(config.docker_bin()));
        let cluster = if config.minikube.enabled {
            Some(Arc::new(MinikubeCli::new(config.minikube_bin())) as Arc<dyn ClusterTool>)
        } else {
            None
        };
        let agent_bin = std::env::current_exe().ok();

        Self::with_runtime(config, runtime, cluster, agent_bin)
    }

    pub fn with_runtime(
        config: &AppConfig,
        runtime: Arc<dyn ContainerRuntime>,
        cluster: Option<Arc<dyn ClusterTool>>,
        agent_bin: Option<PathBuf>,
    ) -> Self {
        let snapshot = Arc::new(SnapshotService::new(runtime.clone()));
        let dispatcher = Dispatcher::new(runtime.clone(), snapshot.clone());
        let cleanup = CleanupService::new(runtime);

        Self {
            snapshot,
            dispatcher,
            cleanup,
            cluster,
            options: SnapshotOptions {
                networks: config.menu.show_networks,
                volumes: config.menu.show_volumes,
            },
            menu: MenuContext {
                agent_bin,
                docker_bin: config.docker_bin(),
            },
        }
    }

    /// Renders the menu; nothing is rendered if any listing fails
    pub fn status(&self) -> Result<String> {
        let snapshot = self
            .snapshot
            .take(self.options)
            .context("collecting runtime state")?;
        let cluster = self.cluster.as_ref().and_then(|c| c.status());

        Ok(render(&snapshot, cluster.as_ref(), &self.menu))
    }

    /// Runs each command in turn against freshly listed containers
    pub fn dispatch(&self, commands: &[LifecycleCommand], project: Option<&str>) -> Result<()> {
        for &command in commands {
            let ids = self.dispatcher.dispatch_command(command, project)?;
            if ids.is_empty() {
                info!("{command}: nothing to do");
            }
        }
        Ok(())
    }

    pub fn cluster_action(&self, action: ClusterAction) -> Result<()> {
        let Some(cluster) = &self.cluster else {
            return Err(AgentError::Usage(
                "minikube support is disabled in dockerbar.toml".to_string(),
            )
            .into());
        };

        let (name, result) = match action {
            ClusterAction::Stop => ("minikube stop", cluster.stop()),
            ClusterAction::Delete => ("minikube delete", cluster.delete()),
        };
        result.map_err(|source| AgentError::Dispatch {
            command: name.to_string(),
            source,
        })?;
        Ok(())
    }

    pub fn prune(&self) -> PruneReport {
        let report = self.cleanup.prune();
        if !report.is_clean() {
            warn!("prune finished with {} failed step(s)", report.failures.len());
        }
        report
    }

    /// Executes a validated invocation. The menu, when rendered, is written
    /// and flushed to `out` before any cluster action or prune starts.
    pub fn run(&self, invocation: &Invocation, out: &mut impl Write) -> Result<()> {
        if invocation.shows_menu() {
            let menu = self.status()?;
            out.write_all(menu.as_bytes()).context("writing menu")?;
            out.flush().context("flushing menu")?;
        } else {
            self.dispatch(&invocation.commands, invocation.project.as_deref())?;
        }

        if let Some(action) = invocation.cluster {
            self.cluster_action(action)?;
        }

        if invocation.prune {
            self.prune();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockCluster, MockRuntime};

    fn create_agent(cluster: Option<Arc<MockCluster>>) -> (Agent, Arc<MockRuntime>) {
        let mock = Arc::new(MockRuntime::new());
        let cluster = cluster.map(|c| c as Arc<dyn ClusterTool>);
        let agent = Agent::with_runtime(
            &AppConfig::default(),
            mock.clone(),
            cluster,
            Some(PathBuf::from("/opt/dockerbar")),
        );
        (agent, mock)
    }

    fn invocation(commands: &[LifecycleCommand]) -> Invocation {
        Invocation {
            commands: commands.to_vec(),
            project: None,
            prune: false,
            cluster: None,
        }
    }

    #[test]
    fn test_status_renders_menu() -> Result<()> {
        let (agent, mock) = create_agent(None);
        mock.add_container("a1", "web", "", "Up 1 hour");

        let mut out = Vec::new();
        agent.run(&invocation(&[]), &mut out)?;

        assert!(String::from_utf8(out)?.starts_with("🐳1/1\n"));
        Ok(())
    }

    #[test]
    fn test_failed_listing_renders_nothing() {
        let (agent, mock) = create_agent(None);
        mock.add_container("a1", "web", "", "Up 1 hour");
        mock.set_fail_on("list_volumes");

        let mut out = Vec::new();
        assert!(agent.run(&invocation(&[]), &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_chained_commands_run_in_order() -> Result<()> {
        let (agent, mock) = create_agent(None);
        mock.add_container("a1", "web", "com.docker.compose.project=web", "Up 1 hour");
        mock.add_container("a2", "db", "com.docker.compose.project=web", "Exited (0) 1 hour ago");

        let mut out = Vec::new();
        let commands = [LifecycleCommand::Kill, LifecycleCommand::Rm];
        agent.run(&invocation(&commands), &mut out)?;

        assert!(out.is_empty());
        assert_eq!(mock.mutations(), vec!["kill:a1", "rm:a2,a1"]);
        Ok(())
    }

    /// Records how many mutations the runtime had seen when the menu arrived
    struct MenuWriter {
        mock: Arc<MockRuntime>,
        written: Vec<u8>,
        mutations_at_flush: Option<usize>,
    }

    impl Write for MenuWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.mutations_at_flush = Some(self.mock.mutations().len());
            Ok(())
        }
    }

    #[test]
    fn test_prune_after_menu() -> Result<()> {
        let (agent, mock) = create_agent(None);
        mock.set_fail_on("prune_build_cache");

        let mut inv = invocation(&[]);
        inv.prune = true;
        let mut out = MenuWriter {
            mock: mock.clone(),
            written: Vec::new(),
            mutations_at_flush: None,
        };
        agent.run(&inv, &mut out)?;

        assert!(!out.written.is_empty());
        assert_eq!(out.mutations_at_flush, Some(0));
        assert_eq!(mock.mutations(), vec!["prune:build_cache", "prune:system"]);
        Ok(())
    }

    #[test]
    fn test_cluster_section_and_action() -> Result<()> {
        let cluster = Arc::new(MockCluster::new(Some("Running")));
        let (agent, _mock) = create_agent(Some(cluster.clone()));

        let menu = agent.status()?;
        assert!(menu.contains("📦 minikube running"));

        let mut inv = invocation(&[]);
        inv.cluster = Some(ClusterAction::Stop);
        let mut out = Vec::new();
        agent.run(&inv, &mut out)?;
        assert!(out.is_empty());
        assert_eq!(cluster.get_commands(), vec!["cluster:stop"]);
        Ok(())
    }

    #[test]
    fn test_cluster_action_without_cluster() {
        let (agent, _mock) = create_agent(None);

        let err = agent.cluster_action(ClusterAction::Delete).unwrap_err();
        assert!(matches!(err.downcast_ref::<AgentError>(), Some(AgentError::Usage(_))));
    }
}
