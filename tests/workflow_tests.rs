use anyhow::Result;
use clap::Parser;
use dockerbar::domain::{Project, ProjectType};
use dockerbar::infra::AppConfig;
use dockerbar::services::{Dispatcher, SnapshotOptions, SnapshotService};
use dockerbar::test_support::MockRuntime;
use dockerbar::{Agent, AgentArgs};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

fn two_containers() -> Arc<MockRuntime> {
    let mock = Arc::new(MockRuntime::new());
    mock.add_container("a1", "web-app", "com.docker.compose.project=web", "Up 2 hours");
    mock.add_container("a2", "scratch", "", "Exited (0) 3 days ago");
    mock
}

#[test]
fn test_classify_order_and_dispatch() -> Result<()> {
    let mock = two_containers();
    let snapshot = Arc::new(SnapshotService::new(mock.clone()));
    let dispatcher = Dispatcher::new(mock.clone(), snapshot.clone());

    let containers = snapshot.containers()?;
    assert_eq!(containers[0].id(), "a2");
    assert_eq!(containers[0].project, Project::single());
    assert_eq!(containers[1].id(), "a1");
    assert_eq!(containers[1].project, Project::new(ProjectType::Compose, "web"));

    assert_eq!(dispatcher.dispatch("start", Some(""))?, vec!["a2"]);

    let mock = two_containers();
    let dispatcher = Dispatcher::new(mock.clone(), Arc::new(SnapshotService::new(mock.clone())));
    assert_eq!(dispatcher.dispatch("stop", Some("web"))?, vec!["a1"]);
    assert_eq!(mock.mutations(), vec!["stop:a1"]);

    Ok(())
}

#[test]
fn test_anonymous_volumes_collapse_in_menu() -> Result<()> {
    let mock = two_containers();
    let anon = "3f9a0b1c".repeat(8);
    mock.add_volume("local", &anon);
    mock.add_volume("local", "pgdata");
    mock.add_network("bridge", "bridge");

    let agent = Agent::with_runtime(
        &AppConfig::default(),
        mock.clone(),
        None,
        Some(PathBuf::from("/opt/dockerbar")),
    );
    let menu = agent.status()?;

    assert!(menu.starts_with("🐳1/2\n---\n"));
    assert!(menu.contains("2 volumes\npgdata (local)\n1 anonymous\n"));
    assert!(!menu.contains(&anon));
    assert!(menu.contains("🐙 web\n"));
    Ok(())
}

#[test]
fn test_menu_settings_from_config_file() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    fs::write(
        temp_dir.path().join("dockerbar.toml"),
        r#"
[docker]
bin = "/usr/bin/docker"

[menu]
show_networks = false
show_volumes = false
"#,
    )?;
    let config = AppConfig::load(temp_dir.path())?;

    let mock = two_containers();
    mock.add_network("bridge", "bridge");
    let agent = Agent::with_runtime(&config, mock.clone(), None, None);
    let menu = agent.status()?;

    assert!(!menu.contains("networks"));
    assert!(menu.contains("bash=\"/usr/bin/docker\" param1=stop param2=a1"));
    assert_eq!(mock.get_commands(), vec!["list:containers"]);
    Ok(())
}

#[test]
fn test_menu_bulk_action_round_trip() -> Result<()> {
    // "Stop and remove all" for a compose project re-invokes the agent with these arguments
    let args = AgentArgs::try_parse_from(["dockerbar", "--project=web", "kill", "rm"])?;
    let invocation = args.invocation()?;

    let mock = two_containers();
    mock.add_container("a3", "web-db", "com.docker.compose.project=web", "Exited (1) 1 hour ago");
    let agent = Agent::with_runtime(&AppConfig::default(), mock.clone(), None, None);

    let mut out = Vec::new();
    agent.run(&invocation, &mut out)?;
    assert!(out.is_empty());
    assert_eq!(mock.mutations(), vec!["kill:a1", "rm:a1,a3"]);
    assert_eq!(mock.is_running("a2"), Some(false));
    assert_eq!(mock.is_running("a1"), None);
    Ok(())
}

#[test]
fn test_snapshot_options_default_queries_everything() -> Result<()> {
    let mock = two_containers();
    let snapshot = SnapshotService::new(mock.clone()).take(SnapshotOptions::default())?;

    assert_eq!(snapshot.containers.len(), 2);
    assert_eq!(snapshot.running_count(), 1);
    assert_eq!(mock.get_commands().len(), 3);
    Ok(())
}
