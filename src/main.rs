use anyhow::Result;
use clap::Parser;
use dockerbar::infra::AppConfig;
use dockerbar::{Agent, AgentArgs};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = AgentArgs::parse();

    // stdout carries the menu, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let invocation = args.invocation()?;
    let config = AppConfig::load(&args.config_dir)?.with_docker_bin(args.docker_bin.clone());

    let agent = Agent::new(&config);
    agent.run(&invocation, &mut std::io::stdout().lock())?;

    Ok(())
}
