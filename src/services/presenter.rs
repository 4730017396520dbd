//! Menu description in the BitBar / xbar / SwiftBar plugin format.
//!
//! Each line is `title | key=value ...`; `---` separates sections and a
//! leading `--` nests an item under the previous one.

use crate::domain::{ClusterStatus, Container, Project, ProjectType};
use crate::services::Snapshot;
use std::path::{Path, PathBuf};

const BUILDKIT_IMAGE_PREFIX: &str = "moby/buildkit:";

/// Paths the menu actions invoke
#[derive(Debug, Clone)]
pub struct MenuContext {
    /// This agent's executable; bulk actions are omitted when unknown
    pub agent_bin: Option<PathBuf>,
    pub docker_bin: PathBuf,
}

pub fn render(snapshot: &Snapshot, cluster: Option<&ClusterStatus>, ctx: &MenuContext) -> String {
    let mut lines = Vec::new();

    if snapshot.containers.is_empty() {
        lines.push("🐳".to_string());
    } else {
        let running = snapshot.running_count();
        lines.push(format!("🐳{running}/{}", snapshot.containers.len()));
    }
    lines.push("---".to_string());

    let mut last: Option<&Project> = None;
    for c in &snapshot.containers {
        if last != Some(&c.project) {
            last = Some(&c.project);
            if c.project.kind != ProjectType::Single {
                lines.push("---".to_string());
                project_header(&mut lines, &c.project, ctx);
            }
        }
        lines.push(container_line(c, ctx));
    }

    if !snapshot.networks.is_empty() {
        lines.push("---".to_string());
        lines.push(format!("{} networks", snapshot.networks.len()));
        for n in &snapshot.networks {
            lines.push(format!("{} ({})", n.name, n.driver));
        }
    }

    if !snapshot.volumes.is_empty() {
        lines.push("---".to_string());
        lines.push(format!("{} volumes", snapshot.volumes.len()));

        let mut anonymous = 0;
        for v in &snapshot.volumes {
            if v.is_anonymous() {
                anonymous += 1;
                continue;
            }
            lines.push(format!("{} ({})", v.name, v.driver));
        }
        if anonymous != 0 {
            lines.push(format!("{anonymous} anonymous"));
        }
    }

    if let Some(status) = cluster {
        lines.push("---".to_string());
        lines.push(format!("📦 minikube {}", status.host));
        if let Some(bin) = &ctx.agent_bin {
            if status.is_running() {
                lines.push(format!("-- ⏹ Stop | {}", action(bin, &["--minikube=stop"])));
            }
            lines.push(format!("-- ❌ Delete | {}", action(bin, &["--minikube=delete"])));
        }
    }

    if let Some(bin) = &ctx.agent_bin {
        lines.push("---".to_string());
        lines.push(format!("⭕️ Stop all containers | {}", action(bin, &["stop"])));
        lines.push(format!("🛑 Remove stopped containers | {}", action(bin, &["rm"])));
        lines.push(format!("⛔️ Prune orphan data | {}", action(bin, &["--prune"])));
        lines.push(format!(
            "📛 Stop, remove and prune everything | {}",
            action(bin, &["--prune", "kill"])
        ));
    }

    let mut menu = lines.join("\n");
    menu.push('\n');
    menu
}

fn project_header(lines: &mut Vec<String>, project: &Project, ctx: &MenuContext) {
    lines.push(format!("{} {}", project.kind.icon(), project.name));

    if !project.kind.supports_bulk_actions() {
        return;
    }
    let Some(bin) = &ctx.agent_bin else {
        return;
    };

    let filter = format!("--project={}", project.name);
    let bulk: [(&str, &[&str]); 4] = [
        ("▶️ Start all", &["start"]),
        ("🔄 Restart all", &["restart"]),
        ("⏹ Stop all", &["stop"]),
        ("⏬ Stop and remove all", &["kill", "rm"]),
    ];
    for (title, commands) in bulk {
        let mut params = vec![filter.as_str()];
        params.extend_from_slice(commands);
        lines.push(format!("-- {title} | {}", action(bin, &params)));
    }
}

fn container_line(c: &Container, ctx: &MenuContext) -> String {
    let icon = if c.image().starts_with(BUILDKIT_IMAGE_PREFIX) {
        "⚙️"
    } else {
        "🐳"
    };

    let mut line = format!("{icon} {} ", c.name());
    if !c.image().is_empty() {
        line.push_str(&format!("({}) ", c.image()));
    }

    let (color, command) = if c.is_running() {
        ("green", "stop")
    } else {
        ("red", "start")
    };
    line.push_str(&format!(
        "| color={color} {}",
        action(&ctx.docker_bin, &[command, c.id()])
    ));
    line
}

/// `bash="..." param1=... terminal=false refresh=true`
fn action(bin: &Path, params: &[&str]) -> String {
    let mut out = format!("bash={:?}", bin.display().to_string());
    for (i, param) in params.iter().enumerate() {
        out.push_str(&format!(" param{}={param}", i + 1));
    }
    out.push_str(" terminal=false refresh=true");
    out
}
