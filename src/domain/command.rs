use super::{AgentError, Container};
use std::fmt;
use std::str::FromStr;

/// Lifecycle action applied to a batch of containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleCommand {
    Start,
    Stop,
    Restart,
    Kill,
    Rm,
}

impl LifecycleCommand {
    pub const ALL: [Self; 5] = [Self::Start, Self::Stop, Self::Restart, Self::Kill, Self::Rm];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Kill => "kill",
            Self::Rm => "rm",
        }
    }

    /// Whether this command should be sent to `container` in its current state
    pub fn applies_to(self, container: &Container) -> bool {
        match self {
            Self::Start | Self::Rm => !container.is_running(),
            Self::Restart => true,
            Self::Stop | Self::Kill => container.is_running(),
        }
    }

    /// Extra runtime flags; `rm` also drops anonymous volumes
    pub fn extra_args(self) -> &'static [&'static str] {
        match self {
            Self::Rm => &["--force", "--volumes"],
            _ => &[],
        }
    }
}

impl FromStr for LifecycleCommand {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| AgentError::UnsupportedCommand(s.to_string()))
    }
}

impl fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContainerRecord, classify};

    fn container(status: &str) -> Container {
        classify(ContainerRecord {
            id: "c1".to_string(),
            status: status.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_parse_known_commands() {
        for cmd in LifecycleCommand::ALL {
            assert_eq!(cmd.as_str().parse::<LifecycleCommand>().unwrap(), cmd);
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = "pause".parse::<LifecycleCommand>().unwrap_err();
        assert!(matches!(err, AgentError::UnsupportedCommand(ref name) if name == "pause"));

        assert!("START".parse::<LifecycleCommand>().is_err());
        assert!("".parse::<LifecycleCommand>().is_err());
    }

    #[test]
    fn test_eligibility() {
        let running = container("Up 3 minutes");
        let stopped = container("Exited (0) 3 days ago");

        assert!(!LifecycleCommand::Start.applies_to(&running));
        assert!(LifecycleCommand::Start.applies_to(&stopped));
        assert!(!LifecycleCommand::Rm.applies_to(&running));
        assert!(LifecycleCommand::Rm.applies_to(&stopped));
        assert!(LifecycleCommand::Stop.applies_to(&running));
        assert!(!LifecycleCommand::Stop.applies_to(&stopped));
        assert!(LifecycleCommand::Kill.applies_to(&running));
        assert!(!LifecycleCommand::Kill.applies_to(&stopped));
        assert!(LifecycleCommand::Restart.applies_to(&running));
        assert!(LifecycleCommand::Restart.applies_to(&stopped));
    }

    #[test]
    fn test_rm_forces_volume_removal() {
        assert_eq!(LifecycleCommand::Rm.extra_args(), &["--force", "--volumes"]);
        assert!(LifecycleCommand::Stop.extra_args().is_empty());
    }
}
