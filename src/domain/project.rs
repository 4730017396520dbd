use super::{Container, ContainerRecord};
use std::fmt;

pub const GROUP_LABEL: &str = "com.github.dockerbar.group";
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";
pub const KUBERNETES_NAMESPACE_LABEL: &str = "io.kubernetes.pod.namespace";
pub const MINIKUBE_PROFILE_LABEL: &str = "name.minikube.sigs.k8s.io";
pub const TALOS_CLUSTER_LABEL: &str = "talos.cluster.name";

/// Owning orchestration scheme of a container.
///
/// Variant order is the presentation order: `Single < Group < Compose <
/// Kubernetes < Minikube < Talos`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectType {
    #[default]
    Single,
    Group,
    Compose,
    Kubernetes,
    Minikube,
    Talos,
}

impl ProjectType {
    /// Maps a label key to the project type it declares
    fn from_label(key: &str) -> Option<Self> {
        match key {
            GROUP_LABEL => Some(Self::Group),
            COMPOSE_PROJECT_LABEL => Some(Self::Compose),
            KUBERNETES_NAMESPACE_LABEL => Some(Self::Kubernetes),
            MINIKUBE_PROFILE_LABEL => Some(Self::Minikube),
            TALOS_CLUSTER_LABEL => Some(Self::Talos),
            _ => None,
        }
    }

    /// Kubernetes and Minikube images are digest-qualified and unreadable
    fn hides_image(self) -> bool {
        matches!(self, Self::Kubernetes | Self::Minikube)
    }

    /// Whether the menu offers start/stop/restart/remove for the whole project
    pub fn supports_bulk_actions(self) -> bool {
        matches!(self, Self::Compose | Self::Talos)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Single | Self::Group => "🐳",
            Self::Compose => "🐙",
            Self::Kubernetes => "☸️",
            Self::Minikube => "📦",
            Self::Talos => "🔺",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Group => "group",
            Self::Compose => "compose",
            Self::Kubernetes => "kubernetes",
            Self::Minikube => "minikube",
            Self::Talos => "talos",
        };
        f.write_str(name)
    }
}

/// Logical owner of a container. `name` is empty only for `Single`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Project {
    pub kind: ProjectType,
    pub name: String,
}

impl Project {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn new(kind: ProjectType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Splits a runtime label string into `(key, value)` pairs.
///
/// Segments without exactly one `=` are dropped, which also covers the empty
/// string and values that themselves contained a comma.
pub fn parse_labels(labels: &str) -> impl Iterator<Item = (&str, &str)> {
    labels.split(',').filter_map(|part| {
        let (key, value) = part.split_once('=')?;
        if value.contains('=') {
            return None;
        }
        Some((key, value))
    })
}

/// Derives the project of a record from its labels.
///
/// Labels are scanned left to right and the first recognized key with a
/// non-empty value wins.
pub fn classify(mut record: ContainerRecord) -> Container {
    let mut project = Project::single();

    for (key, value) in parse_labels(&record.labels) {
        let Some(kind) = ProjectType::from_label(key) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        project = Project::new(kind, value);
        break;
    }

    if project.kind.hides_image() {
        record.image.clear();
    }

    Container { record, project }
}
