use super::Project;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
const ANONYMOUS_VOLUME_NAME_LEN: usize = 64;

/// One row of `docker container ls --format={{json .}}`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub names: String,
    pub image: String,
    /// Flat `key=value,key=value` label list
    pub labels: String,
    /// Human readable, e.g. `Up 2 hours` or `Exited (0) 3 days ago`
    pub status: String,
    /// Normalized state (`running`, `exited`, ...), empty on older runtimes
    pub state: String,
    pub created_at: String,
}

impl ContainerRecord {
    pub fn is_running(&self) -> bool {
        self.state == "running" || self.status.starts_with("Up ")
    }

    /// Creation time, or the Unix epoch when the runtime's text can't be parsed
    pub fn created_at(&self) -> DateTime<FixedOffset> {
        parse_created_at(&self.created_at).unwrap_or_default()
    }
}

// `2024-01-02 15:04:05 +0100 CET`: the trailing zone abbreviation repeats the offset.
fn parse_created_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    let head: Vec<&str> = raw.split_whitespace().take(3).collect();
    DateTime::parse_from_str(&head.join(" "), CREATED_AT_FORMAT).ok()
}

/// A container record after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub record: ContainerRecord,
    pub project: Project,
}

impl Container {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.names
    }

    /// Image reference; empty when classification dropped it
    pub fn image(&self) -> &str {
        &self.record.image
    }

    pub fn is_running(&self) -> bool {
        self.record.is_running()
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub driver: String,
    pub scope: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct VolumeRecord {
    pub name: String,
    pub driver: String,
}

impl VolumeRecord {
    /// Unnamed volumes get a random 64 hex digit name from the local driver
    pub fn is_anonymous(&self) -> bool {
        self.driver == "local"
            && self.name.len() == ANONYMOUS_VOLUME_NAME_LEN
            && self
                .name
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}
