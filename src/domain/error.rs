use thiserror::Error;

/// Failure of a single external tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Status { command: String, status: String },

    #[error("`{command}` returned malformed JSON: {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by one agent invocation.
///
/// Everything except `PruneSubAction` aborts the invocation.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("listing {what} failed")]
    Query {
        what: &'static str,
        #[source]
        source: ToolError,
    },

    #[error("unsupported command `{0}` (expected one of: start, stop, restart, kill, rm)")]
    UnsupportedCommand(String),

    #[error("{command} failed")]
    Dispatch {
        command: String,
        #[source]
        source: ToolError,
    },

    #[error("prune step `{action}` failed")]
    PruneSubAction {
        action: &'static str,
        #[source]
        source: ToolError,
    },

    #[error("usage: {0}")]
    Usage(String),
}
