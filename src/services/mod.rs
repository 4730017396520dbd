mod cleanup;
mod dispatcher;
pub mod presenter;
mod snapshot;

pub use cleanup::{CleanupService, PruneReport};
pub use dispatcher::{Dispatcher, select_targets};
pub use presenter::{MenuContext, render};
pub use snapshot::{Snapshot, SnapshotOptions, SnapshotService};
