//! Incremental annotation synchronization.
//!
//! Watches a document for user edits, waits for typing to pause, sends the
//! text to an [`AnnotationClient`](selko_client::AnnotationClient) and folds
//! the returned spans back into the document as inline formatting. Responses
//! that a newer edit has superseded are dropped.

pub mod controller;
pub mod machine;
pub mod reconcile;
mod sink;
mod surface;

pub use controller::{DEFAULT_DEBOUNCE, SyncConfig, SyncController, SyncHandle, SyncStatus};
pub use machine::{SyncMachine, SyncPhase, SyncStats};
pub use reconcile::{FormatEdit, reconcile, to_delta};
pub use sink::{MetricsSink, NullSink};
pub use surface::{AnnotatedSurface, SharedDocument, TextSnapshot};
