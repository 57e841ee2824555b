//! Core types for annotated rich text: annotation kinds, deltas, documents.

/// Annotation kinds, span annotations and metrics snapshots.
pub mod annotation;
/// Retain/insert/delete operations with attributes.
pub mod delta;
/// Rope-backed rich-text document with attribute runs.
pub mod document;
/// Edit origin tagging and change notifications.
pub mod edit;
/// Registration of the formats a document accepts.
pub mod format;
/// Character index and range types.
pub mod range;

pub use annotation::{AnnotationKind, MetricsSnapshot, SpanAnnotation};
pub use delta::{AttrMap, AttrValue, Attributes, Delta, DeltaError, Operation};
pub use document::{Document, Run};
pub use edit::{EditEvent, EditOrigin};
pub use format::FormatRegistry;
pub use range::{CharIdx, CharLen, CharRange};
pub use ropey::{Rope, RopeSlice};
