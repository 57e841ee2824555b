use std::sync::Arc;

use crate::delta::Delta;

/// Who caused a document change.
///
/// The synchronization engine reacts to [`EditOrigin::User`] changes only.
/// Writes performed by the engine itself are [`EditOrigin::Programmatic`] and
/// must never start a new analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOrigin {
	/// Typing, pasting, toolbar formatting.
	User,
	/// Changes applied by code, such as annotation reconciliation.
	Programmatic,
}

impl EditOrigin {
	pub const fn is_user(self) -> bool {
		matches!(self, Self::User)
	}
}

/// A change notification emitted after a delta has been applied.
#[derive(Debug, Clone)]
pub struct EditEvent {
	/// The delta that was applied.
	pub delta: Delta,
	pub origin: EditOrigin,
	/// Plain text of the document after the change.
	pub content: Arc<str>,
	/// Document revision after the change.
	pub revision: u64,
}
