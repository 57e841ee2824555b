//! The editing surface the engine reads text from and writes highlights to.

use std::sync::Arc;

use parking_lot::Mutex;
use selko_primitives::{CharLen, Delta, DeltaError, Document, EditEvent, EditOrigin, FormatRegistry};
use tokio::sync::mpsc;

/// Plain text of the document at one text revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
	pub text: String,
	/// See [`Document::text_revision`].
	pub text_revision: u64,
	pub len_chars: CharLen,
}

/// A document that can be read and annotated by the sync engine.
pub trait AnnotatedSurface: Send + Sync + 'static {
	/// Current text and text revision.
	fn snapshot(&self) -> TextSnapshot;

	/// Applies a format-only `delta` as a programmatic change, but only if the
	/// text is still at `text_revision`.
	///
	/// Formatting changes made in between do not matter. Returns `Ok(false)`
	/// without touching the document when the text has changed.
	fn apply_format(&self, text_revision: u64, delta: &Delta) -> Result<bool, DeltaError>;
}

/// A [`Document`] shared between the editor side and the sync engine.
///
/// Every applied delta is broadcast to subscribers while the document lock is
/// still held, so events arrive in revision order.
#[derive(Clone, Default)]
pub struct SharedDocument {
	doc: Arc<Mutex<Document>>,
	subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<EditEvent>>>>,
}

impl SharedDocument {
	pub fn new(doc: Document) -> Self {
		Self {
			doc: Arc::new(Mutex::new(doc)),
			subscribers: Arc::default(),
		}
	}

	/// Empty document with the given registry.
	pub fn with_registry(registry: FormatRegistry) -> Self {
		Self::new(Document::new(registry))
	}

	/// Receives every subsequent change.
	pub fn subscribe(&self) -> mpsc::UnboundedReceiver<EditEvent> {
		let (tx, rx) = mpsc::unbounded_channel();
		self.subscribers.lock().push(tx);
		rx
	}

	/// Applies `delta` and notifies subscribers. Returns the new revision.
	pub fn edit(&self, delta: &Delta, origin: EditOrigin) -> Result<u64, DeltaError> {
		let mut doc = self.doc.lock();
		doc.apply(delta)?;
		self.notify(&doc, delta, origin);
		Ok(doc.revision())
	}

	/// Appends `text` at the end of the document.
	pub fn append(&self, text: &str, origin: EditOrigin) -> Result<u64, DeltaError> {
		let mut doc = self.doc.lock();
		let mut delta = Delta::new();
		delta.retain(doc.len_chars()).insert(text);
		doc.apply(&delta)?;
		self.notify(&doc, &delta, origin);
		Ok(doc.revision())
	}

	/// Runs `f` with the document locked.
	pub fn with<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
		f(&self.doc.lock())
	}

	pub fn text(&self) -> String {
		self.doc.lock().text()
	}

	fn notify(&self, doc: &Document, delta: &Delta, origin: EditOrigin) {
		let event = EditEvent {
			delta: delta.clone(),
			origin,
			content: Arc::from(doc.text()),
			revision: doc.revision(),
		};
		self.subscribers.lock().retain(|tx| tx.send(event.clone()).is_ok());
	}
}

impl std::fmt::Debug for SharedDocument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SharedDocument")
			.field("revision", &self.doc.lock().revision())
			.finish_non_exhaustive()
	}
}

impl AnnotatedSurface for SharedDocument {
	fn snapshot(&self) -> TextSnapshot {
		let doc = self.doc.lock();
		TextSnapshot {
			text: doc.text(),
			text_revision: doc.text_revision(),
			len_chars: doc.len_chars(),
		}
	}

	fn apply_format(&self, text_revision: u64, delta: &Delta) -> Result<bool, DeltaError> {
		let mut doc = self.doc.lock();
		if doc.text_revision() != text_revision {
			return Ok(false);
		}
		doc.apply(delta)?;
		self.notify(&doc, delta, EditOrigin::Programmatic);
		Ok(true)
	}
}
