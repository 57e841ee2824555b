//! Rich-text deltas: retain/insert/delete operations with attributes.

mod types;

pub use types::{AttrMap, AttrValue, Attributes, Insertion, Operation};

use crate::Rope;
use crate::range::CharLen;

/// Errors raised when a delta does not fit the document it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeltaError {
	/// The delta consumes more characters than the document holds.
	#[error("delta spans {delta_len} chars but the document has {doc_len}")]
	OutOfBounds { delta_len: CharLen, doc_len: CharLen },
}

/// A sequence of operations describing a change to a rich document.
///
/// Characters past the last operation are implicitly retained unchanged, so a
/// delta that only reformats a prefix of the document does not need a
/// trailing retain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Delta {
	ops: Vec<Operation>,
	/// Source characters consumed by the operations.
	len: CharLen,
	/// Characters produced by the operations.
	len_after: CharLen,
}

impl Delta {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of source characters the delta consumes.
	pub fn len(&self) -> CharLen {
		self.len
	}

	/// Returns the number of characters the consumed region has afterwards.
	pub fn len_after(&self) -> CharLen {
		self.len_after
	}

	pub fn is_empty(&self) -> bool {
		self.ops.is_empty()
	}

	pub fn ops(&self) -> &[Operation] {
		&self.ops
	}

	/// Returns true if the delta changes formatting only, never text.
	pub fn is_format_only(&self) -> bool {
		self.ops.iter().all(|op| matches!(op, Operation::Retain { .. }))
	}

	/// Retains `n` characters unchanged.
	pub fn retain(&mut self, n: CharLen) -> &mut Self {
		self.retain_with(n, Attributes::new())
	}

	/// Retains `n` characters, applying `attributes` to them.
	///
	/// Consecutive retains with identical attributes are merged.
	pub fn retain_with(&mut self, n: CharLen, attributes: Attributes) -> &mut Self {
		if n == 0 {
			return self;
		}

		self.len += n;
		self.len_after += n;

		if let Some(Operation::Retain { len, attributes: prev }) = self.ops.last_mut()
			&& *prev == attributes
		{
			*len += n;
		} else {
			self.ops.push(Operation::Retain { len: n, attributes });
		}
		self
	}

	/// Deletes `n` characters. Consecutive deletes are merged.
	pub fn delete(&mut self, n: CharLen) -> &mut Self {
		if n == 0 {
			return self;
		}

		self.len += n;

		if let Some(Operation::Delete(count)) = self.ops.last_mut() {
			*count += n;
		} else {
			self.ops.push(Operation::Delete(n));
		}
		self
	}

	/// Inserts plain text at the current position.
	pub fn insert(&mut self, text: impl Into<String>) -> &mut Self {
		self.insert_with(text, Attributes::new())
	}

	/// Inserts text carrying `attributes`.
	///
	/// Inserts are kept ahead of an adjacent delete so that equivalent deltas
	/// have one canonical form, and merge with a preceding insert of identical
	/// attributes.
	pub fn insert_with(&mut self, text: impl Into<String>, attributes: Attributes) -> &mut Self {
		let ins = Insertion::new(text.into());
		if ins.is_empty() {
			return self;
		}

		self.len_after += ins.char_len();

		match self.ops.as_mut_slice() {
			[.., Operation::Insert { insertion: prev, attributes: prev_attrs }]
			| [.., Operation::Insert { insertion: prev, attributes: prev_attrs }, Operation::Delete(_)]
				if *prev_attrs == attributes =>
			{
				prev.push(ins);
			}
			[.., last @ Operation::Delete(_)] => {
				let del = std::mem::replace(last, Operation::Insert { insertion: ins, attributes });
				self.ops.push(del);
			}
			_ => {
				self.ops.push(Operation::Insert { insertion: ins, attributes });
			}
		}
		self
	}

	/// Checks that the delta fits a document of `doc_len` characters.
	pub fn check_bounds(&self, doc_len: CharLen) -> Result<(), DeltaError> {
		if self.len > doc_len {
			return Err(DeltaError::OutOfBounds {
				delta_len: self.len,
				doc_len,
			});
		}
		Ok(())
	}

	/// Applies the text part of this delta to `doc`, ignoring attributes.
	pub fn apply_text(&self, doc: &mut Rope) -> Result<(), DeltaError> {
		self.check_bounds(doc.len_chars())?;

		let mut pos = 0;
		for op in &self.ops {
			match op {
				Operation::Retain { len, .. } => {
					pos += len;
				}
				Operation::Delete(n) => {
					doc.remove(pos..pos + n);
				}
				Operation::Insert { insertion, .. } => {
					doc.insert(pos, insertion.text());
					pos += insertion.char_len();
				}
			}
		}
		Ok(())
	}
}
