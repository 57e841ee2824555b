use std::collections::BTreeMap;

use crate::range::CharLen;

/// The value of a single format attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrValue {
	/// A present/absent format such as `bold` or an annotation kind.
	Flag,
	/// A valued format such as `link` or `size`.
	Text(String),
}

/// Attributes stored on the document: every entry is present.
pub type AttrMap = BTreeMap<String, AttrValue>;

/// Attributes carried by a delta operation.
///
/// `Some` sets the format, `None` removes it. Names absent from the map are
/// left untouched.
pub type Attributes = BTreeMap<String, Option<AttrValue>>;

/// A text insertion with cached character length.
///
/// Storing the character count avoids repeated O(n) `.chars().count()` calls
/// when building and applying deltas.
///
/// Fields are private to enforce the invariant that `char_len` always equals
/// `text.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
	text: String,
	char_len: CharLen,
}

impl Insertion {
	/// Creates a new insertion, computing the character length once.
	#[inline]
	pub fn new(text: String) -> Self {
		let char_len = text.chars().count();
		Self { text, char_len }
	}

	/// Returns true if this insertion is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.char_len == 0
	}

	/// Returns the inserted text.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the cached character length.
	#[inline]
	pub fn char_len(&self) -> CharLen {
		self.char_len
	}

	/// Appends text from another insertion, updating the cached length.
	pub(super) fn push(&mut self, other: Insertion) {
		self.text.push_str(&other.text);
		self.char_len += other.char_len;
	}
}

/// A single operation in a [`Delta`](super::Delta).
///
/// Retains may carry attributes, which turns them into format edits over the
/// retained characters without touching the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Keep the next N characters, applying `attributes` to them.
	Retain { len: CharLen, attributes: Attributes },
	/// Delete the next N characters from the source document.
	Delete(CharLen),
	/// Insert new text at the current position with the given attributes.
	Insert { insertion: Insertion, attributes: Attributes },
}

impl Operation {
	/// Number of source characters this operation consumes.
	pub fn base_len(&self) -> CharLen {
		match self {
			Self::Retain { len, .. } | Self::Delete(len) => *len,
			Self::Insert { .. } => 0,
		}
	}
}
