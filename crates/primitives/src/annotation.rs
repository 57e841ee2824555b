use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::range::{CharIdx, CharLen};

/// The closed set of stylistic issues the analysis service can flag.
///
/// This enum is the single source of truth for annotation formats: the
/// reconciler clears every variant when a region loses its highlight, and the
/// document's [`FormatRegistry`](crate::FormatRegistry) registers one inline
/// format per variant. Adding a kind means adding a variant here and nothing
/// else.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
	/// A verb (or auxiliary chain) in passive voice.
	Passive,
	/// An adverb.
	Adverb,
	/// A sentence whose readability score falls below the service's threshold.
	DifficultSentence,
}

impl AnnotationKind {
	/// Returns the wire label, which doubles as the inline format name.
	pub fn label(self) -> &'static str {
		self.into()
	}

	/// Iterates every kind in declaration order.
	pub fn all() -> impl Iterator<Item = Self> {
		Self::iter()
	}

	/// Tie-break rank for annotations starting at the same offset.
	///
	/// Lower ranks sort first and therefore win the overlap. Word-level kinds
	/// beat sentence-level ones so a difficult sentence opening with an
	/// adverb still shows the adverb.
	pub const fn precedence(self) -> u8 {
		match self {
			Self::Passive => 0,
			Self::Adverb => 1,
			Self::DifficultSentence => 2,
		}
	}
}

/// A labeled half-open character range `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanAnnotation {
	pub start: CharIdx,
	pub length: CharLen,
	pub kind: AnnotationKind,
}

impl SpanAnnotation {
	pub const fn new(start: CharIdx, length: CharLen, kind: AnnotationKind) -> Self {
		Self { start, length, kind }
	}

	/// Exclusive end offset, saturating at `CharIdx::MAX` for lengths the
	/// service should never have sent.
	pub const fn end(&self) -> CharIdx {
		self.start.saturating_add(self.length)
	}
}

/// Document statistics reported alongside each analysis.
///
/// Replaced wholesale on every accepted response, never patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
	pub word_count: u64,
	pub sentence_count: u64,
	pub adverb_word_count: u64,
	pub passive_sentence_count: u64,
	pub readability: f64,
	pub readability_long_words: f64,
}
