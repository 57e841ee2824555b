/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for selko and the one the analysis
/// service reports annotation offsets in.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A half-open character range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
	pub start: CharIdx,
	pub end: CharIdx,
}

impl CharRange {
	/// Creates a range; `end` is clamped so it never precedes `start`.
	pub fn new(start: CharIdx, end: CharIdx) -> Self {
		Self {
			start,
			end: end.max(start),
		}
	}

	#[inline]
	pub fn len(&self) -> CharLen {
		self.end - self.start
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}

impl From<std::ops::Range<CharIdx>> for CharRange {
	fn from(range: std::ops::Range<CharIdx>) -> Self {
		Self::new(range.start, range.end)
	}
}
