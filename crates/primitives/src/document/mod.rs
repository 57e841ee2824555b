//! Headless rich-text document: a rope plus inline attribute runs.
//!
//! Runs partition the text: their lengths always sum to the rope's char
//! length, no run is empty, and adjacent runs never carry identical
//! attributes. Every mutation goes through [`Document::apply`], which either
//! applies the whole delta or leaves the document untouched.

use crate::annotation::{AnnotationKind, SpanAnnotation};
use crate::delta::{AttrMap, Attributes, Delta, DeltaError, Operation};
use crate::format::FormatRegistry;
use crate::range::{CharIdx, CharLen, CharRange};
use crate::Rope;

/// A maximal stretch of characters sharing the same attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
	pub len: CharLen,
	pub attributes: AttrMap,
}

#[derive(Debug, Clone)]
pub struct Document {
	text: Rope,
	runs: Vec<Run>,
	registry: FormatRegistry,
	revision: u64,
	text_revision: u64,
}

impl Default for Document {
	fn default() -> Self {
		Self::new(FormatRegistry::standard())
	}
}

impl Document {
	/// Creates an empty document accepting the formats in `registry`.
	pub fn new(registry: FormatRegistry) -> Self {
		Self {
			text: Rope::new(),
			runs: Vec::new(),
			registry,
			revision: 0,
			text_revision: 0,
		}
	}

	/// Creates an unformatted document with the standard registry.
	pub fn from_text(text: &str) -> Self {
		let mut doc = Self::default();
		doc.text = Rope::from_str(text);
		let len = doc.text.len_chars();
		if len > 0 {
			doc.runs.push(Run {
				len,
				attributes: AttrMap::new(),
			});
		}
		doc
	}

	pub fn text(&self) -> String {
		self.text.to_string()
	}

	pub fn rope(&self) -> &Rope {
		&self.text
	}

	pub fn len_chars(&self) -> CharLen {
		self.text.len_chars()
	}

	/// Incremented once per applied delta.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Incremented once per applied delta that changes the text.
	///
	/// Format-only deltas leave it alone, so offsets computed against one
	/// text revision stay valid across formatting changes.
	pub fn text_revision(&self) -> u64 {
		self.text_revision
	}

	pub fn registry(&self) -> &FormatRegistry {
		&self.registry
	}

	pub fn runs(&self) -> &[Run] {
		&self.runs
	}

	/// Attributes of the character at `idx`, or `None` past the end.
	pub fn attributes_at(&self, idx: CharIdx) -> Option<&AttrMap> {
		let mut start = 0;
		for run in &self.runs {
			if idx < start + run.len {
				return Some(&run.attributes);
			}
			start += run.len;
		}
		None
	}

	/// Ranges where the format `name` is set, with adjacent runs coalesced.
	pub fn format_ranges(&self, name: &str) -> Vec<CharRange> {
		let mut ranges: Vec<CharRange> = Vec::new();
		let mut start = 0;
		for run in &self.runs {
			let end = start + run.len;
			if run.attributes.contains_key(name) {
				match ranges.last_mut() {
					Some(last) if last.end == start => last.end = end,
					_ => ranges.push(CharRange::new(start, end)),
				}
			}
			start = end;
		}
		ranges
	}

	/// Annotation highlights currently present, sorted by start offset.
	pub fn annotations(&self) -> Vec<SpanAnnotation> {
		let mut spans: Vec<SpanAnnotation> = AnnotationKind::all()
			.flat_map(|kind| {
				self.format_ranges(kind.label())
					.into_iter()
					.map(move |r| SpanAnnotation::new(r.start, r.len(), kind))
			})
			.collect();
		spans.sort_by_key(|span| (span.start, span.kind.precedence()));
		spans
	}

	/// Applies `delta` atomically.
	///
	/// Attributes whose names are not registered are dropped. On error the
	/// document is unchanged.
	pub fn apply(&mut self, delta: &Delta) -> Result<(), DeltaError> {
		delta.check_bounds(self.len_chars())?;

		let mut text = self.text.clone();
		delta.apply_text(&mut text)?;

		let mut runs = RunBuilder::default();
		let mut source = RunCursor::new(&self.runs);
		for op in delta.ops() {
			match op {
				Operation::Retain { len, attributes } => {
					source.take(*len, |n, base| runs.push(n, self.merge(base, attributes)));
				}
				Operation::Delete(len) => {
					source.take(*len, |_, _| {});
				}
				Operation::Insert { insertion, attributes } => {
					runs.push(insertion.char_len(), self.merge(&AttrMap::new(), attributes));
				}
			}
		}
		source.take(CharLen::MAX, |n, base| runs.push(n, base.clone()));

		self.text = text;
		self.runs = runs.finish();
		self.revision += 1;
		if !delta.is_format_only() {
			self.text_revision += 1;
		}
		debug_assert_eq!(self.runs.iter().map(|r| r.len).sum::<CharLen>(), self.len_chars());
		Ok(())
	}

	fn merge(&self, base: &AttrMap, changes: &Attributes) -> AttrMap {
		let mut out = base.clone();
		for (name, value) in changes {
			if !self.registry.contains(name) {
				continue;
			}
			match value {
				Some(value) => {
					out.insert(name.clone(), value.clone());
				}
				None => {
					out.remove(name);
				}
			}
		}
		out
	}
}

/// Walks existing runs, handing out pieces of a requested length.
struct RunCursor<'a> {
	runs: &'a [Run],
	idx: usize,
	offset: CharLen,
}

impl<'a> RunCursor<'a> {
	fn new(runs: &'a [Run]) -> Self {
		Self { runs, idx: 0, offset: 0 }
	}

	/// Consumes up to `n` characters, calling `f` once per run piece.
	fn take(&mut self, mut n: CharLen, mut f: impl FnMut(CharLen, &AttrMap)) {
		while n > 0 {
			let Some(run) = self.runs.get(self.idx) else {
				return;
			};
			let piece = (run.len - self.offset).min(n);
			f(piece, &run.attributes);
			self.offset += piece;
			n -= piece;
			if self.offset == run.len {
				self.idx += 1;
				self.offset = 0;
			}
		}
	}
}

#[derive(Default)]
struct RunBuilder {
	runs: Vec<Run>,
}

impl RunBuilder {
	fn push(&mut self, len: CharLen, attributes: AttrMap) {
		if len == 0 {
			return;
		}
		if let Some(last) = self.runs.last_mut()
			&& last.attributes == attributes
		{
			last.len += len;
			return;
		}
		self.runs.push(Run { len, attributes });
	}

	fn finish(self) -> Vec<Run> {
		self.runs
	}
}

#[cfg(test)]
mod tests;
