//! Annotation reconciliation.
//!
//! Turns the service's span list into format edits that cover the whole
//! document: every character ends up either highlighted with exactly one kind
//! or cleared of all kinds. Characters are never inserted or deleted, and
//! attributes outside the annotation kind set are never named.

use std::cmp::Ordering;

use selko_primitives::{
	AnnotationKind, AttrValue, Attributes, CharLen, CharRange, Delta, SpanAnnotation,
};
use tracing::debug;

/// One formatting step produced by [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatEdit {
	/// Remove every annotation kind from the range.
	Clear(CharRange),
	/// Highlight the range with `kind`, removing any other kind.
	Set { range: CharRange, kind: AnnotationKind },
}

impl FormatEdit {
	pub fn range(&self) -> CharRange {
		match self {
			Self::Clear(range) | Self::Set { range, .. } => *range,
		}
	}

	/// Delta attributes implementing this edit.
	pub fn attributes(&self) -> Attributes {
		let keep = match self {
			Self::Clear(_) => None,
			Self::Set { kind, .. } => Some(*kind),
		};
		AnnotationKind::all()
			.map(|kind| {
				let value = (Some(kind) == keep).then_some(AttrValue::Flag);
				(kind.label().to_string(), value)
			})
			.collect()
	}
}

/// Ordering used before the overlap walk.
///
/// By start offset, then kind precedence, then longer spans first. Without
/// the precedence step two spans at the same offset would keep whatever order
/// the service happened to send.
pub fn annotation_order(a: &SpanAnnotation, b: &SpanAnnotation) -> Ordering {
	a.start
		.cmp(&b.start)
		.then_with(|| a.kind.precedence().cmp(&b.kind.precedence()))
		.then_with(|| b.length.cmp(&a.length))
}

/// Computes the format edits that make the document's highlights match
/// `annotations`.
///
/// Annotations overlapping an earlier (in [`annotation_order`]) annotation
/// are dropped, as are empty ones and ones starting past the end. Spans
/// running past the end are truncated.
pub fn reconcile(annotations: &[SpanAnnotation], document_len: CharLen) -> Vec<FormatEdit> {
	let mut sorted = annotations.to_vec();
	sorted.sort_by(annotation_order);

	let mut edits = Vec::with_capacity(sorted.len() * 2 + 1);
	let mut cursor = 0;

	for annotation in sorted {
		if annotation.length == 0 || annotation.start >= document_len {
			debug!(start = annotation.start, length = annotation.length, document_len, "reconcile.out_of_range");
			continue;
		}
		if annotation.start < cursor {
			debug!(start = annotation.start, kind = %annotation.kind, cursor, "reconcile.overlap_dropped");
			continue;
		}
		if annotation.start > cursor {
			edits.push(FormatEdit::Clear(CharRange::new(cursor, annotation.start)));
		}
		let end = annotation.end().min(document_len);
		edits.push(FormatEdit::Set {
			range: CharRange::new(annotation.start, end),
			kind: annotation.kind,
		});
		cursor = end;
	}

	if cursor < document_len {
		edits.push(FormatEdit::Clear(CharRange::new(cursor, document_len)));
	}

	edits
}

/// Folds format edits into a single format-only delta.
pub fn to_delta(edits: &[FormatEdit]) -> Delta {
	let mut delta = Delta::new();
	let mut pos = 0;
	for edit in edits {
		let range = edit.range();
		delta.retain(range.start.saturating_sub(pos));
		delta.retain_with(range.len(), edit.attributes());
		pos = range.end;
	}
	delta
}

#[cfg(test)]
mod tests;
