use pretty_assertions::assert_eq;
use proptest::prelude::*;
use selko_primitives::{Document, Operation};

use super::*;

fn span(start: usize, length: usize, kind: AnnotationKind) -> SpanAnnotation {
	SpanAnnotation::new(start, length, kind)
}

fn clear(start: usize, end: usize) -> FormatEdit {
	FormatEdit::Clear(CharRange::new(start, end))
}

fn set(start: usize, end: usize, kind: AnnotationKind) -> FormatEdit {
	FormatEdit::Set {
		range: CharRange::new(start, end),
		kind,
	}
}

#[test]
fn test_no_annotations_clears_whole_document() {
	assert_eq!(reconcile(&[], 10), vec![clear(0, 10)]);
}

#[test]
fn test_single_annotation_is_bracketed_by_clears() {
	let edits = reconcile(&[span(2, 3, AnnotationKind::Adverb)], 10);
	assert_eq!(edits, vec![clear(0, 2), set(2, 5, AnnotationKind::Adverb), clear(5, 10)]);
}

#[test]
fn test_overlapping_annotation_is_dropped() {
	let edits = reconcile(
		&[span(0, 5, AnnotationKind::Passive), span(3, 2, AnnotationKind::Adverb)],
		10,
	);
	assert_eq!(edits, vec![set(0, 5, AnnotationKind::Passive), clear(5, 10)]);
}

#[test]
fn test_unsorted_input_is_sorted_first() {
	let edits = reconcile(
		&[span(6, 2, AnnotationKind::Passive), span(1, 2, AnnotationKind::Adverb)],
		8,
	);
	assert_eq!(
		edits,
		vec![
			clear(0, 1),
			set(1, 3, AnnotationKind::Adverb),
			clear(3, 6),
			set(6, 8, AnnotationKind::Passive),
		]
	);
}

#[test]
fn test_adjacent_annotations_need_no_clear_between() {
	let edits = reconcile(
		&[span(0, 2, AnnotationKind::Adverb), span(2, 2, AnnotationKind::Passive)],
		4,
	);
	assert_eq!(edits, vec![set(0, 2, AnnotationKind::Adverb), set(2, 4, AnnotationKind::Passive)]);
}

#[test]
fn test_tie_break_prefers_passive_then_adverb_then_difficult_sentence() {
	let sentence = span(0, 20, AnnotationKind::DifficultSentence);
	let adverb = span(0, 4, AnnotationKind::Adverb);
	let passive = span(0, 6, AnnotationKind::Passive);

	for input in [
		vec![sentence, adverb, passive],
		vec![adverb, sentence, passive],
		vec![passive, adverb, sentence],
	] {
		let edits = reconcile(&input, 20);
		assert_eq!(edits, vec![set(0, 6, AnnotationKind::Passive), clear(6, 20)]);
	}

	let edits = reconcile(&[sentence, adverb], 20);
	assert_eq!(edits, vec![set(0, 4, AnnotationKind::Adverb), clear(4, 20)]);
}

#[test]
fn test_same_kind_same_start_prefers_longer_span() {
	let edits = reconcile(
		&[span(0, 2, AnnotationKind::Passive), span(0, 5, AnnotationKind::Passive)],
		5,
	);
	assert_eq!(edits, vec![set(0, 5, AnnotationKind::Passive)]);
}

#[test]
fn test_out_of_range_annotations_are_clamped_or_dropped() {
	let edits = reconcile(
		&[
			span(1, 0, AnnotationKind::Adverb),
			span(3, 10, AnnotationKind::Passive),
			span(12, 1, AnnotationKind::Adverb),
		],
		5,
	);
	assert_eq!(edits, vec![clear(0, 3), set(3, 5, AnnotationKind::Passive)]);
}

#[test]
fn test_huge_lengths_are_truncated_without_overflow() {
	let edits = reconcile(
		&[span(1, usize::MAX, AnnotationKind::Adverb), span(usize::MAX, usize::MAX, AnnotationKind::Passive)],
		10,
	);
	assert_eq!(edits, vec![clear(0, 1), set(1, 10, AnnotationKind::Adverb)]);
	assert_eq!(to_delta(&edits).len(), 10);
}

#[test]
fn test_empty_document_produces_no_edits() {
	assert!(reconcile(&[span(0, 3, AnnotationKind::Adverb)], 0).is_empty());
	assert!(to_delta(&reconcile(&[], 0)).is_empty());
}

#[test]
fn test_set_attributes_clear_other_kinds() {
	let attrs = set(0, 1, AnnotationKind::Adverb).attributes();
	assert_eq!(attrs.get("adverb"), Some(&Some(AttrValue::Flag)));
	assert_eq!(attrs.get("passive"), Some(&None));
	assert_eq!(attrs.get("difficult_sentence"), Some(&None));
	assert_eq!(attrs.len(), AnnotationKind::all().count());
}

#[test]
fn test_delta_is_format_only_and_covers_document() {
	let edits = reconcile(&[span(2, 3, AnnotationKind::Adverb)], 10);
	let delta = to_delta(&edits);
	assert!(delta.is_format_only());
	assert_eq!(delta.len(), 10);
	assert_eq!(delta.ops().len(), 3);
	assert!(matches!(delta.ops()[1], Operation::Retain { len: 3, .. }));
}

#[test]
fn test_reconciliation_preserves_unrelated_formatting() {
	let mut doc = Document::from_text("very nice day");
	let mut bold = Delta::new();
	bold.retain_with(
		13,
		Attributes::from([("bold".to_string(), Some(AttrValue::Flag))]),
	);
	doc.apply(&bold).unwrap();

	let first = to_delta(&reconcile(&[span(0, 4, AnnotationKind::Adverb)], 13));
	doc.apply(&first).unwrap();
	assert_eq!(doc.annotations(), vec![span(0, 4, AnnotationKind::Adverb)]);

	let second = to_delta(&reconcile(&[span(5, 4, AnnotationKind::Passive)], 13));
	doc.apply(&second).unwrap();

	assert_eq!(doc.text(), "very nice day");
	assert_eq!(doc.annotations(), vec![span(5, 4, AnnotationKind::Passive)]);
	assert_eq!(doc.format_ranges("bold"), vec![CharRange::new(0, 13)]);
}

fn arb_kind() -> impl Strategy<Value = AnnotationKind> {
	prop_oneof![
		Just(AnnotationKind::Passive),
		Just(AnnotationKind::Adverb),
		Just(AnnotationKind::DifficultSentence),
	]
}

/// Mostly small offsets, with occasional values near `usize::MAX`.
fn arb_offset() -> impl Strategy<Value = usize> {
	prop_oneof![
		8 => 0usize..60,
		1 => (usize::MAX - 64)..=usize::MAX,
		1 => Just(usize::MAX),
	]
}

fn arb_annotations() -> impl Strategy<Value = Vec<SpanAnnotation>> {
	prop::collection::vec(
		(arb_offset(), arb_offset(), arb_kind()).prop_map(|(start, length, kind)| span(start, length, kind)),
		0..12,
	)
}

proptest! {
	#[test]
	fn prop_edits_tile_the_document(annotations in arb_annotations(), len in 0usize..50) {
		let edits = reconcile(&annotations, len);
		let mut pos = 0;
		for edit in &edits {
			let range = edit.range();
			prop_assert_eq!(range.start, pos);
			prop_assert!(!range.is_empty());
			pos = range.end;
		}
		prop_assert_eq!(pos, len);
	}

	#[test]
	fn prop_every_highlight_comes_from_an_annotation(annotations in arb_annotations(), len in 1usize..50) {
		for edit in reconcile(&annotations, len) {
			if let FormatEdit::Set { range, kind } = edit {
				let from_input = annotations
					.iter()
					.any(|a| a.kind == kind && a.start == range.start && range.end == a.end().min(len));
				prop_assert!(from_input);
			}
		}
	}

	#[test]
	fn prop_reconcile_is_order_independent(annotations in arb_annotations(), len in 0usize..50) {
		let mut reversed = annotations.clone();
		reversed.reverse();
		prop_assert_eq!(reconcile(&annotations, len), reconcile(&reversed, len));
	}

	#[test]
	fn prop_applied_delta_never_changes_text(annotations in arb_annotations(), text in "[a-zäö ]{0,40}") {
		let mut doc = Document::from_text(&text);
		let delta = to_delta(&reconcile(&annotations, doc.len_chars()));
		prop_assert!(delta.is_format_only());
		doc.apply(&delta).unwrap();
		prop_assert_eq!(doc.text(), text);
	}
}
