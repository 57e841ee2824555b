use pretty_assertions::assert_eq;

use super::*;
use crate::delta::AttrValue;

fn set(name: &str) -> Attributes {
	Attributes::from([(name.to_string(), Some(AttrValue::Flag))])
}

fn unset(name: &str) -> Attributes {
	Attributes::from([(name.to_string(), None)])
}

#[test]
fn test_from_text_is_unformatted() {
	let doc = Document::from_text("hello");
	assert_eq!(doc.text(), "hello");
	assert_eq!(doc.revision(), 0);
	assert_eq!(doc.runs().len(), 1);
	assert!(doc.runs()[0].attributes.is_empty());
}

#[test]
fn test_empty_document_has_no_runs() {
	let doc = Document::from_text("");
	assert_eq!(doc.len_chars(), 0);
	assert!(doc.runs().is_empty());
	assert!(doc.attributes_at(0).is_none());
}

#[test]
fn test_retain_with_attributes_splits_runs() {
	let mut doc = Document::from_text("hello world");
	let mut delta = Delta::new();
	delta.retain(6).retain_with(5, set("bold"));
	doc.apply(&delta).unwrap();

	assert_eq!(doc.text(), "hello world");
	assert_eq!(doc.format_ranges("bold"), vec![CharRange::new(6, 11)]);
	assert_eq!(doc.revision(), 1);
}

#[test]
fn test_removing_attribute_merges_runs_back() {
	let mut doc = Document::from_text("abcdef");
	let mut delta = Delta::new();
	delta.retain(2).retain_with(2, set("italic"));
	doc.apply(&delta).unwrap();
	assert_eq!(doc.runs().len(), 3);

	let mut delta = Delta::new();
	delta.retain(2).retain_with(2, unset("italic"));
	doc.apply(&delta).unwrap();
	assert_eq!(doc.runs().len(), 1);
}

#[test]
fn test_insert_inside_formatted_run() {
	let mut doc = Document::from_text("abcd");
	let mut delta = Delta::new();
	delta.retain_with(4, set("bold"));
	doc.apply(&delta).unwrap();

	let mut delta = Delta::new();
	delta.retain(2).insert("XY");
	doc.apply(&delta).unwrap();

	assert_eq!(doc.text(), "abXYcd");
	assert_eq!(
		doc.format_ranges("bold"),
		vec![CharRange::new(0, 2), CharRange::new(4, 6)]
	);
}

#[test]
fn test_delete_across_runs() {
	let mut doc = Document::from_text("abcdef");
	let mut delta = Delta::new();
	delta.retain(3).retain_with(3, set("bold"));
	doc.apply(&delta).unwrap();

	let mut delta = Delta::new();
	delta.retain(2).delete(2);
	doc.apply(&delta).unwrap();

	assert_eq!(doc.text(), "abef");
	assert_eq!(doc.format_ranges("bold"), vec![CharRange::new(2, 4)]);
}

#[test]
fn test_unregistered_attributes_are_dropped() {
	let mut doc = Document::from_text("abc");
	let mut delta = Delta::new();
	delta.retain_with(3, set("blink"));
	doc.apply(&delta).unwrap();

	assert!(doc.format_ranges("blink").is_empty());
	assert_eq!(doc.runs().len(), 1);
}

#[test]
fn test_out_of_bounds_delta_leaves_document_untouched() {
	let mut doc = Document::from_text("abc");
	let mut delta = Delta::new();
	delta.retain_with(2, set("bold")).delete(5);

	assert!(doc.apply(&delta).is_err());
	assert_eq!(doc.text(), "abc");
	assert!(doc.format_ranges("bold").is_empty());
	assert_eq!(doc.revision(), 0);
}

#[test]
fn test_annotations_are_read_back_sorted() {
	let mut doc = Document::from_text("one two three");
	let mut delta = Delta::new();
	delta
		.retain_with(3, set("passive"))
		.retain(5)
		.retain_with(5, set("adverb"));
	doc.apply(&delta).unwrap();

	assert_eq!(
		doc.annotations(),
		vec![
			SpanAnnotation::new(0, 3, AnnotationKind::Passive),
			SpanAnnotation::new(8, 5, AnnotationKind::Adverb),
		]
	);
}

#[test]
fn test_multibyte_offsets_are_chars() {
	let mut doc = Document::from_text("äää bbb");
	let mut delta = Delta::new();
	delta.retain_with(3, set("adverb"));
	doc.apply(&delta).unwrap();
	assert_eq!(doc.format_ranges("adverb"), vec![CharRange::new(0, 3)]);
	assert_eq!(doc.text(), "äää bbb");
}

#[test]
fn test_format_only_delta_keeps_text_revision() {
	let mut doc = Document::from_text("very");
	assert_eq!(doc.text_revision(), 0);

	let mut bold = Delta::new();
	bold.retain_with(4, set("bold"));
	doc.apply(&bold).unwrap();
	assert_eq!(doc.revision(), 1);
	assert_eq!(doc.text_revision(), 0);

	let mut typing = Delta::new();
	typing.retain(4).insert("!");
	doc.apply(&typing).unwrap();
	assert_eq!(doc.revision(), 2);
	assert_eq!(doc.text_revision(), 1);
}

#[test]
fn test_from_empty_text_has_no_runs() {
	let doc = Document::from_text("");
	assert!(doc.runs().is_empty());
	assert_eq!(doc.len_chars(), 0);
	assert_eq!(doc.text_revision(), 0);
}
