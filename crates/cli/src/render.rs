//! Plain-text rendering of highlights and metrics.

use selko_primitives::{Document, MetricsSnapshot, SpanAnnotation};

/// One line per highlight: kind, char range and the highlighted text.
pub fn highlights(doc: &Document) -> Vec<String> {
	doc.annotations().iter().map(|span| highlight(doc, span)).collect()
}

fn highlight(doc: &Document, span: &SpanAnnotation) -> String {
	let end = span.end().min(doc.len_chars());
	let text = doc.rope().slice(span.start.min(end)..end).to_string();
	format!("{:<20} {:>5}..{:<5} {:?}", span.kind.label(), span.start, end, text)
}

pub fn metrics(m: &MetricsSnapshot) -> String {
	format!(
		"words {}  sentences {}  adverbs {}  passive {}  readability {:.1}  long-word readability {:.1}",
		m.word_count, m.sentence_count, m.adverb_word_count, m.passive_sentence_count, m.readability, m.readability_long_words,
	)
}
