//! Format registration for the rich document.
//!
//! A document only stores attributes whose names are registered. Annotation
//! formats are derived from [`AnnotationKind`] so the reconciler and the
//! document can never disagree about which names exist.

use std::collections::BTreeSet;

use crate::annotation::AnnotationKind;

/// Formats the editor toolbar and keyboard shortcuts can produce.
pub const BASE_FORMATS: &[&str] = &[
	"bold",
	"font",
	"italic",
	"link",
	"size",
	"underline",
	"indent",
	"list",
	"direction",
];

/// The set of attribute names a document accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRegistry {
	names: BTreeSet<String>,
}

impl Default for FormatRegistry {
	fn default() -> Self {
		Self::standard()
	}
}

impl FormatRegistry {
	/// An empty registry. Every attribute is dropped until registered.
	pub fn empty() -> Self {
		Self { names: BTreeSet::new() }
	}

	/// Base formats plus one inline format per annotation kind.
	pub fn standard() -> Self {
		let mut registry = Self::empty();
		for name in BASE_FORMATS {
			registry.register(*name);
		}
		for kind in AnnotationKind::all() {
			registry.register_annotation(kind);
		}
		registry
	}

	/// Registers an arbitrary format name. Returns false if it was already present.
	pub fn register(&mut self, name: impl Into<String>) -> bool {
		self.names.insert(name.into())
	}

	/// Registers the inline format backing an annotation kind.
	pub fn register_annotation(&mut self, kind: AnnotationKind) -> bool {
		self.register(kind.label())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.contains(name)
	}

	/// Returns true if `name` is the format of some annotation kind.
	pub fn is_annotation_format(name: &str) -> bool {
		AnnotationKind::all().any(|kind| kind.label() == name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(String::as_str)
	}
}
