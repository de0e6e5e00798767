//! Joins manifests read from several files into one multi-document text.
//!
//! File reads finish in whatever order the browser schedules them, so the
//! batch only promises that every piece is separated by a document marker.

/// Separator inserted between pieces.
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Collects file contents until every expected read has reported back.
#[derive(Clone, Debug, Default)]
pub struct ManifestBatch {
	expected: usize,
	settled: usize,
	combined: String,
	failed: Vec<String>,
}

impl ManifestBatch {
	/// Start a batch waiting for `expected` reads.
	pub fn new(expected: usize) -> Self {
		Self {
			expected,
			..Self::default()
		}
	}

	/// Append one file's content. Returns `true` once the batch is complete.
	pub fn push(&mut self, content: &str) -> bool {
		if !self.combined.is_empty() {
			self.combined.push_str(DOCUMENT_SEPARATOR);
		}
		self.combined.push_str(content);
		self.settle()
	}

	/// Record a read that failed. Returns `true` once the batch is complete.
	pub fn fail(&mut self, file_name: impl Into<String>) -> bool {
		self.failed.push(file_name.into());
		self.settle()
	}

	fn settle(&mut self) -> bool {
		self.settled += 1;
		self.is_complete()
	}

	/// Whether every expected read has either succeeded or failed.
	pub fn is_complete(&self) -> bool {
		self.settled >= self.expected
	}

	/// Number of files whose content was appended.
	pub fn loaded(&self) -> usize {
		self.settled - self.failed.len()
	}

	/// Names of files that could not be read.
	pub fn failed(&self) -> &[String] {
		&self.failed
	}

	/// The concatenated text so far.
	pub fn text(&self) -> &str {
		&self.combined
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_pieces_in_completion_order() {
		let mut batch = ManifestBatch::new(3);
		assert!(!batch.push("kind: B"));
		assert!(!batch.push("kind: A"));
		assert!(batch.push("kind: C"));
		assert_eq!(batch.text(), "kind: B\n---\nkind: A\n---\nkind: C");
		assert_eq!(batch.loaded(), 3);
	}

	#[test]
	fn single_file_gets_no_separator() {
		let mut batch = ManifestBatch::new(1);
		assert!(batch.push("kind: A\n"));
		assert_eq!(batch.text(), "kind: A\n");
	}

	#[test]
	fn failures_still_complete_the_batch() {
		let mut batch = ManifestBatch::new(2);
		assert!(!batch.fail("broken.yaml"));
		assert!(batch.push("kind: A"));
		assert_eq!(batch.failed(), ["broken.yaml".to_string()]);
		assert_eq!(batch.loaded(), 1);
		assert_eq!(batch.text(), "kind: A");
	}

	#[test]
	fn parses_back_into_separate_documents() {
		let mut batch = ManifestBatch::new(2);
		batch.push("kind: A\nmetadata: {name: a}");
		batch.push("kind: B\nmetadata: {name: b}\n");
		let docs = crate::resource::parse_documents(batch.text()).unwrap();
		assert_eq!(docs.len(), 2);
	}
}
