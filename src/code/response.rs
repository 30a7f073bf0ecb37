// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Markdown fenced-block discovery and re-emission with language labels

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::ops::Range;

use super::CodeProcessor;

lazy_static! {
	// Opening fence with optional tag, non-greedy body, closing fence on its own line start
	static ref FENCED_BLOCK: Regex =
		Regex::new(r"(?s)```(\w+)?\n(.*?)\n```").expect("fenced block pattern must compile");
}

/// A fenced code block borrowed from the surrounding text
#[derive(Debug, Clone, PartialEq)]
pub struct FencedBlock<'a> {
	pub range: Range<usize>,
	pub language: Option<&'a str>,
	pub body: &'a str,
}

impl<'a> FencedBlock<'a> {
	fn from_captures(caps: &Captures<'a>) -> Option<Self> {
		let whole = caps.get(0)?;
		Some(Self {
			range: whole.range(),
			language: caps.get(1).map(|m| m.as_str()),
			body: caps.get(2).map_or("", |m| m.as_str()),
		})
	}
}

/// All fenced blocks in document order
pub fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
	FENCED_BLOCK
		.captures_iter(text)
		.filter_map(|caps| FencedBlock::from_captures(&caps))
		.collect()
}

/// Display label for a language tag: first letter upper-cased, the rest
/// lower-cased; "Code" when the tag is empty
pub fn language_label(language: &str) -> String {
	let mut chars = language.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
		None => "Code".to_string(),
	}
}

impl CodeProcessor {
	/// Replace every fenced block with a labelled, dedented rendition. Prose
	/// between blocks is left exactly as it is.
	pub fn format_response(&self, text: &str) -> String {
		if text.is_empty() {
			return String::new();
		}

		let replaced = FENCED_BLOCK.replace_all(text, |caps: &Captures| {
			let language = caps.get(1).map_or("", |m| m.as_str());
			let body = caps.get(2).map_or("", |m| m.as_str());
			self.render_block(language, body)
		});

		replaced.trim().to_string()
	}

	fn render_block(&self, language: &str, body: &str) -> String {
		let formatted = self.format_code(body, language);

		let language = if language.is_empty() {
			self.detect_language(&formatted)
		} else {
			language.to_string()
		};

		format!("\n\n{}:\n\n{}\n", language_label(&language), formatted)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::code::detector::LanguageDetector;

	fn processor() -> CodeProcessor {
		CodeProcessor::new(LanguageDetector::patterns_only())
	}

	#[test]
	fn test_tagged_block_is_labelled_and_dedented() {
		let text = "```python\n  def f():\n      return 1\n```";
		assert_eq!(
			processor().format_response(text),
			"Python:\n\ndef f():\n    return 1"
		);
	}

	#[test]
	fn test_untagged_block_uses_detection() {
		let text = "Try this:\n```\nconst x = 5;\nconsole.log(x);\n```\nDone.";
		assert_eq!(
			processor().format_response(text),
			"Try this:\n\n\nJavascript:\n\nconst x = 5;\nconsole.log(x);\n\nDone."
		);
	}

	#[test]
	fn test_block_with_deeper_first_line() {
		let text = "```python\n    x = 1\n  y = 2\n```";
		assert_eq!(processor().format_response(text), "Python:\n\nx = 1\ny = 2");
	}

	#[test]
	fn test_unknown_language_labelled_code() {
		let text = "```\nSELECT 1;\n```";
		assert_eq!(processor().format_response(text), "Code:\n\nSELECT 1;");
	}

	#[test]
	fn test_text_without_fences_is_only_trimmed() {
		let text = "\n# Heading\n\n* **bold** bullet\n* _italic_ bullet\n\nParagraph.  \n";
		assert_eq!(
			processor().format_response(text),
			"# Heading\n\n* **bold** bullet\n* _italic_ bullet\n\nParagraph."
		);
		assert_eq!(processor().format_response(""), "");
	}

	#[test]
	fn test_multiple_blocks_and_blank_lines_in_body() {
		let text = "A\n```java\n    @Override\n\n    public String toString() {}\n```\nB\n```py\nx = 1\n```";
		assert_eq!(
			processor().format_response(text),
			"A\n\n\nJava:\n\n@Override\n\npublic String toString() {}\n\nB\n\n\nPy:\n\nx = 1"
		);
	}

	#[test]
	fn test_fenced_blocks_discovery() {
		let text = "intro\n```rust\nfn main() {}\n```\nmiddle\n```\nplain\n```";
		let blocks = fenced_blocks(text);

		assert_eq!(blocks.len(), 2);
		assert_eq!(blocks[0].language, Some("rust"));
		assert_eq!(blocks[0].body, "fn main() {}");
		assert_eq!(&text[blocks[0].range.clone()], "```rust\nfn main() {}\n```");
		assert_eq!(blocks[1].language, None);
		assert_eq!(blocks[1].body, "plain");
	}

	#[test]
	fn test_language_label() {
		assert_eq!(language_label("python"), "Python");
		assert_eq!(language_label("JAVA"), "Java");
		assert_eq!(language_label(""), "Code");
	}
}
