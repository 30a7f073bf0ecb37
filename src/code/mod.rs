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

// Code detection, formatting and highlighting for AI responses

pub mod detector;
pub mod formatter;
pub mod highlight;
pub mod patterns;
pub mod response;

use anyhow::Result;

use crate::log_debug;
pub use detector::{LanguageDetector, LexerGuesser};
pub use highlight::SyntaxHighlighter;
pub use response::{fenced_blocks, language_label, FencedBlock};

pub struct CodeProcessor {
	detector: LanguageDetector,
	highlighter: SyntaxHighlighter,
}

impl CodeProcessor {
	pub fn new(detector: LanguageDetector) -> Self {
		Self {
			detector,
			highlighter: SyntaxHighlighter::new(),
		}
	}

	pub fn detect_language(&self, code: &str) -> String {
		self.detector.detect(code)
	}

	/// Dedent and trim a snippet. Formatting does not depend on the language;
	/// detection only runs for diagnostics when no language is given.
	pub fn format_code(&self, code: &str, language: &str) -> String {
		if code.trim().is_empty() {
			return code.to_string();
		}

		if language.is_empty() {
			let detected = self.detect_language(code);
			log_debug!(
				"Formatting snippet detected as '{}'",
				if detected.is_empty() { "unknown" } else { detected.as_str() }
			);
		}

		formatter::strip_common_indent(code)
	}

	/// HTML highlighting; an empty language is detected first
	pub fn highlight_html(&self, code: &str, language: &str) -> String {
		if language.is_empty() {
			let detected = self.detect_language(code);
			return self.highlighter.highlight_html(code, &detected);
		}
		self.highlighter.highlight_html(code, language)
	}

	pub fn highlight_terminal(&self, code: &str, language: &str) -> Result<String> {
		self.highlighter.highlight_terminal(code, language)
	}

	pub fn css(&self) -> Result<String> {
		self.highlighter.css()
	}
}

impl Default for CodeProcessor {
	fn default() -> Self {
		Self::new(LanguageDetector::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_format_code_blank_passthrough() {
		let processor = CodeProcessor::default();
		assert_eq!(processor.format_code("\n   \n", ""), "\n   \n");
	}

	#[test]
	fn test_format_code_with_and_without_language() {
		let processor = CodeProcessor::new(LanguageDetector::patterns_only());
		let code = "\n    for i in range(3):\n        print(i)\n";
		let expected = "for i in range(3):\n    print(i)";

		assert_eq!(processor.format_code(code, ""), expected);
		assert_eq!(processor.format_code(code, "python"), expected);
	}

	#[test]
	fn test_highlight_html_detects_missing_language() {
		let processor = CodeProcessor::new(LanguageDetector::patterns_only());
		let html = processor.highlight_html("def f():\n    return len(x)\n", "");
		assert!(html.contains("<span class="));
	}
}
