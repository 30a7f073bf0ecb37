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

// Language detection: a pluggable lexer-guessing strategy with a weighted
// regex scorer behind it

use super::patterns::PatternTable;
use crate::log_debug;

/// Content-based language guess. Returns the language's primary alias, or
/// `None` when the strategy cannot tell.
pub trait LexerGuesser: Send + Sync {
	fn name(&self) -> &str;

	fn guess(&self, code: &str) -> Option<String>;
}

pub struct LanguageDetector {
	guesser: Option<Box<dyn LexerGuesser>>,
	patterns: &'static PatternTable,
}

impl LanguageDetector {
	pub fn new(guesser: Option<Box<dyn LexerGuesser>>, patterns: &'static PatternTable) -> Self {
		Self { guesser, patterns }
	}

	/// Detector that only uses the built-in pattern table
	pub fn patterns_only() -> Self {
		Self::new(None, PatternTable::builtin())
	}

	/// Best-guess language tag, or an empty string when nothing matches
	pub fn detect(&self, code: &str) -> String {
		if code.trim().is_empty() {
			return String::new();
		}

		if let Some(guesser) = &self.guesser {
			if let Some(alias) = guesser.guess(code) {
				log_debug!("Language guessed by {}: {}", guesser.name(), alias);
				return alias;
			}
		}

		self.detect_by_patterns(code)
	}

	/// Pattern-scoring fallback. Ties go to the language listed first in the table.
	pub fn detect_by_patterns(&self, code: &str) -> String {
		let mut best: Option<(&str, u32)> = None;

		for (name, score) in self.scores(code) {
			if score == 0 {
				continue;
			}
			if best.map_or(true, |(_, best_score)| score > best_score) {
				best = Some((name, score));
			}
		}

		match best {
			Some((name, score)) => {
				log_debug!("Language detected by patterns: {} (score {})", name, score);
				name.to_string()
			}
			None => String::new(),
		}
	}

	/// Per-language scores in table order
	pub fn scores(&self, code: &str) -> Vec<(&'static str, u32)> {
		let lines: Vec<&str> = code.split('\n').collect();

		self.patterns
			.languages()
			.iter()
			.map(|language| (language.name, language.score(&lines)))
			.collect()
	}
}

impl Default for LanguageDetector {
	fn default() -> Self {
		Self::new(
			Some(Box::new(super::highlight::FirstLineGuesser)),
			PatternTable::builtin(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::code::patterns::LanguageRules;

	struct FixedGuesser(Option<&'static str>);

	impl LexerGuesser for FixedGuesser {
		fn name(&self) -> &str {
			"fixed"
		}

		fn guess(&self, _code: &str) -> Option<String> {
			self.0.map(str::to_string)
		}
	}

	#[test]
	fn test_blank_input_yields_empty_label() {
		let detector = LanguageDetector::patterns_only();
		assert_eq!(detector.detect(""), "");
		assert_eq!(detector.detect("   \n\t\n"), "");
	}

	#[test]
	fn test_python_snippets() {
		let detector = LanguageDetector::patterns_only();

		let code = "import os\n\ndef main():\n    print(os.getcwd())\n";
		assert_eq!(detector.detect(code), "python");

		let code = "class Greeter:\n    def hello(self, name):\n        return len(name)";
		assert_eq!(detector.detect(code), "python");
	}

	#[test]
	fn test_javascript_snippets() {
		let detector = LanguageDetector::patterns_only();

		let code = "const add = (a, b) => a + b;\nconsole.log(add(1, 2));";
		assert_eq!(detector.detect(code), "javascript");

		let code = "function greet(name) {\n  let msg = 'hi ' + name;\n  return msg;\n}";
		assert_eq!(detector.detect(code), "javascript");
	}

	#[test]
	fn test_java_snippets() {
		let detector = LanguageDetector::patterns_only();

		let code = "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"hi\");\n    }\n}";
		assert_eq!(detector.detect(code), "java");

		let code = "@Override\nprotected String describe() {\n    return name;\n}";
		assert_eq!(detector.detect(code), "java");
	}

	#[test]
	fn test_unmatched_input_yields_empty_label() {
		let detector = LanguageDetector::patterns_only();
		assert_eq!(detector.detect("SELECT * FROM users WHERE id = 1"), "");
	}

	#[test]
	fn test_ties_go_to_first_language_in_table() {
		// "await x" scores 2 for both python and javascript
		let detector = LanguageDetector::patterns_only();
		assert_eq!(detector.detect("await x"), "python");

		const SWAPPED: &[LanguageRules] = &[
			LanguageRules {
				name: "first",
				keywords: &[(r"\bshared\b", 2)],
				builtins: &[],
			},
			LanguageRules {
				name: "second",
				keywords: &[(r"\bshared\b", 2)],
				builtins: &[],
			},
		];
		let table: &'static PatternTable = Box::leak(Box::new(PatternTable::compile(SWAPPED).unwrap()));
		let detector = LanguageDetector::new(None, table);
		assert_eq!(detector.detect("shared"), "first");
	}

	#[test]
	fn test_guesser_takes_precedence() {
		let detector = LanguageDetector::new(
			Some(Box::new(FixedGuesser(Some("ruby")))),
			PatternTable::builtin(),
		);
		assert_eq!(detector.detect("def f():\n    pass"), "ruby");

		let detector = LanguageDetector::new(
			Some(Box::new(FixedGuesser(None))),
			PatternTable::builtin(),
		);
		assert_eq!(detector.detect("def f():\n    pass"), "python");
	}

	#[test]
	fn test_scores_in_table_order() {
		let detector = LanguageDetector::patterns_only();
		let scores = detector.scores("let x = 1;");
		assert_eq!(scores, vec![("python", 0), ("javascript", 2), ("java", 0)]);
	}
}
