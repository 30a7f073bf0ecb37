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

// Per-language keyword rules used by the pattern-scoring fallback of the detector

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// Source form of one language's rules: weighted keyword patterns plus
/// builtin-call patterns that are each worth a flat weight of 1
pub struct LanguageRules {
	pub name: &'static str,
	pub keywords: &'static [(&'static str, u32)],
	pub builtins: &'static [&'static str],
}

pub const LANGUAGE_RULES: &[LanguageRules] = &[
	LanguageRules {
		name: "python",
		keywords: &[
			(r"\bdef\s+\w+\s*\(", 3),
			(r"\bclass\s+\w+\s*[:\(]", 3),
			(r"\bimport\s+\w+", 2),
			(r"\bfrom\s+\w+\s+import", 2),
			(r"@\w+", 1), // decorators
			(r"\basync\s+def", 3),
			(r"\bawait\s+", 2),
			(r":\s*$", 1), // block opener
		],
		builtins: &[
			r"print\s*\(",
			r"len\s*\(",
			r"range\s*\(",
			r"dict\s*\(",
			r"list\s*\(",
			r"set\s*\(",
		],
	},
	LanguageRules {
		name: "javascript",
		keywords: &[
			(r"\bfunction\s+\w+\s*\(", 3),
			(r"\bconst\s+\w+\s*=", 2),
			(r"\blet\s+\w+\s*=", 2),
			(r"\bvar\s+\w+\s*=", 1),
			(r"=>", 2),
			(r"\basync\s+function", 3),
			(r"\bawait\s+", 2),
			(r"\bconsole\.log\s*\(", 2),
		],
		builtins: &[],
	},
	LanguageRules {
		name: "java",
		keywords: &[
			(r"\bpublic\s+class\s+\w+", 3),
			(r"\bprivate\s+\w+\s+\w+\s*\(", 2),
			(r"\bprotected\s+\w+\s+\w+\s*\(", 2),
			(r"\bSystem\.out\.println\s*\(", 2),
			(r"@Override", 2),
			(r"\binterface\s+\w+", 2),
		],
		builtins: &[],
	},
];

lazy_static! {
	static ref BUILTIN_TABLE: PatternTable =
		PatternTable::compile(LANGUAGE_RULES).expect("built-in language patterns must compile");
}

/// Compiled rules for a single language
pub struct LanguagePatterns {
	pub name: &'static str,
	keywords: Vec<(Regex, u32)>,
	builtins: Vec<Regex>,
}

impl LanguagePatterns {
	/// Score a snippet already split into lines. Every rule contributes at most
	/// once, no matter how many lines it matches.
	pub fn score(&self, lines: &[&str]) -> u32 {
		let keyword_score: u32 = self
			.keywords
			.iter()
			.filter(|(pattern, _)| lines.iter().any(|line| pattern.is_match(line)))
			.map(|(_, weight)| *weight)
			.sum();

		let builtin_score = self
			.builtins
			.iter()
			.filter(|pattern| lines.iter().any(|line| pattern.is_match(line)))
			.count() as u32;

		keyword_score + builtin_score
	}
}

/// Ordered language -> rules table. Order matters: it breaks score ties.
pub struct PatternTable {
	languages: Vec<LanguagePatterns>,
}

impl PatternTable {
	/// The compiled-in table, built once per process
	pub fn builtin() -> &'static PatternTable {
		&BUILTIN_TABLE
	}

	pub fn compile(rules: &[LanguageRules]) -> Result<Self> {
		let mut languages = Vec::with_capacity(rules.len());

		for rule in rules {
			let keywords = rule
				.keywords
				.iter()
				.map(|(pattern, weight)| {
					Regex::new(pattern)
						.map(|re| (re, *weight))
						.with_context(|| format!("Invalid {} keyword pattern: {}", rule.name, pattern))
				})
				.collect::<Result<Vec<_>>>()?;

			let builtins = rule
				.builtins
				.iter()
				.map(|pattern| {
					Regex::new(pattern)
						.with_context(|| format!("Invalid {} builtin pattern: {}", rule.name, pattern))
				})
				.collect::<Result<Vec<_>>>()?;

			languages.push(LanguagePatterns {
				name: rule.name,
				keywords,
				builtins,
			});
		}

		Ok(Self { languages })
	}

	pub fn languages(&self) -> &[LanguagePatterns] {
		&self.languages
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn language<'a>(table: &'a PatternTable, name: &str) -> &'a LanguagePatterns {
		table.languages().iter().find(|l| l.name == name).unwrap()
	}

	#[test]
	fn test_builtin_table_order() {
		let names: Vec<&str> = PatternTable::builtin()
			.languages()
			.iter()
			.map(|l| l.name)
			.collect();
		assert_eq!(names, vec!["python", "javascript", "java"]);
	}

	#[test]
	fn test_rule_counts_once_per_snippet() {
		let python = language(PatternTable::builtin(), "python");

		// print( on three lines is still a single builtin hit
		let lines = ["print(1)", "print(2)", "print(3)"];
		assert_eq!(python.score(&lines), 1);

		// def (3) + colon line ending (1) + len( builtin (1)
		let lines = ["def size(x):", "    return len(x)"];
		assert_eq!(python.score(&lines), 5);
	}

	#[test]
	fn test_invalid_rule_is_reported() {
		const BROKEN: &[LanguageRules] = &[LanguageRules {
			name: "broken",
			keywords: &[(r"(unclosed", 1)],
			builtins: &[],
		}];

		let err = PatternTable::compile(BROKEN).err().unwrap();
		assert!(err.to_string().contains("broken keyword pattern"));
	}
}
