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

// Keyword scoring with a single AI fallback for ambiguous prompts

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::keywords::KeywordTable;
use super::Section;
use crate::log_debug;
use crate::providers::AiProvider;

lazy_static! {
	static ref WORD: Regex = Regex::new(r"\b\w+\b").expect("word pattern must compile");
	static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]").expect("punctuation pattern must compile");
}

/// Lowercased word tokens of a prompt
pub fn tokenize(prompt: &str) -> HashSet<String> {
	let lowered = prompt.to_lowercase();
	WORD.find_iter(&lowered)
		.map(|m| m.as_str().to_string())
		.collect()
}

/// Instruction sent to the provider when keywords are not conclusive
pub fn classification_prompt(prompt: &str) -> String {
	format!(
		"Classify this question into one of these categories: \
		health, banking, general, movies, music. Question: {}",
		prompt
	)
}

/// Map a free-text model answer onto a known section. Only the outer
/// whitespace of the raw answer is trimmed; the cleaned text must be a
/// section name exactly.
pub fn normalize_answer(answer: &str) -> Option<Section> {
	let lowered = answer.trim().to_lowercase();
	let cleaned = PUNCTUATION.replace_all(&lowered, "");
	Section::ALL
		.iter()
		.copied()
		.find(|section| section.name() == cleaned)
}

/// Outcome of keyword scoring
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
	pub scores: Vec<(Section, usize)>,
	pub max_score: usize,
	pub section: Section,
}

impl Verdict {
	/// General verdicts (including no keyword hit at all) are escalated
	pub fn needs_oracle(&self) -> bool {
		self.section == Section::General
	}
}

pub struct SectionClassifier {
	keywords: &'static KeywordTable,
}

impl SectionClassifier {
	pub fn new(keywords: &'static KeywordTable) -> Self {
		Self { keywords }
	}

	/// Score the prompt against every keyword set. Among the top-scoring
	/// sections the first non-general one in table order wins.
	pub fn classify_by_keywords(&self, prompt: &str) -> Verdict {
		let tokens = tokenize(prompt);
		let scores = self.keywords.score(&tokens);
		let max_score = scores.iter().map(|(_, score)| *score).max().unwrap_or(0);

		let candidates: Vec<Section> = scores
			.iter()
			.filter(|(_, score)| *score == max_score && *score > 0)
			.map(|(section, _)| *section)
			.collect();

		let section = candidates
			.iter()
			.copied()
			.find(|section| *section != Section::General)
			.or_else(|| candidates.first().copied())
			.unwrap_or(Section::General);

		log_debug!("Section scores: {:?} -> {}", scores, section);

		Verdict {
			scores,
			max_score,
			section,
		}
	}

	/// Keyword verdict, escalated to one provider call when it is "general".
	/// Any provider error or unrecognised answer keeps "general".
	pub async fn classify(&self, prompt: &str, oracle: &dyn AiProvider) -> Section {
		let verdict = self.classify_by_keywords(prompt);
		if !verdict.needs_oracle() {
			return verdict.section;
		}

		log_debug!("Keywords inconclusive, asking {} to classify", oracle.name());

		match oracle.generate(&classification_prompt(prompt)).await {
			Ok(response) => match normalize_answer(&response.content) {
				Some(section) => section,
				None => {
					log_debug!("Unrecognised classification answer: {:?}", response.content);
					Section::General
				}
			},
			Err(e) => {
				log_debug!("Classification call failed, defaulting to general: {}", e);
				Section::General
			}
		}
	}
}

impl Default for SectionClassifier {
	fn default() -> Self {
		Self::new(KeywordTable::builtin())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::providers::testing::ScriptedProvider;

	#[test]
	fn test_tokenize() {
		let tokens = tokenize("What's a GOOD diet?");
		let expected: HashSet<String> = ["what", "s", "a", "good", "diet"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		assert_eq!(tokens, expected);
	}

	#[tokio::test]
	async fn test_health_prompt_skips_oracle() {
		let oracle = ScriptedProvider::answering("banking");
		let classifier = SectionClassifier::default();

		let section = classifier
			.classify("What is a good diet for weight loss?", &oracle)
			.await;
		assert_eq!(section, Section::Health);
		assert_eq!(oracle.calls(), 0);
	}

	#[tokio::test]
	async fn test_banking_prompt() {
		let oracle = ScriptedProvider::failing();
		let section = SectionClassifier::default()
			.classify("Tell me about stocks and investment strategy", &oracle)
			.await;
		assert_eq!(section, Section::Banking);
		assert_eq!(oracle.calls(), 0);
	}

	#[tokio::test]
	async fn test_no_overlap_falls_back_to_general_on_failure() {
		let oracle = ScriptedProvider::failing();
		let section = SectionClassifier::default().classify("xyz qwerty", &oracle).await;

		assert_eq!(section, Section::General);
		assert_eq!(oracle.calls(), 1);
		assert_eq!(
			oracle.prompts()[0],
			"Classify this question into one of these categories: health, banking, general, movies, music. Question: xyz qwerty"
		);
	}

	#[tokio::test]
	async fn test_unrecognised_answer_keeps_general() {
		let oracle = ScriptedProvider::answering("Philosophy");
		let section = SectionClassifier::default().classify("xyz qwerty", &oracle).await;
		assert_eq!(section, Section::General);
	}

	#[tokio::test]
	async fn test_oracle_answer_is_normalized() {
		let oracle = ScriptedProvider::answering("  **Music.**\n");
		let section = SectionClassifier::default()
			.classify("who sings the best lullabies", &oracle)
			.await;
		assert_eq!(section, Section::Music);
	}

	#[tokio::test]
	async fn test_general_keywords_still_escalate() {
		let oracle = ScriptedProvider::answering("movies");
		let classifier = SectionClassifier::default();

		let verdict = classifier.classify_by_keywords("latest tiktok meme");
		assert_eq!(verdict.section, Section::General);
		assert_eq!(verdict.max_score, 2);

		let section = classifier.classify("latest tiktok meme", &oracle).await;
		assert_eq!(section, Section::Movies);
		assert_eq!(oracle.calls(), 1);
	}

	#[test]
	fn test_tie_with_general_prefers_specific_section() {
		// stress (health) vs meditation (general)
		let verdict = SectionClassifier::default().classify_by_keywords("meditation for stress");
		assert_eq!(verdict.section, Section::Health);
		assert!(!verdict.needs_oracle());
	}

	#[test]
	fn test_ties_resolve_in_table_order() {
		let classifier = SectionClassifier::default();

		// movie (movies) vs album (music)
		let verdict = classifier.classify_by_keywords("a movie album");
		assert_eq!(verdict.section, Section::Movies);

		// three-way tie among specific sections plus general
		let verdict = classifier.classify_by_keywords("doctor bank movie meme");
		assert_eq!(verdict.max_score, 1);
		assert_eq!(verdict.section, Section::Health);
	}

	#[test]
	fn test_no_keywords_defaults_to_general() {
		let verdict = SectionClassifier::default().classify_by_keywords("");
		assert_eq!(verdict.max_score, 0);
		assert_eq!(verdict.section, Section::General);
		assert!(verdict.needs_oracle());
	}

	#[test]
	fn test_normalize_answer() {
		assert_eq!(normalize_answer("Health"), Some(Section::Health));
		assert_eq!(normalize_answer("banking!"), Some(Section::Banking));
		assert_eq!(normalize_answer("The answer is music"), None);
		assert_eq!(normalize_answer("- music"), None);
		assert_eq!(normalize_answer("music.\n\n"), Some(Section::Music));
		assert_eq!(normalize_answer(""), None);
	}
}
