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

// Prompt -> section -> persona prompt -> generation -> formatted answer

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::code::CodeProcessor;
use crate::config::Config;
use crate::log_info;
use crate::providers::{AiProvider, GeminiProvider};
use crate::section::{Section, SectionClassifier};

/// Request body of the ask endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
	#[serde(default)]
	pub prompt: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_section: Option<String>,
}

/// Success body of the ask endpoint. `redirect`/`section` are only present
/// when the caller's current section differs from the detected one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
	pub response: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub section: Option<Section>,
}

/// Failure of the ask endpoint with the HTTP status it maps to
#[derive(Debug, Clone, PartialEq)]
pub struct AskError {
	pub status: u16,
	pub message: String,
}

impl AskError {
	fn bad_request(message: &str) -> Self {
		Self {
			status: 400,
			message: message.to_string(),
		}
	}

	fn server(error: &anyhow::Error) -> Self {
		Self {
			status: 500,
			message: format!("Server error: {}", error),
		}
	}

	/// `{"error": message}` body
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::json!({ "error": self.message })
	}
}

impl fmt::Display for AskError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.message, self.status)
	}
}

impl std::error::Error for AskError {}

/// Result of one ask round-trip
#[derive(Debug, Clone)]
pub struct Answer {
	pub section: Section,
	pub raw: String,
	pub response: String,
	pub redirect: Option<Section>,
}

impl Answer {
	pub fn to_response(&self) -> AskResponse {
		AskResponse {
			response: self.response.clone(),
			redirect: self.redirect.map(|_| true),
			section: self.redirect,
		}
	}
}

pub struct Companion {
	provider: Box<dyn AiProvider>,
	classifier: SectionClassifier,
	processor: CodeProcessor,
	personality: String,
}

impl Companion {
	pub fn new(provider: Box<dyn AiProvider>, personality: &str) -> Self {
		Self {
			provider,
			classifier: SectionClassifier::default(),
			processor: CodeProcessor::default(),
			personality: personality.to_string(),
		}
	}

	pub fn from_config(config: &Config) -> Result<Self> {
		let provider = GeminiProvider::from_config(config)?;
		Ok(Self::new(Box::new(provider), &config.personality))
	}

	pub fn with_processor(mut self, processor: CodeProcessor) -> Self {
		self.processor = processor;
		self
	}

	pub fn processor(&self) -> &CodeProcessor {
		&self.processor
	}

	pub async fn classify(&self, prompt: &str) -> Section {
		self.classifier.classify(prompt, self.provider.as_ref()).await
	}

	pub fn system_instruction(&self, section: Section) -> String {
		format!("{}\n\n{}", self.personality, section.instruction())
	}

	pub fn enhanced_prompt(&self, section: Section, prompt: &str) -> String {
		format!("{}\n\nUser question: {}", self.system_instruction(section), prompt)
	}

	/// Classify, answer in the section's persona and tidy the reply's code blocks
	pub async fn ask(&self, prompt: &str, current_section: Option<&str>) -> Result<Answer> {
		let prompt = prompt.trim();
		if prompt.is_empty() {
			return Err(anyhow!("Prompt cannot be empty"));
		}

		let section = self.classify(prompt).await;
		log_info!("Answering in section '{}'", section);

		let reply = self
			.provider
			.generate(&self.enhanced_prompt(section, prompt))
			.await?;
		let response = self.processor.format_response(&reply.content);

		let redirect = match current_section.map(str::trim) {
			Some(current) if !current.is_empty() && current != section.name() => Some(section),
			_ => None,
		};

		Ok(Answer {
			section,
			raw: reply.content,
			response,
			redirect,
		})
	}

	/// Endpoint semantics: validate the body, run `ask`, map failures to statuses
	pub async fn handle(&self, request: &AskRequest) -> Result<AskResponse, AskError> {
		let prompt = request
			.prompt
			.as_deref()
			.ok_or_else(|| AskError::bad_request("Missing 'prompt'"))?;

		if prompt.trim().is_empty() {
			return Err(AskError::bad_request("Prompt cannot be empty"));
		}

		self.ask(prompt, request.current_section.as_deref())
			.await
			.map(|answer| answer.to_response())
			.map_err(|e| AskError::server(&e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::code::LanguageDetector;
	use crate::config::default_personality;
	use crate::providers::testing::ScriptedProvider;
	use std::sync::Arc;

	struct Shared(Arc<ScriptedProvider>);

	#[async_trait::async_trait]
	impl AiProvider for Shared {
		fn name(&self) -> &str {
			self.0.name()
		}

		fn supports_model(&self, model: &str) -> bool {
			self.0.supports_model(model)
		}

		async fn generate(&self, prompt: &str) -> Result<crate::providers::ProviderResponse> {
			self.0.generate(prompt).await
		}
	}

	fn companion(answers: &[Option<&str>]) -> (Companion, Arc<ScriptedProvider>) {
		let provider = Arc::new(ScriptedProvider::new(answers));
		let companion = Companion::new(Box::new(Shared(provider.clone())), &default_personality())
			.with_processor(CodeProcessor::new(LanguageDetector::patterns_only()));
		(companion, provider)
	}

	#[tokio::test]
	async fn test_ask_builds_persona_prompt_and_formats_reply() {
		let (companion, provider) =
			companion(&[Some("Eat more fiber:\n```python\n  meals = ['oats']\n  print(meals)\n```")]);

		let answer = companion.ask("  What is a good diet for weight loss?  ", None).await.unwrap();

		assert_eq!(answer.section, Section::Health);
		assert_eq!(answer.response, "Eat more fiber:\n\n\nPython:\n\nmeals = ['oats']\nprint(meals)");
		assert!(answer.redirect.is_none());

		// Only the generation call: health was decided by keywords
		let prompts = provider.prompts();
		assert_eq!(prompts.len(), 1);
		assert!(prompts[0].starts_with("You are a friendly, funny, interactive AI assistant."));
		assert!(prompts[0].contains("\n\nYou are a health expert. Answer only in health context.\n\n"));
		assert!(prompts[0].ends_with("User question: What is a good diet for weight loss?"));
	}

	#[tokio::test]
	async fn test_redirect_only_when_section_changes() {
		let (companion, _) = companion(&[Some("ok"), Some("ok"), Some("ok")]);

		let answer = companion.ask("best album of the year", Some("movies")).await.unwrap();
		assert_eq!(answer.redirect, Some(Section::Music));
		assert_eq!(
			serde_json::to_value(answer.to_response()).unwrap(),
			serde_json::json!({ "response": "ok", "redirect": true, "section": "music" })
		);

		let answer = companion.ask("best album of the year", Some("music")).await.unwrap();
		assert!(answer.redirect.is_none());
		assert_eq!(
			serde_json::to_value(answer.to_response()).unwrap(),
			serde_json::json!({ "response": "ok" })
		);

		let answer = companion.ask("best album of the year", Some("")).await.unwrap();
		assert!(answer.redirect.is_none());
	}

	#[tokio::test]
	async fn test_general_prompt_uses_two_calls() {
		let (companion, provider) = companion(&[Some("banking"), Some("Spend less.")]);

		let answer = companion.ask("xyz qwerty", None).await.unwrap();
		assert_eq!(answer.section, Section::Banking);
		assert_eq!(answer.response, "Spend less.");

		let prompts = provider.prompts();
		assert_eq!(prompts.len(), 2);
		assert!(prompts[0].starts_with("Classify this question"));
		assert!(prompts[1].contains("You are a finance expert."));
	}

	#[tokio::test]
	async fn test_handle_validates_request() {
		let (companion, provider) = companion(&[]);

		let err = companion.handle(&AskRequest::default()).await.unwrap_err();
		assert_eq!(err, AskError::bad_request("Missing 'prompt'"));
		assert_eq!(err.to_json(), serde_json::json!({ "error": "Missing 'prompt'" }));

		let request = AskRequest {
			prompt: Some("   ".to_string()),
			current_section: None,
		};
		let err = companion.handle(&request).await.unwrap_err();
		assert_eq!(err.status, 400);
		assert_eq!(err.message, "Prompt cannot be empty");
		assert_eq!(provider.calls(), 0);
	}

	#[tokio::test]
	async fn test_handle_maps_generation_failure_to_server_error() {
		// Classification is keyword-decided, generation fails
		let (companion, _) = companion(&[None]);
		let request: AskRequest =
			serde_json::from_str(r#"{"prompt": "Tell me about stocks and investment strategy"}"#).unwrap();

		let err = companion.handle(&request).await.unwrap_err();
		assert_eq!(err.status, 500);
		assert!(err.message.starts_with("Server error: "));
	}
}
