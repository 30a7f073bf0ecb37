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

// Provider abstraction for the generative-language service

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod google;

pub use google::GeminiProvider;

/// Token usage reported by the provider
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenUsage {
	pub prompt_tokens: u64,
	pub output_tokens: u64,
	pub total_tokens: u64, // prompt_tokens + output_tokens unless the provider says otherwise
	#[serde(default)]
	pub cost: Option<f64>,
	#[serde(default)]
	pub request_time_ms: Option<u64>,
}

/// Provider response containing the AI completion
#[derive(Debug, Clone)]
pub struct ProviderResponse {
	pub content: String,
	pub usage: Option<TokenUsage>,
	pub finish_reason: Option<String>,
}

impl ProviderResponse {
	/// Response carrying only text
	pub fn text(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			usage: None,
			finish_reason: None,
		}
	}
}

/// Free-text in, free-text out. Used both for answers and as the fallback
/// section classifier; failures are plain error messages.
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
	/// Get the provider name (e.g., "google")
	fn name(&self) -> &str;

	/// Check if the provider supports the given model
	fn supports_model(&self, model: &str) -> bool;

	/// Send a single-turn generation request
	async fn generate(&self, prompt: &str) -> Result<ProviderResponse>;
}

#[cfg(test)]
pub mod testing {
	use super::{AiProvider, ProviderResponse};
	use anyhow::{anyhow, Result};
	use std::collections::VecDeque;
	use std::sync::Mutex;

	/// Provider double that replays canned answers in order and records every
	/// prompt it receives. `None` entries, or running out of answers, fail.
	pub struct ScriptedProvider {
		answers: Mutex<VecDeque<Option<String>>>,
		prompts: Mutex<Vec<String>>,
	}

	impl ScriptedProvider {
		pub fn new(answers: &[Option<&str>]) -> Self {
			Self {
				answers: Mutex::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
				prompts: Mutex::new(Vec::new()),
			}
		}

		pub fn answering(answer: &str) -> Self {
			Self::new(&[Some(answer)])
		}

		pub fn failing() -> Self {
			Self::new(&[])
		}

		pub fn prompts(&self) -> Vec<String> {
			self.prompts.lock().unwrap().clone()
		}

		pub fn calls(&self) -> usize {
			self.prompts.lock().unwrap().len()
		}
	}

	#[async_trait::async_trait]
	impl AiProvider for ScriptedProvider {
		fn name(&self) -> &str {
			"scripted"
		}

		fn supports_model(&self, _model: &str) -> bool {
			true
		}

		async fn generate(&self, prompt: &str) -> Result<ProviderResponse> {
			self.prompts.lock().unwrap().push(prompt.to_string());
			match self.answers.lock().unwrap().pop_front().flatten() {
				Some(answer) => Ok(ProviderResponse::text(answer)),
				None => Err(anyhow!("429 Resource has been exhausted")),
			}
		}
	}
}
