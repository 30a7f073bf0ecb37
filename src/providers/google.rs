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

// Google Gemini (Generative Language API) provider implementation

use super::{AiProvider, ProviderResponse, TokenUsage};
use crate::config::Config;
use crate::log_debug;
use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini pricing constants (per 1M tokens in USD)
const PRICING: &[(&str, f64, f64)] = &[
	// Model, Input price per 1M tokens, Output price per 1M tokens
	("gemini-2.5-pro", 1.25, 10.00),
	("gemini-2.5-flash", 0.30, 2.50),
	("gemini-2.0-flash-lite", 0.075, 0.30),
	("gemini-2.0-flash", 0.10, 0.40),
	("gemini-1.5-pro", 1.25, 5.00),
	("gemini-1.5-flash", 0.075, 0.30),
	("gemini-pro", 0.50, 1.50),
];

/// Calculate cost for Gemini models; more specific names are listed first
fn calculate_cost(model: &str, prompt_tokens: u64, output_tokens: u64) -> Option<f64> {
	PRICING
		.iter()
		.find(|(pricing_model, _, _)| model.contains(pricing_model))
		.map(|(_, input_price, output_price)| {
			let input_cost = (prompt_tokens as f64 / 1_000_000.0) * input_price;
			let output_cost = (output_tokens as f64 / 1_000_000.0) * output_price;
			input_cost + output_cost
		})
}

pub struct GeminiProvider {
	client: Client,
	api_key: Option<String>,
	model: String,
	temperature: f32,
	api_base: String,
}

impl Default for GeminiProvider {
	fn default() -> Self {
		Self {
			client: Client::new(),
			api_key: None,
			model: crate::config::default_model(),
			temperature: 0.7,
			api_base: GEMINI_API_BASE.to_string(),
		}
	}
}

impl GeminiProvider {
	pub fn new(
		api_key: Option<String>,
		model: &str,
		temperature: f32,
		timeout: Option<Duration>,
	) -> Result<Self> {
		let mut builder = Client::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self {
			client: builder.build().context("Failed to build HTTP client")?,
			api_key,
			model: model.to_string(),
			temperature,
			api_base: GEMINI_API_BASE.to_string(),
		})
	}

	pub fn from_config(config: &Config) -> Result<Self> {
		let timeout = match config.request_timeout_seconds {
			0 => None,
			seconds => Some(Duration::from_secs(seconds)),
		};
		Self::new(
			config.effective_api_key().map(str::to_string),
			&config.model,
			config.temperature,
			timeout,
		)
	}

	/// Point the provider at a different endpoint root (proxies, test servers)
	pub fn with_api_base(mut self, api_base: &str) -> Self {
		self.api_base = api_base.trim_end_matches('/').to_string();
		self
	}

	fn api_key(&self) -> Result<&str> {
		self.api_key
			.as_deref()
			.filter(|key| !key.trim().is_empty())
			.ok_or_else(|| {
				anyhow!("GEMINI_API_KEY not found. Set it in the environment, a .env file or the config file.")
			})
	}

	/// Model-name check shared by `supports_model` and config validation
	pub fn is_gemini_model(model: &str) -> bool {
		model.starts_with("gemini") || model.starts_with("models/gemini")
	}

	fn endpoint(&self) -> String {
		format!("{}/models/{}:generateContent", self.api_base, self.model)
	}

	pub fn request_body(&self, prompt: &str) -> Value {
		serde_json::json!({
			"contents": [{
				"role": "user",
				"parts": [{ "text": prompt }]
			}],
			"generationConfig": {
				"temperature": self.temperature,
				"candidateCount": 1
			}
		})
	}
}

#[async_trait::async_trait]
impl AiProvider for GeminiProvider {
	fn name(&self) -> &str {
		"google"
	}

	fn supports_model(&self, model: &str) -> bool {
		Self::is_gemini_model(model)
	}

	async fn generate(&self, prompt: &str) -> Result<ProviderResponse> {
		let api_key = self.api_key()?;
		let request_body = self.request_body(prompt);

		log_debug!("Sending {} chars to {}", prompt.len(), self.model);
		let started = Instant::now();

		let response = self
			.client
			.post(self.endpoint())
			.header(API_KEY_HEADER, api_key)
			.header("Content-Type", "application/json")
			.json(&request_body)
			.send()
			.await?;

		let status = response.status();
		let response_text = response.text().await?;
		let request_time_ms = started.elapsed().as_millis() as u64;

		let response_json: Value = match serde_json::from_str(&response_text) {
			Ok(json) => json,
			Err(e) => {
				return Err(anyhow!(
					"Failed to parse response JSON: {}. Response: {}",
					e,
					response_text
				));
			}
		};

		if !status.is_success() {
			return Err(anyhow!(
				"Gemini API error: {}",
				describe_error(status, &response_json, &response_text)
			));
		}

		let mut parsed = parse_response(&response_json, &self.model)?;
		if let Some(usage) = parsed.usage.as_mut() {
			usage.request_time_ms = Some(request_time_ms);
			log_debug!("{}", describe_usage(usage));
		}

		Ok(parsed)
	}
}

/// One-line usage summary for the debug log
fn describe_usage(usage: &TokenUsage) -> String {
	let mut summary = format!(
		"Gemini usage: {} prompt + {} output tokens",
		usage.prompt_tokens, usage.output_tokens
	);
	if let Some(ms) = usage.request_time_ms {
		summary.push_str(&format!(" in {}ms", ms));
	}
	if let Some(cost) = usage.cost {
		summary.push_str(&format!(", ${:.6}", cost));
	}
	summary
}

/// Fold the API's error object into a single line
fn describe_error(status: StatusCode, response_json: &Value, response_text: &str) -> String {
	let mut error_details = vec![format!("HTTP {}", status)];

	if let Some(error_obj) = response_json.get("error") {
		if let Some(msg) = error_obj.get("message").and_then(|m| m.as_str()) {
			error_details.push(format!("Message: {}", msg));
		}
		if let Some(code) = error_obj.get("code").and_then(|c| c.as_i64()) {
			error_details.push(format!("Code: {}", code));
		}
		if let Some(kind) = error_obj.get("status").and_then(|s| s.as_str()) {
			error_details.push(format!("Status: {}", kind));
		}
	}

	if error_details.len() == 1 {
		error_details.push(format!("Raw response: {}", response_text));
	}

	error_details.join(" | ")
}

/// Extract the first candidate's text and the usage metadata
pub fn parse_response(response_json: &Value, model: &str) -> Result<ProviderResponse> {
	let candidate = response_json
		.get("candidates")
		.and_then(|c| c.as_array())
		.and_then(|candidates| candidates.first());

	let candidate = match candidate {
		Some(candidate) => candidate,
		None => {
			let reason = response_json
				.get("promptFeedback")
				.and_then(|f| f.get("blockReason"))
				.and_then(|r| r.as_str());
			return Err(match reason {
				Some(reason) => anyhow!("Gemini blocked the prompt: {}", reason),
				None => anyhow!("Gemini returned no candidates"),
			});
		}
	};

	let content: String = candidate
		.get("content")
		.and_then(|c| c.get("parts"))
		.and_then(|p| p.as_array())
		.map(|parts| {
			parts
				.iter()
				.filter_map(|part| part.get("text").and_then(|t| t.as_str()))
				.collect()
		})
		.unwrap_or_default();

	let finish_reason = candidate
		.get("finishReason")
		.and_then(|fr| fr.as_str())
		.map(|s| s.to_string());

	if let Some(ref reason) = finish_reason {
		log_debug!("Finish reason: {}", reason);
	}

	let usage = response_json.get("usageMetadata").map(|usage_obj| {
		let prompt_tokens = usage_obj
			.get("promptTokenCount")
			.and_then(|v| v.as_u64())
			.unwrap_or(0);
		let output_tokens = usage_obj
			.get("candidatesTokenCount")
			.and_then(|v| v.as_u64())
			.unwrap_or(0);
		let total_tokens = usage_obj
			.get("totalTokenCount")
			.and_then(|v| v.as_u64())
			.unwrap_or(prompt_tokens + output_tokens);

		TokenUsage {
			prompt_tokens,
			output_tokens,
			total_tokens,
			cost: calculate_cost(model, prompt_tokens, output_tokens),
			request_time_ms: None,
		}
	});

	Ok(ProviderResponse {
		content,
		usage,
		finish_reason,
	})
}
