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

use anyhow::{anyhow, Result};

use super::Config;
use crate::providers::GeminiProvider;

const MAX_TEMPERATURE: f32 = 2.0;
const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 600;

impl Config {
	/// Validate the configuration for common issues
	pub fn validate(&self) -> Result<()> {
		self.validate_model()?;
		self.validate_temperature()?;
		self.validate_timeout()?;
		Ok(())
	}

	pub fn validate_model(&self) -> Result<()> {
		let model = self.model.trim();
		if model.is_empty() {
			return Err(anyhow!("Model cannot be empty"));
		}

		if !GeminiProvider::is_gemini_model(model) {
			return Err(anyhow!(
				"Unsupported model: '{}'. Use a Gemini model such as 'gemini-2.0-flash'",
				model
			));
		}

		Ok(())
	}

	pub fn validate_temperature(&self) -> Result<()> {
		if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
			return Err(anyhow!(
				"Temperature out of range: {}. Allowed range: 0.0 to {}",
				self.temperature,
				MAX_TEMPERATURE
			));
		}
		Ok(())
	}

	pub fn validate_timeout(&self) -> Result<()> {
		// 0 is valid for disabling
		if self.request_timeout_seconds > MAX_REQUEST_TIMEOUT_SECONDS {
			return Err(anyhow!(
				"Request timeout too high: {}s. Maximum allowed: {}s",
				self.request_timeout_seconds,
				MAX_REQUEST_TIMEOUT_SECONDS
			));
		}
		Ok(())
	}
}
