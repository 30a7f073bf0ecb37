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

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

impl Config {
	/// Load configuration from the system-wide config file
	pub fn load() -> Result<Self> {
		let config_path = crate::directories::get_config_file_path()?;

		let mut config = if config_path.exists() {
			let config_str = fs::read_to_string(&config_path).context(format!(
				"Failed to read config from {}",
				config_path.display()
			))?;
			let config: Config =
				toml::from_str(&config_str).context("Failed to parse TOML configuration")?;
			config
		} else {
			Config::default()
		};

		// Store the config path for future saves
		config.config_path = Some(config_path);

		// Environment variables take precedence over config file values
		config.apply_env_overrides();

		if let Err(e) = config.validate() {
			eprintln!("Configuration validation warning: {}", e);
			eprintln!("The application will continue, but you may want to fix these issues.");
		}

		Ok(config)
	}

	fn apply_env_overrides(&mut self) {
		self.env_api_key = api_key_from_env();
	}

	/// Save configuration to file
	pub fn save(&self) -> Result<()> {
		let config_path = match &self.config_path {
			Some(path) => path.clone(),
			None => crate::directories::get_config_file_path()?,
		};
		self.save_to_path(&config_path)?;

		println!("Configuration saved to {}", config_path.display());
		Ok(())
	}

	/// Save configuration to a specific file path
	pub fn save_to_path(&self, path: &Path) -> Result<()> {
		// Validate before saving
		self.validate()?;

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).context(format!(
				"Failed to create config directory: {}",
				parent.display()
			))?;
		}

		let config_str =
			toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

		fs::write(path, config_str)
			.context(format!("Failed to write config to {}", path.display()))?;

		Ok(())
	}

	/// Write a default config file if none exists and return its path
	pub fn create_default_config() -> Result<PathBuf> {
		let config_path = crate::directories::get_config_file_path()?;

		if !config_path.exists() {
			Config::default().save_to_path(&config_path)?;
		}

		Ok(config_path)
	}
}

fn api_key_from_env() -> Option<String> {
	API_KEY_ENV_VARS
		.iter()
		.filter_map(|name| std::env::var(name).ok())
		.find(|value| !value.trim().is_empty())
}
