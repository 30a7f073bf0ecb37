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

use anyhow::Result;
use clap::Args;

use prompt_companion::config::{Config, LogLevel};
use prompt_companion::directories;

#[derive(Args, Debug)]
pub struct ConfigArgs {
	/// Set the Gemini model (e.g., gemini-2.0-flash)
	#[arg(long)]
	pub model: Option<String>,

	/// Store the Gemini API key in the config file (GEMINI_API_KEY still takes precedence)
	#[arg(long)]
	pub api_key: Option<String>,

	/// Set log level (none, info, debug)
	#[arg(long)]
	pub log_level: Option<String>,

	/// Set the sampling temperature (0.0 to 2.0)
	#[arg(long)]
	pub temperature: Option<f32>,

	/// Set the request timeout in seconds (0 disables it)
	#[arg(long)]
	pub timeout: Option<u64>,

	/// Show current configuration values
	#[arg(long)]
	pub show: bool,

	/// Validate configuration without making changes
	#[arg(long)]
	pub validate: bool,
}

// Handle the configuration command
pub fn execute(args: &ConfigArgs, mut config: Config) -> Result<()> {
	if args.show {
		show_configuration(&config)?;
		return Ok(());
	}

	if args.validate {
		match config.validate() {
			Ok(()) => {
				println!("✅ Configuration is valid!");
				return Ok(());
			}
			Err(e) => {
				eprintln!("❌ Configuration validation failed: {}", e);
				return Err(e);
			}
		}
	}

	let mut modified = false;

	if let Some(model) = &args.model {
		config.model = model.clone();
		println!("Set model to {}", model);
		modified = true;
	}

	if let Some(api_key) = &args.api_key {
		config.api_key = Some(api_key.clone());
		println!("Set Gemini API key in configuration");
		modified = true;
	}

	if let Some(level) = &args.log_level {
		config.log_level = level.parse::<LogLevel>()?;
		println!("Set log level to {}", level.to_lowercase());
		modified = true;
	}

	if let Some(temperature) = args.temperature {
		config.temperature = temperature;
		println!("Set temperature to {}", temperature);
		modified = true;
	}

	if let Some(timeout) = args.timeout {
		config.request_timeout_seconds = timeout;
		println!("Set request timeout to {}s", timeout);
		modified = true;
	}

	if modified {
		config.save()?;
	} else {
		let config_path = Config::create_default_config()?;
		println!("Configuration file: {}", config_path.display());
	}

	println!();
	show_configuration(&config)
}

fn show_configuration(config: &Config) -> Result<()> {
	println!("Config file:     {}", directories::get_config_file_path()?.display());
	println!("Model:           {}", config.model);
	println!("Temperature:     {}", config.temperature);
	match config.request_timeout_seconds {
		0 => println!("Request timeout: disabled"),
		seconds => println!("Request timeout: {}s", seconds),
	}
	println!("Log level:       {:?}", config.log_level);
	match config.masked_api_key() {
		Some(key) => println!("API key:         {}", key),
		None => println!("API key:         Not set (set GEMINI_API_KEY or use --api-key)"),
	}
	Ok(())
}
