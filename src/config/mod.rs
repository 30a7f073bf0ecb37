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

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use std::str::FromStr;

pub mod loading;
pub mod validation;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub enum LogLevel {
	#[default]
	#[serde(rename = "none")]
	None,
	#[serde(rename = "info")]
	Info,
	#[serde(rename = "debug")]
	Debug,
}

impl LogLevel {
	/// Check if info logging is enabled
	pub fn is_info_enabled(&self) -> bool {
		matches!(self, LogLevel::Info | LogLevel::Debug)
	}

	/// Check if debug logging is enabled
	pub fn is_debug_enabled(&self) -> bool {
		matches!(self, LogLevel::Debug)
	}
}

impl FromStr for LogLevel {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"none" => Ok(LogLevel::None),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			_ => Err(anyhow::anyhow!(
				"Invalid log level '{}'. Valid levels are: none, info, debug",
				s
			)),
		}
	}
}

// Default functions
pub fn default_model() -> String {
	"gemini-2.0-flash".to_string()
}

fn default_temperature() -> f32 {
	0.7
}

fn default_request_timeout_seconds() -> u64 {
	60 // 0 disables the timeout
}

pub fn default_personality() -> String {
	"You are a friendly, funny, interactive AI assistant. Be helpful, \
	structured, clear, formatted, and mildly humorous. Use clean Markdown: \
	paragraphs, blank lines, bullets, numbered lists, headings, bold/italic."
		.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
	#[serde(default)]
	pub log_level: LogLevel,

	// Gemini model used for both answers and fallback classification
	#[serde(default = "default_model")]
	pub model: String,

	#[serde(default = "default_temperature")]
	pub temperature: f32,

	#[serde(default = "default_request_timeout_seconds")]
	pub request_timeout_seconds: u64,

	// GEMINI_API_KEY / GOOGLE_API_KEY take precedence over this value
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,

	// Prepended to every section instruction
	#[serde(default = "default_personality")]
	pub personality: String,

	// Key taken from the environment; never written back to the file
	#[serde(skip)]
	env_api_key: Option<String>,

	#[serde(skip)]
	config_path: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			log_level: LogLevel::default(),
			model: default_model(),
			temperature: default_temperature(),
			request_timeout_seconds: default_request_timeout_seconds(),
			api_key: None,
			personality: default_personality(),
			env_api_key: None,
			config_path: None,
		}
	}
}

impl Config {
	/// Get the global log level
	pub fn get_log_level(&self) -> LogLevel {
		self.log_level.clone()
	}

	/// Environment key first, then the config file value
	pub fn effective_api_key(&self) -> Option<&str> {
		self.env_api_key
			.as_deref()
			.or(self.api_key.as_deref())
			.filter(|key| !key.trim().is_empty())
	}

	/// Effective API key with everything but the last four characters hidden
	pub fn masked_api_key(&self) -> Option<String> {
		self.effective_api_key().map(|key| {
			let visible = key.chars().count().saturating_sub(4);
			key.chars()
				.enumerate()
				.map(|(i, c)| if i < visible { '*' } else { c })
				.collect()
		})
	}
}

// Logging macros for different log levels
// These macros automatically check the current log level and only print if appropriate

thread_local! {
	static CURRENT_CONFIG: RefCell<Option<Config>> = const { RefCell::new(None) };
}

/// Set the current config for the thread (to be used by logging macros)
pub fn set_thread_config(config: &Config) {
	CURRENT_CONFIG.with(|c| {
		*c.borrow_mut() = Some(config.clone());
	});
}

/// Get the current config for the thread
pub fn with_thread_config<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Config) -> R,
{
	CURRENT_CONFIG.with(|c| (*c.borrow()).as_ref().map(f))
}

/// Info logging macro with automatic cyan coloring
/// Shows info messages when log level is Info OR Debug
#[macro_export]
macro_rules! log_info {
	($fmt:expr) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", $fmt.cyan());
			}
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", format!($fmt, $($arg),*).cyan());
			}
		}
	};
}

/// Debug logging macro with automatic bright blue coloring
#[macro_export]
macro_rules! log_debug {
	($fmt:expr) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", $fmt.bright_blue());
			}
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", format!($fmt, $($arg),*).bright_blue());
			}
		}
	};
}

/// Error logging macro with automatic bright red coloring
/// Always visible regardless of log level (errors should always be shown)
#[macro_export]
macro_rules! log_error {
	($fmt:expr) => {{
		use colored::Colorize;
		eprintln!("{}", $fmt.bright_red());
	}};
	($fmt:expr, $($arg:expr),*) => {{
		use colored::Colorize;
		eprintln!("{}", format!($fmt, $($arg),*).bright_red());
	}};
}
