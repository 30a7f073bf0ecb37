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
use std::io::{self, Read};
use std::path::Path;

pub mod ask;
pub mod classify;
pub mod config;
pub mod detect;
pub mod format;

// Re-export all the command structs
pub use ask::AskArgs;
pub use classify::ClassifyArgs;
pub use config::ConfigArgs;
pub use detect::DetectArgs;
pub use format::FormatArgs;

/// Read a file, or all of stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<String> {
	match path {
		Some(path) => fs::read_to_string(path)
			.with_context(|| format!("Failed to read {}", path.display())),
		None => {
			let mut buffer = String::new();
			io::stdin()
				.read_to_string(&mut buffer)
				.context("Failed to read from stdin")?;
			Ok(buffer)
		}
	}
}
