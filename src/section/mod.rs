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

// Topical sections a prompt can be routed to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod classifier;
pub mod keywords;

pub use classifier::{SectionClassifier, Verdict};
pub use keywords::KeywordTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
	Health,
	Banking,
	Movies,
	Music,
	General,
}

impl Section {
	/// Table order, which is also the tie-break priority
	pub const ALL: [Section; 5] = [
		Section::Health,
		Section::Banking,
		Section::Movies,
		Section::Music,
		Section::General,
	];

	pub fn name(&self) -> &'static str {
		match self {
			Section::Health => "health",
			Section::Banking => "banking",
			Section::Movies => "movies",
			Section::Music => "music",
			Section::General => "general",
		}
	}

	/// Persona appended to the personality prompt when answering in this section
	pub fn instruction(&self) -> &'static str {
		match self {
			Section::Health => "You are a health expert. Answer only in health context.",
			Section::Banking => "You are a finance expert. Answer only in banking context.",
			Section::Movies => "You are a movie expert. Answer only in cinema context.",
			Section::Music => "You are a music expert. Answer only in music context.",
			Section::General => "You are a general-purpose AI assistant.",
		}
	}
}

impl fmt::Display for Section {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Section {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim().to_lowercase();
		Section::ALL
			.iter()
			.copied()
			.find(|section| section.name() == wanted)
			.ok_or_else(|| anyhow::anyhow!("Unknown section: '{}'", s))
	}
}
