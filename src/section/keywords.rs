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

use lazy_static::lazy_static;
use std::collections::HashSet;

use super::Section;

const HEALTH: &[&str] = &[
	"health", "fitness", "exercise", "diet", "nutrition", "medical", "doctor", "wellness",
	"workout", "gym", "calories", "weight", "sleep", "stress", "mental", "blood", "pressure",
	"immune", "immunity", "disease", "symptoms", "treatment", "medicine", "hospital",
];

const BANKING: &[&str] = &[
	"bank", "money", "finance", "investment", "credit", "loan", "account", "saving", "budget",
	"stocks", "crypto", "tax", "wealth", "retirement", "interest", "deposit", "withdraw",
	"balance", "transaction", "economy", "market", "portfolio",
];

const MOVIES: &[&str] = &[
	"movie", "film", "cinema", "director", "actor", "actress", "hollywood", "blockbuster",
	"genre", "review", "trailer", "oscars", "award", "screenplay", "production", "studio",
	"sequel", "remake", "adaptation", "casting", "plot", "character",
];

const MUSIC: &[&str] = &[
	"music", "song", "artist", "band", "album", "concert", "genre", "lyrics", "playlist",
	"instrument", "melody", "rhythm", "tune", "track", "single", "release", "tour",
	"performance", "recording", "studio", "producer", "composer",
];

// Pop culture plus mindfulness vocabulary
const GENERAL: &[&str] = &[
	"celebrity", "trend", "social", "media", "viral", "meme", "influencer", "tv", "show",
	"reality", "entertainment", "gossip", "fame", "star", "icon", "buzz", "hype", "scandal",
	"news", "internet", "hashtag", "tiktok", "instagram", "zen", "meditation", "mindfulness",
	"traditional", "culture", "wisdom", "spirituality", "philosophy", "enlightenment", "karma",
	"yoga", "buddhism", "taoism", "harmony", "balance", "inner", "peace", "consciousness",
	"awareness", "practice", "ritual",
];

lazy_static! {
	static ref BUILTIN_TABLE: KeywordTable = KeywordTable::new(&[
		(Section::Health, HEALTH),
		(Section::Banking, BANKING),
		(Section::Movies, MOVIES),
		(Section::Music, MUSIC),
		(Section::General, GENERAL),
	]);
}

/// Ordered section -> keyword set table
pub struct KeywordTable {
	sections: Vec<(Section, HashSet<&'static str>)>,
}

impl KeywordTable {
	pub fn new(entries: &[(Section, &'static [&'static str])]) -> Self {
		Self {
			sections: entries
				.iter()
				.map(|(section, words)| (*section, words.iter().copied().collect()))
				.collect(),
		}
	}

	pub fn builtin() -> &'static KeywordTable {
		&BUILTIN_TABLE
	}

	/// Keyword overlap per section, in table order
	pub fn score(&self, tokens: &HashSet<String>) -> Vec<(Section, usize)> {
		self.sections
			.iter()
			.map(|(section, words)| {
				let overlap = tokens.iter().filter(|token| words.contains(token.as_str())).count();
				(*section, overlap)
			})
			.collect()
	}

	pub fn keywords(&self, section: Section) -> Option<&HashSet<&'static str>> {
		self.sections
			.iter()
			.find(|(candidate, _)| *candidate == section)
			.map(|(_, words)| words)
	}
}
