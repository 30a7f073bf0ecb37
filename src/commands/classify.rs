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
use colored::Colorize;

use prompt_companion::companion::Companion;
use prompt_companion::config::Config;
use prompt_companion::section::SectionClassifier;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
	/// Prompt to classify
	#[arg(value_name = "PROMPT")]
	pub prompt: String,

	/// Only use keyword scoring and print the per-section scores (no API call)
	#[arg(long)]
	pub offline: bool,
}

pub async fn execute(args: &ClassifyArgs, config: &Config) -> Result<()> {
	if args.offline {
		let verdict = SectionClassifier::default().classify_by_keywords(&args.prompt);
		for (section, score) in &verdict.scores {
			println!("{:>8}: {}", section.name(), score);
		}
		println!("{} {}", "Section:".bright_blue(), verdict.section.to_string().bold());
		if verdict.needs_oracle() {
			println!("{}", "(would be confirmed by the model when online)".dimmed());
		}
		return Ok(());
	}

	let companion = Companion::from_config(config)?;
	println!("{}", companion.classify(&args.prompt).await);
	Ok(())
}
