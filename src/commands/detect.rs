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
use std::path::PathBuf;

use prompt_companion::code::LanguageDetector;

#[derive(Args, Debug)]
pub struct DetectArgs {
	/// File to inspect; stdin when omitted
	#[arg(value_name = "FILE")]
	pub file: Option<PathBuf>,

	/// Skip lexer guessing and only use the keyword pattern table
	#[arg(long)]
	pub no_guess: bool,

	/// Print the per-language pattern scores as well
	#[arg(long)]
	pub scores: bool,
}

pub fn execute(args: &DetectArgs) -> Result<()> {
	let code = super::read_input(args.file.as_deref())?;

	let detector = if args.no_guess {
		LanguageDetector::patterns_only()
	} else {
		LanguageDetector::default()
	};

	if args.scores {
		for (language, score) in detector.scores(&code) {
			println!("{:>12}: {}", language, score);
		}
	}

	let language = detector.detect(&code);
	if language.is_empty() {
		println!("unknown");
	} else {
		println!("{}", language);
	}
	Ok(())
}
