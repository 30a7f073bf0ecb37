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

use prompt_companion::code::CodeProcessor;

#[derive(Args, Debug)]
pub struct FormatArgs {
	/// Markdown file to format; stdin when omitted
	#[arg(value_name = "FILE")]
	pub file: Option<PathBuf>,

	/// Treat the whole input as one snippet and print highlighted HTML
	#[arg(long)]
	pub html: bool,

	/// Language of the snippet for --html (detected when omitted)
	#[arg(long, requires = "html")]
	pub language: Option<String>,

	/// Print the stylesheet for the --html classes and exit
	#[arg(long)]
	pub css: bool,
}

pub fn execute(args: &FormatArgs) -> Result<()> {
	let processor = CodeProcessor::default();

	if args.css {
		println!("{}", processor.css()?);
		return Ok(());
	}

	let input = super::read_input(args.file.as_deref())?;

	if args.html {
		let code = processor.format_code(&input, args.language.as_deref().unwrap_or(""));
		println!(
			"{}",
			processor.highlight_html(&code, args.language.as_deref().unwrap_or(""))
		);
	} else {
		println!("{}", processor.format_response(&input));
	}
	Ok(())
}
