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
use rustyline::error::ReadlineError;
use rustyline::{CompletionType, Config as RustylineConfig, EditMode, Editor};
use std::io::{self, IsTerminal, Read};

use prompt_companion::companion::{Answer, AskError, AskRequest, AskResponse, Companion};
use prompt_companion::config::{set_thread_config, Config, LogLevel};
use prompt_companion::log_error;
use prompt_companion::render::{is_markdown_content, MarkdownRenderer};

#[derive(Args, Debug)]
pub struct AskArgs {
	/// Question to ask; read from stdin or asked interactively when omitted
	#[arg(value_name = "PROMPT")]
	pub input: Option<String>,

	/// Section the caller is currently in; a different detected section is reported as a redirect
	#[arg(long)]
	pub section: Option<String>,

	/// Use a specific Gemini model instead of the configured one (runtime only, not saved)
	#[arg(long)]
	pub model: Option<String>,

	/// Print the formatted text without terminal rendering
	#[arg(long)]
	pub raw: bool,

	/// Print the response as JSON ({"response", "redirect"?, "section"?})
	#[arg(long)]
	pub json: bool,
}

fn print_answer(answer: &Answer, args: &AskArgs, companion: &Companion) -> Result<()> {
	if args.json {
		println!("{}", serde_json::to_string_pretty(&answer.to_response())?);
		return Ok(());
	}

	println!("{} {}", "Category:".bright_blue(), answer.section.to_string().bold());
	if let Some(section) = answer.redirect {
		println!("{}", format!("Switching to the {} section", section).yellow());
	}
	println!();

	if args.raw || !is_markdown_content(&answer.raw) {
		println!("{}", answer.response);
		return Ok(());
	}

	let renderer = MarkdownRenderer::new();
	if renderer.render_and_print(&answer.raw, companion.processor()).is_err() {
		// Fallback to the plain formatted text if rendering fails
		println!("{}", answer.response);
	}
	Ok(())
}

// JSON output is the only thing written to stdout in --json mode
fn quiet_config(config: &Config) -> Config {
	let mut quiet = config.clone();
	quiet.log_level = LogLevel::None;
	quiet
}

/// Body printed by `--json`: the response, or the `{"error"}` object
fn json_body(result: &Result<AskResponse, AskError>) -> Result<String> {
	let value = match result {
		Ok(response) => serde_json::to_value(response)?,
		Err(e) => e.to_json(),
	};
	Ok(serde_json::to_string_pretty(&value)?)
}

// Helper function to get a single line of input interactively using rustyline
fn read_prompt(editor: &mut Editor<(), rustyline::history::FileHistory>) -> Result<Option<String>> {
	loop {
		match editor.readline("❯ ") {
			Ok(line) => {
				let trimmed = line.trim();
				if trimmed.is_empty() {
					continue;
				}
				if matches!(trimmed.to_lowercase().as_str(), "exit" | "quit") {
					return Ok(None);
				}
				let _ = editor.add_history_entry(trimmed);
				return Ok(Some(trimmed.to_string()));
			}
			Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
			Err(err) => return Err(anyhow::anyhow!("Error reading input: {}", err)),
		}
	}
}

async fn run_interactive(args: &AskArgs, companion: &Companion) -> Result<()> {
	println!("{}", "Ask anything. Type 'exit' or 'quit' to leave.".bright_green());
	println!();

	let editor_config = RustylineConfig::builder()
		.completion_type(CompletionType::List)
		.edit_mode(EditMode::Emacs)
		.auto_add_history(false)
		.build();
	let mut editor: Editor<(), rustyline::history::FileHistory> = Editor::with_config(editor_config)?;

	let mut current_section = args.section.clone();

	while let Some(prompt) = read_prompt(&mut editor)? {
		match companion.ask(&prompt, current_section.as_deref()).await {
			Ok(answer) => {
				print_answer(&answer, args, companion)?;
				current_section = Some(answer.section.to_string());
			}
			Err(e) => log_error!("Error: {}", e),
		}
		println!();
	}

	println!("Goodbye!");
	Ok(())
}

pub async fn execute(args: &AskArgs, config: &Config) -> Result<()> {
	let mut config = config.clone();
	if args.json {
		config = quiet_config(&config);
		set_thread_config(&config);
	}
	if let Some(model) = &args.model {
		config.model = model.clone();
		config.validate_model()?;
	}

	let companion = Companion::from_config(&config)?;

	let prompt = match &args.input {
		Some(input) => input.clone(),
		None if !io::stdin().is_terminal() => {
			let mut buffer = String::new();
			io::stdin().read_to_string(&mut buffer)?;
			buffer
		}
		None => return run_interactive(args, &companion).await,
	};

	if args.json {
		let request = AskRequest {
			prompt: Some(prompt),
			current_section: args.section.clone(),
		};
		let result = companion.handle(&request).await;
		println!("{}", json_body(&result)?);
		if result.is_err() {
			std::process::exit(1);
		}
		return Ok(());
	}

	let answer = companion.ask(&prompt, args.section.as_deref()).await?;
	print_answer(&answer, args, &companion)
}
