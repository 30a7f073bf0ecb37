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

mod commands;

use clap::{Parser, Subcommand};

use commands::{AskArgs, ClassifyArgs, ConfigArgs, DetectArgs, FormatArgs};
use prompt_companion::config::{set_thread_config, Config};

#[derive(Parser)]
#[command(name = "companion")]
#[command(version)]
#[command(about = "Section-aware assistant on top of Gemini with tidy code blocks")]
struct CompanionArgs {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Ask a question; answers come from the persona of the detected section
	Ask(AskArgs),

	/// Print the section a prompt is routed to
	Classify(ClassifyArgs),

	/// Detect the programming language of a snippet
	Detect(DetectArgs),

	/// Label and dedent the fenced code blocks of a Markdown reply
	Format(FormatArgs),

	/// Show or update the configuration file
	Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
	// .env in the working directory may carry GEMINI_API_KEY
	let _ = dotenvy::dotenv();

	let args = CompanionArgs::parse();

	let config = Config::load()?;
	set_thread_config(&config);

	match &args.command {
		Commands::Ask(ask_args) => commands::ask::execute(ask_args, &config).await,
		Commands::Classify(classify_args) => commands::classify::execute(classify_args, &config).await,
		Commands::Detect(detect_args) => commands::detect::execute(detect_args),
		Commands::Format(format_args) => commands::format::execute(format_args),
		Commands::Config(config_args) => commands::config::execute(config_args, config),
	}
}
