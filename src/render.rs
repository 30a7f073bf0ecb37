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

// Terminal rendering of AI replies: termimad for prose, syntect for code blocks

use anyhow::Result;
use termimad::crossterm::style::{Attribute, Color};
use termimad::MadSkin;

use crate::code::{fenced_blocks, language_label, CodeProcessor};

pub struct MarkdownRenderer {
	skin: MadSkin,
}

impl MarkdownRenderer {
	pub fn new() -> Self {
		let mut skin = MadSkin::default();

		skin.headers[0].set_fg(Color::Yellow);
		skin.headers[0].add_attr(Attribute::Bold);
		skin.headers[1].set_fg(Color::Blue);
		skin.headers[1].add_attr(Attribute::Bold);
		skin.headers[2].set_fg(Color::Cyan);
		skin.headers[2].add_attr(Attribute::Bold);

		skin.inline_code.set_bg(Color::Rgb { r: 60, g: 60, b: 60 });
		skin.inline_code.set_fg(Color::Yellow);

		skin.italic.set_fg(Color::Cyan);
		skin.bold.set_fg(Color::White);
		skin.bold.add_attr(Attribute::Bold);
		skin.quote_mark.set_fg(Color::Blue);
		skin.bullet.set_fg(Color::Green);

		Self { skin }
	}

	/// Build the terminal rendition of a raw reply. Code blocks get the same
	/// label and dedent as `format_response`, plus syntax colours.
	pub fn render(&self, markdown: &str, processor: &CodeProcessor) -> Result<String> {
		let mut output = String::new();
		let mut last_end = 0;

		for block in fenced_blocks(markdown) {
			let before = &markdown[last_end..block.range.start];
			if !before.trim().is_empty() {
				output.push_str(&self.skin.term_text(before).to_string());
			}

			let language = block.language.unwrap_or("");
			let code = processor.format_code(block.body, language);
			let language = if language.is_empty() {
				processor.detect_language(&code)
			} else {
				language.to_string()
			};

			output.push_str(&format!("\n┌─ {} ─\n", language_label(&language)));
			match processor.highlight_terminal(&code, &language) {
				Ok(highlighted) => output.push_str(&highlighted),
				Err(_) => output.push_str(&code),
			}
			if !output.ends_with('\n') {
				output.push('\n');
			}
			// Reset colours left over from the last highlighted line
			output.push_str("\x1b[0m└─────\n\n");

			last_end = block.range.end;
		}

		let remaining = &markdown[last_end..];
		if !remaining.trim().is_empty() {
			output.push_str(&self.skin.term_text(remaining).to_string());
		}

		Ok(output)
	}

	pub fn render_and_print(&self, markdown: &str, processor: &CodeProcessor) -> Result<()> {
		print!("{}", self.render(markdown, processor)?);
		Ok(())
	}
}

impl Default for MarkdownRenderer {
	fn default() -> Self {
		Self::new()
	}
}

// Helper function to check if content looks like markdown
pub fn is_markdown_content(content: &str) -> bool {
	content.contains("```")
		|| content.contains("# ")
		|| content.contains("**")
		|| content.contains("* ")
		|| content.contains("- ")
		|| content.contains('[')
		|| content.contains('|')
		|| content.contains("> ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::code::LanguageDetector;

	#[test]
	fn test_markdown_detection() {
		assert!(is_markdown_content("# Heading"));
		assert!(is_markdown_content("```rust\ncode\n```"));
		assert!(is_markdown_content("**bold text**"));
		assert!(is_markdown_content("[link](url)"));
		assert!(!is_markdown_content("plain text"));
	}

	#[test]
	fn test_render_labels_code_blocks() {
		let renderer = MarkdownRenderer::new();
		let processor = CodeProcessor::new(LanguageDetector::patterns_only());

		let output = renderer
			.render("Intro\n```\n    const x = 1;\n```\nOutro", &processor)
			.unwrap();

		assert!(output.contains("┌─ Javascript ─"));
		assert!(output.contains("Intro"));
		assert!(output.contains("Outro"));
		assert!(output.contains("└─────"));
	}
}
