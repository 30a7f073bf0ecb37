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

// Syntax highlighting for code blocks (terminal and HTML output)

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use super::detector::LexerGuesser;

const THEME_NAME: &str = "base16-ocean.dark";
const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

lazy_static! {
	static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
	static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Short alias for a syntax definition: the parenthesised name when present
/// ("Bourne Again Shell (bash)" -> "bash"), the lowercased name otherwise
pub fn syntax_alias(syntax: &SyntaxReference) -> String {
	let name = syntax.name.as_str();

	if let (Some(open), Some(close)) = (name.rfind('('), name.rfind(')')) {
		if open < close {
			let inner = name[open + 1..close].trim();
			if !inner.is_empty() {
				return inner.to_lowercase();
			}
		}
	}

	name.to_lowercase()
}

/// Lexer guessing backed by the first-line matchers of syntect's bundled
/// syntaxes (shebangs, `<?php`, `<?xml`, editor modelines)
pub struct FirstLineGuesser;

impl LexerGuesser for FirstLineGuesser {
	fn name(&self) -> &str {
		"syntect"
	}

	fn guess(&self, code: &str) -> Option<String> {
		let first_line = code.lines().find(|line| !line.trim().is_empty())?;

		SYNTAX_SET
			.find_syntax_by_first_line(first_line.trim_start())
			.filter(|syntax| syntax.name != "Plain Text")
			.map(syntax_alias)
	}
}

pub struct SyntaxHighlighter {
	syntax_set: &'static SyntaxSet,
	theme_set: &'static ThemeSet,
}

impl SyntaxHighlighter {
	pub fn new() -> Self {
		Self {
			syntax_set: &SYNTAX_SET,
			theme_set: &THEME_SET,
		}
	}

	/// Syntax definition for a language token, name or file extension
	pub fn resolve(&self, language: &str) -> Option<&'static SyntaxReference> {
		let language = language.trim();
		if language.is_empty() {
			return None;
		}

		self.syntax_set
			.find_syntax_by_token(language)
			.or_else(|| self.syntax_set.find_syntax_by_extension(language))
	}

	fn theme(&self) -> Result<&'static Theme> {
		self.theme_set
			.themes
			.get(THEME_NAME)
			.ok_or_else(|| anyhow!("Highlight theme '{}' is not available", THEME_NAME))
	}

	/// 24-bit ANSI escaped rendition for terminals; unknown languages are plain text
	pub fn highlight_terminal(&self, code: &str, language: &str) -> Result<String> {
		let syntax = self
			.resolve(language)
			.unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

		let mut highlighter = HighlightLines::new(syntax, self.theme()?);
		let mut highlighted = String::new();

		for line in LinesWithEndings::from(code) {
			let ranges: Vec<(Style, &str)> = highlighter.highlight_line(line, self.syntax_set)?;
			highlighted.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
		}

		Ok(highlighted)
	}

	/// Class-based HTML inside `<pre class="highlight"><code>`. Falls back to
	/// escaped plain code when the language is unknown or highlighting fails.
	pub fn highlight_html(&self, code: &str, language: &str) -> String {
		if code.trim().is_empty() {
			return code.to_string();
		}

		let highlighted = self
			.resolve(language)
			.and_then(|syntax| self.classed_html(code, syntax).ok());

		match highlighted {
			Some(html) => format!("<pre class=\"highlight\"><code>{}</code></pre>", html),
			None => format!("<pre class=\"highlight\"><code>{}</code></pre>", html_escape(code)),
		}
	}

	fn classed_html(&self, code: &str, syntax: &SyntaxReference) -> Result<String> {
		let mut generator =
			ClassedHTMLGenerator::new_with_class_style(syntax, self.syntax_set, CLASS_STYLE);

		for line in LinesWithEndings::from(code) {
			generator.parse_html_for_line_which_includes_newline(line)?;
		}

		Ok(generator.finalize())
	}

	/// Stylesheet matching the classes emitted by `highlight_html`
	pub fn css(&self) -> Result<String> {
		Ok(css_for_theme_with_class_style(self.theme()?, CLASS_STYLE)?)
	}
}

impl Default for SyntaxHighlighter {
	fn default() -> Self {
		Self::new()
	}
}

pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}
