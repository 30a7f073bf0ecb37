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

// Whitespace normalisation for code snippets

/// Drop leading/trailing blank lines and the indentation shared by every
/// non-blank line. Blank lines inside the snippet become empty and the result
/// is stripped of outer whitespace, so a first line indented deeper than the
/// rest loses its extra indent.
pub fn strip_common_indent(code: &str) -> String {
	if code.trim().is_empty() {
		return code.to_string();
	}

	let lines: Vec<&str> = code.split('\n').collect();
	let start = lines.iter().position(|line| !line.trim().is_empty());
	let end = lines.iter().rposition(|line| !line.trim().is_empty());

	let (start, end) = match (start, end) {
		(Some(start), Some(end)) => (start, end),
		_ => return String::new(),
	};
	let lines = &lines[start..=end];

	let indentation = lines
		.iter()
		.filter(|line| !line.trim().is_empty())
		.map(|line| indent_width(line))
		.min()
		.unwrap_or(0);

	let dedented: Vec<&str> = lines
		.iter()
		.map(|line| {
			if line.trim().is_empty() {
				""
			} else {
				skip_chars(line, indentation)
			}
		})
		.collect();

	dedented.join("\n").trim().to_string()
}

/// Number of leading whitespace characters
pub fn indent_width(line: &str) -> usize {
	line.chars().take_while(|c| c.is_whitespace()).count()
}

fn skip_chars(line: &str, count: usize) -> &str {
	match line.char_indices().nth(count) {
		Some((offset, _)) => &line[offset..],
		None => "",
	}
}
