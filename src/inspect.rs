// Copyright 2024 FastLabs Developers
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

//! Bounded structural rendering of extra-data values.
//!
//! Values render on a single line when they fit the configured width, and expand one entry per
//! line otherwise. Nesting is cut off at a configured depth and long arrays are truncated, so
//! arbitrarily large inputs degrade to truncation markers instead of flooding the sink.

use colored::Colorize;
use serde_json::Value;

use crate::ansi;

/// Options bounding how deep and how wide extra-data rendering may go.
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// How many levels of nested containers to recurse into before cutting off
    /// with `[Object]` / `[Array]`.
    pub depth: usize,
    /// Tint scalar values with ANSI colors.
    pub colors: bool,
    /// Column budget above which a container expands onto multiple lines.
    pub break_length: usize,
    /// Maximum number of array elements rendered before truncating with
    /// `... N more items`.
    pub max_array_length: usize,
    /// Prefer single-line rendering when a container fits the column budget.
    /// When false, containers always expand.
    pub compact: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            colors: false,
            break_length: 128,
            max_array_length: 100,
            compact: true,
        }
    }
}

/// Renders `value` as a possibly multi-line string, bounded by `opts`.
pub fn inspect(value: &Value, opts: &InspectOptions) -> String {
    render(value, opts, 0, 0)
}

/// Renders `value` and splits the result on line boundaries.
pub fn inspect_lines(value: &Value, opts: &InspectOptions) -> Vec<String> {
    inspect(value, opts).split('\n').map(String::from).collect()
}

/// Splits a stack trace into its printable lines.
pub fn stack_lines(stack: &str) -> Vec<String> {
    stack.lines().map(String::from).collect()
}

fn maybe_color(text: &str, opts: &InspectOptions, f: impl Fn(&str) -> colored::ColoredString) -> String {
    if opts.colors {
        f(text).to_string()
    } else {
        text.to_string()
    }
}

fn render(value: &Value, opts: &InspectOptions, level: usize, indent: usize) -> String {
    match value {
        Value::Null => maybe_color("null", opts, |s| s.bold()),
        Value::Bool(b) => maybe_color(&b.to_string(), opts, |s| s.yellow()),
        Value::Number(n) => maybe_color(&n.to_string(), opts, |s| s.yellow()),
        Value::String(s) => {
            // Serializing a string never fails.
            let quoted = serde_json::to_string(s).unwrap();
            maybe_color(&quoted, opts, |s| s.green())
        }
        Value::Array(items) => {
            if level > opts.depth {
                return maybe_color("[Array]", opts, |s| s.cyan());
            }
            let shown = items.len().min(opts.max_array_length);
            let mut entries: Vec<String> = items[..shown]
                .iter()
                .map(|item| render(item, opts, level + 1, indent + 2))
                .collect();
            if shown < items.len() {
                entries.push(format!("... {} more items", items.len() - shown));
            }
            wrap("[", "]", entries, opts, indent)
        }
        Value::Object(map) => {
            if level > opts.depth {
                return maybe_color("[Object]", opts, |s| s.cyan());
            }
            let entries: Vec<String> = map
                .iter()
                .map(|(key, item)| {
                    format!(
                        "{}: {}",
                        render_key(key),
                        render(item, opts, level + 1, indent + 2)
                    )
                })
                .collect();
            wrap("{", "}", entries, opts, indent)
        }
    }
}

fn render_key(key: &str) -> String {
    let mut chars = key.chars();
    let ident = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if ident {
        key.to_string()
    } else {
        // Serializing a string never fails.
        serde_json::to_string(key).unwrap()
    }
}

fn wrap(open: &str, close: &str, entries: Vec<String>, opts: &InspectOptions, indent: usize) -> String {
    if entries.is_empty() {
        return format!("{open}{close}");
    }

    if opts.compact {
        let inline = format!("{open} {} {close}", entries.join(", "));
        if !inline.contains('\n')
            && indent.saturating_add(ansi::visible_width(&inline)) <= opts.break_length
        {
            return inline;
        }
    }

    let pad = " ".repeat(indent + 2);
    let mut out = String::from(open);
    let last = entries.len() - 1;
    for (i, entry) in entries.into_iter().enumerate() {
        out.push('\n');
        out.push_str(&pad);
        out.push_str(&entry);
        if i != last {
            out.push(',');
        }
    }
    out.push('\n');
    out.push_str(&" ".repeat(indent));
    out.push_str(close);
    out
}
