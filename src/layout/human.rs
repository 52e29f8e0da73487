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

use std::fmt::Write;

use colored::Colorize;
use jiff::tz::TimeZone;
use serde_json::Value;

use crate::ansi;
use crate::error::Error;
use crate::inspect;
use crate::inspect::InspectOptions;
use crate::layout::Layout;
use crate::record::Record;
use crate::timestamp::TimestampStyle;
use crate::timestamp::format_timestamp;

/// Field names never rendered as extra-data.
const RESERVED_FIELDS: &[&str] = &["level", "message", "ms", "stack"];

#[derive(Debug, Clone)]
struct GlyphSet {
    single: &'static str,
    start: &'static str,
    line: &'static str,
    end: &'static str,
}

const BOX_GLYPHS: GlyphSet = GlyphSet {
    single: "▪",
    start: "┏",
    line: "┃",
    end: "┗",
};

const PLAIN_GLYPHS: GlyphSet = GlyphSet {
    single: "",
    start: "",
    line: "",
    end: "",
};

/// A layout that formats log records as width-aware, optionally colorized, human-readable text.
///
/// The first line carries the message, an optional `[timestamp]` prefix or right-aligned
/// timestamp, an optional elapsed-time suffix, and, when it fits the `break_length` budget,
/// the record's extra-data rendered inline. Extra-data that does not fit, and stack traces,
/// render as continuation lines connected with box-drawing glyphs:
///
/// ```text
/// Request failed┏ +12ms
/// ┃ Error: connect ECONNREFUSED
/// ┃     at TCPConnectWrap.afterConnect
/// ┗ { url: "http://localhost:4000", attempt: 3 }
/// ```
///
/// With [`ignore_special_chars`](HumanFormatBuilder::ignore_special_chars), glyphs degrade to
/// plain text for file sinks.
///
/// # Examples
///
/// ```
/// use humanfmt::HumanFormat;
/// use humanfmt::Record;
///
/// let format = HumanFormat::builder()
///     .break_length(85)
///     .colors(false)
///     .build()
///     .unwrap();
///
/// let mut record = Record::builder("info", "Hello").extra("world").build();
/// format.transform(&mut record);
/// assert_eq!(record.rendered.as_deref(), Some("Hello▪ \"world\""));
/// ```
#[derive(Debug, Clone)]
pub struct HumanFormat {
    show_meta: bool,
    show_timestamp: Option<TimestampStyle>,
    colors: bool,
    ignore_special_chars: bool,
    break_length: usize,
    inspect: InspectOptions,
    meta_strip: Vec<String>,
    timezone: TimeZone,
}

impl HumanFormat {
    /// Create a builder with the default configuration.
    pub fn builder() -> HumanFormatBuilder {
        HumanFormatBuilder {
            show_meta: true,
            show_timestamp: None,
            colors: true,
            ignore_special_chars: false,
            break_length: 120,
            inspect: None,
            meta_strip: vec![],
            timezone: TimeZone::system(),
        }
    }

    /// Renders the record and populates [`Record::rendered`].
    ///
    /// Must be called exactly once per record: extra-data consumed into the inline rendering is
    /// removed from [`Record::extras`], so a second call over the same record is unsupported.
    /// Formatting never fails; a record without timestamp, stack, or extra-data simply renders
    /// without those sections.
    pub fn transform<'a>(&self, record: &'a mut Record) -> &'a mut Record {
        let color = if self.colors {
            ansi::color_prefix(&record.level).unwrap_or("").to_string()
        } else {
            String::new()
        };

        let mut line = String::new();
        let mut right_timestamp = None;
        if let (Some(style), Some(ts)) = (self.show_timestamp, record.timestamp) {
            let text = format_timestamp(ts, &self.timezone, style.only_time);
            if style.right {
                right_timestamp = Some(text);
            } else {
                // SAFETY: write to a string always succeeds
                write!(line, "[{text}] ").unwrap();
            }
        }
        line.push_str(&record.message);

        let splat = self.splat(record);

        // Sizes for the line budget; every non-empty part costs one extra separating column.
        let glyph_width = usize::from(!self.ignore_special_chars);
        let message_size = padded(ansi::visible_width(&line) + glyph_width);
        let measured_splat = splat.as_ref().map(|value| {
            let opts = InspectOptions {
                colors: false,
                break_length: usize::MAX,
                ..self.inspect.clone()
            };
            inspect::inspect(value, &opts)
        });
        let splat_size = padded(measured_splat.as_deref().map_or(0, ansi::visible_width));
        let ms_size = padded(record.elapsed.as_deref().map_or(0, ansi::visible_width));
        let timestamp_size = padded(right_timestamp.as_deref().map_or(0, ansi::visible_width));

        // The inline-vs-block decision. A right-aligned timestamp joins the sum for budgeting
        // only; a deferred splat leaves it.
        let mut inline_splat = None;
        let mut deferred_splat = None;
        let mut splat_budget = 0;
        if let Some(value) = splat {
            if message_size + splat_size + ms_size + timestamp_size <= self.break_length {
                let opts = InspectOptions {
                    break_length: usize::MAX,
                    ..self.inspect.clone()
                };
                inline_splat = Some(inspect::inspect(&value, &opts));
                splat_budget = splat_size;
                record.extras.clear();
            } else {
                deferred_splat = Some(value);
            }
        }

        let mut meta_lines = Vec::new();
        if self.show_meta {
            if let Some(stack) = record.stack.as_deref() {
                meta_lines.extend(inspect::stack_lines(stack));
            }
            if let Some(value) = &deferred_splat {
                meta_lines.extend(inspect::inspect_lines(value, &self.inspect));
            }
        }

        let glyphs = if self.ignore_special_chars {
            &PLAIN_GLYPHS
        } else {
            &BOX_GLYPHS
        };
        let header_glyph = if meta_lines.is_empty() {
            glyphs.single
        } else {
            glyphs.start
        };
        line.push_str(&self.decorate_glyph(header_glyph, &color));

        if let Some(text) = inline_splat {
            line.push(' ');
            line.push_str(&text);
        }

        if let Some(ms) = record.elapsed.as_deref() {
            // SAFETY: write to a string always succeeds
            if self.ignore_special_chars {
                write!(line, " ({ms})").unwrap();
            } else if self.colors {
                write!(line, "{}", format!(" {ms}").dimmed().italic()).unwrap();
            } else {
                write!(line, " {ms}").unwrap();
            }
        }

        if let Some(ts) = right_timestamp {
            let used = message_size + splat_budget + ms_size;
            let pad = self.break_length as isize - used as isize - ts.len() as isize + 1;
            line.push_str(&" ".repeat(pad.max(1) as usize));
            if self.colors {
                // SAFETY: write to a string always succeeds
                write!(line, "{}", ts.dimmed()).unwrap();
            } else {
                line.push_str(&ts);
            }
        }

        if !meta_lines.is_empty() {
            let indent: String = record
                .message
                .chars()
                .take_while(|c| c.is_whitespace())
                .collect();
            let last = meta_lines.len() - 1;
            for (i, meta) in meta_lines.iter().enumerate() {
                let glyph = if i == last { glyphs.end } else { glyphs.line };
                let glyph = self.decorate_glyph(glyph, &color);
                // SAFETY: write to a string always succeeds
                write!(line, "\n{indent}{glyph} {meta}").unwrap();
            }
        }

        record.rendered = Some(line);
        record
    }

    /// Derives the extra-data attached to `record`, if any.
    ///
    /// Named fields win over positional extras; integer-keyed fields normalize to a sequence; a
    /// lone positional extra on a record without a stack is returned unwrapped.
    fn splat(&self, record: &Record) -> Option<Value> {
        let mut stripped = record.fields.clone();
        for name in RESERVED_FIELDS {
            stripped.shift_remove(*name);
        }
        for name in &self.meta_strip {
            stripped.shift_remove(name.as_str());
        }

        if !stripped.is_empty() {
            if stripped.keys().all(|key| key.parse::<u64>().is_ok()) {
                return Some(Value::Array(stripped.into_iter().map(|(_, v)| v).collect()));
            }
            return Some(Value::Object(stripped));
        }

        if record.stack.is_none() && record.extras.len() == 1 {
            return Some(record.extras[0].clone());
        }

        None
    }

    fn decorate_glyph(&self, glyph: &str, color: &str) -> String {
        if glyph.is_empty() {
            return String::new();
        }
        if !self.colors {
            return glyph.to_string();
        }
        if color.is_empty() {
            glyph.dimmed().to_string()
        } else {
            format!("{color}{}{}", glyph.dimmed(), ansi::RESET)
        }
    }
}

fn padded(size: usize) -> usize {
    if size > 0 { size + 1 } else { 0 }
}

impl Layout for HumanFormat {
    fn format(&self, record: &mut Record) -> Result<Vec<u8>, Error> {
        self.transform(record);
        Ok(record.rendered.clone().unwrap_or_default().into_bytes())
    }
}

/// Builder for [`HumanFormat`].
#[derive(Debug)]
pub struct HumanFormatBuilder {
    show_meta: bool,
    show_timestamp: Option<TimestampStyle>,
    colors: bool,
    ignore_special_chars: bool,
    break_length: usize,
    inspect: Option<InspectOptions>,
    meta_strip: Vec<String>,
    timezone: TimeZone,
}

impl HumanFormatBuilder {
    /// Whether stack traces and deferred extra-data render at all. Default to true.
    pub fn show_meta(mut self, show_meta: bool) -> Self {
        self.show_meta = show_meta;
        self
    }

    /// Render the record's timestamp with the given style. Timestamps are off by default.
    pub fn show_timestamp(mut self, style: TimestampStyle) -> Self {
        self.show_timestamp = Some(style);
        self
    }

    /// Whether color sequences are emitted. Default to true.
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Degrade box-drawing glyphs to plain text, for file sinks. Default to false.
    pub fn ignore_special_chars(mut self, ignore: bool) -> Self {
        self.ignore_special_chars = ignore;
        self
    }

    /// Set the total column budget for one rendered line. Default to 120.
    pub fn break_length(mut self, break_length: usize) -> Self {
        self.break_length = break_length;
        self
    }

    /// Set the bounds for extra-data rendering.
    ///
    /// When not set, defaults derive from the line budget, keeping a small margin for the
    /// connector glyph column.
    pub fn inspect_options(mut self, opts: InspectOptions) -> Self {
        self.inspect = Some(opts);
        self
    }

    /// Field names always excluded from extra-data, in addition to the reserved ones.
    pub fn meta_strip(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.meta_strip = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the timezone timestamps render in. Default to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Validate the configuration and construct the formatter.
    pub fn build(self) -> Result<HumanFormat, Error> {
        if self.break_length == 0 {
            return Err(Error::new("break length must be positive"));
        }
        let inspect = self.inspect.unwrap_or_else(|| InspectOptions {
            colors: self.colors,
            break_length: self.break_length.saturating_sub(3),
            ..InspectOptions::default()
        });
        Ok(HumanFormat {
            show_meta: self.show_meta,
            show_timestamp: self.show_timestamp,
            colors: self.colors,
            ignore_special_chars: self.ignore_special_chars,
            break_length: self.break_length,
            inspect,
            meta_strip: self.meta_strip,
            timezone: self.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use jiff::tz::TimeZone;
    use serde_json::json;

    use super::HumanFormat;
    use crate::TimestampStyle;
    use crate::ansi::visible_width;
    use crate::record::Record;

    fn plain(break_length: usize) -> HumanFormat {
        HumanFormat::builder()
            .break_length(break_length)
            .colors(false)
            .build()
            .unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_build_rejects_zero_break_length() {
        let result = HumanFormat::builder().break_length(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_derives_inspect_bounds() {
        let format = plain(85);
        assert_eq!(format.inspect.break_length, 82);
        assert!(!format.inspect.colors);
    }

    #[test]
    fn test_named_fields_become_extra_data() {
        let record = Record::builder("info", "Hello")
            .field("make", "Ford")
            .build();
        let splat = plain(85).splat(&record).unwrap();
        assert_eq!(splat, json!({"make": "Ford"}));
    }

    #[test]
    fn test_integer_keyed_fields_normalize_to_sequence() {
        let record = Record::builder("info", "Hello")
            .field("0", "a")
            .field("1", "b")
            .build();
        let splat = plain(85).splat(&record).unwrap();
        assert_eq!(splat, json!(["a", "b"]));
    }

    #[test]
    fn test_mixed_keys_stay_a_mapping() {
        let record = Record::builder("info", "Hello")
            .field("0", "a")
            .field("name", "b")
            .build();
        let splat = plain(85).splat(&record).unwrap();
        assert_eq!(splat, json!({"0": "a", "name": "b"}));
    }

    #[test]
    fn test_reserved_and_stripped_fields_are_excluded() {
        let format = HumanFormat::builder()
            .break_length(85)
            .colors(false)
            .meta_strip(["timestamp"])
            .build()
            .unwrap();
        let record = Record::builder("info", "Hello")
            .field("level", "shadow")
            .field("ms", "+1ms")
            .field("stack", "nope")
            .field("timestamp", "2024-08-11")
            .build();
        assert_eq!(format.splat(&record), None);
    }

    #[test]
    fn test_single_extra_is_unwrapped() {
        let record = Record::builder("info", "Hello").extra("world").build();
        assert_eq!(plain(85).splat(&record).unwrap(), json!("world"));
    }

    #[test]
    fn test_single_extra_with_stack_is_not_unwrapped() {
        let record = Record::builder("info", "Hello")
            .extra("world")
            .stack("Error: boom")
            .build();
        assert_eq!(plain(85).splat(&record), None);
    }

    #[test]
    fn test_multiple_extras_without_fields_render_nothing() {
        let record = Record::builder("info", "Hello")
            .extra("a")
            .extra("b")
            .build();
        assert_eq!(plain(85).splat(&record), None);
    }

    #[test]
    fn test_inline_when_sum_meets_the_budget() {
        // message 10 + glyph 1 (+1) = 12; quoted 70-char extra 72 (+1) = 73; total 85.
        let mut record = Record::builder("info", "m".repeat(10))
            .extra("x".repeat(70))
            .build();
        plain(85).transform(&mut record);
        let rendered = record.rendered.unwrap();
        assert!(!rendered.contains('\n'));
        assert_eq!(rendered, format!("{}▪ \"{}\"", "m".repeat(10), "x".repeat(70)));
        assert!(record.extras.is_empty());
    }

    #[test]
    fn test_block_when_sum_exceeds_the_budget() {
        // One more character pushes the sum to 86.
        let mut record = Record::builder("info", "m".repeat(10))
            .extra("x".repeat(71))
            .build();
        plain(85).transform(&mut record);
        let rendered = record.rendered.unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], format!("{}┏", "m".repeat(10)));
        assert_eq!(lines[1], format!("┗ \"{}\"", "x".repeat(71)));
        assert_eq!(record.extras.len(), 1);
    }

    #[test]
    fn test_left_timestamp_prefix() {
        let format = HumanFormat::builder()
            .break_length(85)
            .colors(false)
            .show_timestamp(TimestampStyle::default())
            .timezone(TimeZone::UTC)
            .build()
            .unwrap();
        let mut record = Record::builder("info", "Hello")
            .timestamp(ts("2024-08-11T22:44:57.172Z"))
            .build();
        format.transform(&mut record);
        assert_eq!(
            record.rendered.as_deref(),
            Some("[2024-08-11 22:44:57.172] Hello▪")
        );
    }

    #[test]
    fn test_missing_timestamp_renders_no_placeholder() {
        let format = HumanFormat::builder()
            .break_length(85)
            .colors(false)
            .show_timestamp(TimestampStyle::default())
            .build()
            .unwrap();
        let mut record = Record::new("info", "Hello");
        format.transform(&mut record);
        assert_eq!(record.rendered.as_deref(), Some("Hello▪"));
    }

    #[test]
    fn test_right_timestamp_aligns_to_break_length() {
        let format = HumanFormat::builder()
            .break_length(85)
            .colors(false)
            .show_timestamp(TimestampStyle {
                only_time: true,
                right: true,
            })
            .timezone(TimeZone::UTC)
            .build()
            .unwrap();
        let mut record = Record::builder("info", "Hello")
            .timestamp(ts("2024-08-11T22:44:57.172Z"))
            .build();
        format.transform(&mut record);
        let rendered = record.rendered.unwrap();
        assert!(rendered.ends_with("22:44:57.172"));
        assert_eq!(visible_width(&rendered), 85);
    }

    #[test]
    fn test_elapsed_suffix() {
        let mut record = Record::builder("info", "Hello").elapsed("+5ms").build();
        plain(85).transform(&mut record);
        assert_eq!(record.rendered.as_deref(), Some("Hello▪ +5ms"));
    }

    #[test]
    fn test_plain_mode_degrades_glyphs_and_elapsed() {
        let format = HumanFormat::builder()
            .break_length(120)
            .colors(false)
            .ignore_special_chars(true)
            .build()
            .unwrap();
        let mut record = Record::builder("info", "Hello")
            .extra("world")
            .elapsed("+5ms")
            .build();
        format.transform(&mut record);
        assert_eq!(record.rendered.as_deref(), Some("Hello \"world\" (+5ms)"));
    }

    #[test]
    fn test_show_meta_off_drops_blocks() {
        let format = HumanFormat::builder()
            .break_length(85)
            .colors(false)
            .show_meta(false)
            .build()
            .unwrap();
        let mut record = Record::builder("error", "Hello")
            .stack("Error: boom\n    at foo")
            .build();
        format.transform(&mut record);
        assert_eq!(record.rendered.as_deref(), Some("Hello▪"));
    }

    #[test]
    fn test_indented_message_indents_continuation_lines() {
        let mut record = Record::builder("error", "  Hello")
            .stack("Error: boom")
            .build();
        plain(85).transform(&mut record);
        assert_eq!(record.rendered.as_deref(), Some("  Hello┏\n  ┗ Error: boom"));
    }

    #[test]
    fn test_glyph_takes_the_level_color() {
        let format = HumanFormat::builder()
            .break_length(85)
            .colors(true)
            .build()
            .unwrap();
        let mut record = Record::new("\x1b[31merror\x1b[0m", "Hello");
        format.transform(&mut record);
        let rendered = record.rendered.unwrap();
        assert!(rendered.starts_with("Hello\x1b[31m"));
        assert!(rendered.ends_with("\x1b[0m"));
        assert_eq!(visible_width(&rendered), 6);
    }
}
