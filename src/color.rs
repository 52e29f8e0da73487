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

//! The colorizer stage that runs before formatting.
//!
//! [`LevelPalette`] wraps a record's level (and optionally its message) in the level's color, so
//! that the formatter can pick up the color for connector glyphs. It is a pipeline stage of its
//! own: sinks that want plain text simply skip it.

use colored::Color;
use colored::Colorize;

use crate::record::Record;

/// Colors for the well-known level names.
const DEFAULT_PALETTE: &[(&str, Color)] = &[
    ("error", Color::Red),
    ("warn", Color::Yellow),
    ("info", Color::White),
    ("http", Color::Green),
    ("verbose", Color::Cyan),
    ("debug", Color::Blue),
    ("silly", Color::BrightBlack),
];

/// A static table mapping level names to colors.
///
/// # Examples
///
/// ```
/// use colored::Color;
/// use humanfmt::LevelPalette;
/// use humanfmt::Record;
///
/// let palette = LevelPalette::default().with_color("audit", Color::Magenta);
/// let mut record = Record::new("info", "Hello");
/// palette.apply(&mut record);
/// ```
#[derive(Debug, Clone)]
pub struct LevelPalette {
    entries: Vec<(String, Color)>,
    all: bool,
}

impl Default for LevelPalette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PALETTE
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
            all: false,
        }
    }
}

impl LevelPalette {
    /// Create an empty palette with no level colors.
    pub fn new() -> Self {
        Self {
            entries: vec![],
            all: false,
        }
    }

    /// Set or override the color of a level.
    pub fn with_color(mut self, level: impl Into<String>, color: Color) -> Self {
        let level = level.into();
        match self.entries.iter_mut().find(|(name, _)| *name == level) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((level, color)),
        }
        self
    }

    /// Colorize the whole message in addition to the level.
    pub fn colorize_all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Look up the color of a level name.
    pub fn color_of(&self, level: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(name, _)| name == level)
            .map(|(_, color)| *color)
    }

    /// Wrap the record's level (and with [`colorize_all`](LevelPalette::colorize_all), its
    /// message) in the level's color. Records with an unknown level pass through unchanged.
    pub fn apply(&self, record: &mut Record) {
        let Some(color) = self.color_of(&record.level) else {
            return;
        };
        record.level = record.level.color(color).to_string();
        if self.all {
            record.message = record.message.color(color).to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use colored::Color;

    use super::LevelPalette;
    use crate::ansi::visible_width;
    use crate::record::Record;

    #[test]
    fn test_default_table() {
        let palette = LevelPalette::default();
        assert_eq!(palette.color_of("error"), Some(Color::Red));
        assert_eq!(palette.color_of("silly"), Some(Color::BrightBlack));
        assert_eq!(palette.color_of("nonexistent"), None);
    }

    #[test]
    fn test_with_color_overrides() {
        let palette = LevelPalette::default().with_color("info", Color::Magenta);
        assert_eq!(palette.color_of("info"), Some(Color::Magenta));
    }

    #[test]
    fn test_apply_preserves_visible_width() {
        let palette = LevelPalette::default();
        let mut record = Record::new("info", "Hello");
        palette.apply(&mut record);
        // Whether or not color output is enabled in this environment, the visible text is intact.
        assert_eq!(visible_width(&record.level), 4);
        assert_eq!(record.message, "Hello");
    }

    #[test]
    fn test_apply_unknown_level_is_untouched() {
        let palette = LevelPalette::default();
        let mut record = Record::new("custom", "Hello");
        palette.apply(&mut record);
        assert_eq!(record.level, "custom");
    }
}
