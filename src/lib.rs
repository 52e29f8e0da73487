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

//! Humanfmt renders a structured log record into a width-aware, optionally colorized,
//! human-readable text block for console and file sinks.
//!
//! # Overview
//!
//! Humanfmt is the formatting stage of a logging pipeline. Callers hand a [`Record`] to
//! [`HumanFormat::transform`] and receive it back with the rendered text populated. The formatter
//! decides whether auxiliary structured data fits inline after the message or must become an
//! indented multi-line block, lays out timestamps and elapsed-time suffixes against a single
//! line-length budget, and connects continuation lines with box-drawing glyphs.
//!
//! Level filtering, transports, and logger registration are left to the surrounding pipeline.
//!
//! # Examples
//!
//! A lone extra value that fits the line budget renders inline:
//!
//! ```
//! use humanfmt::HumanFormat;
//! use humanfmt::Record;
//!
//! let format = HumanFormat::builder()
//!     .break_length(85)
//!     .colors(false)
//!     .build()
//!     .unwrap();
//!
//! let mut record = Record::builder("info", "Hello").extra("world").build();
//! format.transform(&mut record);
//! assert_eq!(record.rendered.as_deref(), Some("Hello▪ \"world\""));
//! ```
//!
//! A stack trace renders as a connected block below the message:
//!
//! ```
//! use humanfmt::HumanFormat;
//! use humanfmt::Record;
//!
//! let format = HumanFormat::builder().colors(false).build().unwrap();
//!
//! let mut record = Record::builder("error", "Request failed")
//!     .stack("Error: boom\n    at handler")
//!     .build();
//! format.transform(&mut record);
//! let rendered = record.rendered.unwrap();
//! assert_eq!(rendered.lines().count(), 3);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod ansi;
pub mod layout;

mod color;
mod elapsed;
mod error;
mod inspect;
mod record;
mod timestamp;

pub use color::LevelPalette;
pub use elapsed::ElapsedTracker;
pub use error::Error;
pub use inspect::InspectOptions;
pub use layout::HumanFormat;
pub use layout::HumanFormatBuilder;
pub use layout::Layout;
pub use record::Record;
pub use record::RecordBuilder;
pub use timestamp::TimestampStyle;
