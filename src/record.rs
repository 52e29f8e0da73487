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

//! The log record passed through the formatting stage.

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// The payload of a log event.
///
/// A record is created by the caller per log event and passed exactly once through
/// [`HumanFormat::transform`](crate::HumanFormat::transform), which populates [`rendered`]
/// (and consumes [`extras`] when they are rendered inline). The formatter never retains a
/// record after returning it.
///
/// [`rendered`]: Record::rendered
/// [`extras`]: Record::extras
#[derive(Debug, Clone)]
pub struct Record {
    /// The level name; a colorizer stage may have wrapped it in a color sequence.
    pub level: String,
    /// The log message.
    pub message: String,
    /// The instant the event was observed.
    pub timestamp: Option<Timestamp>,
    /// A precomputed elapsed-time string, e.g. `+5ms`.
    pub elapsed: Option<String>,
    /// An error stack trace.
    pub stack: Option<String>,
    /// Positional values supplied alongside the record.
    pub extras: Vec<Value>,
    /// Arbitrary named fields, in insertion order.
    pub fields: Map<String, Value>,
    /// The rendered text, set by the formatter.
    pub rendered: Option<String>,
}

impl Record {
    /// Create a record with the given level and message.
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Record {
        Record::builder(level, message).build()
    }

    /// Create a builder for a record with the given level and message.
    pub fn builder(level: impl Into<String>, message: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            record: Record {
                level: level.into(),
                message: message.into(),
                timestamp: None,
                elapsed: None,
                stack: None,
                extras: vec![],
                fields: Map::new(),
                rendered: None,
            },
        }
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Set the instant the event was observed.
    pub fn timestamp(mut self, ts: Timestamp) -> Self {
        self.record.timestamp = Some(ts);
        self
    }

    /// Set the elapsed-time string.
    pub fn elapsed(mut self, elapsed: impl Into<String>) -> Self {
        self.record.elapsed = Some(elapsed.into());
        self
    }

    /// Set the error stack trace.
    pub fn stack(mut self, stack: impl Into<String>) -> Self {
        self.record.stack = Some(stack.into());
        self
    }

    /// Append a positional extra value.
    ///
    /// A value that cannot be serialized degrades to a placeholder string instead of failing.
    pub fn extra(mut self, value: impl Serialize) -> Self {
        self.record.extras.push(to_value(value));
        self
    }

    /// Set a named field.
    ///
    /// A value that cannot be serialized degrades to a placeholder string instead of failing.
    pub fn field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.record.fields.insert(key.into(), to_value(value));
        self
    }

    /// Consume the builder and return the record.
    pub fn build(self) -> Record {
        self.record
    }
}

fn to_value(value: impl Serialize) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde::Serializer;
    use serde_json::json;

    use super::Record;

    #[test]
    fn test_builder() {
        let record = Record::builder("info", "Hello")
            .extra("world")
            .field("year", 1969)
            .stack("Error: boom")
            .elapsed("+5ms")
            .build();

        assert_eq!(record.level, "info");
        assert_eq!(record.message, "Hello");
        assert_eq!(record.extras, vec![json!("world")]);
        assert_eq!(record.fields.get("year"), Some(&json!(1969)));
        assert_eq!(record.stack.as_deref(), Some("Error: boom"));
        assert_eq!(record.elapsed.as_deref(), Some("+5ms"));
        assert_eq!(record.rendered, None);
    }

    #[test]
    fn test_unserializable_extra_degrades() {
        struct Opaque;

        impl Serialize for Opaque {
            fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("opaque handle"))
            }
        }

        let record = Record::builder("info", "Hello").extra(Opaque).build();
        let rendered = record.extras[0].as_str().unwrap();
        assert!(rendered.starts_with("<unserializable:"));
    }
}
