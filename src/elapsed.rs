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

//! Elapsed-time stamping between consecutive records.

use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use jiff::Timestamp;

use crate::record::Record;

const UNSET: i64 = i64::MIN;

/// Stamps records with the milliseconds elapsed since the previous stamped record.
///
/// The first stamped record reads `+0ms`. The tracker holds a single atomic timestamp and can be
/// shared across threads; the formatter itself stays stateless.
///
/// # Examples
///
/// ```
/// use humanfmt::ElapsedTracker;
/// use humanfmt::Record;
///
/// let tracker = ElapsedTracker::new();
/// let mut record = Record::new("info", "Hello");
/// tracker.stamp(&mut record);
/// assert_eq!(record.elapsed.as_deref(), Some("+0ms"));
/// ```
#[derive(Debug)]
pub struct ElapsedTracker {
    last: AtomicI64,
}

impl Default for ElapsedTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTracker {
    /// Create a tracker with no previous record.
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(UNSET),
        }
    }

    /// Set `record.elapsed` to `+Nms` since the previously stamped record.
    ///
    /// The record's own timestamp is used when present; otherwise the current time.
    pub fn stamp(&self, record: &mut Record) {
        let now = record
            .timestamp
            .unwrap_or_else(Timestamp::now)
            .as_millisecond();
        let prev = self.last.swap(now, Ordering::AcqRel);
        let diff = if prev == UNSET { 0 } else { (now - prev).max(0) };
        record.elapsed = Some(format!("+{diff}ms"));
    }
}
