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

//! Timestamp rendering for the first line of a formatted record.

use jiff::Timestamp;
use jiff::tz::TimeZone;

/// Where and how a record's timestamp appears on the rendered line.
///
/// The default shows the full date and time as a `[...]` prefix at the start of the line.
///
/// # Examples
///
/// ```
/// use humanfmt::TimestampStyle;
///
/// // Time-of-day only, right-aligned at the line budget.
/// let style = TimestampStyle {
///     only_time: true,
///     right: true,
/// };
/// # let _ = style;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampStyle {
    /// Render `HH:MM:SS.mmm` without the date part.
    pub only_time: bool,
    /// Right-align the timestamp at the line budget instead of prefixing it.
    pub right: bool,
}

/// Formats `ts` in `tz` as `YYYY-MM-DD HH:MM:SS.mmm`, or `HH:MM:SS.mmm` with `only_time`.
///
/// All components are zero-padded; milliseconds are always three digits.
pub fn format_timestamp(ts: Timestamp, tz: &TimeZone, only_time: bool) -> String {
    let dt = tz.to_datetime(ts);
    let time = format!(
        "{:02}:{:02}:{:02}.{:03}",
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.millisecond()
    );
    if only_time {
        time
    } else {
        format!("{:04}-{:02}-{:02} {}", dt.year(), dt.month(), dt.day(), time)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use jiff::tz::TimeZone;

    use super::format_timestamp;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_only_time_is_twelve_chars() {
        let out = format_timestamp(ts("2024-08-11T22:44:57.172Z"), &TimeZone::UTC, true);
        assert_eq!(out, "22:44:57.172");
        assert_eq!(out.len(), 12);
    }

    #[test]
    fn test_full_form_prepends_date() {
        let out = format_timestamp(ts("2024-08-11T22:44:57.172Z"), &TimeZone::UTC, false);
        assert_eq!(out, "2024-08-11 22:44:57.172");
    }

    #[test]
    fn test_components_are_zero_padded() {
        let out = format_timestamp(ts("2024-01-05T03:04:05.007Z"), &TimeZone::UTC, false);
        assert_eq!(out, "2024-01-05 03:04:05.007");
    }

    #[test]
    fn test_timezone_is_applied() {
        let tz = TimeZone::fixed(jiff::tz::offset(2));
        let out = format_timestamp(ts("2024-08-11T22:44:57.172Z"), &tz, true);
        assert_eq!(out, "00:44:57.172");
    }
}
