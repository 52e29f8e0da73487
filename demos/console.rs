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

use humanfmt::ElapsedTracker;
use humanfmt::HumanFormat;
use humanfmt::LevelPalette;
use humanfmt::Record;
use humanfmt::TimestampStyle;
use jiff::Timestamp;
use serde::Serialize;

#[derive(Serialize)]
struct Car {
    make: &'static str,
    model: &'static str,
    year: u32,
}

fn main() {
    let palette = LevelPalette::default();
    let tracker = ElapsedTracker::new();
    let format = HumanFormat::builder()
        .break_length(85)
        .show_timestamp(TimestampStyle {
            only_time: true,
            right: true,
        })
        .meta_strip(["requestId"])
        .build()
        .unwrap();

    let records = vec![
        Record::new("silly", "Logging initialized"),
        Record::builder("debug", "Debug an object")
            .extra(Car {
                make: "Ford",
                model: "Mustang",
                year: 1969,
            })
            .build(),
        Record::builder("info", "Information")
            .extra(["Lorem ipsum", "dolor sit amet"])
            .build(),
        Record::builder("http", "GET /api/v1/resources")
            .field("status", 200)
            .field("requestId", "f3a1")
            .build(),
        Record::builder("warn", "Cache miss").field("key", "user:42").build(),
        Record::builder("error", "Request failed")
            .stack("Error: connect ECONNREFUSED 127.0.0.1:4000\n    at TCPConnectWrap.afterConnect\n    at processTicksAndRejections")
            .field("url", "http://localhost:4000")
            .field("attempt", 3)
            .build(),
    ];

    for mut record in records {
        record.timestamp = Some(Timestamp::now());
        palette.apply(&mut record);
        tracker.stamp(&mut record);
        format.transform(&mut record);
        println!("{}", record.rendered.as_deref().unwrap_or_default());
    }
}
