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

//! The plain-text configuration a file sink would use: no colors, no box-drawing glyphs, a wider
//! line budget, and full date-time prefixes.

use humanfmt::HumanFormat;
use humanfmt::InspectOptions;
use humanfmt::Record;
use humanfmt::TimestampStyle;
use jiff::Timestamp;

fn main() {
    let format = HumanFormat::builder()
        .break_length(120)
        .colors(false)
        .ignore_special_chars(true)
        .show_timestamp(TimestampStyle::default())
        .inspect_options(InspectOptions {
            depth: 5,
            colors: false,
            break_length: 100,
            max_array_length: 100,
            compact: true,
        })
        .build()
        .unwrap();

    let records = vec![
        Record::builder("info", "Job started").field("jobId", 7).build(),
        Record::builder("info", "Job finished")
            .field("jobId", 7)
            .elapsed("+125ms")
            .build(),
        Record::builder("error", "Job crashed")
            .stack("Error: out of retries\n    at runJob")
            .build(),
    ];

    for mut record in records {
        record.timestamp = Some(Timestamp::now());
        format.transform(&mut record);
        println!("{}", record.rendered.as_deref().unwrap_or_default());
    }
}
