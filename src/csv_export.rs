// Two-section CSV export: mood entries, a blank-line gap, then gratitude.
// Column order and section titles are read back by older tooling; keep them.

use std::io;

use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::models::{GratitudeEntry, MoodEntry};

pub const MOOD_SECTION: &str = "MOOD ENTRIES";
pub const GRATITUDE_SECTION: &str = "GRATITUDE ENTRIES";

const MOOD_COLUMNS: [&str; 9] = [
    "Date",
    "Time",
    "Mood",
    "Intensity",
    "Energy Level",
    "Sleep Quality",
    "Note",
    "Triggers",
    "Activities",
];
const GRATITUDE_COLUMNS: [&str; 3] = ["Date", "Time", "Gratitude Text"];

const LIST_SEPARATOR: &str = "; ";

// Timestamps are shown in `offset` (the caller's local time).
pub fn export_csv(
    entries: &[MoodEntry],
    gratitude: &[GratitudeEntry],
    offset: FixedOffset,
) -> Result<String> {
    let mut out = mood_section(entries, offset)?;
    out.push_str("\n\n");
    out.push_str(&gratitude_section(gratitude, offset)?);
    Ok(out)
}

fn mood_section(entries: &[MoodEntry], offset: FixedOffset) -> Result<String> {
    let mut w = section_writer();
    w.write_record([MOOD_SECTION])?;
    w.write_record(MOOD_COLUMNS)?;

    for e in entries {
        let (date, time) = date_and_time(e.timestamp, offset);
        w.write_record([
            date,
            time,
            e.mood.clone(),
            e.intensity.to_string(),
            e.energy_level.to_string(),
            e.sleep_quality.map(|v| v.to_string()).unwrap_or_default(),
            e.note.clone(),
            e.triggers.join(LIST_SEPARATOR),
            e.activities.join(LIST_SEPARATOR),
        ])?;
    }

    finish(w)
}

fn gratitude_section(entries: &[GratitudeEntry], offset: FixedOffset) -> Result<String> {
    let mut w = section_writer();
    w.write_record([GRATITUDE_SECTION])?;
    w.write_record(GRATITUDE_COLUMNS)?;

    for g in entries {
        let (date, time) = date_and_time(g.timestamp, offset);
        w.write_record([date, time, g.text.clone()])?;
    }

    finish(w)
}

// Section title and column header have different widths.
fn section_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new())
}

fn finish(w: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = w
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(text)
}

fn date_and_time(ts: DateTime<FixedOffset>, offset: FixedOffset) -> (String, String) {
    let local = ts.with_timezone(&offset);
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M:%S").to_string(),
    )
}
