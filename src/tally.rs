use anyhow::{Context, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use crate::extract;
use crate::models::{EpisodeRecord, Tallies};

/// A speaker line opens with a word-boundary name, lazily captured up
/// to the first colon that is followed by whitespace or line end.
/// Stage directions like "[Door slams]" never match; prose lines such
/// as "Note: the tape" do, and stay in the tally on purpose.
static SPEAKER_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\b(.*?):(?:\s|$)").unwrap());

/// Adds each script line's speaker (when one is recognized) to the
/// speaker set and bumps that speaker's line count.
pub fn accumulate_speakers(record: &EpisodeRecord, tallies: &mut Tallies) {
    for line in &record.script {
        if let Some(cap) = SPEAKER_LINE_RE.captures(line) {
            let name = cap[1].to_string();
            tallies.speakers.insert(name.clone());
            *tallies.speaker_lines.entry(name).or_insert(0) += 1;
        }
    }
}

/// Bumps the count of each of the record's locations, simplified.
pub fn accumulate_locations(record: &EpisodeRecord, tallies: &mut Tallies) {
    for location in &record.locations {
        let simple = extract::simplify_location(location);
        *tallies.locations.entry(simple).or_insert(0) += 1;
    }
}

/// Reads every normalized `.txt` record back from `out_dir`, feeding
/// the speaker tally. Returns the parsed records for the report stage.
pub fn tally_all(out_dir: &Path, tallies: &mut Tallies) -> Result<Vec<(PathBuf, EpisodeRecord)>> {
    let mut records = Vec::new();
    for path in extract::files_with_extension(out_dir, "txt")? {
        let text =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let record = extract::parse_record(&text)
            .with_context(|| format!("parsing record {}", path.display()))?;
        accumulate_speakers(&record, tallies);
        records.push((path, record));
    }
    Ok(records)
}

/// Top `n` entries by count, descending. The sort is stable, so equal
/// counts keep first-seen order.
pub fn top_n(counts: &IndexMap<String, u32>, n: usize) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = counts
        .iter()
        .map(|(name, count)| (name.clone(), *count))
        .collect();
    ranked.sort_by_key(|&(_, count)| Reverse(count));
    ranked.truncate(n);
    ranked
}
