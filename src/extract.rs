// src/extract.rs
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::{EpisodeRecord, Tallies};
use crate::tally;

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static HEADLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.mw-headline").unwrap());
static LOCATION_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s-\s.*").unwrap());

/// Parses one raw episode page into its structured record.
///
/// Scene locations are the text of the `mw-headline` section spans, in
/// document order. Dialogue lines are the inner markup of each `p`
/// element, one line per element, trimmed and cleaned.
pub fn extract_record(html: &str) -> EpisodeRecord {
    let doc = Html::parse_document(html);

    let locations: Vec<String> = doc
        .select(&HEADLINE_SELECTOR)
        .map(|el| el.text().collect::<String>())
        .collect();

    let script: Vec<String> = doc
        .select(&PARAGRAPH_SELECTOR)
        .map(|el| clean_dialogue(el.inner_html().trim_end()))
        .collect();

    EpisodeRecord { locations, script }
}

/// Strips bold markup and the handful of entities the wiki markup
/// leaves in dialogue. `&amp;` becomes the word "and"; non-breaking
/// spaces vanish in every spelling a serializer can give them.
pub fn clean_dialogue(raw: &str) -> String {
    raw.replace("<b>", "")
        .replace("</b>", "")
        .replace("&amp;", "and")
        .replace("&#160;", "")
        .replace("&nbsp;", "")
        .replace('\u{a0}', "")
}

/// Drops the scene qualifier from a location label: everything from the
/// first whitespace-hyphen-whitespace on ("The Lab - Day" -> "The Lab").
pub fn simplify_location(label: &str) -> String {
    LOCATION_SUFFIX_RE.replace(label, "").into_owned()
}

/// Renders a record in the on-disk layout: a Locations section, a blank
/// separator, then a Script section. Both headers keep a trailing space.
pub fn render_record(record: &EpisodeRecord) -> String {
    let mut out = String::new();
    out.push_str("Locations: \n");
    for location in &record.locations {
        out.push_str(location);
        out.push('\n');
    }
    out.push_str("\nScript: \n");
    for line in &record.script {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Inverse of [`render_record`]. The section headers are structure, not
/// content, so they never leak into the parsed record.
pub fn parse_record(text: &str) -> Result<EpisodeRecord> {
    let mut lines = text.lines();

    match lines.next() {
        Some(header) if header.trim_end() == "Locations:" => {}
        other => bail!("record does not start with a Locations section (first line: {other:?})"),
    }

    let mut locations = Vec::new();
    loop {
        match lines.next() {
            Some("") => break,
            Some(line) => locations.push(line.to_string()),
            None => bail!("record ends inside the Locations section"),
        }
    }

    match lines.next() {
        Some(header) if header.trim_end() == "Script:" => {}
        other => bail!("record missing the Script header after the separator (got {other:?})"),
    }

    let script: Vec<String> = lines.map(str::to_string).collect();
    Ok(EpisodeRecord { locations, script })
}

/// Normalizes every saved `.html` page in `out_dir` into a sibling
/// `.txt` record, accumulating the location tally along the way.
/// Returns the number of records written.
pub fn extract_all(out_dir: &Path, tallies: &mut Tallies) -> Result<usize> {
    let pages = files_with_extension(out_dir, "html")?;
    for path in &pages {
        let html = fs::read_to_string(path)
            .with_context(|| format!("reading raw page {}", path.display()))?;
        let record = extract_record(&html);
        tally::accumulate_locations(&record, tallies);

        let dest = path.with_extension("txt");
        fs::write(&dest, render_record(&record))
            .with_context(|| format!("writing record {}", dest.display()))?;
        debug!(
            "Normalized {} - locations={}, dialogue_lines={}",
            dest.display(),
            record.locations.len(),
            record.script.len()
        );
    }
    Ok(pages.len())
}

/// Files in `dir` carrying `ext`, sorted by path for deterministic
/// processing order.
pub(crate) fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("listing directory {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(ext))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<h2><span class="mw-headline" id="s1">The Lab - Day</span></h2>
<p>Mike: We have to go.
</p>
<h2><span class="mw-headline" id="s2">The Upside Down - Night</span></h2>
<p><b>Will:</b> Help &amp; hurry.&#160;
</p>
</body></html>"#;

    #[test]
    fn record_keeps_document_order_and_cleans_markup() {
        let record = extract_record(PAGE);
        assert_eq!(
            record.locations,
            vec!["The Lab - Day", "The Upside Down - Night"]
        );
        assert_eq!(
            record.script,
            vec!["Mike: We have to go.", "Will: Help and hurry."]
        );
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean_dialogue("<b>Will:</b> Help &amp; hurry.&#160;done&nbsp;");
        let twice = clean_dialogue(&once);
        assert_eq!(once, "Will: Help and hurry.done");
        assert_eq!(once, twice);
    }

    #[test]
    fn location_suffix_is_stripped_from_the_first_delimiter() {
        assert_eq!(simplify_location("The Upside Down - Night"), "The Upside Down");
        assert_eq!(simplify_location("The Lab - Day"), "The Lab");
        assert_eq!(simplify_location("Wheeler Home - Basement - Night"), "Wheeler Home");
        assert_eq!(simplify_location("Mirkwood"), "Mirkwood");
        assert_eq!(simplify_location("Mid-morning patrol"), "Mid-morning patrol");
    }

    #[test]
    fn rendered_layout_is_exact() {
        let record = extract_record(PAGE);
        assert_eq!(
            render_record(&record),
            "Locations: \nThe Lab - Day\nThe Upside Down - Night\n\n\
             Script: \nMike: We have to go.\nWill: Help and hurry.\n"
        );
    }

    #[test]
    fn parse_inverts_render() {
        let record = extract_record(PAGE);
        let parsed = parse_record(&render_record(&record)).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn parse_rejects_missing_sections() {
        assert!(parse_record("Script: \nMike: hi\n").is_err());
        assert!(parse_record("Locations: \nThe Lab\n").is_err());
        assert!(parse_record("").is_err());
    }

    #[test]
    fn empty_record_round_trips() {
        let record = EpisodeRecord {
            locations: vec![],
            script: vec![],
        };
        let rendered = render_record(&record);
        assert_eq!(rendered, "Locations: \n\nScript: \n");
        assert_eq!(parse_record(&rendered).unwrap(), record);
    }
}
