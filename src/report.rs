use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::charts;
use crate::entities::{self, Entity};
use crate::models::{EpisodeRecord, Tallies};
use crate::sentiment::SentimentLexicon;
use crate::tally::top_n;
use crate::wordfreq;

pub const TOP_SPEAKERS: usize = 10;
pub const TOP_LOCATIONS: usize = 5;
pub const TOP_WORDS: usize = 10;

/// Entity categories never reported: closed classes, plus PERSON since
/// the cast is already covered by the speaker tally.
const EXCLUDED_LABELS: &[&str] = &[
    "DATE", "TIME", "PERCENT", "MONEY", "QUANTITY", "ORDINAL", "CARDINAL", "PERSON",
];

#[derive(Serialize)]
struct RunSummary<'a> {
    episodes: usize,
    unique_speakers: usize,
    speaker_lines: &'a IndexMap<String, u32>,
    locations: &'a IndexMap<String, u32>,
}

/// Everything downstream of the tallies: the two aggregate charts, then
/// per-speaker corpora with word, entity, and sentiment summaries, and
/// finally the machine-readable run summary.
pub fn run_report(
    out_dir: &Path,
    records: &[(PathBuf, EpisodeRecord)],
    tallies: &Tallies,
) -> Result<()> {
    let top_speakers = top_n(&tallies.speaker_lines, TOP_SPEAKERS);
    if top_speakers.is_empty() {
        bail!("no speakers recognized in {} records", records.len());
    }
    let top_locations = top_n(&tallies.locations, TOP_LOCATIONS);
    if top_locations.is_empty() {
        bail!("no locations recognized in {} records", records.len());
    }

    charts::bar_chart(
        &out_dir.join("characters_top10.png"),
        "10 Most Common Characters By Dialogue",
        "Characters",
        "Count",
        &top_speakers,
        15,
    )?;
    charts::bar_chart(
        &out_dir.join("locations_top5.png"),
        "5 Most Common Stranger Things Locations",
        "Locations",
        "Count",
        &top_locations,
        12,
    )?;

    let characters_dir = out_dir.join("characters");
    let ner_dir = characters_dir.join("NER");
    let lexicon = SentimentLexicon::default();

    for (name, line_count) in &top_speakers {
        let corpus = speaker_corpus(records, name)?;
        let corpus_path = characters_dir.join(format!("{name}.txt"));
        fs::write(&corpus_path, &corpus)
            .with_context(|| format!("writing corpus {}", corpus_path.display()))?;
        debug!(
            "Corpus written - speaker={}, tallied_lines={}, bytes={}",
            name,
            line_count,
            corpus.len()
        );

        let counts = wordfreq::lemma_frequencies(&corpus);
        if counts.is_empty() {
            bail!("speaker {name:?} has a corpus with no countable words");
        }
        let top_words = top_n(&counts, TOP_WORDS);
        charts::bar_chart(
            &characters_dir.join(format!("{name}.png")),
            &format!("Top Common Words - {name}"),
            "Words",
            "Frequency",
            &top_words,
            15,
        )?;

        let kept = filter_entities(entities::extract_entities(&corpus), tallies);
        let mut listing = String::new();
        for (text, label) in &kept {
            listing.push_str(text);
            listing.push_str("\t\t");
            listing.push_str(label);
            listing.push('\n');
        }
        let ner_path = ner_dir.join(format!("{name}NER.txt"));
        fs::write(&ner_path, listing)
            .with_context(|| format!("writing entities {}", ner_path.display()))?;

        println!("{}", corpus_path.display());
        let scores = lexicon.polarity_scores(&corpus);
        let mut line = String::new();
        for (component, value) in scores.components() {
            line.push_str(&format!("\t{component}: {value:.3}  "));
        }
        println!("{}", line.trim_end());
    }

    info!(
        "Per-speaker reports completed - speakers={}, top_locations={}",
        top_speakers.len(),
        top_locations.len()
    );

    let summary = RunSummary {
        episodes: records.len(),
        unique_speakers: tallies.speakers.len(),
        speaker_lines: &tallies.speaker_lines,
        locations: &tallies.locations,
    };
    let summary_path = out_dir.join("summary.json");
    fs::write(&summary_path, serde_json::to_vec_pretty(&summary)?)
        .with_context(|| format!("writing {}", summary_path.display()))?;
    Ok(())
}

/// Collects every dialogue line attributed to `name` across all
/// records, one captured utterance per line. Matching is
/// case-insensitive and tolerates a missing space after the colon.
pub fn speaker_corpus(records: &[(PathBuf, EpisodeRecord)], name: &str) -> Result<String> {
    let pattern = Regex::new(&format!(r"(?i){}:\s?(.*)", regex::escape(name)))
        .with_context(|| format!("speaker pattern for {name:?}"))?;
    let mut corpus = String::new();
    for (_, record) in records {
        for line in &record.script {
            if let Some(cap) = pattern.captures(line) {
                corpus.push_str(cap.get(1).map_or("", |m| m.as_str()));
                corpus.push('\n');
            }
        }
    }
    Ok(corpus)
}

/// First category seen wins per distinct text; known speaker names and
/// the excluded categories never make it in.
fn filter_entities(found: Vec<Entity>, tallies: &Tallies) -> IndexMap<String, &'static str> {
    let mut kept = IndexMap::new();
    for Entity { text, label } in found {
        if EXCLUDED_LABELS.contains(&label) {
            continue;
        }
        if tallies.speakers.contains(text.as_str()) {
            continue;
        }
        kept.entry(text).or_insert(label);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;
    use crate::tally;
    use std::path::PathBuf;

    const RECORD: &str =
        "Locations: \nThe Lab - Day\n\nScript: \nMike: We have to go.\nMike: Now.\n";

    fn parsed() -> Vec<(PathBuf, EpisodeRecord)> {
        let record = extract::parse_record(RECORD).unwrap();
        vec![(PathBuf::from("ep.txt"), record)]
    }

    #[test]
    fn tallies_from_a_normalized_record() {
        let records = parsed();
        let mut tallies = Tallies::new();
        for (_, record) in &records {
            tally::accumulate_locations(record, &mut tallies);
            tally::accumulate_speakers(record, &mut tallies);
        }
        assert_eq!(tallies.speaker_lines.len(), 1);
        assert_eq!(tallies.speaker_lines.get("Mike"), Some(&2));
        assert_eq!(tallies.locations.len(), 1);
        assert_eq!(tallies.locations.get("The Lab"), Some(&1));
    }

    #[test]
    fn corpus_holds_only_the_speakers_utterances() {
        let corpus = speaker_corpus(&parsed(), "Mike").unwrap();
        assert_eq!(corpus, "We have to go.\nNow.\n");
    }

    #[test]
    fn corpus_matching_is_case_insensitive() {
        let record = EpisodeRecord {
            locations: vec![],
            script: vec!["MIKE: Run!".to_string(), "Mike: Hide.".to_string()],
        };
        let corpus = speaker_corpus(&[(PathBuf::from("ep.txt"), record)], "Mike").unwrap();
        assert_eq!(corpus, "Run!\nHide.\n");
    }

    #[test]
    fn corpus_tolerates_a_missing_space_after_the_colon() {
        let record = EpisodeRecord {
            locations: vec![],
            script: vec!["Mike:Now".to_string()],
        };
        let corpus = speaker_corpus(&[(PathBuf::from("ep.txt"), record)], "Mike").unwrap();
        assert_eq!(corpus, "Now\n");
    }

    #[test]
    fn corpus_for_an_unknown_speaker_is_empty() {
        assert_eq!(speaker_corpus(&parsed(), "Barb").unwrap(), "");
    }

    #[test]
    fn speaker_names_with_regex_metacharacters_are_escaped() {
        let record = EpisodeRecord {
            locations: vec![],
            script: vec!["Mr. Clarke: Science is neat.".to_string()],
        };
        let corpus =
            speaker_corpus(&[(PathBuf::from("ep.txt"), record)], "Mr. Clarke").unwrap();
        assert_eq!(corpus, "Science is neat.\n");
    }

    #[test]
    fn entity_filter_drops_speakers_and_closed_classes() {
        let mut tallies = Tallies::new();
        tallies.speakers.insert("Starcourt Mall".to_string());
        let found = vec![
            Entity {
                text: "Hawkins Lab".to_string(),
                label: "ORG",
            },
            Entity {
                text: "Starcourt Mall".to_string(),
                label: "FAC",
            },
            Entity {
                text: "1983".to_string(),
                label: "DATE",
            },
            Entity {
                text: "Nancy Wheeler".to_string(),
                label: "PERSON",
            },
            Entity {
                text: "Hawkins Lab".to_string(),
                label: "FAC",
            },
        ];
        let kept = filter_entities(found, &tallies);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get("Hawkins Lab"), Some(&"ORG"));
    }
}
