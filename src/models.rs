use indexmap::{IndexMap, IndexSet};

/// One episode's normalized content: the ordered scene-location labels
/// (full, unsimplified) and the ordered cleaned dialogue lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub locations: Vec<String>,
    pub script: Vec<String>,
}

/// Accumulator threaded through the pipeline stages. Counts only grow
/// during a run; nothing carries over between runs.
#[derive(Debug, Default)]
pub struct Tallies {
    /// simplified location label -> occurrences across all episodes
    pub locations: IndexMap<String, u32>,
    /// unique speaker names, exactly as captured
    pub speakers: IndexSet<String>,
    /// speaker name -> number of lines spoken
    pub speaker_lines: IndexMap<String, u32>,
}

impl Tallies {
    pub fn new() -> Self {
        Self::default()
    }
}
