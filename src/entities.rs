//! Rule-based entity tagging over dialogue corpora. Capitalized spans
//! are collected and classified by indicator words, suffix cues, and
//! small gazetteers; numeric shapes get their own closed classes. The
//! tagger deliberately stays quiet on single unknown capitalized words,
//! which in dialogue are mostly names already tracked as speakers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// One tagged mention, in corpus order. The same text can appear many
/// times; the report keeps the first category it sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: &'static str,
}

macro_rules! word_set {
    ($name:ident, [$($w:expr),* $(,)?]) => {
        static $name: Lazy<HashSet<&'static str>> =
            Lazy::new(|| [$($w),*].into_iter().collect());
    };
}

word_set!(
    PERSON_INDICATORS,
    [
        "mr", "mrs", "ms", "dr", "mister", "miss", "doctor", "chief", "officer", "deputy",
        "sheriff", "sergeant", "captain", "lieutenant", "colonel", "general", "agent",
        "detective", "coach", "principal", "nurse", "professor", "aunt", "uncle", "grandma",
        "grandpa", "cousin",
    ]
);

// Capitalized function words and interjections that never open a span.
word_set!(
    COMMON_WORDS,
    [
        "the", "a", "an", "i", "i'm", "i'll", "i've", "i'd", "you", "he", "she", "it", "we",
        "they", "this", "that", "these", "those", "there", "here", "what", "who", "whose",
        "when", "where", "why", "how", "which", "but", "and", "or", "nor", "so", "if", "then",
        "well", "now", "oh", "hey", "okay", "yeah", "yes", "no", "not", "never", "always",
        "maybe", "please", "thanks", "thank", "sorry", "listen", "look", "wait", "stop", "come",
        "go", "get", "let", "let's", "don't", "can't", "won't", "didn't", "doesn't", "it's",
        "that's", "there's", "what's", "he's", "she's", "you're", "we're", "they're", "was",
        "were", "is", "are", "am", "be", "been", "do", "does", "did", "have", "has", "had",
        "will", "would", "can", "could", "shall", "should", "may", "might", "must", "just",
        "only", "also", "even", "still", "all", "any", "some", "every", "each", "both", "again",
        "away", "back", "down", "up", "out", "in", "on", "at", "to", "of", "for", "with",
        "from", "about", "because", "before", "after", "over", "under", "off", "by", "my",
        "your", "his", "her", "its", "our", "their", "me", "him", "us", "them", "good", "right",
        "sure", "fine", "like", "really", "very",
    ]
);

word_set!(
    ORG_SUFFIXES,
    [
        "inc", "corp", "corporation", "co", "company", "lab", "labs", "laboratory",
        "laboratories", "department", "bureau", "agency", "administration", "council",
        "committee", "institute", "university", "college", "school", "hospital", "police",
        "times", "post", "tribune", "electric", "energy", "supply",
    ]
);

word_set!(
    FAC_WORDS,
    [
        "mall", "theater", "theatre", "cinema", "arcade", "pool", "gym", "gymnasium",
        "station", "airport", "diner", "restaurant", "cafe", "motel", "hotel", "library",
        "church", "junkyard", "quarry", "cabin", "trailer", "park", "fairgrounds", "rink",
        "alley", "arena", "store", "shop", "pharmacy", "warehouse", "bunker", "silo", "road",
        "street", "avenue", "highway", "bridge", "tunnel",
    ]
);

word_set!(
    GPE_NAMES,
    [
        "america", "usa", "russia", "soviet union", "china", "germany", "england", "britain",
        "france", "canada", "mexico", "australia", "vietnam", "korea", "japan", "italy",
        "indiana", "california", "texas", "ohio", "florida", "illinois", "michigan", "nevada",
        "oregon", "chicago", "indianapolis", "london", "moscow", "paris", "berlin",
        "hollywood", "manhattan", "brooklyn", "pittsburgh", "boston", "seattle", "denver",
        "dallas", "houston", "atlanta", "miami", "detroit", "washington", "philadelphia",
    ]
);

word_set!(
    GPE_SUFFIXES,
    ["city", "county", "town", "village", "falls", "springs", "valley", "heights", "beach"]
);

word_set!(
    LOC_SUFFIXES,
    [
        "river", "lake", "mountain", "mountains", "forest", "woods", "ocean", "sea", "island",
        "cave", "ridge", "hills", "trail",
    ]
);

word_set!(
    NORP_NAMES,
    [
        "american", "americans", "russian", "russians", "soviet", "soviets", "german",
        "germans", "british", "french", "mexican", "mexicans", "canadian", "canadians",
        "chinese", "japanese", "korean", "koreans", "italian", "italians", "irish", "indian",
        "indians", "australian", "communist", "communists", "nazi", "nazis", "republican",
        "republicans", "democrat", "democrats", "christian", "christians", "catholic",
        "catholics", "jewish",
    ]
);

word_set!(
    DATE_NAMES,
    [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december", "monday", "tuesday", "wednesday", "thursday",
        "friday", "saturday", "sunday", "halloween", "christmas", "thanksgiving", "easter",
    ]
);

word_set!(EVENT_SUFFIXES, ["fest", "festival", "fair", "ball", "dance", "championship"]);

word_set!(
    ORDINAL_WORDS,
    [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth",
    ]
);

word_set!(
    NUMBER_WORDS,
    [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "twenty", "thirty", "forty", "fifty", "hundred",
        "thousand", "million", "dozen",
    ]
);

/// Tags every mention the rules can see, line by line, in order.
pub fn extract_entities(text: &str) -> Vec<Entity> {
    let mut out = Vec::new();
    for line in text.lines() {
        scan_line(line, &mut out);
    }
    out
}

fn scan_line(line: &str, out: &mut Vec<Entity>) {
    let raw: Vec<&str> = line.split_whitespace().collect();
    let mut pending_person = false;
    let mut i = 0;
    while i < raw.len() {
        let word = trim_token(raw[i]);
        if word.is_empty() {
            i += 1;
            continue;
        }
        let lower = word.to_lowercase();

        if let Some(label) = numeric_label(raw[i], &word) {
            out.push(Entity { text: word, label });
            pending_person = false;
            i += 1;
            continue;
        }
        if NUMBER_WORDS.contains(lower.as_str()) {
            out.push(Entity { text: word, label: "CARDINAL" });
            pending_person = false;
            i += 1;
            continue;
        }
        if ORDINAL_WORDS.contains(lower.as_str()) {
            out.push(Entity { text: word, label: "ORDINAL" });
            pending_person = false;
            i += 1;
            continue;
        }
        if PERSON_INDICATORS.contains(lower.as_str()) {
            pending_person = true;
            i += 1;
            continue;
        }
        if !starts_uppercase(&word) {
            pending_person = false;
            i += 1;
            continue;
        }
        if COMMON_WORDS.contains(lower.as_str()) && !pending_person {
            i += 1;
            continue;
        }

        // extend the span over following capitalized words, stopping at
        // sentence punctuation and at capitalized function words
        let mut words = vec![word];
        let mut prev_raw = raw[i];
        let mut j = i + 1;
        while j < raw.len() && !ends_clause(prev_raw) {
            let next = trim_token(raw[j]);
            if next.is_empty() || !starts_uppercase(&next) {
                break;
            }
            let next_lower = next.to_lowercase();
            if COMMON_WORDS.contains(next_lower.as_str())
                || NUMBER_WORDS.contains(next_lower.as_str())
            {
                break;
            }
            words.push(next);
            prev_raw = raw[j];
            j += 1;
        }

        let span = words.join(" ");
        if let Some(label) = classify_span(&words, &span, pending_person) {
            out.push(Entity { text: span, label });
        }
        pending_person = false;
        i = j;
    }
}

fn classify_span(words: &[String], span: &str, pending_person: bool) -> Option<&'static str> {
    if pending_person {
        return Some("PERSON");
    }
    let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let span_lower = span.to_lowercase();
    let last = lower.last().map(String::as_str)?;

    if lower.iter().any(|w| DATE_NAMES.contains(w.as_str())) {
        return Some("DATE");
    }
    if NORP_NAMES.contains(span_lower.as_str()) {
        return Some("NORP");
    }
    if GPE_NAMES.contains(span_lower.as_str()) {
        return Some("GPE");
    }
    if ORG_SUFFIXES.contains(last) {
        return Some("ORG");
    }
    if lower.iter().any(|w| FAC_WORDS.contains(w.as_str())) {
        return Some("FAC");
    }
    if GPE_SUFFIXES.contains(last) {
        return Some("GPE");
    }
    if LOC_SUFFIXES.contains(last) {
        return Some("LOC");
    }
    if EVENT_SUFFIXES.contains(last) {
        return Some("EVENT");
    }
    // a bare two-word capitalized span in dialogue is almost always a
    // full name; longer unknown spans are noise
    if words.len() == 2 {
        return Some("PERSON");
    }
    None
}

fn numeric_label(raw: &str, word: &str) -> Option<&'static str> {
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    if !has_digit {
        return None;
    }
    if raw.starts_with('$') {
        return Some("MONEY");
    }
    if raw.trim_end_matches(|c: char| !c.is_alphanumeric() && c != '%').ends_with('%') {
        return Some("PERCENT");
    }
    if word.split(':').count() == 2 && word.split(':').all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        return Some("TIME");
    }
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
                return Some("ORDINAL");
            }
        }
    }
    if word.chars().all(|c| c.is_ascii_digit()) {
        let year = word.len() == 4 && (word.starts_with("19") || word.starts_with("20"));
        return Some(if year { "DATE" } else { "CARDINAL" });
    }
    None
}

fn trim_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '%')
        .trim_matches('%')
        .trim_matches('\'')
        .to_string()
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn ends_clause(raw: &str) -> bool {
    raw.ends_with(['.', ',', '!', '?', ';', ':', '"', ')', ']'])
}
