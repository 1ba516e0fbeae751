// src/wordfreq.rs
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'\-]+").unwrap());

/// Conversational fillers and verbs too common in this corpus to be
/// interesting. Checked against the lemma, not the raw token.
static FILLER_WORDS: &[&str] = &[
    "okay", "yeah", "know", "go", "oh", "like", "hey", "to", "uh", "um",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
        [
            // articles, conjunctions, prepositions
            "the", "an", "and", "or", "but", "if", "then", "else", "when", "while", "of", "at",
            "by", "for", "with", "about", "against", "between", "into", "through", "during",
            "before", "after", "above", "below", "from", "up", "down", "in", "out", "on", "off",
            "over", "under", "again", "further", "once", "than", "because", "since", "unless",
            "until", "although", "though", "toward", "towards", "upon", "onto", "via", "per",
            "within", "without", "across", "behind", "beside", "besides", "beyond", "near",
            "around", "along", "amongst", "among",
            // pronouns and determiners
            "it", "its", "itself", "this", "that", "these", "those", "he", "him", "his",
            "himself", "she", "her", "hers", "herself", "they", "them", "their", "theirs",
            "themselves", "we", "us", "our", "ours", "ourselves", "you", "your", "yours",
            "yourself", "yourselves", "me", "my", "mine", "myself", "who", "whom", "whose",
            "which", "what", "whatever", "whoever", "all", "any", "both", "each", "few", "more",
            "most", "other", "others", "some", "such", "own", "same", "every", "everyone",
            "everybody", "everything", "everywhere", "anyone", "anybody", "anything", "anywhere",
            "someone", "somebody", "something", "somewhere", "nobody", "nothing", "none",
            "nowhere", "one", "ones",
            // auxiliaries and light verbs
            "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
            "having", "do", "does", "did", "doing", "done", "will", "would", "shall", "should",
            "can", "could", "may", "might", "must", "ought", "get", "gets", "got", "gotten",
            "make", "makes", "made", "say", "says", "said", "see", "sees", "seen", "saw",
            "take", "takes", "took", "taken", "give", "gives", "gave", "given", "keep", "keeps",
            "kept", "put", "puts", "show", "shows", "call", "calls", "went", "goes", "going",
            "gone", "used", "using",
            // adverbs and qualifiers
            "not", "no", "nor", "so", "too", "very", "just", "only", "also", "even", "still",
            "yet", "here", "there", "where", "why", "how", "now", "ever", "never", "always",
            "often", "really", "quite", "rather", "almost", "already", "perhaps", "maybe",
            "well", "much", "many", "enough", "indeed", "instead", "anyway", "anyhow",
            "otherwise", "however", "moreover", "meanwhile", "sometimes", "somehow", "together",
            "alone", "away", "back",
            // number words
            "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
            "twelve", "twenty", "thirty", "forty", "fifty", "sixty", "hundred", "thousand",
            "first", "second", "third", "last", "next",
            // contractions as whole tokens
            "i'm", "i've", "i'll", "i'd", "you're", "you've", "you'll", "you'd", "he's",
            "he'll", "he'd", "she's", "she'll", "she'd", "it's", "it'll", "we're", "we've",
            "we'll", "we'd", "they're", "they've", "they'll", "they'd", "that's", "that'll",
            "there's", "here's", "what's", "who's", "where's", "when's", "how's", "let's",
            "ain't", "isn't", "aren't", "wasn't", "weren't", "don't", "doesn't", "didn't",
            "won't", "wouldn't", "can't", "cannot", "couldn't", "shouldn't", "mustn't",
            "hasn't", "haven't", "hadn't", "gonna", "wanna", "gotta", "kinda", "sorta",
            "cause", "yes", "yep", "nope", "hmm", "huh", "ah", "ooh", "whoa", "wow", "hi",
            "hello", "bye", "please", "thanks",
        ]
        .into_iter()
        .collect()
    });
    &SET
}

/// Crude lemmatizer: possessives, common plural endings, and the
/// productive -ing/-ed suffixes on longer tokens. Good enough to fold
/// the obvious inflections into one count.
fn lemmatize(token: &str) -> String {
    let t = token.strip_suffix("'s").unwrap_or(token);
    if t.ends_with("ies") && t.len() > 3 {
        return format!("{}y", &t[..t.len() - 3]);
    }
    if (t.ends_with("ches") || t.ends_with("shes") || t.ends_with("sses") || t.ends_with("xes"))
        && t.len() > 4
    {
        return t[..t.len() - 2].to_string();
    }
    if t.ends_with('s') && !t.ends_with("ss") && !t.ends_with("us") && !t.ends_with("is") && t.len() > 3
    {
        return t[..t.len() - 1].to_string();
    }
    if t.ends_with("ing") && t.len() > 5 {
        return t[..t.len() - 3].to_string();
    }
    if t.ends_with("ed") && !t.ends_with("eed") && t.len() > 4 {
        return t[..t.len() - 2].to_string();
    }
    t.to_string()
}

/// Counts lemmas for every countable token in the corpus. Stop words
/// are dropped on the raw token, fillers on the lemma, mirroring the
/// token/lemma split the report depends on.
pub fn lemma_frequencies(text: &str) -> IndexMap<String, u32> {
    let text = text.replace('\u{2019}', "'");
    let mut counts: IndexMap<String, u32> = IndexMap::new();
    for m in TOKEN_RE.find_iter(&text) {
        let token = m.as_str().trim_matches('\'').to_lowercase();
        if token.len() < 2 || stop_words().contains(token.as_str()) {
            continue;
        }
        let lemma = lemmatize(&token);
        if FILLER_WORDS.contains(&lemma.as_str()) {
            continue;
        }
        *counts.entry(lemma).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_fold_inflections_into_lemmas() {
        let counts = lemma_frequencies("The compass points north. Two compasses, two needles.");
        assert_eq!(counts.get("compass"), Some(&2));
        assert_eq!(counts.get("needle"), Some(&1));
        assert_eq!(counts.get("point"), Some(&1));
        assert!(!counts.contains_key("the"));
        assert!(!counts.contains_key("two"));
    }

    #[test]
    fn fillers_and_stop_words_never_count() {
        let counts = lemma_frequencies("Okay yeah, I know we have to go. Hey, um, monsters!");
        assert_eq!(counts.get("monster"), Some(&1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn contractions_are_single_stoplisted_tokens() {
        let counts = lemma_frequencies("Don\u{2019}t panic, it's nothing.");
        assert_eq!(counts.get("panic"), Some(&1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn possessives_fold_into_the_bare_name() {
        let counts = lemma_frequencies("Steve's bat. Steve swings.");
        assert_eq!(counts.get("steve"), Some(&2));
        assert_eq!(counts.get("bat"), Some(&1));
        assert_eq!(counts.get("swing"), Some(&1));
    }

    #[test]
    fn empty_corpus_yields_no_counts() {
        assert!(lemma_frequencies("").is_empty());
        assert!(lemma_frequencies("I to the and").is_empty());
    }

    #[test]
    fn lemmatizer_leaves_short_and_awkward_forms_alone() {
        assert_eq!(lemmatize("miss"), "miss");
        assert_eq!(lemmatize("bus"), "bus");
        assert_eq!(lemmatize("thing"), "thing");
        assert_eq!(lemmatize("need"), "need");
        assert_eq!(lemmatize("stories"), "story");
        assert_eq!(lemmatize("running"), "runn");
    }
}
