//! Lexicon-based sentiment scoring for dialogue. Valences follow the
//! familiar -4..=4 scale; negators within a three-token window flip and
//! dampen, intensifiers nudge. The four reported components are the
//! usual negative/neutral/positive proportions plus a normalized
//! compound in [-1, 1].

use std::collections::HashMap;

const NEGATION_SCALAR: f64 = -0.74;
const INTENSIFIER_STEP: f64 = 0.293;

static NEGATORS: &[&str] = &[
    "not", "never", "none", "nobody", "nothing", "nowhere", "neither", "nor", "cannot",
    "without", "hardly", "rarely", "seldom", "ain't", "aren't", "isn't", "wasn't", "weren't",
    "don't", "doesn't", "didn't", "won't", "wouldn't", "can't", "couldn't", "shouldn't",
    "hasn't", "haven't", "hadn't", "mustn't",
];

static INTENSIFIERS: &[&str] = &[
    "very", "really", "so", "extremely", "absolutely", "completely", "totally", "incredibly",
    "especially", "particularly", "super",
];

static DAMPENERS: &[&str] = &["slightly", "somewhat", "barely", "almost", "little", "bit"];

/// Polarity components for one text, in the classic four-score shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

impl PolarityScores {
    /// Components keyed and ordered the way summaries print them:
    /// alphabetical, compound first.
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("compound", self.compound),
            ("neg", self.negative),
            ("neu", self.neutral),
            ("pos", self.positive),
        ]
    }
}

/// Word-valence table with tiered construction helpers.
pub struct SentimentLexicon {
    words: HashMap<&'static str, f64>,
}

impl SentimentLexicon {
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    pub fn add_positive(&mut self, word: &'static str, valence: f64) {
        self.words.insert(word, valence.abs());
    }

    pub fn add_negative(&mut self, word: &'static str, valence: f64) {
        self.words.insert(word, -valence.abs());
    }

    /// Scores `text`. Empty or entirely out-of-lexicon text scores all
    /// zeros except neutral, which covers every token seen.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let mut sentiments = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.words.get(token.as_str()) else {
                sentiments.push(0.0);
                continue;
            };
            let mut valence = base;
            for dist in 1..=3usize {
                if dist > i {
                    break;
                }
                let prev = tokens[i - dist].as_str();
                if self.words.contains_key(prev) {
                    continue;
                }
                if NEGATORS.contains(&prev) {
                    valence *= NEGATION_SCALAR;
                } else if let Some(step) = modifier_step(prev) {
                    // closer modifiers weigh more
                    let decay = match dist {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    if base > 0.0 {
                        valence += step * decay;
                    } else {
                        valence -= step * decay;
                    }
                }
            }
            sentiments.push(valence);
        }

        let sum: f64 = sentiments.iter().sum();
        let mut pos = 0.0;
        let mut neg = 0.0;
        let mut neu = 0.0;
        for &s in &sentiments {
            if s > 0.0 {
                pos += s + 1.0;
            } else if s < 0.0 {
                neg += s - 1.0;
            } else {
                neu += 1.0;
            }
        }
        let total = pos + neg.abs() + neu;
        if total == 0.0 {
            return PolarityScores::default();
        }
        PolarityScores {
            negative: round3(neg.abs() / total),
            neutral: round3(neu / total),
            positive: round3(pos / total),
            compound: round4(sum / (sum * sum + 15.0).sqrt()),
        }
    }
}

impl Default for SentimentLexicon {
    /// The built-in table, tiered by strength.
    fn default() -> Self {
        let mut lex = Self::new();

        for word in [
            "amazing", "awesome", "excellent", "fantastic", "wonderful", "brilliant",
            "magnificent", "outstanding", "perfect", "incredible", "spectacular",
        ] {
            lex.add_positive(word, 3.1);
        }
        for word in [
            "great", "love", "loved", "loves", "beautiful", "happy", "happiness", "joy",
            "glad", "win", "winner", "won", "excited", "exciting", "best", "favorite", "fun",
            "funny", "laugh", "sweet", "brave", "hero", "proud", "friend", "friends", "nice",
            "pretty", "smart", "cool",
        ] {
            lex.add_positive(word, 2.0);
        }
        for word in [
            "good", "like", "liked", "likes", "hope", "hopeful", "thank", "thanks", "safe",
            "fine", "okay", "sure", "alive", "true", "trust", "help", "helps", "helped",
            "helping", "better", "care", "cares", "promise", "special", "strong", "free",
            "interesting", "welcome",
        ] {
            lex.add_positive(word, 1.3);
        }

        for word in [
            "horrible", "terrible", "awful", "disgusting", "devastating", "nightmare", "evil",
            "worst", "hate", "hated", "hates",
        ] {
            lex.add_negative(word, 3.0);
        }
        for word in [
            "bad", "hurt", "hurts", "hurting", "kill", "killed", "kills", "killing", "dead",
            "death", "die", "died", "dies", "dying", "scared", "scary", "scare", "fear",
            "afraid", "terrified", "terror", "pain", "painful", "cry", "crying", "cried",
            "sad", "angry", "anger", "mad", "war", "fight", "fighting", "fought", "blood",
            "wrong", "lost", "lose", "losing", "loses", "broken", "danger", "dangerous",
            "sick", "stupid", "idiot", "liar", "monster", "monsters", "shit", "damn",
        ] {
            lex.add_negative(word, 2.1);
        }
        for word in [
            "no", "crazy", "weird", "strange", "freak", "lie", "lies", "lying", "trouble",
            "worried", "worry", "worries", "worrying", "alone", "missing", "sorry", "dumb",
            "ugly", "annoying", "bored", "boring", "tired", "problem", "problems", "risk",
            "mess", "hell", "dark",
        ] {
            lex.add_negative(word, 1.1);
        }

        lex
    }
}

fn modifier_step(word: &str) -> Option<f64> {
    if INTENSIFIERS.contains(&word) {
        Some(INTENSIFIER_STEP)
    } else if DAMPENERS.contains(&word) {
        Some(-INTENSIFIER_STEP)
    } else {
        None
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.replace('\u{2019}', "'")
        .to_lowercase()
        .split(|c: char| !(c.is_alphabetic() || c == '\''))
        .filter(|w| w.len() > 1)
        .map(|w| w.trim_matches('\'').to_string())
        .filter(|w| w.len() > 1)
        .collect()
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_zero() {
        let lex = SentimentLexicon::default();
        assert_eq!(lex.polarity_scores(""), PolarityScores::default());
    }

    #[test]
    fn positive_text_has_positive_compound() {
        let lex = SentimentLexicon::default();
        let scores = lex.polarity_scores("This is wonderful, amazing, really great news.");
        assert!(scores.compound > 0.05, "compound={}", scores.compound);
        assert!(scores.positive > scores.negative);
    }

    #[test]
    fn negative_text_has_negative_compound() {
        let lex = SentimentLexicon::default();
        let scores = lex.polarity_scores("It was a terrible, awful nightmare. Everyone died.");
        assert!(scores.compound < -0.05, "compound={}", scores.compound);
        assert!(scores.negative > scores.positive);
    }

    #[test]
    fn negation_flips_valence() {
        let lex = SentimentLexicon::default();
        let plain = lex.polarity_scores("The plan is good.");
        let negated = lex.polarity_scores("The plan is not good.");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn intensifier_raises_the_score() {
        let lex = SentimentLexicon::default();
        let plain = lex.polarity_scores("That movie was good.");
        let boosted = lex.polarity_scores("That movie was really good.");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn proportions_sum_to_one_for_scored_text() {
        let lex = SentimentLexicon::default();
        let s = lex.polarity_scores("Good people fight terrible monsters every night.");
        let total = s.negative + s.neutral + s.positive;
        assert!((total - 1.0).abs() < 0.005, "total={total}");
    }

    #[test]
    fn components_print_in_alphabetical_order() {
        let scores = PolarityScores {
            negative: 0.1,
            neutral: 0.7,
            positive: 0.2,
            compound: 0.4,
        };
        let names: Vec<&str> = scores.components().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["compound", "neg", "neu", "pos"]);
    }
}
