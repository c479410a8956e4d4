//! Lexicon polarity scoring for short financial headlines.
//!
//! Each recognised word carries a polarity in [-1, 1]. A headline's score is
//! the mean over recognised words, after intensifiers scale the following
//! word and negators within [`NEGATION_WINDOW`] tokens flip it at half
//! strength. Text with no recognised words scores 0.0.

use crate::domain::ports::polarity_model::PolarityModel;

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
    "won't", "wouldn't", "can't", "cannot", "couldn't", "shouldn't", "without", "hardly", "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("sharply", 1.4),
    ("deeply", 1.3),
    ("significantly", 1.3),
    ("massive", 1.4),
    ("huge", 1.3),
    ("slightly", 0.6),
    ("modestly", 0.7),
    ("somewhat", 0.7),
];

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("strong", 0.43),
    ("stronger", 0.45),
    ("robust", 0.5),
    ("positive", 0.23),
    ("optimistic", 0.5),
    ("optimism", 0.5),
    ("bullish", 0.6),
    ("rally", 0.5),
    ("rallies", 0.5),
    ("surge", 0.5),
    ("surges", 0.5),
    ("soar", 0.6),
    ("soars", 0.6),
    ("gain", 0.3),
    ("gains", 0.3),
    ("rise", 0.25),
    ("rises", 0.25),
    ("jump", 0.35),
    ("jumps", 0.35),
    ("record", 0.3),
    ("high", 0.16),
    ("higher", 0.25),
    ("growth", 0.35),
    ("beat", 0.4),
    ("beats", 0.4),
    ("upgrade", 0.5),
    ("upgrades", 0.5),
    ("outperform", 0.5),
    ("profit", 0.35),
    ("profits", 0.35),
    ("recovery", 0.4),
    ("rebound", 0.4),
    ("rebounds", 0.4),
    ("boost", 0.4),
    ("boosts", 0.4),
    ("win", 0.8),
    ("wins", 0.8),
    ("success", 0.6),
    ("successful", 0.75),
    ("confident", 0.5),
    ("confidence", 0.4),
    ("upbeat", 0.6),
    ("resilient", 0.5),
    ("safe", 0.5),
    ("stable", 0.3),
    ("easing", 0.25),
    ("opportunity", 0.4),
    ("excellent", 1.0),
    ("impressive", 0.7),
    ("favorable", 0.5),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("weak", -0.38),
    ("weaker", -0.4),
    ("weakness", -0.4),
    ("negative", -0.3),
    ("pessimistic", -0.5),
    ("bearish", -0.6),
    ("crash", -0.7),
    ("crashes", -0.7),
    ("plunge", -0.6),
    ("plunges", -0.6),
    ("tumble", -0.5),
    ("tumbles", -0.5),
    ("slump", -0.5),
    ("slumps", -0.5),
    ("fall", -0.3),
    ("falls", -0.3),
    ("drop", -0.3),
    ("drops", -0.3),
    ("decline", -0.35),
    ("declines", -0.35),
    ("lower", -0.2),
    ("low", -0.15),
    ("loss", -0.4),
    ("losses", -0.4),
    ("miss", -0.4),
    ("misses", -0.4),
    ("downgrade", -0.5),
    ("downgrades", -0.5),
    ("underperform", -0.5),
    ("risk", -0.3),
    ("risks", -0.3),
    ("risky", -0.5),
    ("warning", -0.5),
    ("warns", -0.5),
    ("fear", -0.6),
    ("fears", -0.6),
    ("panic", -0.8),
    ("crisis", -0.7),
    ("recession", -0.6),
    ("selloff", -0.6),
    ("sell-off", -0.6),
    ("volatile", -0.3),
    ("volatility", -0.25),
    ("uncertain", -0.4),
    ("uncertainty", -0.4),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("worried", -0.5),
    ("worries", -0.5),
    ("trouble", -0.5),
    ("default", -0.6),
    ("bankruptcy", -0.8),
    ("layoffs", -0.5),
    ("bubble", -0.4),
    ("danger", -0.6),
    ("dangerous", -0.6),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("fail", -0.5),
    ("fails", -0.5),
    ("failure", -0.6),
    ("disappointing", -0.6),
    ("inflation", -0.2),
];

fn lexicon_polarity(word: &str) -> Option<f64> {
    LEXICON.iter().find(|(w, _)| *w == word).map(|(_, p)| *p)
}

fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS.iter().find(|(w, _)| *w == word).map(|(_, m)| *m)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|t| t.trim_matches(|c: char| c == '\'' || c == '-').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Mean polarity of `text`, clamped to [-1, 1].
pub fn lexicon_score(text: &str) -> f64 {
    let tokens = tokenize(text);
    let mut total = 0.0;
    let mut matched = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(mut polarity) = lexicon_polarity(token) else {
            continue;
        };

        if i > 0 {
            if let Some(m) = intensity(&tokens[i - 1]) {
                polarity *= m;
            }
        }

        let start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[start..i].iter().any(|t| NEGATORS.contains(&t.as_str())) {
            polarity *= NEGATION_FACTOR;
        }

        total += polarity;
        matched += 1;
    }

    if matched == 0 {
        return 0.0;
    }
    (total / matched as f64).clamp(-1.0, 1.0)
}

/// Built-in [`PolarityModel`] backed by the static lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconModel;

impl PolarityModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> f64 {
        lexicon_score(text)
    }
}
