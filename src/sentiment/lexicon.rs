//! Financial sentiment lexicon and scorer.
//!
//! Small word-weight table tuned for market news language. Scores are
//! normalized into -1.0..=1.0 so texts of different lengths stay
//! comparable.

/// Window of preceding tokens checked for a negation.
const NEGATION_WINDOW: usize = 2;

const NEGATIONS: &[&str] = &["not", "no", "never", "without", "hardly", "isn't", "wasn't"];

/// Word weights. Positive values are bullish, negative bearish.
const WEIGHTS: &[(&str, f64)] = &[
    ("gain", 2.0),
    ("gains", 2.0),
    ("growth", 2.0),
    ("profit", 2.0),
    ("profits", 2.0),
    ("record", 1.5),
    ("beat", 2.0),
    ("beats", 2.0),
    ("surge", 2.5),
    ("surges", 2.5),
    ("rally", 2.0),
    ("strong", 1.5),
    ("upgrade", 2.0),
    ("upgraded", 2.0),
    ("wins", 1.5),
    ("win", 1.5),
    ("deal", 1.0),
    ("dividend", 1.0),
    ("buyback", 1.5),
    ("bullish", 2.5),
    ("outperform", 2.0),
    ("expands", 1.0),
    ("jump", 1.5),
    ("jumps", 1.5),
    ("soar", 2.5),
    ("soars", 2.5),
    ("loss", -2.0),
    ("losses", -2.0),
    ("fall", -1.5),
    ("falls", -1.5),
    ("drop", -1.5),
    ("drops", -1.5),
    ("decline", -1.5),
    ("declines", -1.5),
    ("weak", -1.5),
    ("miss", -2.0),
    ("misses", -2.0),
    ("downgrade", -2.0),
    ("downgraded", -2.0),
    ("fraud", -3.0),
    ("scam", -3.0),
    ("probe", -2.0),
    ("lawsuit", -2.0),
    ("layoff", -2.0),
    ("layoffs", -2.0),
    ("bearish", -2.5),
    ("crash", -3.0),
    ("plunge", -2.5),
    ("plunges", -2.5),
    ("debt", -1.0),
    ("penalty", -2.0),
    ("slump", -2.0),
    ("cuts", -1.0),
    ("underperform", -2.0),
];

fn weight_of(token: &str) -> Option<f64> {
    WEIGHTS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, weight)| *weight)
}

/// Scores a text into -1.0..=1.0. Zero means neutral or no lexicon hits.
///
/// A weighted word preceded by a negation within the last two tokens has
/// its weight flipped ("no growth" scores negative).
pub fn score_text(text: &str) -> f64 {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    let mut raw = 0.0;
    for (index, token) in tokens.iter().enumerate() {
        let weight = match weight_of(token) {
            Some(weight) => weight,
            None => continue,
        };

        let window_start = index.saturating_sub(NEGATION_WINDOW);
        let negated = tokens[window_start..index]
            .iter()
            .any(|prev| NEGATIONS.contains(&prev.as_str()));

        raw += if negated { -weight } else { weight };
    }

    normalize(raw)
}

/// Maps an unbounded raw sum into -1.0..=1.0.
fn normalize(raw: f64) -> f64 {
    raw / (raw * raw + 15.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_text_polarity() {
        assert!(score_text("Company posts record profit growth") > 0.0);
        assert!(score_text("Shares plunge after fraud probe") < 0.0);
        assert_eq!(score_text("The meeting is on Tuesday"), 0.0);
    }

    #[test]
    fn test_score_text_negation() {
        let plain = score_text("strong growth this quarter");
        let negated = score_text("no strong growth this quarter");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_score_text_bounds() {
        let piled_on = "surge surge surge surge rally rally record profit profit gains";
        let score = score_text(piled_on);
        assert!(score > 0.9 && score <= 1.0, "score was {}", score);
    }

    #[test]
    fn test_normalize_symmetry() {
        assert_eq!(normalize(0.0), 0.0);
        assert!((normalize(2.0) + normalize(-2.0)).abs() < f64::EPSILON);
    }
}
