use once_cell::sync::Lazy;
use regex::Regex;

static REG_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// Values the source site uses to mark a missing number.
const MISSING_MARKERS: &[&str] = &["", "-", "NA", "N/A"];

/// Minimum similarity a fuzzy match must clear to be accepted.
pub const FUZZY_CUTOFF: f64 = 0.6;

/// Cleans a scraped numeric cell into a plain numeric string.
///
/// Missing-value markers ("", "-", "NA", "N/A") map to an empty string, never
/// to zero, so "value absent" stays distinguishable from "value is 0".
/// Everything else loses thousands separators, percent signs and currency
/// symbols; any remaining character that is not a digit, decimal point or
/// minus sign is dropped. The result is kept as a string for downstream
/// consumers to parse as needed.
///
/// # Example
///
/// ```
/// assert_eq!(clean_numeric_value(" 1,234.56% "), "1234.56");
/// assert_eq!(clean_numeric_value("-"), "");
/// ```
pub fn clean_numeric_value(value: &str) -> String {
    let trimmed = value.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        return String::new();
    }

    trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Cleans a metric label scraped from a table row.
///
/// The site appends "+", "*" and "#" to labels of expandable or footnoted
/// rows; those markers are stripped and internal whitespace runs collapse to
/// a single space.
pub fn clean_metric_name(metric: &str) -> String {
    let stripped: String = metric
        .chars()
        .filter(|c| !matches!(c, '+' | '*' | '#'))
        .collect();

    REG_WHITESPACE
        .replace_all(stripped.trim(), " ")
        .into_owned()
}

/// Similarity of two strings on a 0.0..=1.0 scale.
///
/// Ratcliff/Obershelp: twice the number of matching characters over the total
/// length, where matches are counted from the longest common substring and
/// recursively from the pieces on either side of it. The dictionary lookups
/// were tuned against this ratio with a 0.6 cutoff.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }

    len + matching_chars(&a[..a_start], &b[..b_start])
        + matching_chars(&a[a_start + len..], &b[b_start + len..])
}

fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut lengths = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut prev = 0;
        for (j, cb) in b.iter().enumerate() {
            let current = lengths[j + 1];
            if ca == cb {
                lengths[j + 1] = prev + 1;
                if lengths[j + 1] > best.2 {
                    best = (i + 1 - lengths[j + 1], j + 1 - lengths[j + 1], lengths[j + 1]);
                }
            } else {
                lengths[j + 1] = 0;
            }
            prev = current;
        }
    }

    best
}

/// Returns the candidate most similar to `query`, if any clears `cutoff`.
pub fn closest_match<'a, I>(query: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f64)> = None;

    for candidate in candidates {
        let ratio = similarity_ratio(query, candidate);
        if ratio < cutoff {
            continue;
        }
        if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
            best = Some((candidate, ratio));
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_numeric_value_missing_markers() {
        assert_eq!(clean_numeric_value(""), "");
        assert_eq!(clean_numeric_value("-"), "");
        assert_eq!(clean_numeric_value("NA"), "");
        assert_eq!(clean_numeric_value(" N/A "), "");
    }

    #[test]
    fn test_clean_numeric_value_strips_formatting() {
        assert_eq!(clean_numeric_value("1,200"), "1200");
        assert_eq!(clean_numeric_value("23.5%"), "23.5");
        assert_eq!(clean_numeric_value("₹ 4,321.09"), "4321.09");
        assert_eq!(clean_numeric_value("$-17"), "-17");
    }

    #[test]
    fn test_clean_numeric_value_idempotent() {
        let cleaned = clean_numeric_value("1,234.56");
        assert_eq!(clean_numeric_value(&cleaned), cleaned);
        assert_eq!(clean_numeric_value("-42.0"), "-42.0");
    }

    #[test]
    fn test_clean_metric_name() {
        assert_eq!(clean_metric_name("Net Profit +"), "Net Profit");
        assert_eq!(clean_metric_name("Raw  Materials\tCost*"), "Raw Materials Cost");
        assert_eq!(clean_metric_name("EPS in Rs"), "EPS in Rs");
    }

    #[test]
    fn test_similarity_ratio() {
        assert_eq!(similarity_ratio("TCS", "TCS"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("ABC", "XYZ"), 0.0);

        let ratio = similarity_ratio("RELAINCE", "RELIANCE");
        assert!(ratio > 0.6, "ratio was {}", ratio);
    }

    #[test]
    fn test_closest_match_cutoff() {
        let candidates = ["RELIANCE", "INFOSYS", "WIPRO"];
        assert_eq!(
            closest_match("RELAINCE", candidates, 0.6),
            Some("RELIANCE")
        );
        assert_eq!(closest_match("ZZZZZ", candidates, 0.6), None);
    }
}
