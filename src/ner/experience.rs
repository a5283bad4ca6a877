use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::text;

static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "5+ years of experience"
        r"([0-9]+)\+?\s*years?\s*(?:of\s*)?experience",
        // "experience: 5 years"
        r"experience\s*[:.]?\s*([0-9]+)\+?\s*years?",
        // "5 yrs experience"
        r"([0-9]+)\+?\s*yrs?\s*(?:of\s*)?experience",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Largest number of years found next to an experience phrase, or 0
pub fn extract_experience_years(raw_text: &str) -> u32 {
    let lowered = text::lowercase(raw_text);

    let years = EXPERIENCE_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(&lowered))
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    debug!("Extracted experience: {} years", years);
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_of_experience() {
        assert_eq!(
            extract_experience_years(
                "5+ years experience in Python and Java development, contact me at jane@example.com"
            ),
            5
        );
        assert_eq!(extract_experience_years("Over 3 Years of Experience"), 3);
    }

    #[test]
    fn test_experience_prefix_form() {
        assert_eq!(extract_experience_years("Experience: 7 years"), 7);
        assert_eq!(extract_experience_years("experience.12 yrs"), 0);
        assert_eq!(extract_experience_years("experience. 12 year"), 12);
    }

    #[test]
    fn test_abbreviated_form() {
        assert_eq!(extract_experience_years("4 yrs of experience"), 4);
        assert_eq!(extract_experience_years("10yr experience"), 10);
    }

    #[test]
    fn test_returns_maximum_across_patterns() {
        let text = "2 years experience with Go. Experience: 8 years overall. \
                    6 yrs experience in ops";
        assert_eq!(extract_experience_years(text), 8);
    }

    #[test]
    fn test_no_experience_phrase() {
        assert_eq!(extract_experience_years("Worked on many projects since 2015"), 0);
        assert_eq!(extract_experience_years(""), 0);
    }

    #[test]
    fn test_overflowing_number_is_ignored() {
        assert_eq!(
            extract_experience_years("99999999999 years experience, 3 years experience"),
            3
        );
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(extract_experience_years("\u{665} years experience"), 0);
        assert_eq!(extract_experience_years("\u{665} years, 7 years experience"), 7);
    }
}
