use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Contact details found in a resume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

// country code (with its separator), area code, exchange, line
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})").unwrap()
});

/// Extract every email address and phone number, in order of appearance.
/// Duplicates are kept.
pub fn extract_contact(raw_text: &str) -> ContactInfo {
    let emails: Vec<String> = EMAIL_RE
        .find_iter(raw_text)
        .map(|m| m.as_str().to_string())
        .collect();

    let phones: Vec<String> = PHONE_RE
        .captures_iter(raw_text)
        .map(|caps| {
            caps.iter()
                .skip(1)
                .map(|group| group.map_or("", |m| m.as_str()))
                .collect::<String>()
        })
        .collect();

    debug!(
        "Extracted {} emails and {} phones",
        emails.len(),
        phones.len()
    );

    ContactInfo { emails, phones }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_email() {
        let info = extract_contact("contact me at jane@example.com for details");
        assert_eq!(info.emails, vec!["jane@example.com"]);
        assert!(info.phones.is_empty());
    }

    #[test]
    fn test_emails_are_not_deduplicated() {
        let info = extract_contact(
            "jane.doe+jobs@mail.example.org, backup: JANE_DOE@corp.io; \
             jane.doe+jobs@mail.example.org",
        );
        assert_eq!(
            info.emails,
            vec![
                "jane.doe+jobs@mail.example.org",
                "JANE_DOE@corp.io",
                "jane.doe+jobs@mail.example.org",
            ]
        );
    }

    #[test]
    fn test_email_requires_alphabetic_tld() {
        let info = extract_contact("bad@host.1 and also bad@host.c");
        assert!(info.emails.is_empty());
    }

    #[test]
    fn test_phone_groups_are_concatenated() {
        let info = extract_contact("Call (555) 123-4567 or 555.987.6543 or 5550001111");
        assert_eq!(info.phones, vec!["5551234567", "5559876543", "5550001111"]);
    }

    #[test]
    fn test_phone_keeps_country_code_group_as_captured() {
        let info = extract_contact("Mobile: +1 (555) 123-4567");
        assert_eq!(info.phones, vec!["+1 5551234567"]);

        let info = extract_contact("+44-202-555-0199");
        assert_eq!(info.phones, vec!["+44-2025550199"]);
    }

    #[test]
    fn test_no_contact_info() {
        let info = extract_contact("Nothing to see here, 12 34.");
        assert!(info.is_empty());
    }
}
