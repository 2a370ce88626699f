//! Email-shaped token scanning over raw text

use crate::ConfigError;
use regex::Regex;

/// Finds email-shaped tokens in arbitrary text
///
/// The scanner knows nothing about where the text came from; it reports every
/// non-overlapping match in order of appearance, duplicates included.
#[derive(Debug, Clone)]
pub struct EmailTokenScanner {
    pattern: Regex,
}

impl EmailTokenScanner {
    /// Builds a scanner from a regular expression
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("{}: {}", pattern, e)))?;
        Ok(Self { pattern })
    }

    /// Returns every match in `text`, left to right
    pub fn scan<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EMAIL_PATTERN;

    fn scanner() -> EmailTokenScanner {
        EmailTokenScanner::new(DEFAULT_EMAIL_PATTERN).unwrap()
    }

    #[test]
    fn test_scan_in_order_with_duplicates() {
        let text = "Write to b@x.com, then a@y.org, or b@x.com again.";
        assert_eq!(scanner().scan(text), vec!["b@x.com", "a@y.org", "b@x.com"]);
    }

    #[test]
    fn test_scan_keeps_original_case() {
        assert_eq!(
            scanner().scan("Contact us at Sales@Example.com"),
            vec!["Sales@Example.com"]
        );
    }

    #[test]
    fn test_scan_inside_markup() {
        let html = r#"<p>Mail <a href="mailto:info@acme.org?subject=Hi">info@acme.org</a></p>"#;
        assert_eq!(scanner().scan(html), vec!["info@acme.org", "info@acme.org"]);
    }

    #[test]
    fn test_tld_needs_two_letters() {
        assert!(scanner().scan("user@host.c").is_empty());
        assert!(scanner().scan("user@host").is_empty());
        assert_eq!(
            scanner().scan("first.last+tag@mail.host.io"),
            vec!["first.last+tag@mail.host.io"]
        );
    }

    #[test]
    fn test_asset_filenames_look_like_emails() {
        assert_eq!(scanner().scan("logo@2x.png"), vec!["logo@2x.png"]);
    }

    #[test]
    fn test_every_token_matches_pattern() {
        let full = Regex::new(&format!("^{}$", DEFAULT_EMAIL_PATTERN)).unwrap();
        let text = "x a.b@c.de; <y@z.info> (q_1%2@host-1.example.museum) not@valid";
        let tokens = scanner().scan(text);
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| full.is_match(t)));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            EmailTokenScanner::new("(unclosed"),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
