//! Relevance scoring for candidate addresses
//!
//! A candidate first has to survive three rejection rules (asset filenames,
//! hashed local parts, blacklisted domains). Survivors get an integer score from
//! the page they were found on and the shape of the address itself.

use crate::config::ScoringConfig;
use crate::extract::scanner::EmailTokenScanner;
use crate::url::site_domain;
use crate::ConfigError;
use indexmap::IndexMap;
use std::collections::HashSet;

/// File extensions that show up in `name@2x.png` style asset names
const ASSET_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".woff"];

/// Local parts at least this long and made only of hex digits are hashes
const HEX_LOCAL_MIN_LEN: usize = 16;

/// Source-URL substrings that mark a contact-ish page
const CONTACT_PAGE_HINTS: &[&str] = &["contact", "about", "connect"];

/// Shared mailboxes that rarely reach a decision maker
const GENERIC_MAILBOXES: &[&str] = &[
    "info",
    "support",
    "sales",
    "hello",
    "admin",
    "contact",
    "enquiries",
    "office",
    "service",
    "mail",
    "team",
    "help",
];

/// Local-part substrings that suggest an official business mailbox
const BUSINESS_HINTS: &[&str] = &["official", "company", "corporate", "business"];

const CONTACT_PAGE_BONUS: i32 = 3;
const GENERIC_MAILBOX_PENALTY: i32 = 1;
const SAME_DOMAIN_BONUS: i32 = 5;
const BUSINESS_HINT_BONUS: i32 = 2;

/// Why a token was thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The token has no `@`
    NotAnEmail,
    /// The token is an image or font filename
    AssetFilename,
    /// The local part is a long hex string
    HashedLocalPart,
    /// The domain is on the blacklist
    BlacklistedDomain,
}

/// Mapping from normalized email to the best score seen for it
///
/// Entries keep their first-seen position; re-observing an address can only
/// raise its score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreMapping {
    entries: IndexMap<String, i32>,
}

impl ScoreMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an observation, keeping the maximum score for the address
    pub fn observe(&mut self, email: String, score: i32) {
        self.entries
            .entry(email)
            .and_modify(|current| *current = (*current).max(score))
            .or_insert(score);
    }

    /// Folds another mapping into this one
    pub fn merge(&mut self, other: ScoreMapping) {
        for (email, score) in other.entries {
            self.observe(email, score);
        }
    }

    pub fn get(&self, email: &str) -> Option<i32> {
        self.entries.get(email).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().map(|(email, score)| (email.as_str(), *score))
    }

    /// Entries by descending score
    ///
    /// `sort_by` is stable, so equal scores stay in first-seen order.
    pub fn ranked(&self) -> Vec<(&str, i32)> {
        let mut ranked: Vec<(&str, i32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` best addresses, best first
    pub fn top(&self, n: usize) -> Vec<String> {
        self.ranked()
            .into_iter()
            .take(n)
            .map(|(email, _)| email.to_string())
            .collect()
    }
}

/// Scores candidate addresses against the page they were found on
///
/// The scorer holds only immutable configuration, so the same token and source
/// URL always produce the same outcome.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    scanner: EmailTokenScanner,
    blacklist: HashSet<String>,
}

impl RelevanceScorer {
    /// Builds a scorer from the scoring section of the configuration
    pub fn new(config: &ScoringConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            scanner: EmailTokenScanner::new(&config.email_pattern)?,
            blacklist: config
                .blacklist_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
        })
    }

    /// Applies the rejection rules in order and returns the first that matches
    pub fn rejection(&self, email: &str) -> Option<Rejection> {
        let Some((local, domain)) = email.split_once('@') else {
            return Some(Rejection::NotAnEmail);
        };

        if ASSET_EXTENSIONS.iter().any(|ext| email.ends_with(ext)) {
            return Some(Rejection::AssetFilename);
        }

        if local.len() >= HEX_LOCAL_MIN_LEN && local.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(Rejection::HashedLocalPart);
        }

        if self.blacklist.contains(domain) {
            return Some(Rejection::BlacklistedDomain);
        }

        None
    }

    /// Normalizes a raw token and scores it, or returns None if it is rejected
    ///
    /// # Scoring
    ///
    /// | Condition | Points |
    /// |-----------|--------|
    /// | Source URL mentions contact/about/connect | +3 |
    /// | Local part is a generic mailbox (`info`, `sales`, ...) | -1 |
    /// | Email contains the source site's domain | +5 |
    /// | Local part mentions official/company/corporate/business | +2 |
    pub fn classify_and_score(&self, raw_token: &str, source_url: &str) -> Option<(String, i32)> {
        let email = raw_token.to_lowercase();

        if let Some(reason) = self.rejection(&email) {
            tracing::trace!("Rejected {} ({:?})", email, reason);
            return None;
        }

        let (local, _) = email.split_once('@')?;
        let source = source_url.to_lowercase();
        let mut score = 0;

        if CONTACT_PAGE_HINTS.iter().any(|hint| source.contains(hint)) {
            score += CONTACT_PAGE_BONUS;
        }

        if GENERIC_MAILBOXES.contains(&local) {
            score -= GENERIC_MAILBOX_PENALTY;
        }

        if site_domain(source_url).is_some_and(|domain| email.contains(&domain)) {
            score += SAME_DOMAIN_BONUS;
        }

        if BUSINESS_HINTS.iter().any(|hint| local.contains(hint)) {
            score += BUSINESS_HINT_BONUS;
        }

        Some((email, score))
    }

    /// Scans `text` and scores every token found in it
    pub fn score_text(&self, text: &str, source_url: &str) -> ScoreMapping {
        let mut mapping = ScoreMapping::new();
        for token in self.scanner.scan(text) {
            if let Some((email, score)) = self.classify_and_score(token, source_url) {
                mapping.observe(email, score);
            }
        }
        mapping
    }
}
