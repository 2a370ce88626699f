use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (`mailto:`, `data:` and friends), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_sieve::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the organization domain of a page: its host with one leading `www.` removed
///
/// Other subdomains are kept as-is (`mail.example.com` stays `mail.example.com`).
///
/// # Examples
///
/// ```
/// use contact_sieve::url::site_domain;
///
/// assert_eq!(site_domain("https://www.example.com/contact"), Some("example.com".to_string()));
/// assert_eq!(site_domain("not a url"), None);
/// ```
pub fn site_domain(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    let host = extract_domain(&url)?;
    let domain = host.strip_prefix("www.").unwrap_or(&host);

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

/// Returns true when both URLs point at the same host and explicit port
///
/// Subdomains count as different hosts.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(host_a), Some(host_b)) => host_a == host_b && a.port() == b.port(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_site_domain_strips_www_only() {
        assert_eq!(
            site_domain("http://www.acme.co.uk/about"),
            Some("acme.co.uk".to_string())
        );
        assert_eq!(
            site_domain("https://mail.acme.co.uk/"),
            Some("mail.acme.co.uk".to_string())
        );
        assert_eq!(
            site_domain("https://acme.com/"),
            Some("acme.com".to_string())
        );
    }

    #[test]
    fn test_site_domain_without_host() {
        assert_eq!(site_domain("mailto:a@b.com"), None);
        assert_eq!(site_domain(""), None);
    }

    #[test]
    fn test_same_host() {
        let base = Url::parse("https://example.com/").unwrap();

        assert!(same_host(&base, &Url::parse("http://EXAMPLE.com/team").unwrap()));
        assert!(!same_host(&base, &Url::parse("https://www.example.com/").unwrap()));
        assert!(!same_host(&base, &Url::parse("https://blog.example.com/").unwrap()));
        assert!(!same_host(&base, &Url::parse("https://example.com:8443/").unwrap()));
        assert!(!same_host(&base, &Url::parse("mailto:x@example.com").unwrap()));
    }
}
