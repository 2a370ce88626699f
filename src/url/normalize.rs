use crate::UrlError;
use url::Url;

/// Prepares one line of the URL list for fetching
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. If the line has no `http://` or `https://` scheme, prepend `http://`
/// 3. Parse; reject if malformed or if the result has no host
///
/// # Examples
///
/// ```
/// use contact_sieve::url::normalize_seed_url;
///
/// let url = normalize_seed_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/");
///
/// let url = normalize_seed_url("https://example.com/contact").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/contact");
/// ```
pub fn normalize_seed_url(line: &str) -> Result<Url, UrlError> {
    let prefixed = with_scheme(line);
    let url = Url::parse(&prefixed).map_err(|e| UrlError::Parse(format!("{}: {}", prefixed, e)))?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Prepends `http://` to a trimmed line that lacks a web scheme
pub fn with_scheme(line: &str) -> String {
    let line = line.trim();
    if line.starts_with("http://") || line.starts_with("https://") {
        line.to_string()
    } else {
        format!("http://{}", line)
    }
}

/// Resolves a link href against the page it appeared on
///
/// Returns an error for hrefs that do not resolve to an HTTP(S) URL.
pub fn resolve_link(href: &str, base_url: &Url) -> Result<Url, UrlError> {
    let resolved = base_url
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved),
        other => Err(UrlError::InvalidScheme(other.to_string())),
    }
}
