//! Domain extraction and URL admissibility

use crate::url::MAX_URL_LEN;

/// Extracts the domain from a URL string.
///
/// The domain is the authority portion of the URL: everything between the
/// scheme and the first `/`, with a leading `www.` stripped and the result
/// lowercased. Userinfo and ports are kept as part of the domain, so two
/// URLs differing only by port yield distinct domains.
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain
/// * `None` - The URL has no `http(s)://` prefix or an empty authority
///
/// # Examples
///
/// ```
/// use linkrank::url::extract_domain;
///
/// assert_eq!(extract_domain("https://www.Example.com/path"), Some("example.com".to_string()));
/// assert_eq!(extract_domain("https://example.com:8080/"), Some("example.com:8080".to_string()));
/// assert_eq!(extract_domain("ftp://example.com"), None);
/// ```
pub fn extract_domain(url: &str) -> Option<String> {
    let after_scheme = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))?;

    let authority = match after_scheme.find('/') {
        Some(pos) => &after_scheme[..pos],
        None => after_scheme,
    };

    let authority = authority.strip_prefix("www.").unwrap_or(authority);

    if authority.is_empty() {
        return None;
    }

    Some(authority.to_lowercase())
}

/// Returns true when a URL is admissible into the frontier or graph: it
/// starts with `http://` or `https://`, is at most [`MAX_URL_LEN`] bytes,
/// and yields a non-empty domain.
pub fn is_valid_url(url: &str) -> bool {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return false;
    }

    if url.len() > MAX_URL_LEN {
        return false;
    }

    extract_domain(url).is_some()
}
