//! URL normalization and relative-link resolution

/// Normalizes a URL string.
///
/// # Normalization Steps
///
/// 1. Drop the fragment (everything from the first `#`)
/// 2. Trim surrounding whitespace
/// 3. Lowercase the entire string, path included
/// 4. Strip the trailing slash when the URL is scheme + authority only
///    (`https://example.com/` becomes `https://example.com`)
///
/// Query strings are preserved: two URLs differing only in their query
/// remain distinct frontier entries. Lowercasing the whole string conflates
/// paths that differ only in case; the frontier's identity model depends on
/// that, so it is kept as-is.
///
/// # Examples
///
/// ```
/// use linkrank::url::normalize_url;
///
/// assert_eq!(normalize_url(" https://Example.com/Page#top "), "https://example.com/page");
/// assert_eq!(normalize_url("https://example.com/"), "https://example.com");
/// assert_eq!(normalize_url("https://example.com/a?B=1"), "https://example.com/a?b=1");
/// ```
pub fn normalize_url(url: &str) -> String {
    let without_fragment = match url.find('#') {
        Some(pos) => &url[..pos],
        None => url,
    };

    let normalized = without_fragment.trim().to_lowercase();

    if is_authority_only_with_slash(&normalized) {
        normalized[..normalized.len() - 1].to_string()
    } else {
        normalized
    }
}

/// Returns true for URLs of the shape `https?://<authority>/` with nothing
/// after the slash.
fn is_authority_only_with_slash(url: &str) -> bool {
    let rest = match strip_scheme(url) {
        Some(rest) => rest,
        None => return false,
    };

    rest.len() > 1 && rest.ends_with('/') && !rest[..rest.len() - 1].contains('/')
}

fn strip_scheme(url: &str) -> Option<&str> {
    url.strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
}

/// Resolves an href against a base URL.
///
/// Already-absolute hrefs (`http://` / `https://`) are returned unchanged.
/// Otherwise the authority `A` and path `P` are taken from the base URL and
/// the href is combined with them:
///
/// * `/x` becomes `A/x`
/// * `./x` becomes `A` + `P/` + `x`
/// * `../x` becomes `A` + `/../x` (the parent segment is appended, not
///   resolved against the base path -- a known approximation that keeps
///   frontier identities stable)
/// * anything else becomes `A` + `P/` + href
///
/// When the base itself has no recognizable authority the href is glued onto
/// it with a `/`.
pub fn resolve_relative(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    let (authority, path) = match split_authority_path(base) {
        Some(parts) => parts,
        None => return format!("{}/{}", base, href),
    };

    if let Some(rest) = href.strip_prefix("./") {
        return format!("{}{}{}", authority, ensure_trailing_slash(path), rest);
    }

    if href.starts_with("../") {
        return format!("{}/{}", authority, href);
    }

    if href.starts_with('/') {
        return format!("{}{}", authority, href);
    }

    format!("{}{}{}", authority, ensure_trailing_slash(path), href)
}

/// Splits a URL into (scheme + authority, path), where the path excludes any
/// query or fragment. Returns None when the URL has no `http(s)://` prefix.
fn split_authority_path(url: &str) -> Option<(&str, &str)> {
    let after_scheme = strip_scheme(url)?;
    let scheme_len = url.len() - after_scheme.len();

    let path_start = match after_scheme.find('/') {
        Some(pos) => scheme_len + pos,
        None => return Some((url, "")),
    };

    let path_end = url[path_start..]
        .find(|c| c == '?' || c == '#')
        .map(|pos| path_start + pos)
        .unwrap_or(url.len());

    Some((&url[..path_start], &url[path_start..path_end]))
}

fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}
