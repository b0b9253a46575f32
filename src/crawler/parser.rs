//! HTML link extraction
//!
//! Pulls the href of every anchor tag out of a page, resolves it against
//! the page's URL, normalizes it, and keeps only admissible results. The
//! output is the exact list the worker hands to both the shard store and
//! the frontier: order preserved, duplicates preserved (one page linking to
//! the same place ten times produces ten entries).

use crate::url::{is_valid_url, normalize_url, resolve_relative, MAX_URL_LEN};
use scraper::{Html, Selector};

/// Pages larger than this are not parsed at all.
const MAX_HTML_LEN: usize = 100_000_000;

/// Extracts all admissible outbound links from an HTML page.
///
/// Hrefs that are empty, oversized, or use a non-navigable scheme
/// (`javascript:`, `mailto:`, `tel:`, `data:`) are dropped, as are
/// same-page fragment anchors. Everything else goes through relative
/// resolution and normalization; whatever fails URL validation afterwards
/// is silently discarded.
///
/// Malformed HTML is tolerated: the parser recovers where it can and the
/// result is simply whatever anchors were recognizable.
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    if html.is_empty() || html.len() > MAX_HTML_LEN {
        return links;
    }

    let document = Html::parse_document(html);

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(href) => href.trim(),
                None => continue,
            };

            if href.is_empty() || href.len() > MAX_URL_LEN {
                continue;
            }

            if href.starts_with("javascript:")
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
                || href.starts_with("data:")
                || href.starts_with('#')
            {
                continue;
            }

            let absolute = resolve_relative(base_url, href);
            let normalized = normalize_url(&absolute);

            if is_valid_url(&normalized) {
                links.push(normalized);
            }
        }
    }

    links
}
