/// Turns a listing href into an absolute URL against `base`.
///
/// Pure string work: no encoding or query normalization. An empty result
/// means the href was unusable and the caller should drop the item.
pub fn resolve_url(base: &str, href: &str) -> String {
    let href = href.trim();

    if href.is_empty() {
        return String::new();
    }

    if href.starts_with("http") {
        return href.to_string();
    }

    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{}", rest);
    }

    let base = base.trim_end_matches('/');

    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}
