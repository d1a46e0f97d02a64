use url::Url;

/// Turns an `href` into the address a browser would follow.
///
/// Empty, fragment-only and `javascript:` references are not download
/// addresses and yield `None`. Relative references are joined onto `base`
/// when one is known and kept as written otherwise.
pub(crate) fn resolve_href(raw: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if trimmed
        .get(..11)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
    {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.into());
    }
    match base {
        Some(base) => base.join(trimmed).ok().map(Into::into),
        None => Some(trimmed.to_string()),
    }
}
