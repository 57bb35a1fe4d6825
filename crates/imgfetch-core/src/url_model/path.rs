//! Filename extraction from URL path.

/// Returns the last path segment of `url` exactly as typed, or `None` if the
/// path is empty, ends in `/`, or its last segment is `.` / `..`.
///
/// Query, fragment, and `;params` on the last segment never contribute. The
/// segment is not re-encoded, so `my cat.png` and `ä.png` stay as they are.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let segment = last_segment(raw_path(url));
    let segment = segment.split(';').next().unwrap_or("");
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Slices the path out of `url` without normalizing it.
///
/// The `url` crate only locates the scheme; strings it rejects (e.g. no
/// scheme) are treated as a bare path so `example.com/cat.png` yields `cat.png`.
fn raw_path(url: &str) -> &str {
    let end = url.find(&['?', '#'][..]).unwrap_or(url.len());
    let without_query = &url[..end];

    let parsed = match url::Url::parse(without_query) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(%url, error = %e, "url did not parse, using raw path");
            return without_query;
        }
    };

    let scheme = parsed.scheme();
    let after_scheme = match without_query.get(..scheme.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(scheme) => {
            without_query[scheme.len()..].strip_prefix(':')
        }
        _ => None,
    };
    match after_scheme {
        Some(rest) => match rest.strip_prefix("//") {
            Some(authority_and_path) => authority_and_path
                .find('/')
                .map_or("", |i| &authority_and_path[i..]),
            None => rest,
        },
        None => without_query,
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}
