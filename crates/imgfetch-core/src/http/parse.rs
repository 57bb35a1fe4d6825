//! Parse HTTP response header lines.

/// Returns the value of the last `Content-Type` header in `lines`, trimmed.
pub(crate) fn content_type(lines: &[String]) -> Option<String> {
    let mut content_type = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                let value = value.trim();
                if !value.is_empty() {
                    content_type = Some(value.to_string());
                }
            }
        }
    }
    content_type
}
