//! Interactive URL entry: comma/newline separated, ended by a terminator line.

use std::io::{self, BufRead};

/// Splits one input line on commas, trimming each piece and dropping empty ones.
pub fn split_line(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// True if `line` is the terminator (ASCII case-insensitive, surrounding whitespace ignored).
pub fn is_terminator(line: &str, terminator: &str) -> bool {
    line.trim().eq_ignore_ascii_case(terminator.trim())
}

/// Reads lines from `reader` until the terminator line or end of input.
///
/// URLs are returned in read order; duplicates are kept. Nothing after the
/// terminator is consumed beyond the terminator line itself. Bytes that are
/// not UTF-8 become replacement characters instead of failing the read.
pub fn collect_urls<R: BufRead>(mut reader: R, terminator: &str) -> io::Result<Vec<String>> {
    let mut urls = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            tracing::debug!("input ended without terminator");
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if is_terminator(&line, terminator) {
            break;
        }
        urls.extend(split_line(&line).map(str::to_string));
    }
    tracing::debug!(count = urls.len(), "collected urls");
    Ok(urls)
}
