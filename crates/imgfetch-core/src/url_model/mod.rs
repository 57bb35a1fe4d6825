//! URL modeling and filename derivation.
//!
//! Derives the local filename for a downloaded image from the URL path.

mod path;

pub use path::filename_from_url_path;

/// Derives the filename for saving the image at `url`.
///
/// Uses the last path segment of `url`; falls back to `fallback` when the
/// path is root, ends in `/`, or has no usable segment.
///
/// # Examples
///
/// - `derive_filename("https://example.com/cat.png", "downloaded_image.jpg")` → `"cat.png"`
/// - `derive_filename("https://example.com/", "downloaded_image.jpg")` → `"downloaded_image.jpg"`
pub fn derive_filename(url: &str, fallback: &str) -> String {
    filename_from_url_path(url).unwrap_or_else(|| fallback.to_string())
}
