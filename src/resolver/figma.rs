use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_capture, Platform, PlatformMatcher};

pub struct Figma;

/// Community files live under `/community/file/<key>`, private ones under `/file/<key>`
static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"figma\.com/(?:community/)?file/(?P<id>[^/?#&\s]+)").unwrap());

impl PlatformMatcher for Figma {
    const PLATFORM: Platform = Platform::Figma;

    fn matches(url: &str) -> bool {
        url.contains("figma.com/")
    }

    fn extract_id(url: &str) -> Option<Box<str>> {
        first_capture(std::iter::once(&*KEY_RE), url)
    }

    // The community thumbnail endpoint also serves regular file keys.
    fn preview_url(id: &str) -> Option<Box<str>> {
        Some(format!("https://www.figma.com/community/file/{id}/thumbnail").into_boxed_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_prefixes() {
        assert_eq!(
            Some("ABCD".into()),
            Figma::extract_id("https://figma.com/file/ABCD/MyFile")
        );
        assert_eq!(
            Some("ABCD".into()),
            Figma::extract_id("https://figma.com/community/file/ABCD/MyFile")
        );
        assert_eq!(
            Some("k3Y".into()),
            Figma::extract_id("https://www.figma.com/file/k3Y?node-id=0%3A1")
        );
    }

    #[test]
    fn test_other_figma_pages() {
        assert!(Figma::matches("https://www.figma.com/pricing"));
        assert_eq!(None, Figma::extract_id("https://www.figma.com/pricing"));
        assert_eq!(None, Figma::extract_id("https://www.figma.com/file/"));
        assert!(!Figma::matches(""));
    }

    #[test]
    fn test_thumbnail() {
        assert_eq!(
            Some("https://www.figma.com/community/file/ABCD/thumbnail".into()),
            Figma::preview_url("ABCD")
        );
    }
}
