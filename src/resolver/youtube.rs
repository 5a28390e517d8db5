use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_capture, Platform, PlatformMatcher};

pub struct YouTube;

/// Tried in order, the first capture wins
static ID_RES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)(?P<id>[^&?#/\s]+)")
            .unwrap(),
        Regex::new(r"youtube\.com/shorts/(?P<id>[^&?#/\s]+)").unwrap(),
    ]
});

impl PlatformMatcher for YouTube {
    const PLATFORM: Platform = Platform::YouTube;

    fn matches(url: &str) -> bool {
        Self::extract_id(url).is_some()
    }

    fn extract_id(url: &str) -> Option<Box<str>> {
        first_capture(ID_RES.iter(), url)
    }

    fn preview_url(id: &str) -> Option<Box<str>> {
        Some(format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg").into_boxed_str())
    }

    fn embed_url(id: &str) -> Option<Box<str>> {
        Some(format!("https://www.youtube.com/embed/{id}").into_boxed_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&list=PL123&index=2",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1",
            "https://youtu.be/dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ#t=10",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ/",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
        ] {
            assert_eq!(Some("dQw4w9WgXcQ".into()), YouTube::extract_id(url), "{url}");
        }
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(Some("ABC123".into()), YouTube::extract_id("https://youtu.be/ABC123?t=30"));
    }

    #[test]
    fn test_no_match() {
        assert!(!YouTube::matches(""));
        assert!(!YouTube::matches("https://www.youtube.com/"));
        assert!(!YouTube::matches("https://www.youtube.com/watch?v="));
        assert!(!YouTube::matches("https://vimeo.com/12345"));
    }

    #[test]
    fn test_derived() {
        assert_eq!(
            Some("https://img.youtube.com/vi/abc/maxresdefault.jpg".into()),
            YouTube::preview_url("abc")
        );
        assert_eq!(
            Some("https://www.youtube.com/embed/abc".into()),
            YouTube::embed_url("abc")
        );
    }
}
