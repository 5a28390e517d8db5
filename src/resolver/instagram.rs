use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_capture, Platform, PlatformMatcher};

/// Posts, reels and stories. Instagram does not hand out thumbnails without an API token, so
/// links only ever get the generic placeholder.
pub struct Instagram;

static ID_RES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"instagram\.com/(?:p|reel|tv)/(?P<id>[^/?#&\s]+)").unwrap(),
        Regex::new(r"instagram\.com/stories/[^/?#&\s]+/(?P<id>[^/?#&\s]+)").unwrap(),
    ]
});

impl PlatformMatcher for Instagram {
    const PLATFORM: Platform = Platform::Instagram;

    fn matches(url: &str) -> bool {
        url.contains("instagram.com/")
    }

    fn extract_id(url: &str) -> Option<Box<str>> {
        first_capture(ID_RES.iter(), url)
    }
}
