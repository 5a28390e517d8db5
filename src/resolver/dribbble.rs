use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_capture, Platform, PlatformMatcher};

pub struct Dribbble;

/// Only the leading digits are the shot id, any `-slug` after them is cosmetic
static SHOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"dribbble\.com/shots/(?P<id>\d+)").unwrap());

impl PlatformMatcher for Dribbble {
    const PLATFORM: Platform = Platform::Dribbble;

    fn matches(url: &str) -> bool {
        url.contains("dribbble.com/shots/")
    }

    fn extract_id(url: &str) -> Option<Box<str>> {
        first_capture(std::iter::once(&*SHOT_RE), url)
    }

    fn preview_url(id: &str) -> Option<Box<str>> {
        Some(format!("https://cdn.dribbble.com/userupload/shots/{id}/large").into_boxed_str())
    }
}
