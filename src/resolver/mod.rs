mod dribbble;
mod figma;
mod instagram;
mod youtube;

use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub use self::dribbble::Dribbble;
pub use self::figma::Figma;
pub use self::instagram::Instagram;
pub use self::youtube::YouTube;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Instagram,
    Figma,
    Dribbble,
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YouTube => write!(f, "YouTube"),
            Self::Instagram => write!(f, "Instagram"),
            Self::Figma => write!(f, "Figma"),
            Self::Dribbble => write!(f, "Dribbble"),
        }
    }
}

/// Links of one platform. Plain string matching, nothing here touches the network.
pub trait PlatformMatcher {
    const PLATFORM: Platform;

    /// Whether the link belongs to this platform at all
    fn matches(url: &str) -> bool;

    /// Stable identifier of the linked resource, never empty
    fn extract_id(url: &str) -> Option<Box<str>>;

    /// Direct image url for an identifier
    fn preview_url(_id: &str) -> Option<Box<str>> {
        None
    }

    /// Player url for an identifier, for platforms that allow inline embedding
    fn embed_url(_id: &str) -> Option<Box<str>> {
        None
    }

    fn link(url: &str) -> Option<PlatformLink> {
        if !Self::matches(url) {
            return None;
        }
        Self::extract_id(url).map(|id| PlatformLink {
            platform: Self::PLATFORM,
            id,
        })
    }
}

/// A successfully classified link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformLink {
    pub platform: Platform,
    pub id: Box<str>,
}

impl PlatformLink {
    pub fn preview_url(&self) -> Option<Box<str>> {
        match self.platform {
            Platform::YouTube => YouTube::preview_url(&self.id),
            Platform::Instagram => Instagram::preview_url(&self.id),
            Platform::Figma => Figma::preview_url(&self.id),
            Platform::Dribbble => Dribbble::preview_url(&self.id),
        }
    }

    pub fn embed_url(&self) -> Option<Box<str>> {
        match self.platform {
            Platform::YouTube => YouTube::embed_url(&self.id),
            Platform::Instagram => Instagram::embed_url(&self.id),
            Platform::Figma => Figma::embed_url(&self.id),
            Platform::Dribbble => Dribbble::embed_url(&self.id),
        }
    }
}

/// Video and social links only. Checked before anything else when building a preview.
pub fn video_preview(url: &str) -> Option<PlatformLink> {
    YouTube::link(url).or_else(|| Instagram::link(url))
}

/// Classify a link, `None` if no platform recognises it
pub fn classify(url: &str) -> Option<PlatformLink> {
    video_preview(url)
        .or_else(|| Figma::link(url))
        .or_else(|| Dribbble::link(url))
}

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bhttps?://[^\s<>]+").unwrap());

/// Every http(s) link in a piece of text, in order of appearance
pub fn links_in(text: &str) -> Vec<Box<str>> {
    LINK_RE
        .find_iter(text)
        .map(|m| trim_link(m.as_str()))
        .filter(|url| !url.is_empty())
        .map(Into::into)
        .collect()
}

/// Strip punctuation that ends the surrounding sentence or markdown rather than the link.
/// A closing paren stays when the link opened one itself.
fn trim_link(mut url: &str) -> &str {
    while let Some(c) = url.chars().next_back() {
        let keep = match c {
            ')' => url.matches('(').count() >= url.matches(')').count(),
            '.' | ',' | ';' | ':' | '!' | '?' | ']' | '}' | '\'' | '"' => false,
            _ => true,
        };
        if keep {
            break;
        }
        url = &url[..url.len() - c.len_utf8()];
    }
    url
}

fn first_capture<'r>(patterns: impl IntoIterator<Item = &'r Regex>, url: &str) -> Option<Box<str>> {
    patterns
        .into_iter()
        .filter_map(|re| re.captures(url))
        .filter_map(|cap| cap.name("id"))
        .map(|m| m.as_str())
        .find(|id| !id.is_empty())
        .map(Into::into)
}
