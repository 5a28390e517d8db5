use tracing::debug;

use crate::project::{Project, ProjectType};
use crate::resolver;
use crate::CLIENT;

/// How a project should be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Something that can be framed: a video player or the live website. `thumbnail` is the
    /// still image to use where framing is not possible.
    Frame {
        url: Box<str>,
        thumbnail: Option<Box<str>>,
    },
    Image(Box<str>),
    Placeholder,
}

impl Preview {
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Frame { thumbnail, .. } => thumbnail.as_deref(),
            Self::Image(url) => Some(url.as_ref()),
            Self::Placeholder => None,
        }
    }

    /// Image to display, falling back to `placeholder`
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image().unwrap_or(placeholder)
    }

    /// Drop an image that failed to load
    fn without_image(self) -> Self {
        match self {
            Self::Frame { url, .. } => Self::Frame {
                url,
                thumbnail: None,
            },
            Self::Image(_) | Self::Placeholder => Self::Placeholder,
        }
    }
}

/// Image derived from the project link alone
pub fn derived_thumbnail(url: &str) -> Option<Box<str>> {
    resolver::classify(url).and_then(|link| link.preview_url())
}

/// Stored image first, then whatever the link yields
pub fn thumbnail(project: &Project) -> Option<Box<str>> {
    project
        .image_url
        .as_deref()
        .map(Into::into)
        .or_else(|| derived_thumbnail(&project.url))
}

pub fn resolve(project: &Project) -> Preview {
    let still = || match thumbnail(project) {
        Some(url) => Preview::Image(url),
        None => Preview::Placeholder,
    };

    if project.kind == ProjectType::Figma {
        return still();
    }
    if let Some(embed) = resolver::video_preview(&project.url).and_then(|link| link.embed_url()) {
        return Preview::Frame {
            url: embed,
            thumbnail: thumbnail(project),
        };
    }
    match project.kind {
        ProjectType::Website if derived_thumbnail(&project.url).is_none() => Preview::Frame {
            url: project.url.as_str().into(),
            thumbnail: thumbnail(project),
        },
        _ => still(),
    }
}

/// Like [`resolve`], but swaps images that do not load for the placeholder
pub async fn resolve_checked(project: &Project) -> Preview {
    let preview = resolve(project);
    let loads = match preview.image() {
        Some(url) => probe_image(url).await,
        None => true,
    };
    if loads {
        preview
    } else {
        preview.without_image()
    }
}

/// Whether an image url currently answers with a success status
pub async fn probe_image(url: &str) -> bool {
    match CLIENT.head(url).send().await {
        Ok(resp) if resp.status().is_success() => true,
        Ok(resp) => {
            debug!(url, status = %resp.status(), "preview image unavailable");
            false
        }
        Err(e) => {
            debug!(url, error = %e, "preview image unreachable");
            false
        }
    }
}
