pub mod commands;
mod entity;
mod error;
pub mod store;

use itertools::Itertools;
use time::OffsetDateTime;
use url::{form_urlencoded, Url};

pub use self::error::{ProjectError, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, poise::ChoiceParameter)]
pub enum ProjectType {
    Website,
    Figma,
    Other,
}

impl Default for ProjectType {
    fn default() -> Self {
        Self::Website
    }
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Figma => "figma",
            Self::Other => "other",
        }
    }

    /// Inverse of [`ProjectType::as_str`]
    pub fn parse(s: &str) -> Result<Self, ProjectError> {
        match s {
            "website" => Ok(Self::Website),
            "figma" => Ok(Self::Figma),
            "other" => Ok(Self::Other),
            _ => Err(ProjectError::UnknownType(s.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub owner_id: u64,
    pub title: String,
    pub description: String,
    pub kind: ProjectType,
    pub url: String,
    /// Source code or design file
    pub code_url: Option<String>,
    /// Explicit cover image, preferred over anything derived from `url`
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: OffsetDateTime,
}

/// A validated project submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub kind: ProjectType,
    pub url: String,
    pub code_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

/// Raw form input, as typed by the user
#[derive(Debug, Default)]
pub struct ProjectForm<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub kind: Option<ProjectType>,
    pub url: &'a str,
    pub code_url: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub tags: Option<&'a str>,
}

impl NewProject {
    pub fn parse(form: ProjectForm<'_>) -> Result<Self, ProjectError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(ProjectError::MissingTitle);
        }
        let url = form.url.trim();
        if url.is_empty() {
            return Err(ProjectError::MissingUrl);
        }

        Ok(Self {
            title: title.to_owned(),
            description: form.description.unwrap_or_default().trim().to_owned(),
            kind: form.kind.unwrap_or_default(),
            url: check_url("url", url)?,
            code_url: optional_url("code url", form.code_url)?,
            image_url: optional_url("image url", form.image_url)?,
            tags: parse_tags(form.tags.unwrap_or_default()),
        })
    }
}

fn check_url(field: &'static str, url: &str) -> Result<String, ProjectError> {
    let invalid = || ProjectError::InvalidUrl {
        field,
        url: url.into(),
    };
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(url.to_owned()),
        _ => Err(invalid()),
    }
}

fn optional_url(field: &'static str, url: Option<&str>) -> Result<Option<String>, ProjectError> {
    match url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(u) => check_url(field, u).map(Some),
        None => Ok(None),
    }
}

/// Split a comma separated tag list, dropping blanks and repeats
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unique()
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum Tab {
    All,
    Website,
    Figma,
    Other,
}

impl Default for Tab {
    fn default() -> Self {
        Self::All
    }
}

impl Tab {
    pub fn includes(&self, kind: ProjectType) -> bool {
        match self {
            Self::All => true,
            Self::Website => kind == ProjectType::Website,
            Self::Figma => kind == ProjectType::Figma,
            Self::Other => kind == ProjectType::Other,
        }
    }
}

/// Projects on a tab whose title, description or tags contain `query`, ignoring case
pub fn filter<'a>(projects: &'a [Project], tab: Tab, query: &str) -> Vec<&'a Project> {
    let query = query.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| tab.includes(p.kind))
        .filter(|p| {
            query.is_empty()
                || p.title.to_lowercase().contains(&query)
                || p.description.to_lowercase().contains(&query)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn share_text(project: &Project) -> String {
    let technologies = if project.tags.is_empty() {
        "No technologies listed".to_owned()
    } else {
        project.tags.join(", ")
    };
    format!(
        "🎉 I'm excited to share my new project in the world of creativity! \n\n\
         🚀 Check out this amazing project: **{}**\n🔗 {}\n\n\
         🔧 Technologies used: {}\n\n#WebDevelopment #AI #OpenSource",
        project.title, project.url, technologies
    )
}

pub fn tweet_intent_url(project: &Project) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("text", &share_text(project))
        .finish();
    format!("https://twitter.com/intent/tweet?{query}")
}

/// Public page listing everything a user has added
pub fn profile_url(site_url: &str, owner_id: u64) -> String {
    format!("{}/profile/{}", site_url.trim_end_matches('/'), owner_id)
}

#[cfg(test)]
pub(crate) mod tests {
    use time::macros::datetime;

    use super::*;

    pub(crate) fn project(id: i64, kind: ProjectType, title: &str, tags: &[&str]) -> Project {
        Project {
            id,
            owner_id: 42,
            title: title.into(),
            description: String::new(),
            kind,
            url: "https://example.com".into(),
            code_url: None,
            image_url: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: datetime!(2024-03-01 12:00 UTC),
        }
    }

    #[test]
    fn test_parse_form() {
        let p = NewProject::parse(ProjectForm {
            title: "  Portfolio ",
            url: "https://me.dev",
            code_url: Some("https://github.com/me/portfolio"),
            tags: Some("rust, wasm,,  rust ,css"),
            ..Default::default()
        })
        .unwrap();
        assert_eq!("Portfolio", p.title);
        assert_eq!(ProjectType::Website, p.kind);
        assert_eq!("", p.description);
        assert_eq!(Some("https://github.com/me/portfolio".into()), p.code_url);
        assert_eq!(None, p.image_url);
        assert_eq!(vec!["rust", "wasm", "css"], p.tags);
    }

    #[test]
    fn test_parse_form_errors() {
        let form = |title, url| ProjectForm {
            title,
            url,
            ..Default::default()
        };
        assert_eq!(
            Err(ProjectError::MissingTitle),
            NewProject::parse(form(" ", "https://me.dev"))
        );
        assert_eq!(Err(ProjectError::MissingUrl), NewProject::parse(form("a", "")));
        assert!(matches!(
            NewProject::parse(form("a", "me.dev")),
            Err(ProjectError::InvalidUrl { field: "url", .. })
        ));
        assert!(matches!(
            NewProject::parse(form("a", "ftp://me.dev/x")),
            Err(ProjectError::InvalidUrl { .. })
        ));
        assert!(matches!(
            NewProject::parse(ProjectForm {
                code_url: Some("nope"),
                ..form("a", "https://me.dev")
            }),
            Err(ProjectError::InvalidUrl {
                field: "code url",
                ..
            })
        ));
    }

    #[test]
    fn test_type_strings() {
        for kind in [ProjectType::Website, ProjectType::Figma, ProjectType::Other] {
            assert_eq!(Ok(kind), ProjectType::parse(kind.as_str()));
        }
        assert!(ProjectType::parse("video").is_err());
    }

    #[test]
    fn test_filter() {
        let projects = vec![
            project(1, ProjectType::Website, "Weather App", &["react"]),
            project(2, ProjectType::Figma, "Bank UI", &["Mobile"]),
            project(3, ProjectType::Other, "CLI tool", &["rust"]),
        ];
        let ids = |v: Vec<&Project>| v.iter().map(|p| p.id).collect::<Vec<_>>();

        assert_eq!(vec![1, 2, 3], ids(filter(&projects, Tab::All, "")));
        assert_eq!(vec![2], ids(filter(&projects, Tab::Figma, "  ")));
        assert_eq!(vec![1], ids(filter(&projects, Tab::All, "WEATHER")));
        assert_eq!(vec![2], ids(filter(&projects, Tab::All, "mobile")));
        assert!(filter(&projects, Tab::Website, "rust").is_empty());
    }

    #[test]
    fn test_share() {
        let mut p = project(1, ProjectType::Website, "Site", &[]);
        assert!(share_text(&p).contains("Technologies used: No technologies listed"));
        p.tags = vec!["rust".into(), "css".into()];
        let text = share_text(&p);
        assert!(text.contains("**Site**"));
        assert!(text.contains("Technologies used: rust, css"));

        let intent = tweet_intent_url(&p);
        assert!(intent.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(!intent.contains(' '));
        assert!(intent.contains("%23OpenSource"));
    }

    #[test]
    fn test_profile_url() {
        assert_eq!(
            "https://showcase.dev/profile/42",
            profile_url("https://showcase.dev/", 42)
        );
    }
}
