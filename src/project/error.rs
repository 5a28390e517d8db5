use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("a project needs a title")]
    MissingTitle,
    #[error("a project needs a link")]
    MissingUrl,
    #[error("invalid {field}: `{url}` is not an http(s) link")]
    InvalidUrl { field: &'static str, url: Box<str> },
    #[error("unknown project type `{0}`")]
    UnknownType(Box<str>),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("no project with id {0}")]
    NotFound(i64),
    #[error("project {0} belongs to someone else")]
    NotOwner(i64),
    #[error("project {id} is malformed: {reason}")]
    Malformed { id: i64, reason: String },
}
