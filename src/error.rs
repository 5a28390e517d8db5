use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("no Discord token configured")]
    ConfigToken,
    #[error("{0} is not a year with contributions")]
    BadYear(i32),
}
