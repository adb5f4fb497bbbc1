use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid criteria schema: {0}")]
    InvalidSchema(String),

    #[error("unknown aspect '{aspect}' assigned to candidate {candidate}")]
    UnknownAspect { candidate: String, aspect: String },

    #[error("invalid score for candidate {candidate}, aspect {aspect}: {reason}")]
    InvalidScore {
        candidate: String,
        aspect: String,
        reason: String,
    },

    #[error("duplicate candidate id: {0}")]
    DuplicateCandidate(String),

    #[error("candidate data failed validation: {0}")]
    Validation(String),

    #[error("no active program: {0}")]
    NoActiveProgram(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("logging init error: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;
