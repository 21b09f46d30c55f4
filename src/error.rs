use thiserror::Error;

/// Errors raised while loading or compiling a grammar file.
///
/// Matching itself never fails; see [`Pattern::matches`](crate::Pattern::matches)
/// for how address decoding errors are surfaced.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("failed to read grammar file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("unsupported grammar version: {0}")]
    UnsupportedVersion(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("pattern `{rule}` references unknown pattern `{name}`")]
    UnknownPattern { rule: String, name: String },

    #[error("pattern reference cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}
