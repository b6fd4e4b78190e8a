use tc_system::SystemError;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parameter `{path}` is not a number: {found}")]
    NotANumber { path: String, found: String },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("System error: {0}")]
    System(#[from] SystemError),
}
