use thiserror::Error;

/// Why initialization could not produce a configuration. Fatal: the
/// orchestrator logs the error and installs nothing.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("tracking script element not found in the document")]
    ScriptElementNotFound,
    #[error("data-site-key attribute is required")]
    MissingSiteKey,
    #[error("browser environment unavailable: {0}")]
    Environment(String),
}
