use crate::progress::DecodeError;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(compose::config::error))]
    Config(String),

    #[error("Service not found: {0}")]
    #[diagnostic(
        code(compose::service::not_found),
        help("Check the service names with `composectl validate`")
    )]
    ServiceNotFound(String),

    #[error("Invalid manifest: {0}")]
    #[diagnostic(
        code(compose::config::validation),
        help("Run `composectl validate` for a summary of the manifest")
    )]
    Validation(String),

    #[error("Circular dependency detected: {}", .0.join(" -> "))]
    #[diagnostic(
        code(compose::dependency::circular),
        help("Services cannot depend on each other in a cycle. Review the depends_on fields")
    )]
    CircularDependency(Vec<String>),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    #[diagnostic(code(compose::progress::decode))]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error belongs to the configuration class: a caller asked
    /// for something the manifest does not contain. These are never retried.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::ServiceNotFound(_) | Error::Validation(_)
        )
    }

    /// Returns a helpful suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Error::ServiceNotFound(name) => Some(format!(
                "'{}' is not defined in the manifest. List services with: composectl profiles",
                name
            )),
            Error::CircularDependency(path) => Some(format!(
                "Services cannot depend on each other in a cycle. Review the depends_on fields for: {}",
                path.join(", ")
            )),
            Error::Config(msg) if msg.contains("Could not find") => Some(
                "Pass the manifest explicitly with: composectl -f <file>".to_string(),
            ),
            Error::Config(_) | Error::Validation(_) => {
                Some("Validate your manifest with: composectl validate".to_string())
            }
            Error::Decode(_) => Some(
                "Decode without --strict to skip lines that are not progress events".to_string(),
            ),
            _ => None,
        }
    }

    /// Formats the error with its suggestion (if any) for user-friendly display.
    pub fn with_suggestion(&self) -> String {
        match self.suggestion() {
            Some(suggestion) => format!("{}\n\nHint: {}", self, suggestion),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::DecodeStage;

    #[test]
    fn test_service_not_found_is_configuration_error() {
        let err = Error::ServiceNotFound("web".to_string());
        assert!(err.is_configuration_error());
        assert!(err.with_suggestion().contains("Hint:"));
    }

    #[test]
    fn test_decode_error_is_transparent() {
        let err: Error = DecodeError::UnknownResourceType {
            stage: DecodeStage::ResourceType,
            line: "hello".to_string(),
        }
        .into();
        assert!(!err.is_configuration_error());
        assert_eq!(err.to_string(), "unknown resource type. input = hello");
    }

    #[test]
    fn test_circular_dependency_message() {
        let err = Error::CircularDependency(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(err.to_string(), "Circular dependency detected: a -> b -> a");
    }
}
