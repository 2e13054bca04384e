use super::{Manifest, ManifestDefinition};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for, in order, when no manifest path is given.
pub const MANIFEST_FILE_NAMES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Find a manifest starting from the current directory
    pub fn find_manifest_file(&self) -> Result<PathBuf> {
        let current_dir = std::env::current_dir()?;
        Self::find_manifest_in_dir(&current_dir)
    }

    pub fn find_manifest_in_dir(dir: &Path) -> Result<PathBuf> {
        for name in MANIFEST_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        if let Some(parent) = dir.parent() {
            return Self::find_manifest_in_dir(parent);
        }

        Err(Error::Config(
            "Could not find compose.yaml in current directory or any parent".to_string(),
        ))
    }

    /// Load a manifest definition from file path
    pub fn load_definition<P: AsRef<Path>>(&self, path: P) -> Result<ManifestDefinition> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read manifest '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        self.parse_definition(&content)
    }

    /// Parse a manifest definition from a YAML string
    pub fn parse_definition(&self, content: &str) -> Result<ManifestDefinition> {
        if content.trim().is_empty() {
            return Ok(ManifestDefinition::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| Error::Parse(format!("Failed to parse manifest YAML: {}", e)))
    }

    /// Load a manifest and apply the requested profiles.
    ///
    /// The project name is, in order of preference: `project_name`, the
    /// manifest's top-level `name`, the name of the directory holding the
    /// file.
    pub fn load_manifest<P: AsRef<Path>>(
        &self,
        path: P,
        project_name: Option<&str>,
        profiles: &[String],
    ) -> Result<Manifest> {
        let path = path.as_ref();
        let definition = self.load_definition(path)?;
        let working_dir = path
            .parent()
            .map(|p| {
                if p.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    p.to_path_buf()
                }
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let name = match project_name.or(definition.name.as_deref()) {
            Some(name) => normalize_project_name(name),
            None => {
                let dir = fs::canonicalize(&working_dir).unwrap_or_else(|_| working_dir.clone());
                dir.file_name()
                    .map(|n| normalize_project_name(&n.to_string_lossy()))
                    .unwrap_or_default()
            }
        };
        if name.is_empty() {
            return Err(Error::Config(format!(
                "Cannot derive a project name for '{}'; pass one with --project-name",
                path.display()
            )));
        }

        Ok(Manifest::from_definition(definition, name, profiles)
            .with_source(working_dir, vec![path.to_path_buf()]))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase and keep only `[a-z0-9_-]`, as the compose CLI does.
pub fn normalize_project_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_manifest() {
        let yaml = r#"
name: demo
services:
  backend:
    image: alpine:3.19
    depends_on:
      - database
  database:
    image: postgres:16
    profiles: [db]
networks:
  front:
volumes:
  data:
    driver: local
"#;

        let parser = Parser::new();
        let definition = parser.parse_definition(yaml).unwrap();

        assert_eq!(definition.name.as_deref(), Some("demo"));
        assert_eq!(definition.services.len(), 2);
        assert!(definition.services["backend"].depends_on.contains_key("database"));
        assert!(definition.networks.contains_key("front"));
        assert_eq!(
            definition.volumes["data"].as_ref().and_then(|v| v.driver.as_deref()),
            Some("local")
        );
    }

    #[test]
    fn test_parse_empty_manifest() {
        let definition = Parser::new().parse_definition("  \n").unwrap();
        assert!(definition.services.is_empty());
    }

    #[test]
    fn test_parse_malformed_manifest() {
        let err = Parser::new()
            .parse_definition("services:\n  web: {image: [unclosed\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_normalize_project_name() {
        assert_eq!(normalize_project_name("My Project.v2"), "myprojectv2");
        assert_eq!(normalize_project_name("test_data-1"), "test_data-1");
    }
}
