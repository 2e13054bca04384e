//! Dependency edge types.
//!
//! A service's `depends_on` is a mapping from the depended-on service name to
//! a [`ServiceDependency`]. Both compose shapes are accepted when loading:
//!
//! ```yaml
//! depends_on:
//!   - db
//! ```
//!
//! ```yaml
//! depends_on:
//!   db:
//!     condition: service_healthy
//!     restart: true
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Readiness condition a dependent waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyCondition {
    /// Dependency container has been started (default)
    #[default]
    ServiceStarted,
    /// Dependency reports healthy
    ServiceHealthy,
    /// Dependency ran to completion with exit code 0
    ServiceCompletedSuccessfully,
}

/// One `depends_on` edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDependency {
    #[serde(default)]
    pub condition: DependencyCondition,

    /// Restart the dependent when the dependency is updated.
    #[serde(default, skip_serializing_if = "is_false")]
    pub restart: bool,

    /// When false the dependent may run without this dependency present.
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

fn is_false(b: &bool) -> bool {
    !b
}

impl Default for ServiceDependency {
    fn default() -> Self {
        Self {
            condition: DependencyCondition::default(),
            restart: false,
            required: true,
        }
    }
}

impl ServiceDependency {
    pub fn new(condition: DependencyCondition) -> Self {
        Self {
            condition,
            ..Self::default()
        }
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DependsOnSpec {
    List(Vec<String>),
    Map(IndexMap<String, Option<ServiceDependency>>),
}

pub(crate) fn deserialize_depends_on<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, ServiceDependency>, D::Error>
where
    D: Deserializer<'de>,
{
    let spec = Option::<DependsOnSpec>::deserialize(deserializer)?;
    Ok(match spec {
        None => IndexMap::new(),
        Some(DependsOnSpec::List(names)) => names
            .into_iter()
            .map(|name| (name, ServiceDependency::default()))
            .collect(),
        Some(DependsOnSpec::Map(map)) => map
            .into_iter()
            .map(|(name, dep)| (name, dep.unwrap_or_default()))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_depends_on")]
        depends_on: IndexMap<String, ServiceDependency>,
    }

    #[test]
    fn test_list_form_uses_defaults() {
        let holder: Holder = serde_yaml::from_str("depends_on: [db, cache]").unwrap();
        assert_eq!(holder.depends_on.len(), 2);
        assert_eq!(holder.depends_on["db"], ServiceDependency::default());
        assert!(holder.depends_on["cache"].required);
    }

    #[test]
    fn test_map_form() {
        let yaml = r#"
depends_on:
  db:
    condition: service_healthy
    restart: true
  seed:
    condition: service_completed_successfully
    required: false
  cache:
"#;
        let holder: Holder = serde_yaml::from_str(yaml).unwrap();
        let db = &holder.depends_on["db"];
        assert_eq!(db.condition, DependencyCondition::ServiceHealthy);
        assert!(db.restart);

        let seed = &holder.depends_on["seed"];
        assert_eq!(
            seed.condition,
            DependencyCondition::ServiceCompletedSuccessfully
        );
        assert!(!seed.required);

        assert_eq!(holder.depends_on["cache"], ServiceDependency::default());

        let keys: Vec<&str> = holder.depends_on.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["db", "seed", "cache"]);
    }

    #[test]
    fn test_missing_is_empty() {
        let holder: Holder = serde_yaml::from_str("{}").unwrap();
        assert!(holder.depends_on.is_empty());
    }
}
