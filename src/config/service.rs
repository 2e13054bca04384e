//! Service definition types.
//!
//! This module contains the [`Service`] struct: one named workload in a
//! manifest, with the profile tags and dependency edges the partitioning
//! code works on.

use super::dependency::deserialize_depends_on;
use super::{DependencyCondition, ServiceDependency};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Profile tag that selects every service.
pub const ALL_PROFILES: &str = "*";

/// A single service definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Filled in from the mapping key when the manifest is built.
    #[serde(skip)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    // Profiles for conditional activation. Empty means always relevant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_depends_on",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub depends_on: IndexMap<String, ServiceDependency>,

    #[serde(
        default,
        deserialize_with = "deserialize_labels",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub labels: IndexMap<String, String>,

    /// Runtime correlation labels, see [`super::apply_custom_labels`].
    #[serde(skip)]
    pub custom_labels: IndexMap<String, String>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    /// Add a `depends_on` edge with the given condition.
    pub fn depends_on(mut self, name: impl Into<String>, condition: DependencyCondition) -> Self {
        self.depends_on
            .insert(name.into(), ServiceDependency::new(condition));
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>, dep: ServiceDependency) -> Self {
        self.depends_on.insert(name.into(), dep);
        self
    }

    /// Compose activation rule: a service is selected by `requested` when it
    /// declares no profiles, when the wildcard is requested, or when one of
    /// its profiles is requested.
    pub fn has_profile(&self, requested: &[String]) -> bool {
        if self.profiles.is_empty() {
            return true;
        }
        requested
            .iter()
            .any(|p| p == ALL_PROFILES || self.profiles.contains(p))
    }

    /// True only when the service declares at least one of `requested`.
    /// Unlike [`Service::has_profile`] a profile-less service never matches.
    pub fn declares_any_profile(&self, requested: &[String]) -> bool {
        !self.profiles.is_empty() && requested.iter().any(|p| self.profiles.contains(p))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelsSpec {
    List(Vec<String>),
    Map(IndexMap<String, Option<String>>),
}

/// Labels come either as `KEY=value` strings or as a mapping.
fn deserialize_labels<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let spec = Option::<LabelsSpec>::deserialize(deserializer)?;
    Ok(match spec {
        None => IndexMap::new(),
        Some(LabelsSpec::List(items)) => items
            .into_iter()
            .map(|item| match item.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (item, String::new()),
            })
            .collect(),
        Some(LabelsSpec::Map(map)) => map
            .into_iter()
            .map(|(k, v)| (k, v.unwrap_or_default()))
            .collect(),
    })
}
