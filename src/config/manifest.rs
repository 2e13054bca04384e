//! The [`Manifest`]: services, networks and volumes plus the active/disabled
//! split that the profile and dependency operations mutate.
//!
//! Every service lives in a single ordered map together with its
//! [`Activation`], so a name is always in exactly one of the two views.
//! Iteration follows definition order.

use super::{NetworkConfig, Service, VolumeConfig};
use crate::dependency::Graph;
use crate::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which view of the manifest a service currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Active,
    Disabled,
}

/// How [`Manifest::for_services`] treats dependencies of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyOption {
    /// Keep the transitive dependencies of the selection active.
    IncludeDependencies,
    /// Keep only the selection and drop edges pointing outside it.
    IgnoreDependencies,
}

#[derive(Debug, Clone, PartialEq)]
struct ServiceEntry {
    service: Service,
    activation: Activation,
}

/// Deserialized form of a manifest file, before profiles are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub services: IndexMap<String, Service>,

    #[serde(default)]
    pub networks: IndexMap<String, Option<NetworkConfig>>,

    #[serde(default)]
    pub volumes: IndexMap<String, Option<VolumeConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    name: String,
    working_dir: Option<PathBuf>,
    config_files: Vec<PathBuf>,
    entries: IndexMap<String, ServiceEntry>,
    networks: IndexMap<String, NetworkConfig>,
    volumes: IndexMap<String, VolumeConfig>,
    profiles: Vec<String>,
}

impl Manifest {
    /// Create an empty manifest for the given project name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a manifest from a loaded definition and apply `profiles` with
    /// the compose activation rule (see [`Service::has_profile`]).
    pub fn from_definition(
        definition: ManifestDefinition,
        name: impl Into<String>,
        profiles: &[String],
    ) -> Self {
        let entries = definition
            .services
            .into_iter()
            .map(|(key, mut service)| {
                service.name = key.clone();
                (
                    key,
                    ServiceEntry {
                        service,
                        activation: Activation::Active,
                    },
                )
            })
            .collect();

        let mut manifest = Self {
            name: name.into(),
            working_dir: None,
            config_files: Vec::new(),
            entries,
            networks: definition
                .networks
                .into_iter()
                .map(|(k, v)| (k, v.unwrap_or_default()))
                .collect(),
            volumes: definition
                .volumes
                .into_iter()
                .map(|(k, v)| (k, v.unwrap_or_default()))
                .collect(),
            profiles: Vec::new(),
        };
        manifest.apply_profiles(profiles);
        manifest
    }

    /// Add an active service, replacing any service with the same name.
    pub fn with_service(mut self, service: Service) -> Self {
        self.insert_service(service, Activation::Active);
        self
    }

    pub fn with_network(mut self, name: impl Into<String>) -> Self {
        self.networks.insert(name.into(), NetworkConfig::default());
        self
    }

    pub fn with_volume(mut self, name: impl Into<String>) -> Self {
        self.volumes.insert(name.into(), VolumeConfig::default());
        self
    }

    /// Record where the manifest was loaded from.
    pub fn with_source(mut self, working_dir: PathBuf, config_files: Vec<PathBuf>) -> Self {
        self.working_dir = Some(working_dir);
        self.config_files = config_files;
        self
    }

    pub fn insert_service(&mut self, service: Service, activation: Activation) {
        self.entries.insert(
            service.name.clone(),
            ServiceEntry {
                service,
                activation,
            },
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn config_files(&self) -> &[PathBuf] {
        &self.config_files
    }

    /// Profiles currently considered requested, in request order.
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn networks(&self) -> &IndexMap<String, NetworkConfig> {
        &self.networks
    }

    pub fn volumes(&self) -> &IndexMap<String, VolumeConfig> {
        &self.volumes
    }

    pub fn network_names(&self) -> Vec<String> {
        self.networks.keys().cloned().collect()
    }

    pub fn volume_names(&self) -> Vec<String> {
        self.volumes.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn activation(&self, name: &str) -> Option<Activation> {
        self.entries.get(name).map(|e| e.activation)
    }

    /// Look up an active service.
    pub fn service(&self, name: &str) -> Result<&Service> {
        match self.entries.get(name) {
            Some(entry) if entry.activation == Activation::Active => Ok(&entry.service),
            _ => Err(Error::ServiceNotFound(name.to_string())),
        }
    }

    /// Look up a disabled service.
    pub fn disabled_service(&self, name: &str) -> Result<&Service> {
        match self.entries.get(name) {
            Some(entry) if entry.activation == Activation::Disabled => Ok(&entry.service),
            _ => Err(Error::ServiceNotFound(name.to_string())),
        }
    }

    pub fn active_services(&self) -> impl Iterator<Item = &Service> {
        self.services_with(Activation::Active)
    }

    pub fn disabled_services(&self) -> impl Iterator<Item = &Service> {
        self.services_with(Activation::Disabled)
    }

    pub fn all_services(&self) -> impl Iterator<Item = &Service> {
        self.entries.values().map(|e| &e.service)
    }

    pub(crate) fn all_services_mut(&mut self) -> impl Iterator<Item = &mut Service> {
        self.entries.values_mut().map(|e| &mut e.service)
    }

    fn services_with(&self, activation: Activation) -> impl Iterator<Item = &Service> {
        self.entries
            .values()
            .filter(move |e| e.activation == activation)
            .map(|e| &e.service)
    }

    /// Names of active services, sorted.
    pub fn service_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.active_services().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }

    /// Names of disabled services, sorted.
    pub fn disabled_service_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .disabled_services()
            .map(|s| s.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Every service name in definition order.
    pub fn all_service_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Recompute the whole split from `profiles`, discarding any previous
    /// enable/disable bookkeeping.
    pub fn apply_profiles(&mut self, profiles: &[String]) {
        for entry in self.entries.values_mut() {
            entry.activation = if entry.service.has_profile(profiles) {
                Activation::Active
            } else {
                Activation::Disabled
            };
        }
        self.profiles.clear();
        self.add_profiles(profiles.iter().cloned());
    }

    /// Append profiles that are not requested yet, keeping order.
    pub fn add_profiles<I>(&mut self, profiles: I)
    where
        I: IntoIterator<Item = String>,
    {
        for profile in profiles {
            if !self.profiles.contains(&profile) {
                self.profiles.push(profile);
            }
        }
    }

    /// Make every named service active together with its transitive
    /// dependencies, and request the profiles of whatever was newly enabled.
    ///
    /// Fails without mutating anything when a name is not defined or when a
    /// service in the closure has a required dependency that is not defined.
    pub fn enable_services<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        let graph = self.dependency_graph();
        let mut closure: IndexSet<String> = IndexSet::new();
        for name in names {
            let name = name.as_ref();
            if !self.entries.contains_key(name) {
                return Err(Error::ServiceNotFound(name.to_string()));
            }
            closure.insert(name.to_string());
            closure.extend(graph.get_dependencies(name));
        }

        for name in &closure {
            if let Some(entry) = self.entries.get(name) {
                if let Some(missing) = self.missing_required_dependency(&entry.service) {
                    return Err(Error::Config(format!(
                        "Service '{}' depends on undefined service '{}'",
                        name, missing
                    )));
                }
            }
        }

        let mut requested = Vec::new();
        for name in &closure {
            if let Some(entry) = self.entries.get_mut(name) {
                if entry.activation == Activation::Disabled {
                    entry.activation = Activation::Active;
                    requested.extend(entry.service.profiles.iter().cloned());
                    debug!(service = %name, "Enabled service");
                }
            }
        }
        self.add_profiles(requested);

        Ok(())
    }

    /// Move one service to the disabled view. Returns false if it was not
    /// active.
    pub fn disable_service(&mut self, name: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) if entry.activation == Activation::Active => {
                entry.activation = Activation::Disabled;
                debug!(service = %name, "Disabled service");
                true
            }
            _ => false,
        }
    }

    /// Narrow the active set to `names` (plus dependencies, depending on
    /// `option`). Every other active service is disabled. An empty selection
    /// leaves the manifest unchanged.
    pub fn for_services<S: AsRef<str>>(
        &mut self,
        names: &[S],
        option: DependencyOption,
    ) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        let mut selected: IndexSet<String> = IndexSet::new();
        for name in names {
            let name = name.as_ref();
            self.service(name)?;
            selected.insert(name.to_string());
        }

        if option == DependencyOption::IncludeDependencies {
            let roots: Vec<String> = selected.iter().cloned().collect();
            for root in roots {
                self.collect_active_dependencies(&root, &mut selected)?;
            }
        }

        for (name, entry) in self.entries.iter_mut() {
            if entry.activation != Activation::Active {
                continue;
            }
            if !selected.contains(name) {
                entry.activation = Activation::Disabled;
                continue;
            }
            if option == DependencyOption::IgnoreDependencies {
                entry
                    .service
                    .depends_on
                    .retain(|dep, _| selected.contains(dep));
            }
        }

        Ok(())
    }

    fn collect_active_dependencies(
        &self,
        name: &str,
        selected: &mut IndexSet<String>,
    ) -> Result<()> {
        let service = self.service(name)?;
        for (dep, edge) in &service.depends_on {
            if selected.contains(dep) {
                continue;
            }
            match self.activation(dep) {
                Some(Activation::Active) => {
                    selected.insert(dep.clone());
                    self.collect_active_dependencies(dep, selected)?;
                }
                _ if !edge.required => {
                    debug!(service = %name, dependency = %dep, "Skipping optional dependency");
                }
                _ => return Err(Error::ServiceNotFound(dep.clone())),
            }
        }
        Ok(())
    }

    /// Active services in dependency order (dependencies first).
    pub fn start_order(&self) -> Result<Vec<String>> {
        let mut graph = Graph::new();
        for service in self.active_services() {
            graph.add_node(service.name.clone());
        }
        for service in self.active_services() {
            for dep in service.depends_on.keys() {
                if self.activation(dep) == Some(Activation::Active) {
                    graph.add_edge(service.name.clone(), dep.clone());
                }
            }
        }
        graph.topological_sort()
    }

    /// Dependency graph over every defined service. Edges to undefined
    /// services are left out.
    pub fn dependency_graph(&self) -> Graph {
        let mut graph = Graph::new();
        for name in self.entries.keys() {
            graph.add_node(name.clone());
        }
        for (name, entry) in &self.entries {
            for dep in entry.service.depends_on.keys() {
                if self.entries.contains_key(dep) {
                    graph.add_edge(name.clone(), dep.clone());
                }
            }
        }
        graph
    }

    pub(crate) fn missing_required_dependency<'a>(&self, service: &'a Service) -> Option<&'a str> {
        service
            .depends_on
            .iter()
            .find(|(dep, edge)| edge.required && !self.entries.contains_key(dep.as_str()))
            .map(|(dep, _)| dep.as_str())
    }
}
