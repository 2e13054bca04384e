use super::grammar::{ResourceType, StateType, DRY_RUN_PREFIX};
use crate::config::Manifest;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matching stage a line failed at. Diagnostic detail only: every stage
/// reports the same error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeStage {
    ResourceType,
    Name,
    State,
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown resource type. input = {line}")]
    #[diagnostic(
        code(compose::progress::unknown_format),
        help("Only Container, Volume and Network progress lines for resources defined in the manifest can be decoded")
    )]
    UnknownResourceType { stage: DecodeStage, line: String },
}

impl DecodeError {
    pub fn stage(&self) -> DecodeStage {
        match self {
            DecodeError::UnknownResourceType { stage, .. } => *stage,
        }
    }

    /// The original, unmodified input line.
    pub fn line(&self) -> &str {
        match self {
            DecodeError::UnknownResourceType { line, .. } => line,
        }
    }
}

/// One resource state change recovered from a progress line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    pub resource_type: ResourceType,
    /// Resource name without the project prefix. Containers carry their
    /// replica suffix, e.g. `web-1`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_index: Option<u32>,
    pub state: StateType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub dry_run: bool,
    pub project_name: String,
}

impl DecodedEvent {
    /// Key identifying the resource across events, e.g. `Container:web-1`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.resource_type, self.name)
    }

    /// Service a container event belongs to.
    pub fn service_name(&self) -> Option<&str> {
        match (self.resource_type, self.replica_index) {
            (ResourceType::Container, Some(_)) => {
                self.name.rsplit_once('-').map(|(service, _)| service)
            }
            _ => None,
        }
    }
}

/// Decode one progress line.
///
/// `manifest` is only read, to resolve service, network and volume names.
/// The line is consumed left to right: optional dry-run prefix, resource
/// keyword, resource name, state label. Whatever follows the state label is
/// kept as the description.
pub fn decode_line(
    line: &str,
    project_name: &str,
    manifest: &Manifest,
) -> Result<DecodedEvent, DecodeError> {
    let fail = |stage| DecodeError::UnknownResourceType {
        stage,
        line: line.to_string(),
    };

    let mut rest = line.trim_start();
    let dry_run = match rest.strip_prefix(DRY_RUN_PREFIX) {
        Some(stripped) => {
            rest = stripped;
            true
        }
        None => false,
    };

    let (resource_type, rest) = ResourceType::match_prefix(rest.trim_start())
        .ok_or_else(|| fail(DecodeStage::ResourceType))?;

    let resolved = read_resource_name(rest, project_name, manifest, resource_type)
        .ok_or_else(|| fail(DecodeStage::Name))?;

    let (state, rest) =
        StateType::match_prefix(resolved.rest.trim_start()).ok_or_else(|| fail(DecodeStage::State))?;

    Ok(DecodedEvent {
        resource_type,
        name: resolved.name,
        replica_index: resolved.replica_index,
        state,
        description: rest.trim().to_string(),
        dry_run,
        project_name: project_name.to_string(),
    })
}

struct ResolvedName<'a> {
    name: String,
    replica_index: Option<u32>,
    rest: &'a str,
}

fn read_resource_name<'a>(
    s: &'a str,
    project_name: &str,
    manifest: &Manifest,
    resource_type: ResourceType,
) -> Option<ResolvedName<'a>> {
    let s = s.trim_start();
    // Volume names are printed with %q; they cannot contain quotes themselves.
    let s = s.strip_prefix('"').unwrap_or(s);

    // A resource name that happens to start with the project name is tried
    // unstripped when the stripped form resolves to nothing.
    let unprefixed = strip_project_prefix(s, project_name);
    unprefixed
        .into_iter()
        .chain(std::iter::once(s))
        .find_map(|candidate| match resource_type {
            ResourceType::Container => read_container_name(candidate, manifest),
            ResourceType::Network => {
                read_terminated_name(candidate, sorted_descending(manifest.network_names()))
            }
            ResourceType::Volume => {
                read_terminated_name(candidate, sorted_descending(manifest.volume_names()))
            }
        })
}

/// `<project>` followed by exactly one separator. The separator is `_` or
/// `-` depending on the resource and client version; whichever it is, one
/// character is dropped.
fn strip_project_prefix<'a>(s: &'a str, project_name: &str) -> Option<&'a str> {
    if project_name.is_empty() {
        return None;
    }
    let rest = s.strip_prefix(project_name)?;
    let mut chars = rest.chars();
    chars.next()?;
    Some(chars.as_str())
}

/// `<service>-<replica>` followed by a space or the end of the line.
fn read_container_name<'a>(s: &'a str, manifest: &Manifest) -> Option<ResolvedName<'a>> {
    manifest.active_services().find_map(|service| {
        if service.name.is_empty() {
            return None;
        }
        let rest = s.strip_prefix(service.name.as_str())?.strip_prefix('-')?;
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let (number, rest) = rest.split_at(digits);
        if !(rest.is_empty() || rest.starts_with(' ')) {
            return None;
        }
        let replica_index = number.parse::<u32>().ok()?;
        Some(ResolvedName {
            name: format!("{}-{}", service.name, number),
            replica_index: Some(replica_index),
            rest,
        })
    })
}

/// First of `names` that prefixes `s` and is followed by a quote or a space.
fn read_terminated_name(s: &str, names: Vec<String>) -> Option<ResolvedName<'_>> {
    names.into_iter().find_map(|name| {
        if name.is_empty() {
            return None;
        }
        let rest = s.strip_prefix(name.as_str())?;
        if !(rest.starts_with('"') || rest.starts_with(' ')) {
            return None;
        }
        let rest = rest.strip_prefix('"').unwrap_or(rest);
        Some(ResolvedName {
            name,
            replica_index: None,
            rest,
        })
    })
}

/// Descending order so that when one name prefixes another, the longer is
/// tried first.
fn sorted_descending(mut names: Vec<String>) -> Vec<String> {
    names.sort_unstable_by(|a, b| b.cmp(a));
    names
}
