//! Decoding whole blobs of progress output.

use super::decoder::{decode_line, DecodeError, DecodedEvent};
use super::grammar::ResourceType;
use crate::config::Manifest;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// What to do with a line that does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Skip the line and keep going.
    #[default]
    Lenient,
    /// Fail the whole batch on the first undecodable line.
    Strict,
}

/// Decode every non-empty line of `text` independently.
pub fn decode_each<'a>(
    text: &'a str,
    project_name: &'a str,
    manifest: &'a Manifest,
) -> impl Iterator<Item = Result<DecodedEvent, DecodeError>> + 'a {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(move |line| decode_line(line, project_name, manifest))
}

/// Decode every non-empty line of `text`, applying `policy` to failures.
pub fn decode_lines(
    text: &str,
    project_name: &str,
    manifest: &Manifest,
    policy: DecodePolicy,
) -> Result<Vec<DecodedEvent>, DecodeError> {
    let mut decoder = LineDecoder::new(project_name, policy);
    let mut events = Vec::new();
    for line in text.lines() {
        if let Some(event) = decoder.feed(line, manifest)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Incremental decoder for output that arrives one line at a time.
#[derive(Debug, Clone)]
pub struct LineDecoder {
    project_name: String,
    policy: DecodePolicy,
    skipped: usize,
}

impl LineDecoder {
    pub fn new(project_name: impl Into<String>, policy: DecodePolicy) -> Self {
        Self {
            project_name: project_name.into(),
            policy,
            skipped: 0,
        }
    }

    /// Decode one line. Empty lines, and under [`DecodePolicy::Lenient`]
    /// undecodable ones, yield `Ok(None)`.
    pub fn feed(
        &mut self,
        line: &str,
        manifest: &Manifest,
    ) -> Result<Option<DecodedEvent>, DecodeError> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        match decode_line(line, &self.project_name, manifest) {
            Ok(event) => Ok(Some(event)),
            Err(err) if self.policy == DecodePolicy::Lenient => {
                debug!(line = %err.line(), stage = ?err.stage(), "Skipping undecodable progress line");
                self.skipped += 1;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Number of lines dropped so far under the lenient policy.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
}

/// Result of one lifecycle command: the latest event per resource plus the
/// raw text it was decoded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeOutput {
    /// Keyed by [`DecodedEvent::key`], in order of first appearance.
    pub resources: IndexMap<String, DecodedEvent>,
    pub out: String,
    pub err: String,
}

impl ComposeOutput {
    /// Decode captured stdout then stderr.
    pub fn parse(
        out: impl Into<String>,
        err: impl Into<String>,
        project_name: &str,
        manifest: &Manifest,
        policy: DecodePolicy,
    ) -> Result<Self, DecodeError> {
        let mut output = ComposeOutput {
            resources: IndexMap::new(),
            out: out.into(),
            err: err.into(),
        };
        let mut decoder = LineDecoder::new(project_name, policy);
        for text in [&output.out, &output.err] {
            for line in text.lines() {
                if let Some(event) = decoder.feed(line, manifest)? {
                    output.resources.insert(event.key(), event);
                }
            }
        }
        Ok(output)
    }

    /// Record an event, replacing any earlier event for the same resource.
    pub fn record(&mut self, event: DecodedEvent) {
        self.resources.insert(event.key(), event);
    }

    pub fn get(&self, resource_type: ResourceType, name: &str) -> Option<&DecodedEvent> {
        self.resources.get(&format!("{}:{}", resource_type, name))
    }

    pub fn events(&self) -> impl Iterator<Item = &DecodedEvent> {
        self.resources.values()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
