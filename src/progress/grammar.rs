//! Fixed vocabulary of progress lines.
//!
//! Both tables are matched by prefix, first hit wins, so the order of the
//! entries is part of the grammar: a keyword that is a prefix of another
//! keyword must come after it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix printed by the reporter when the client runs in dry-run mode.
pub const DRY_RUN_PREFIX: &str = "DRY-RUN MODE - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Container,
    Volume,
    Network,
}

impl ResourceType {
    /// Resource keywords, longest first.
    pub const BY_LENGTH: [ResourceType; 3] = [
        ResourceType::Container,
        ResourceType::Network,
        ResourceType::Volume,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            ResourceType::Container => "Container",
            ResourceType::Volume => "Volume",
            ResourceType::Network => "Network",
        }
    }

    /// Match a resource keyword at the start of `s`.
    pub fn match_prefix(s: &str) -> Option<(ResourceType, &str)> {
        Self::BY_LENGTH
            .iter()
            .find_map(|ty| s.strip_prefix(ty.keyword()).map(|rest| (*ty, rest)))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// State labels printed by the progress reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    Error,
    Creating,
    Created,
    Starting,
    Started,
    Stopping,
    Stopped,
    Removing,
    Removed,
    Killing,
    Killed,
    Restarting,
    Restarted,
    Recreate,
    Recreated,
    Running,
    Waiting,
    Healthy,
    Exited,
    /// `depends_on` is optional and the dependency is neither running nor present.
    Skipped,
}

impl StateType {
    /// State labels, longest first. `Recreated` must precede `Recreate`.
    pub const BY_LENGTH: [StateType; 20] = [
        StateType::Restarting,
        StateType::Recreated,
        StateType::Restarted,
        StateType::Creating,
        StateType::Starting,
        StateType::Stopping,
        StateType::Removing,
        StateType::Recreate,
        StateType::Started,
        StateType::Waiting,
        StateType::Healthy,
        StateType::Running,
        StateType::Created,
        StateType::Stopped,
        StateType::Killing,
        StateType::Removed,
        StateType::Skipped,
        StateType::Exited,
        StateType::Killed,
        StateType::Error,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StateType::Error => "Error",
            StateType::Creating => "Creating",
            StateType::Created => "Created",
            StateType::Starting => "Starting",
            StateType::Started => "Started",
            StateType::Stopping => "Stopping",
            StateType::Stopped => "Stopped",
            StateType::Removing => "Removing",
            StateType::Removed => "Removed",
            StateType::Killing => "Killing",
            StateType::Killed => "Killed",
            StateType::Restarting => "Restarting",
            StateType::Restarted => "Restarted",
            StateType::Recreate => "Recreate",
            StateType::Recreated => "Recreated",
            StateType::Running => "Running",
            StateType::Waiting => "Waiting",
            StateType::Healthy => "Healthy",
            StateType::Exited => "Exited",
            StateType::Skipped => "Skipped",
        }
    }

    /// Match a state label at the start of `s`.
    pub fn match_prefix(s: &str) -> Option<(StateType, &str)> {
        Self::BY_LENGTH
            .iter()
            .find_map(|state| s.strip_prefix(state.label()).map(|rest| (*state, rest)))
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
