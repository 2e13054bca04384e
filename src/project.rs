//! Shared handle over one project's manifest.
//!
//! A [`Project`] can be cloned and handed to several tasks. Every
//! read-modify-write of the manifest runs under a single lock, and decoding
//! output reads the manifest under the same lock, so a decode never observes
//! a half-applied partition.

use crate::config::{apply_custom_labels, DependencyOption, Manifest};
use crate::dependency::reverse;
use crate::error::{Error, Result};
use crate::profile::{disable_profiles, enable_all};
use crate::progress::{ComposeOutput, DecodePolicy};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    manifest: Arc<Mutex<Manifest>>,
}

impl Project {
    /// Wrap `manifest`, stamping every service with its runtime labels.
    pub fn new(mut manifest: Manifest) -> Self {
        apply_custom_labels(&mut manifest);
        Self {
            name: manifest.name().to_string(),
            manifest: Arc::new(Mutex::new(manifest)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the manifest as it is right now.
    pub fn snapshot(&self) -> Manifest {
        self.manifest.lock().clone()
    }

    /// Run `f` against the manifest while holding the lock.
    pub fn with_manifest<R>(&self, f: impl FnOnce(&Manifest) -> R) -> R {
        f(&self.manifest.lock())
    }

    pub fn enable_all(&self) -> Result<()> {
        enable_all(&mut self.manifest.lock())
    }

    pub fn disable_profiles(&self, profiles: &[String]) {
        disable_profiles(&mut self.manifest.lock(), profiles);
    }

    pub fn enable_services<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        self.manifest.lock().enable_services(names)
    }

    pub fn for_services<S: AsRef<str>>(&self, names: &[S], option: DependencyOption) -> Result<()> {
        self.manifest.lock().for_services(names, option)
    }

    /// Make `dst` active on exactly the services this project has disabled.
    ///
    /// `dst` is only replaced when the whole reversal succeeds.
    pub fn reverse_into(&self, dst: &Project) -> Result<()> {
        if Arc::ptr_eq(&self.manifest, &dst.manifest) {
            return Err(Error::Config(format!(
                "Cannot reverse project '{}' into itself",
                self.name
            )));
        }

        // Never hold both locks at once.
        let src = self.snapshot();
        let mut guard = dst.manifest.lock();
        let mut reversed = guard.clone();
        reverse(&src, &mut reversed)?;
        *guard = reversed;
        Ok(())
    }

    /// Decode captured stdout and stderr of a lifecycle command.
    pub fn parse_output(&self, out: &str, err: &str, policy: DecodePolicy) -> Result<ComposeOutput> {
        let manifest = self.manifest.lock();
        let output = ComposeOutput::parse(out, err, &self.name, &manifest, policy)?;
        debug!(
            project = %self.name,
            resources = output.resources.len(),
            "Parsed compose output"
        );
        Ok(output)
    }

    pub fn validate(&self) -> Result<()> {
        self.manifest.lock().validate()
    }
}
