//! Complementing one manifest against another.
//!
//! Given `src`, already narrowed to a wanted subset, [`reverse`] makes `dst`
//! active on exactly the services `src` left disabled. Running both sides
//! then covers every service of the shared definition once.
//!
//! Preconditions: `src` and `dst` were built from the same definition and
//! `src` has been resolved (`for_services` or a profile partition) before the
//! call. On error `dst` may be partially mutated and should be discarded.

use crate::config::{DependencyOption, Manifest};
use crate::error::Result;
use tracing::{info, warn};

/// Change `dst` so that its active services are the ones disabled in `src`.
pub fn reverse(src: &Manifest, dst: &mut Manifest) -> Result<()> {
    let active = src.service_names();

    let mut candidates = Vec::new();
    for disabled in src.disabled_services() {
        if active.contains(&disabled.name) {
            // src was handed over half-resolved; keep the name on src's side.
            warn!(service = %disabled.name, "Service is both active and disabled in source manifest");
            continue;
        }
        candidates.push(disabled.name.clone());
    }

    if candidates.is_empty() {
        // Nothing left over: the complement is empty, not "everything".
        for name in dst.service_names() {
            dst.disable_service(&name);
        }
        info!(project = %dst.name(), "Reversed manifest has no active services");
        return Ok(());
    }

    dst.enable_services(&candidates)?;
    dst.for_services(&candidates, DependencyOption::IgnoreDependencies)?;

    info!(
        project = %dst.name(),
        services = ?dst.service_names(),
        "Reversed manifest"
    );
    Ok(())
}
