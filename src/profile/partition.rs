use crate::config::{Manifest, ALL_PROFILES};
use tracing::{debug, info};

/// Disable the active services selected by `profiles`.
///
/// A service is selected when it declares one of `profiles`, or when
/// `profiles` contains the `*` wildcard. Services without profiles are only
/// selected by the wildcard. Services that are already disabled stay
/// disabled and nothing is re-enabled, so repeated calls accumulate.
///
/// The requested-profile set of the manifest is not changed.
pub fn disable_profiles(manifest: &mut Manifest, profiles: &[String]) {
    let wildcard = profiles.iter().any(|p| p == ALL_PROFILES);

    let selected: Vec<String> = manifest
        .active_services()
        .filter(|service| wildcard || service.declares_any_profile(profiles))
        .map(|service| service.name.clone())
        .collect();

    for name in &selected {
        if manifest.disable_service(name) {
            debug!(service = %name, "Disabled by profile");
        }
    }

    info!(
        profiles = ?profiles,
        disabled = selected.len(),
        remaining = manifest.service_names().len(),
        "Disabled services by profile"
    );
}
