use crate::config::Manifest;
use crate::error::Result;
use std::collections::BTreeSet;
use tracing::info;

/// Enable every service of the manifest and request every profile any
/// service declares.
///
/// Profiles are added in sorted order after the ones already requested, so
/// the result does not depend on hash or definition order. Calling this
/// twice is the same as calling it once.
pub fn enable_all(manifest: &mut Manifest) -> Result<()> {
    let names = manifest.all_service_names();
    let profiles: BTreeSet<String> = manifest
        .all_services()
        .flat_map(|service| service.profiles.iter().cloned())
        .collect();

    manifest.add_profiles(profiles);
    manifest.enable_services(&names)?;

    info!(
        project = %manifest.name(),
        services = names.len(),
        profiles = manifest.profiles().len(),
        "Enabled all services"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Activation, Service};
    use crate::profile::disable_profiles;

    fn manifest() -> Manifest {
        let mut m = Manifest::new("testdata").with_service(Service::new("sample_service"));
        m.insert_service(
            Service::new("zeta").with_profiles(["z", "a"]),
            Activation::Disabled,
        );
        m.insert_service(
            Service::new("alpha").with_profiles(["m"]),
            Activation::Disabled,
        );
        m
    }

    #[test]
    fn test_enable_all_activates_everything() {
        let mut m = manifest();
        enable_all(&mut m).unwrap();

        assert_eq!(m.service_names(), vec!["alpha", "sample_service", "zeta"]);
        assert!(m.disabled_service_names().is_empty());
    }

    #[test]
    fn test_profiles_sorted_after_existing() {
        let mut m = manifest();
        m.add_profiles(["z".to_string(), "custom".to_string()]);

        enable_all(&mut m).unwrap();

        assert_eq!(m.profiles(), &["z", "custom", "a", "m"]);
    }

    #[test]
    fn test_enable_all_is_idempotent() {
        let mut once = manifest();
        enable_all(&mut once).unwrap();

        let mut twice = manifest();
        enable_all(&mut twice).unwrap();
        enable_all(&mut twice).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_enable_all_restores_after_partition() {
        let mut m = manifest();
        enable_all(&mut m).unwrap();
        disable_profiles(&mut m, &["m".to_string()]);
        assert_eq!(m.disabled_service_names(), vec!["alpha"]);

        enable_all(&mut m).unwrap();
        assert!(m.disabled_service_names().is_empty());
    }
}
