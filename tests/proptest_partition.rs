/// Property-based tests for profile partitioning and reversal
///
/// Random acyclic manifests are generated and the following must hold:
/// - The wildcard disables every service exactly once
/// - Disabling by profile keeps exactly the services not declaring one
/// - Enabling everything twice equals enabling once
/// - A reversed manifest is the exact complement of its source
use compose_control::config::{DependencyCondition, ManifestDefinition};
use compose_control::dependency::reverse;
use compose_control::profile::{disable_profiles, enable_all};
use compose_control::{Manifest, Service};
use proptest::prelude::*;
use std::collections::BTreeSet;

const PROFILES: [&str; 3] = ["frontend", "debug", "batch"];

/// Per service: indices into PROFILES, and picks among earlier services to
/// depend on (so the graph is always acyclic).
fn definition_strategy() -> impl Strategy<Value = ManifestDefinition> {
    prop::collection::vec(
        (
            prop::collection::vec(0usize..PROFILES.len(), 0..3),
            prop::collection::vec(any::<prop::sample::Index>(), 0..3),
        ),
        1..8,
    )
    .prop_map(|shapes| {
        let mut definition = ManifestDefinition::default();
        for (i, (profiles, deps)) in shapes.into_iter().enumerate() {
            let mut service =
                Service::new(format!("svc{}", i)).with_profiles(profiles.iter().map(|&p| PROFILES[p]));
            if i > 0 {
                for dep in deps {
                    service = service.depends_on(
                        format!("svc{}", dep.index(i)),
                        DependencyCondition::ServiceStarted,
                    );
                }
            }
            definition.services.insert(service.name.clone(), service);
        }
        definition
    })
}

fn profiles_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(0usize..PROFILES.len(), 0..3)
        .prop_map(|ps| ps.into_iter().map(|p| PROFILES[p].to_string()).collect())
}

fn name_set(names: Vec<String>) -> BTreeSet<String> {
    names.into_iter().collect()
}

proptest! {
    #[test]
    fn prop_wildcard_disables_everything(
        definition in definition_strategy(),
        requested in profiles_strategy(),
    ) {
        let mut manifest = Manifest::from_definition(definition, "prop", &requested);
        let total = manifest.all_service_names().len();

        disable_profiles(&mut manifest, &["*".to_string()]);

        prop_assert!(manifest.service_names().is_empty());
        let disabled = manifest.disabled_service_names();
        prop_assert_eq!(disabled.len(), total);
        prop_assert_eq!(name_set(disabled).len(), total);
    }

    #[test]
    fn prop_selective_disable_keeps_non_matching(
        definition in definition_strategy(),
        profiles in profiles_strategy(),
    ) {
        let mut manifest = Manifest::from_definition(definition, "prop", &[]);
        enable_all(&mut manifest).unwrap();

        disable_profiles(&mut manifest, &profiles);

        for service in manifest.all_services() {
            let matches = service.profiles.iter().any(|p| profiles.contains(p));
            prop_assert_eq!(
                manifest.service_names().contains(&service.name),
                !matches,
                "service {} with profiles {:?}", service.name, service.profiles
            );
        }
    }

    #[test]
    fn prop_enable_all_is_idempotent(definition in definition_strategy()) {
        let mut manifest = Manifest::from_definition(definition, "prop", &[]);

        enable_all(&mut manifest).unwrap();
        let once = manifest.clone();
        enable_all(&mut manifest).unwrap();

        prop_assert_eq!(manifest, once);
    }

    #[test]
    fn prop_reverse_is_complement(
        definition in definition_strategy(),
        src_profiles in profiles_strategy(),
        dst_profiles in profiles_strategy(),
    ) {
        let src = Manifest::from_definition(definition.clone(), "prop", &src_profiles);
        let mut dst = Manifest::from_definition(definition, "prop", &dst_profiles);

        reverse(&src, &mut dst).unwrap();

        let src_active = name_set(src.service_names());
        let dst_active = name_set(dst.service_names());
        let all = name_set(src.all_service_names());

        prop_assert!(src_active.is_disjoint(&dst_active));
        let union: BTreeSet<String> = src_active.union(&dst_active).cloned().collect();
        prop_assert_eq!(union, all);
    }
}
