use compose_control::profile::{disable_profiles, enable_all};
use compose_control::{Manifest, Parser};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn load(profiles: &[&str]) -> Manifest {
    Parser::new()
        .load_manifest("tests/fixtures/testdata/compose.yaml", None, &strings(profiles))
        .expect("Failed to load testdata manifest")
}

#[test]
fn test_profiles_parsing() {
    let manifest = load(&[]);
    manifest.validate().expect("Manifest validation failed");

    assert_eq!(
        manifest.disabled_service("additional").unwrap().profiles,
        vec!["extended"]
    );
    assert_eq!(
        manifest.disabled_service("additional2").unwrap().profiles,
        vec!["extended2"]
    );
    assert!(manifest.service("sample_service").unwrap().profiles.is_empty());
    assert_eq!(manifest.service_names(), vec!["no_profile", "sample_service"]);
}

#[test]
fn test_requested_profile_activates_service() {
    let manifest = load(&["extended"]);
    assert_eq!(
        manifest.service_names(),
        vec!["additional", "no_profile", "sample_service"]
    );
    assert_eq!(manifest.profiles(), ["extended"]);
}

#[test]
fn test_disable_profiles_scenarios() {
    let mut manifest = load(&[]);

    enable_all(&mut manifest).unwrap();
    assert_eq!(manifest.service_names().len(), 4);
    assert!(manifest.disabled_service_names().is_empty());

    disable_profiles(&mut manifest, &strings(&["extended"]));
    assert_eq!(
        manifest.service_names(),
        vec!["additional2", "no_profile", "sample_service"]
    );
    assert_eq!(manifest.disabled_service_names(), vec!["additional"]);

    enable_all(&mut manifest).unwrap();
    disable_profiles(&mut manifest, &strings(&["extended", "extended2"]));
    assert_eq!(manifest.service_names(), vec!["no_profile", "sample_service"]);
    assert_eq!(manifest.disabled_service_names().len(), 2);

    enable_all(&mut manifest).unwrap();
    disable_profiles(&mut manifest, &strings(&["*"]));
    assert!(manifest.service_names().is_empty());
    assert_eq!(manifest.disabled_service_names().len(), 4);
}

#[test]
fn test_disable_calls_accumulate() {
    let mut manifest = load(&[]);
    enable_all(&mut manifest).unwrap();

    disable_profiles(&mut manifest, &strings(&["extended"]));
    disable_profiles(&mut manifest, &strings(&["extended2"]));

    assert_eq!(
        manifest.disabled_service_names(),
        vec!["additional", "additional2"]
    );
}

#[test]
fn test_unknown_profile_disables_nothing() {
    let mut manifest = load(&[]);
    enable_all(&mut manifest).unwrap();

    disable_profiles(&mut manifest, &strings(&["nonexistent"]));
    assert_eq!(manifest.service_names().len(), 4);
}

#[test]
fn test_enable_all_requests_every_profile_sorted() {
    let mut manifest = load(&[]);
    enable_all(&mut manifest).unwrap();
    assert_eq!(manifest.profiles(), ["extended", "extended2"]);

    let once = manifest.clone();
    enable_all(&mut manifest).unwrap();
    assert_eq!(manifest, once);
}
