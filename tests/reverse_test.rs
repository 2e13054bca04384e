use compose_control::dependency::reverse;
use compose_control::profile::{disable_profiles, enable_all};
use compose_control::{DependencyOption, Error, Manifest, Parser};

fn load(path: &str) -> Manifest {
    Parser::new()
        .load_manifest(path, None, &[])
        .expect("Failed to load manifest")
}

#[test]
fn test_reverse_three_service_chain() {
    let mut src = load("tests/fixtures/reverse/compose.yaml");
    let mut dst = load("tests/fixtures/reverse/compose.yaml");
    assert_eq!(src.name(), "example_compose");

    src.enable_services(&["enabled", "dependency"]).unwrap();
    src.for_services(&["enabled"], DependencyOption::IncludeDependencies)
        .unwrap();
    reverse(&src, &mut dst).unwrap();

    assert_eq!(src.service_names(), vec!["dependency", "enabled"]);
    assert_eq!(dst.service_names(), vec!["disabled"]);
    // `disabled` runs on its own; its edge to `dependency` is pruned.
    assert!(dst.service("disabled").unwrap().depends_on.is_empty());
}

#[test]
fn test_reverse_after_profile_partition() {
    let path = "tests/fixtures/testdata/compose.yaml";
    let mut src = load(path);
    enable_all(&mut src).unwrap();
    disable_profiles(&mut src, &["extended".to_string()]);

    let mut dst = load(path);
    reverse(&src, &mut dst).unwrap();

    assert_eq!(dst.service_names(), vec!["additional"]);
}

#[test]
fn test_reverse_of_everything_is_empty() {
    let path = "tests/fixtures/testdata/compose.yaml";
    let mut src = load(path);
    enable_all(&mut src).unwrap();

    let mut dst = load(path);
    reverse(&src, &mut dst).unwrap();

    assert!(dst.service_names().is_empty());
    assert_eq!(dst.disabled_service_names().len(), 4);
}

#[test]
fn test_reverse_into_unrelated_manifest_fails() {
    let src = load("tests/fixtures/reverse/compose.yaml");
    let mut dst = load("tests/fixtures/testdata/compose.yaml");

    let err = reverse(&src, &mut dst).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(matches!(err, Error::ServiceNotFound(_)));
}
