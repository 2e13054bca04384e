use super::Manifest;
use indexmap::IndexMap;

pub const PROJECT_LABEL: &str = "com.docker.compose.project";
pub const SERVICE_LABEL: &str = "com.docker.compose.service";
pub const VERSION_LABEL: &str = "com.docker.compose.version";
pub const WORKING_DIR_LABEL: &str = "com.docker.compose.project.working_dir";
pub const CONFIG_FILES_LABEL: &str = "com.docker.compose.project.config_files";
pub const ONEOFF_LABEL: &str = "com.docker.compose.oneoff";

/// Value written to [`VERSION_LABEL`].
pub const LABEL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fill every service's `custom_labels` with the labels runtime resources
/// carry, so containers can be traced back to this project and service.
///
/// Disabled services are labelled too; they may be enabled later.
pub fn apply_custom_labels(manifest: &mut Manifest) {
    let project = manifest.name().to_string();
    let working_dir = manifest
        .working_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let config_files = manifest
        .config_files()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",");

    for service in manifest.all_services_mut() {
        service.custom_labels = IndexMap::from([
            (PROJECT_LABEL.to_string(), project.clone()),
            (SERVICE_LABEL.to_string(), service.name.clone()),
            (VERSION_LABEL.to_string(), LABEL_VERSION.to_string()),
            (WORKING_DIR_LABEL.to_string(), working_dir.clone()),
            (CONFIG_FILES_LABEL.to_string(), config_files.clone()),
            // `run` overrides this for one-off containers
            (ONEOFF_LABEL.to_string(), "False".to_string()),
        ]);
    }
}

/// Resolve a runtime label set back to a service defined in `manifest`.
///
/// Returns `None` when the labels belong to another project or name a
/// service the manifest does not define.
pub fn service_for_labels<'a>(
    manifest: &'a Manifest,
    labels: &IndexMap<String, String>,
) -> Option<&'a str> {
    if labels.get(PROJECT_LABEL).map(String::as_str) != Some(manifest.name()) {
        return None;
    }
    let service = labels.get(SERVICE_LABEL)?;
    manifest
        .all_services()
        .find(|s| &s.name == service)
        .map(|s| s.name.as_str())
}
