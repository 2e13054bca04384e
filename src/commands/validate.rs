use super::resolve_manifest_path;
use crate::cli::ManifestArgs;
use crate::output::UserOutput;
use compose_control::Parser;

pub fn run_validate(args: &ManifestArgs, out: &dyn UserOutput) -> anyhow::Result<()> {
    let path = resolve_manifest_path(args)?;

    out.status(&format!("Validating {}...", path.display()));

    let manifest =
        Parser::new().load_manifest(&path, args.project_name.as_deref(), &args.profile)?;
    manifest.validate()?;

    out.success("Manifest is valid");
    out.blank();

    // Show summary
    out.status(&format!("Project: {}", manifest.name()));
    out.status(&format!(
        "Services: {} active, {} disabled",
        manifest.service_names().len(),
        manifest.disabled_service_names().len()
    ));
    for service in manifest.all_services() {
        let image = service.image.as_deref().unwrap_or("(no image)");
        out.status(&format!("  - {} ({})", service.name, image));
    }

    if !manifest.networks().is_empty() {
        out.status(&format!("\nNetworks: {}", manifest.network_names().join(", ")));
    }
    if !manifest.volumes().is_empty() {
        out.status(&format!("\nVolumes: {}", manifest.volume_names().join(", ")));
    }

    let order = manifest.start_order()?;
    if !order.is_empty() {
        out.status(&format!("\nStart order: {}", order.join(" -> ")));
    }

    Ok(())
}
