use crate::output::UserOutput;
use compose_control::{Project, Service};

pub fn run_profiles(
    project: &Project,
    enable_all: bool,
    disable: &[String],
    json: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    if enable_all {
        project.enable_all()?;
    }
    if !disable.is_empty() {
        project.disable_profiles(disable);
    }

    let manifest = project.snapshot();

    if json {
        use serde_json::json;

        let summary = json!({
            "project": manifest.name(),
            "profiles": manifest.profiles(),
            "active": manifest.service_names(),
            "disabled": manifest.disabled_service_names(),
        });
        out.status(&serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    out.status(&format!("Project: {}", manifest.name()));
    if manifest.profiles().is_empty() {
        out.status("Profiles: (none)");
    } else {
        out.status(&format!("Profiles: {}", manifest.profiles().join(", ")));
    }
    out.blank();

    let mut active: Vec<&Service> = manifest.active_services().collect();
    active.sort_by(|a, b| a.name.cmp(&b.name));
    out.status(&format!("Active services: {}", active.len()));
    for service in active {
        out.status(&describe(service));
    }

    let mut disabled: Vec<&Service> = manifest.disabled_services().collect();
    if !disabled.is_empty() {
        disabled.sort_by(|a, b| a.name.cmp(&b.name));
        out.blank();
        out.status(&format!("Disabled services: {}", disabled.len()));
        for service in disabled {
            out.status(&describe(service));
        }
    }

    Ok(())
}

fn describe(service: &Service) -> String {
    if service.profiles.is_empty() {
        format!("  - {}", service.name)
    } else {
        format!("  - {} [{}]", service.name, service.profiles.join(", "))
    }
}
