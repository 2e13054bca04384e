use crate::output::UserOutput;
use compose_control::{DependencyOption, Project};

/// Narrow `project` to `select` plus its dependencies and print the
/// complement alongside it.
pub fn run_reverse(
    project: &Project,
    select: &[String],
    json: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let complement = Project::new(project.snapshot());

    project.enable_services(select)?;
    project.for_services(select, DependencyOption::IncludeDependencies)?;
    project.reverse_into(&complement)?;

    let selected = project.snapshot().service_names();
    let rest = complement.snapshot().service_names();

    if json {
        use serde_json::json;

        let summary = json!({
            "project": project.name(),
            "selected": selected,
            "complement": rest,
        });
        out.status(&serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    out.status(&format!("Selected ({}):", selected.len()));
    for name in &selected {
        out.status(&format!("  - {}", name));
    }
    out.blank();
    out.status(&format!("Complement ({}):", rest.len()));
    if rest.is_empty() {
        out.status("  (none)");
    }
    for name in &rest {
        out.status(&format!("  - {}", name));
    }

    Ok(())
}
