use crate::cli::ManifestArgs;
use crate::output::UserOutput;
use compose_control::config::compare_images;
use compose_control::{Parser, Project};
use std::path::Path;

pub fn run_images(
    project: &Project,
    new_file: &Path,
    args: &ManifestArgs,
    json: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let other = Parser::new().load_manifest(new_file, Some(project.name()), &args.profile)?;
    let (removed, added) = project.with_manifest(|manifest| compare_images(manifest, &other));

    if json {
        use serde_json::json;

        let summary = json!({
            "only_in_old": removed,
            "added_in_new": added,
        });
        out.status(&serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if removed.is_empty() && added.is_empty() {
        out.success("Both manifests use the same images");
        return Ok(());
    }

    out.status(&format!("Only in current manifest ({}):", removed.len()));
    for image in &removed {
        out.status(&format!("  - {}", image));
    }
    out.blank();
    out.status(&format!("Added in {} ({}):", new_file.display(), added.len()));
    for image in &added {
        out.status(&format!("  + {}", image));
    }

    Ok(())
}
