mod decode;
mod images;
mod profiles;
mod reverse;
mod validate;

pub use decode::*;
pub use images::*;
pub use profiles::*;
pub use reverse::*;
pub use validate::*;

use crate::cli::ManifestArgs;
use compose_control::{Manifest, Parser, Project};
use std::path::PathBuf;

/// The manifest named with `-f`, or the nearest one found from the
/// current directory.
pub fn resolve_manifest_path(args: &ManifestArgs) -> anyhow::Result<PathBuf> {
    match &args.file {
        Some(path) => Ok(path.clone()),
        None => Ok(Parser::new().find_manifest_file()?),
    }
}

pub fn load_manifest(args: &ManifestArgs) -> anyhow::Result<Manifest> {
    let path = resolve_manifest_path(args)?;
    let manifest =
        Parser::new().load_manifest(&path, args.project_name.as_deref(), &args.profile)?;
    tracing::debug!(
        project = %manifest.name(),
        path = %path.display(),
        active = manifest.service_names().len(),
        "Loaded manifest"
    );
    Ok(manifest)
}

pub fn load_project(args: &ManifestArgs) -> anyhow::Result<Project> {
    Ok(Project::new(load_manifest(args)?))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::cli::ManifestArgs;
    use std::fs;
    use tempfile::TempDir;

    pub const MANIFEST: &str = r#"
name: shop
services:
  db:
    image: postgres:16
  api:
    image: shop/api:1
    depends_on:
      db:
        condition: service_healthy
  web:
    image: nginx:1.27
    profiles: [frontend]
    depends_on: [api]
  debugger:
    image: busybox
    profiles: [debug]
    depends_on: [api]
networks:
  default:
volumes:
  pgdata:
"#;

    /// Write `content` as compose.yaml into a fresh directory.
    pub fn manifest_args(content: &str, profiles: &[&str]) -> (TempDir, ManifestArgs) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compose.yaml");
        fs::write(&path, content).unwrap();
        let args = ManifestArgs {
            file: Some(path),
            project_name: None,
            profile: profiles.iter().map(|p| p.to_string()).collect(),
        };
        (dir, args)
    }
}
