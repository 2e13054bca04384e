use super::Manifest;
use std::collections::BTreeSet;

/// Compare the images used by the active services of two manifests.
///
/// Returns `(only_in_old, added_in_new)`, each sorted and free of
/// duplicates. Services without an image are ignored.
pub fn compare_images(old: &Manifest, new: &Manifest) -> (Vec<String>, Vec<String>) {
    let old_images = active_images(old);
    let new_images = active_images(new);

    let only_in_old = old_images.difference(&new_images).cloned().collect();
    let added_in_new = new_images.difference(&old_images).cloned().collect();
    (only_in_old, added_in_new)
}

fn active_images(manifest: &Manifest) -> BTreeSet<String> {
    manifest
        .active_services()
        .filter_map(|s| s.image.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Activation, Service};

    #[test]
    fn test_compare_images() {
        let old = Manifest::new("p")
            .with_service(Service::new("web").with_image("nginx:1.25"))
            .with_service(Service::new("api").with_image("api:1"))
            .with_service(Service::new("worker").with_image("api:1"))
            .with_service(Service::new("build"));
        let new = Manifest::new("p")
            .with_service(Service::new("web").with_image("nginx:1.27"))
            .with_service(Service::new("api").with_image("api:1"))
            .with_service(Service::new("cache").with_image("redis:7"));

        let (removed, added) = compare_images(&old, &new);
        assert_eq!(removed, vec!["nginx:1.25"]);
        assert_eq!(added, vec!["nginx:1.27", "redis:7"]);
    }

    #[test]
    fn test_disabled_services_do_not_count() {
        let old = Manifest::new("p").with_service(Service::new("web").with_image("nginx:1.25"));
        let mut new = Manifest::new("p");
        new.insert_service(
            Service::new("web").with_image("nginx:1.25"),
            Activation::Disabled,
        );

        let (removed, added) = compare_images(&old, &new);
        assert_eq!(removed, vec!["nginx:1.25"]);
        assert!(added.is_empty());
    }
}
