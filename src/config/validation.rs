use super::Manifest;
use crate::error::{Error, Result};

impl Manifest {
    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        for service in self.all_services() {
            if service.name.trim().is_empty() {
                return Err(Error::Validation(
                    "Service names must not be empty".to_string(),
                ));
            }

            if service.depends_on.contains_key(&service.name) {
                return Err(Error::Validation(format!(
                    "Service '{}' depends on itself",
                    service.name
                )));
            }

            if let Some(missing) = self.missing_required_dependency(service) {
                return Err(Error::Validation(format!(
                    "Service '{}' depends on undefined service '{}'",
                    service.name, missing
                )));
            }

            if service.profiles.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::Validation(format!(
                    "Service '{}' declares an empty profile name",
                    service.name
                )));
            }
        }

        // Check for circular dependencies
        self.dependency_graph().topological_sort()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DependencyCondition, Manifest, Service, ServiceDependency};
    use crate::error::Error;

    #[test]
    fn test_valid_manifest() {
        let manifest = Manifest::new("p")
            .with_service(Service::new("db"))
            .with_service(Service::new("api").depends_on("db", DependencyCondition::ServiceStarted));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_undefined_dependency() {
        let manifest = Manifest::new("p")
            .with_service(Service::new("api").depends_on("db", DependencyCondition::ServiceStarted));
        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("undefined service 'db'"));
    }

    #[test]
    fn test_optional_undefined_dependency_is_allowed() {
        let manifest = Manifest::new("p").with_service(Service::new("api").with_dependency(
            "cache",
            ServiceDependency::default().optional(),
        ));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_self_dependency() {
        let manifest = Manifest::new("p")
            .with_service(Service::new("api").depends_on("api", DependencyCondition::ServiceStarted));
        assert!(matches!(manifest.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_cycle() {
        let manifest = Manifest::new("p")
            .with_service(Service::new("a").depends_on("b", DependencyCondition::ServiceStarted))
            .with_service(Service::new("b").depends_on("a", DependencyCondition::ServiceStarted));
        assert!(matches!(
            manifest.validate(),
            Err(Error::CircularDependency(path)) if path.len() == 3
        ));
    }
}
