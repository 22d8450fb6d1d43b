use std::sync::Arc;

use crate::config::CoreConfig;
use crate::domains::filter::FilterEngine;
use crate::domains::permission::PermissionRegistry;
use crate::domains::query::QueryFacade;
use crate::errors::DomainResult;
use crate::types::PaginationParams;
use crate::validation::Validate;

/// The permission registry, filter engine and query facade built from one
/// configuration. Tables are immutable once built and shared through `Arc`.
#[derive(Debug, Clone)]
pub struct AccessCore {
    config: CoreConfig,
    permissions: Arc<PermissionRegistry>,
    facade: QueryFacade,
}

impl AccessCore {
    pub fn from_config(config: CoreConfig) -> DomainResult<Self> {
        config.validate()?;

        let permissions = Arc::new(PermissionRegistry::new(config.permission_table()?));
        let engine = FilterEngine::new(
            Arc::new(config.caste_mapper()),
            Arc::new(config.alliance_resolver()),
        );
        let facade = QueryFacade::new(permissions.clone(), engine, config.max_per_page);

        Ok(Self {
            config,
            permissions,
            facade,
        })
    }

    pub fn with_defaults() -> Self {
        let config = CoreConfig::default();
        let permissions = Arc::new(PermissionRegistry::default());
        let facade = QueryFacade::new(permissions.clone(), FilterEngine::default(), config.max_per_page);
        Self {
            config,
            permissions,
            facade,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn permissions(&self) -> &PermissionRegistry {
        &self.permissions
    }

    pub fn facade(&self) -> &QueryFacade {
        &self.facade
    }

    pub fn engine(&self) -> &FilterEngine {
        self.facade.engine()
    }

    /// First page at the configured default size, for screens that page
    /// without asking for a size.
    pub fn default_page(&self) -> PaginationParams {
        PaginationParams::new(1, self.config.default_per_page)
    }
}

impl Default for AccessCore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Resource, Role};

    #[test]
    fn test_with_defaults() {
        let core = AccessCore::with_defaults();
        assert!(core.permissions().has_permission(Role::Party, Resource::Users, Action::Create));
        assert!(!core.permissions().has_permission(Role::Candidate, Resource::Users, Action::Read));
        assert_eq!(core.default_page(), PaginationParams::new(1, 20));
        assert_eq!(core.engine().castes().category_of("Yadav").as_str(), "OBC");
    }

    #[test]
    fn test_from_config_injects_tables() {
        let config = CoreConfig::from_json(
            r#"{
                "permissions": {"candidate": {"users": ["read"]}},
                "alliances": {"MGB": ["RJD"]},
                "default_per_page": 10
            }"#,
        )
        .unwrap();
        let core = AccessCore::from_config(config).unwrap();

        assert!(core.permissions().has_permission(Role::Candidate, Resource::Users, Action::Read));
        assert!(core.facade().has_permission(Role::Candidate, Resource::Users, Action::Read));
        assert!(!core.permissions().has_permission(Role::SystemAdmin, Resource::Voters, Action::Read));
        assert_eq!(core.engine().alliances().members_of("MGB").to_vec(), vec!["RJD".to_string()]);
        assert_eq!(core.default_page().per_page, 10);
    }

    #[test]
    fn test_from_config_rejects_bad_tables() {
        let config = CoreConfig {
            max_per_page: 0,
            ..CoreConfig::default()
        };
        assert!(AccessCore::from_config(config).is_err());
    }
}
