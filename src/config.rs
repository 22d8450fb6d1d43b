use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domains::demographics::{AllianceResolver, CasteCategoryMapper, Category};
use crate::domains::permission::{Action, PermissionTable, Resource, Role};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::validation::{Validate, ValidationBuilder};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 200;

/// Role -> resource -> actions, as strings ("system_admin" -> "voters" -> ["read"])
pub type PermissionConfig = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Startup configuration handed over by the host app.
///
/// Every table is optional; a missing section means the built-in table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub permissions: Option<PermissionConfig>,

    /// Alliance name -> member parties
    #[serde(default)]
    pub alliances: Option<BTreeMap<String, Vec<String>>>,

    /// Caste label -> category
    #[serde(default)]
    pub castes: Option<BTreeMap<String, Category>>,

    #[serde(default = "default_per_page")]
    pub default_per_page: u32,

    #[serde(default = "max_per_page")]
    pub max_per_page: u32,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn max_per_page() -> u32 {
    MAX_PER_PAGE
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            permissions: None,
            alliances: None,
            castes: None,
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: CoreConfig = serde_json::from_str(json)
            .map_err(|e| DomainError::Configuration(format!("Invalid configuration JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the permission table. Unknown role, resource or action names
    /// are rejected rather than skipped.
    pub fn permission_table(&self) -> DomainResult<PermissionTable> {
        let permissions = match &self.permissions {
            Some(permissions) => permissions,
            None => return Ok(PermissionTable::default_table()),
        };

        let mut builder = PermissionTable::builder();
        for (role_name, resources) in permissions {
            let role = Role::from_str(role_name).ok_or_else(|| DomainError::unknown("role", role_name))?;
            for (resource_name, action_names) in resources {
                let resource = Resource::from_str(resource_name)
                    .ok_or_else(|| DomainError::unknown("resource", resource_name))?;
                let actions = action_names
                    .iter()
                    .map(|name| Action::from_str(name).ok_or_else(|| DomainError::unknown("action", name)))
                    .collect::<DomainResult<Vec<Action>>>()?;
                builder = builder.grant(role, resource, &actions);
            }
        }
        builder.build()
    }

    pub fn caste_mapper(&self) -> CasteCategoryMapper {
        match &self.castes {
            Some(castes) => CasteCategoryMapper::from_config(castes),
            None => CasteCategoryMapper::default(),
        }
    }

    /// Configured alliances are ordered by name.
    pub fn alliance_resolver(&self) -> AllianceResolver {
        match &self.alliances {
            Some(alliances) => AllianceResolver::from_config(alliances),
            None => AllianceResolver::default(),
        }
    }
}

impl Validate for CoreConfig {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("default_per_page", Some(self.default_per_page))
            .min(1)
            .max(self.max_per_page.max(1))
            .validate()?;
        ValidationBuilder::new("max_per_page", Some(self.max_per_page))
            .min(1)
            .validate()?;

        if let Some(alliances) = &self.alliances {
            for (name, parties) in alliances {
                ValidationBuilder::new("alliances", Some(name.clone())).not_blank().validate()?;
                if parties.iter().any(|party| party.trim().is_empty()) {
                    return Err(ValidationError::invalid_value(
                        "alliances",
                        &format!("alliance '{}' lists a blank party", name),
                    )
                    .into());
                }
            }
        }

        if let Some(castes) = &self.castes {
            if castes.keys().any(|label| label.trim().is_empty()) {
                return Err(ValidationError::invalid_value("castes", "caste labels must not be blank").into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = CoreConfig::from_json("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.default_per_page, 20);
        assert_eq!(config.max_per_page, 200);

        let table = config.permission_table().unwrap();
        assert_eq!(table.len(), PermissionTable::default_table().len());
        assert_eq!(config.caste_mapper().category_of("Paswan"), Category::Sc);
        assert!(config.alliance_resolver().is_member("NDA", "JD(U)"));
    }

    #[test]
    fn test_custom_tables() {
        let config = CoreConfig::from_json(
            r#"{
                "permissions": {"field_volunteer": {"voters": ["read"], "dashboard": ["read"]}},
                "alliances": {"MGB": ["RJD", "INC"]},
                "castes": {"Kurmi": "EBC"},
                "max_per_page": 50
            }"#,
        )
        .unwrap();

        let table = config.permission_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(config.caste_mapper().category_of("Kurmi"), Category::Ebc);
        // Not in the configured table, so the default category
        assert_eq!(config.caste_mapper().category_of("Paswan"), Category::General);
        assert_eq!(config.alliance_resolver().alliance_names(), vec!["MGB"]);
        assert_eq!(config.max_per_page, 50);
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        let config = CoreConfig::from_json(r#"{"permissions": {"mukhiya": {"voters": ["read"]}}}"#).unwrap();
        assert!(matches!(
            config.permission_table(),
            Err(DomainError::UnknownValue { ref kind, .. }) if kind == "role"
        ));

        let config = CoreConfig::from_json(r#"{"permissions": {"party": {"voters": ["approve"]}}}"#).unwrap();
        assert!(matches!(
            config.permission_table(),
            Err(DomainError::UnknownValue { ref kind, .. }) if kind == "action"
        ));

        // Assign does not apply to voters
        let config = CoreConfig::from_json(r#"{"permissions": {"party": {"voters": ["assign"]}}}"#).unwrap();
        assert!(matches!(config.permission_table(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_validation() {
        assert!(CoreConfig::from_json(r#"{"default_per_page": 0}"#).is_err());
        assert!(CoreConfig::from_json(r#"{"default_per_page": 300}"#).is_err());
        assert!(CoreConfig::from_json(r#"{"alliances": {"NDA": ["BJP", " "]}}"#).is_err());
        assert!(CoreConfig::from_json(r#"{"castes": {"": "SC"}}"#).is_err());
        assert!(matches!(
            CoreConfig::from_json("not json"),
            Err(DomainError::Configuration(_))
        ));
    }

    #[test]
    fn test_page_size_out_of_bounds_is_a_range_error() {
        match CoreConfig::from_json(r#"{"default_per_page": 300}"#) {
            Err(DomainError::Validation(ValidationError::Range { field, max, .. })) => {
                assert_eq!(field, "default_per_page");
                assert_eq!(max, "200");
            }
            other => panic!("expected a range error, got {:?}", other),
        }
        assert!(matches!(
            CoreConfig::from_json(r#"{"max_per_page": 0}"#),
            Err(DomainError::Validation(ValidationError::Range { .. }))
        ));
    }
}
