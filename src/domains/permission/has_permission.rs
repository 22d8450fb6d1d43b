use std::collections::{BTreeSet, HashMap};

use crate::domains::permission::types::{Action, Resource, Role};
use crate::errors::{DomainError, DomainResult, ValidationError};

/// Immutable (role, resource) -> actions table. A missing pair grants nothing.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    grants: HashMap<(Role, Resource), BTreeSet<Action>>,
}

impl PermissionTable {
    pub fn builder() -> PermissionTableBuilder {
        PermissionTableBuilder::default()
    }

    fn actions(&self, role: Role, resource: Resource) -> Option<&BTreeSet<Action>> {
        self.grants.get(&(role, resource))
    }

    /// Number of (role, resource) pairs holding at least one action
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Table shipped with the app.
    ///
    /// The system admin holds every action that applies to each resource.
    /// The candidate role has no entry for `users`.
    pub fn default_table() -> Self {
        use Action::*;
        use Resource::*;

        let mut builder = PermissionTable::builder();
        for resource in Resource::all() {
            builder = builder.grant(Role::SystemAdmin, resource, &Action::applicable_to(resource));
        }

        let table = builder
            // Party
            .grant(Role::Party, Dashboard, &[Read])
            .grant(Role::Party, Users, &[Create, Read, Update, Delete, ListAll, Export, Assign])
            .grant(Role::Party, Voters, &[Read, ListAll, Export])
            .grant(Role::Party, Booths, &[Read, ListAll, Export, Assign])
            .grant(Role::Party, Constituencies, &[Read, ListAll, Export])
            .grant(Role::Party, Reports, &[Read, Export])
            .grant(Role::Party, Settings, &[Read, Update])
            // Candidate
            .grant(Role::Candidate, Dashboard, &[Read])
            .grant(Role::Candidate, Voters, &[Read, ListAll, Export])
            .grant(Role::Candidate, Booths, &[Read, ListAll])
            .grant(Role::Candidate, Constituencies, &[Read, ListAll])
            .grant(Role::Candidate, Reports, &[Read, Export])
            .grant(Role::Candidate, Settings, &[Read])
            // Assembly coordinator
            .grant(Role::AssemblyCoordinator, Dashboard, &[Read])
            .grant(Role::AssemblyCoordinator, Users, &[Create, Read, Update, Assign])
            .grant(Role::AssemblyCoordinator, Voters, &[Create, Read, Update, Export])
            .grant(Role::AssemblyCoordinator, Booths, &[Read, Update, Assign])
            .grant(Role::AssemblyCoordinator, Constituencies, &[Read])
            .grant(Role::AssemblyCoordinator, Reports, &[Read, Export])
            .grant(Role::AssemblyCoordinator, Settings, &[Read])
            // Block coordinator
            .grant(Role::BlockCoordinator, Dashboard, &[Read])
            .grant(Role::BlockCoordinator, Users, &[Create, Read])
            .grant(Role::BlockCoordinator, Voters, &[Create, Read, Update])
            .grant(Role::BlockCoordinator, Booths, &[Read, Update])
            .grant(Role::BlockCoordinator, Reports, &[Read])
            .grant(Role::BlockCoordinator, Settings, &[Read])
            // Panchayat coordinator
            .grant(Role::PanchayatCoordinator, Dashboard, &[Read])
            .grant(Role::PanchayatCoordinator, Users, &[Read])
            .grant(Role::PanchayatCoordinator, Voters, &[Create, Read, Update])
            .grant(Role::PanchayatCoordinator, Booths, &[Read])
            .grant(Role::PanchayatCoordinator, Reports, &[Read])
            .grant(Role::PanchayatCoordinator, Settings, &[Read])
            // Field volunteer
            .grant(Role::FieldVolunteer, Dashboard, &[Read])
            .grant(Role::FieldVolunteer, Voters, &[Read, Update])
            .grant(Role::FieldVolunteer, Booths, &[Read])
            .grant(Role::FieldVolunteer, Settings, &[Read])
            .build();

        match table {
            Ok(table) => table,
            Err(err) => {
                // Only reachable if the literal above grants an action that
                // does not apply to its resource.
                log::error!("Built-in permission table is invalid: {}", err);
                PermissionTable::default()
            }
        }
    }
}

/// Collects grants and checks them before producing a `PermissionTable`.
#[derive(Debug, Default)]
pub struct PermissionTableBuilder {
    grants: HashMap<(Role, Resource), BTreeSet<Action>>,
    errors: Vec<ValidationError>,
}

impl PermissionTableBuilder {
    pub fn grant(mut self, role: Role, resource: Resource, actions: &[Action]) -> Self {
        for action in actions {
            if !action.applies_to(resource) {
                self.errors.push(ValidationError::invalid_value(
                    "permissions",
                    &format!(
                        "action '{}' does not apply to resource '{}' (role '{}')",
                        action.as_str(),
                        resource.as_str(),
                        role.as_str()
                    ),
                ));
                continue;
            }
            self.grants.entry((role, resource)).or_default().insert(*action);
        }
        self
    }

    pub fn build(self) -> DomainResult<PermissionTable> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(DomainError::Validation(err));
        }
        // Pairs granted an empty action list are equivalent to absent pairs
        let grants = self
            .grants
            .into_iter()
            .filter(|(_, actions)| !actions.is_empty())
            .collect();
        Ok(PermissionTable { grants })
    }
}

/// Single decision point for "may this role do that".
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    table: PermissionTable,
}

impl PermissionRegistry {
    pub fn new(table: PermissionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Deny-by-default lookup. Total and side-effect free.
    pub fn has_permission(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.table
            .actions(role, resource)
            .map_or(false, |actions| actions.contains(&action))
    }

    /// String-keyed variant for host callers. Anything unparseable is not granted.
    pub fn has_permission_str(&self, role: &str, resource: &str, action: &str) -> bool {
        match (Role::from_str(role), Resource::from_str(resource), Action::from_str(action)) {
            (Some(role), Some(resource), Some(action)) => self.has_permission(role, resource, action),
            _ => {
                log::debug!(
                    "Unrecognized permission query role='{}' resource='{}' action='{}', denying",
                    role, resource, action
                );
                false
            }
        }
    }

    pub fn has_any_permission(&self, role: Role, resource: Resource, actions: &[Action]) -> bool {
        actions.iter().any(|action| self.has_permission(role, resource, *action))
    }

    pub fn has_all_permissions(&self, role: Role, resource: Resource, actions: &[Action]) -> bool {
        actions.iter().all(|action| self.has_permission(role, resource, *action))
    }

    /// Whether the role may open the resource's list screen at all
    pub fn can_list(&self, role: Role, resource: Resource) -> bool {
        self.has_any_permission(role, resource, &[Action::Read, Action::ListAll])
    }

    pub fn permitted_actions(&self, role: Role, resource: Resource) -> Vec<Action> {
        self.table
            .actions(role, resource)
            .map(|actions| actions.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Resources holding at least one grant for `role`, in menu order
    pub fn accessible_resources(&self, role: Role) -> Vec<Resource> {
        Resource::all()
            .into_iter()
            .filter(|resource| self.table.actions(role, *resource).is_some())
            .collect()
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::new(PermissionTable::default_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = PermissionTable::default_table();
        assert!(!table.is_empty());
        let registry = PermissionRegistry::new(table);
        for resource in Resource::all() {
            for action in Action::applicable_to(resource) {
                assert!(registry.has_permission(Role::SystemAdmin, resource, action));
            }
        }
    }

    #[test]
    fn test_absent_pairs_are_denied() {
        let registry = PermissionRegistry::default();
        let table = PermissionTable::default_table();
        for role in Role::all() {
            for resource in Resource::all() {
                for action in Action::all() {
                    let granted = table
                        .actions(role, resource)
                        .map_or(false, |actions| actions.contains(&action));
                    if !granted {
                        assert!(!registry.has_permission(role, resource, action));
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_table_denies_everything() {
        let registry = PermissionRegistry::new(PermissionTable::default());
        for role in Role::all() {
            for resource in Resource::all() {
                assert!(!registry.has_permission(role, resource, Action::Read));
            }
        }
    }

    #[test]
    fn test_candidate_cannot_read_users() {
        let registry = PermissionRegistry::default();
        assert!(!registry.has_permission(Role::Candidate, Resource::Users, Action::Read));
        assert!(!registry.can_list(Role::Candidate, Resource::Users));
        assert!(registry.can_list(Role::Candidate, Resource::Voters));
    }

    #[test]
    fn test_field_volunteer_grants() {
        let registry = PermissionRegistry::default();
        assert!(registry.has_permission(Role::FieldVolunteer, Resource::Voters, Action::Read));
        assert!(registry.has_permission(Role::FieldVolunteer, Resource::Voters, Action::Update));
        assert!(!registry.has_permission(Role::FieldVolunteer, Resource::Voters, Action::Delete));
        assert!(!registry.has_permission(Role::FieldVolunteer, Resource::Reports, Action::Read));
        assert_eq!(
            registry.accessible_resources(Role::FieldVolunteer),
            vec![Resource::Dashboard, Resource::Voters, Resource::Booths, Resource::Settings]
        );
    }

    #[test]
    fn test_string_queries_fail_closed() {
        let registry = PermissionRegistry::default();
        assert!(registry.has_permission_str("party", "voters", "export"));
        assert!(!registry.has_permission_str("superuser", "voters", "read"));
        assert!(!registry.has_permission_str("party", "ballots", "read"));
        assert!(!registry.has_permission_str("party", "voters", "approve"));
        assert!(!registry.has_permission_str("", "", ""));
    }

    #[test]
    fn test_builder_rejects_inapplicable_actions() {
        let result = PermissionTable::builder()
            .grant(Role::Party, Resource::Dashboard, &[Action::Delete])
            .build();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_empty_grant_is_absent() {
        let table = PermissionTable::builder()
            .grant(Role::Party, Resource::Voters, &[])
            .build()
            .unwrap();
        assert!(table.is_empty());
        let registry = PermissionRegistry::new(table);
        assert!(registry.accessible_resources(Role::Party).is_empty());
    }

    #[test]
    fn test_permitted_actions_are_ordered() {
        let registry = PermissionRegistry::default();
        assert_eq!(
            registry.permitted_actions(Role::Candidate, Resource::Voters),
            vec![Action::Read, Action::ListAll, Action::Export]
        );
        assert!(registry.permitted_actions(Role::Candidate, Resource::Users).is_empty());
        assert!(registry.has_all_permissions(
            Role::Party,
            Resource::Users,
            &[Action::Create, Action::Assign]
        ));
    }
}
