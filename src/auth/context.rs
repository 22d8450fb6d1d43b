use uuid::Uuid;

use crate::domains::permission::PermissionRegistry;
use crate::errors::{ServiceError, ServiceResult};
use crate::types::{Action, Resource, Role};

/// Who is acting: produced by the login flow, consumed by the access checks.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The ID of the authenticated user
    pub user_id: Uuid,

    /// The role of the authenticated user
    pub role: Role,

    /// The ID of the current device
    pub device_id: String,
}

impl AuthContext {
    pub fn new(user_id: Uuid, role: Role, device_id: String) -> Self {
        Self {
            user_id,
            role,
            device_id,
        }
    }

    /// Check if user has a specific permission
    pub fn has_permission(&self, registry: &PermissionRegistry, resource: Resource, action: Action) -> bool {
        registry.has_permission(self.role, resource, action)
    }

    /// Authorize a specific permission, returning an error if not allowed
    pub fn authorize(&self, registry: &PermissionRegistry, resource: Resource, action: Action) -> ServiceResult<()> {
        if self.has_permission(registry, resource, action) {
            Ok(())
        } else {
            log::warn!(
                "Denied {} on {} for user {} ({})",
                action.as_str(),
                resource.as_str(),
                self.user_id,
                self.role.as_str()
            );
            Err(ServiceError::PermissionDenied(format!(
                "Role '{}' may not {} {}",
                self.role.as_str(),
                action.as_str(),
                resource.as_str()
            )))
        }
    }

    /// Authorize multiple actions, requiring all of them
    pub fn authorize_all(&self, registry: &PermissionRegistry, resource: Resource, actions: &[Action]) -> ServiceResult<()> {
        if registry.has_all_permissions(self.role, resource, actions) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(format!(
                "Role '{}' lacks some required permissions on {}",
                self.role.as_str(),
                resource.as_str()
            )))
        }
    }

    /// Verify user is a system admin
    pub fn authorize_admin(&self) -> ServiceResult<()> {
        if matches!(self.role, Role::SystemAdmin) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(
                "This action requires system administrator privileges".to_string()
            ))
        }
    }

    /// For operations on another user's account: only roles above theirs may act
    pub fn authorize_manage(&self, registry: &PermissionRegistry, target_role: Role, action: Action) -> ServiceResult<()> {
        self.authorize(registry, Resource::Users, action)?;
        if self.role == Role::SystemAdmin || self.role.outranks(target_role) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(format!(
                "Role '{}' may not manage '{}' users",
                self.role.as_str(),
                target_role.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> AuthContext {
        AuthContext::new(Uuid::new_v4(), role, "device-1".to_string())
    }

    #[test]
    fn test_authorize() {
        let registry = PermissionRegistry::default();
        assert!(ctx(Role::Party).authorize(&registry, Resource::Users, Action::Create).is_ok());
        let err = ctx(Role::Candidate)
            .authorize(&registry, Resource::Users, Action::Read)
            .unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
    }

    #[test]
    fn test_authorize_all_and_admin() {
        let registry = PermissionRegistry::default();
        assert!(ctx(Role::FieldVolunteer)
            .authorize_all(&registry, Resource::Voters, &[Action::Read, Action::Update])
            .is_ok());
        assert!(ctx(Role::FieldVolunteer)
            .authorize_all(&registry, Resource::Voters, &[Action::Read, Action::Export])
            .is_err());
        assert!(ctx(Role::SystemAdmin).authorize_admin().is_ok());
        assert!(ctx(Role::Party).authorize_admin().is_err());
    }

    #[test]
    fn test_authorize_manage_respects_hierarchy() {
        let registry = PermissionRegistry::default();
        let block = ctx(Role::BlockCoordinator);
        assert!(block.authorize_manage(&registry, Role::FieldVolunteer, Action::Create).is_ok());
        assert!(block.authorize_manage(&registry, Role::AssemblyCoordinator, Action::Create).is_err());
        // Lacks `update` on users altogether
        assert!(block.authorize_manage(&registry, Role::FieldVolunteer, Action::Update).is_err());
    }
}
