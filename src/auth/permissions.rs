use crate::errors::internal::AccessError;
use crate::types::internal::context::AuthContext;

pub const USERS_READ: &str = "users:read";
pub const USERS_CREATE: &str = "users:create";
pub const USERS_UPDATE: &str = "users:update";
pub const USERS_DEACTIVATE: &str = "users:deactivate";
pub const ROLES_READ: &str = "roles:read";
pub const ROLES_CREATE: &str = "roles:create";
pub const ROLES_UPDATE: &str = "roles:update";
pub const ROLES_DELETE: &str = "roles:delete";
pub const SITES_READ: &str = "sites:read";
pub const SITES_CREATE: &str = "sites:create";
pub const SITES_UPDATE: &str = "sites:update";
pub const SITES_DELETE: &str = "sites:delete";
pub const DASHBOARD_READ: &str = "dashboard:read";

/// Every built-in permission, in the order granted to the seeded admin role
pub const ADMIN_PERMISSIONS: [&str; 13] = [
    USERS_READ,
    USERS_CREATE,
    USERS_UPDATE,
    USERS_DEACTIVATE,
    ROLES_READ,
    ROLES_CREATE,
    ROLES_UPDATE,
    ROLES_DELETE,
    SITES_READ,
    SITES_CREATE,
    SITES_UPDATE,
    SITES_DELETE,
    DASHBOARD_READ,
];

/// Check that the caller holds every required permission
///
/// Exact string match, AND semantics, no wildcards. An empty `required`
/// list passes for any authenticated caller. Pure: touches no storage.
pub fn require_permissions(
    context: Option<&AuthContext>,
    required: &[&str],
) -> Result<(), AccessError> {
    let context = context.ok_or(AccessError::NotAuthenticated)?;

    let missing: Vec<String> = required
        .iter()
        .filter(|permission| !context.has_permission(permission))
        .map(|permission| permission.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AccessError::InsufficientPermissions { missing })
    }
}
