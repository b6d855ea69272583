/// Authenticated identity attached to a request
///
/// Built from a fresh read of the user, its role and its site every time a
/// bearer token is accepted. Handlers and the permission gate only ever look
/// at this, never at the raw token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role_id: String,

    /// None when the referenced role row has disappeared
    pub role_name: Option<String>,

    pub permissions: Vec<String>,
    pub site_id: Option<String>,
}

impl AuthContext {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
