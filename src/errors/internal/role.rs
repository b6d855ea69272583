use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    #[error("Role not found")]
    NotFound { role_id: String },

    #[error("Role name already exists")]
    NameTaken { name: String },

    #[error("System roles cannot be modified")]
    SystemRoleImmutable,

    #[error("System roles cannot be deleted")]
    SystemRoleUndeletable,

    #[error("Cannot delete role: it is assigned to one or more users")]
    InUse { user_count: u64 },
}
