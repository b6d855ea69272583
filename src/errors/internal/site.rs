use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    #[error("Site not found")]
    NotFound { site_id: String },

    #[error("Cannot delete site: it is assigned to one or more users")]
    InUse { user_count: u64 },
}
