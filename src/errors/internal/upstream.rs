use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Failed to fetch timezones from TimeAPI")]
    Timezones { reason: String },
}
