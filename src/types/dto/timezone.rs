use poem_openapi::Object;

/// Upstream timezone catalogue, passed through untouched
#[derive(Object, Debug)]
pub struct TimezoneEnvelope {
    pub success: bool,

    /// Number of entries when the upstream payload is an array
    #[oai(skip_serializing_if_is_none)]
    pub count: Option<u64>,

    pub data: serde_json::Value,
}
