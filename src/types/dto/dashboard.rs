use poem_openapi::Object;

/// Aggregate counts shown on the overview screen
#[derive(Object, Debug, Clone, PartialEq, Eq)]
#[oai(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_roles: u64,
    pub total_sites: u64,
}

#[derive(Object, Debug)]
pub struct DashboardEnvelope {
    pub success: bool,
    pub data: DashboardStats,
}
