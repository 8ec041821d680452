use crate::shared::api_utils::get_json;
use contracts::domain::lease::Lease;

/// Fetch all leases
pub async fn fetch_leases() -> Result<Vec<Lease>, String> {
    get_json::<Vec<Lease>>("/api/leases").await
}
