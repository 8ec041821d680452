use crate::shared::api_utils::get_json;
use contracts::domain::equipment::Equipment;

/// Fetch all equipment of the portfolio
pub async fn fetch_equipment() -> Result<Vec<Equipment>, String> {
    get_json::<Vec<Equipment>>("/api/equipment").await
}
