//! Admin Endpoints
//!
//! Score debugging and operational statistics.

use super::{fetch_json, get, ApiResult};
use crate::models::{AdminStatus, ConversionStats, RecipeDebug};

pub async fn get_recipe_debug(recipe_id: u32, demo_user: u8) -> ApiResult<RecipeDebug> {
    fetch_json(get("/api/admin/recipe-debug/").query([
        ("recipe_id", recipe_id.to_string()),
        ("demo_user", demo_user.to_string()),
    ]))
    .await
}

pub async fn get_admin_status() -> ApiResult<AdminStatus> {
    fetch_json(get("/api/admin/status/")).await
}

pub async fn get_conversion(days: u32) -> ApiResult<ConversionStats> {
    fetch_json(get("/api/recommendations/conversion/").query([("days", days.to_string())])).await
}
