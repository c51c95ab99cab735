//! Pantry Endpoints

use super::{delete, fetch_json, get, patch, post, send_json, send_unit, ApiResult};
use crate::models::{NewPantryItem, PantryItem, PantryPatch};

pub async fn get_pantry() -> ApiResult<Vec<PantryItem>> {
    fetch_json(get("/api/pantry/")).await
}

pub async fn add_pantry_item(item: &NewPantryItem) -> ApiResult<PantryItem> {
    send_json(post("/api/pantry/"), item).await
}

pub async fn update_pantry_item(id: u32, changes: &PantryPatch) -> ApiResult<PantryItem> {
    send_json(patch(&format!("/api/pantry/{}/", id)), changes).await
}

pub async fn delete_pantry_item(id: u32) -> ApiResult<()> {
    send_unit(delete(&format!("/api/pantry/{}/", id))).await
}
