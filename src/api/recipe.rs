//! Recipe Endpoints
//!
//! Recommendations, search, detail, saving, and feedback actions.

use serde::Serialize;

use super::{fetch_json, get, post, send_json_unit, ApiResult};
use crate::models::{RecipeAction, RecipeDetail, Recommendation, SavedRecipe};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct RecipeIdArgs {
    recipe_id: u32,
}

#[derive(Serialize)]
struct RecipeActionArgs {
    recipe_id: u32,
    action: RecipeAction,
}

// ========================
// Endpoints
// ========================

pub async fn get_recommendations(top: u32) -> ApiResult<Vec<Recommendation>> {
    fetch_json(get("/api/recommendations/recipes/").query([("top", top.to_string())])).await
}

pub async fn search_recipes(query: &str) -> ApiResult<Vec<Recommendation>> {
    fetch_json(get("/api/recipes/search/").query([("q", query)])).await
}

pub async fn get_recipe(recipe_id: u32) -> ApiResult<RecipeDetail> {
    fetch_json(get(&format!("/api/recipes/{}/", recipe_id))).await
}

pub async fn save_recipe(recipe_id: u32) -> ApiResult<()> {
    send_json_unit(post("/api/recipes/save/"), &RecipeIdArgs { recipe_id }).await
}

pub async fn unsave_recipe(recipe_id: u32) -> ApiResult<()> {
    send_json_unit(post("/api/recipes/unsave/"), &RecipeIdArgs { recipe_id }).await
}

pub async fn get_saved_recipes() -> ApiResult<Vec<SavedRecipe>> {
    fetch_json(get("/api/recipes/saved/")).await
}

/// Log a cook/save/skip signal for the ranking backend
pub async fn record_action(recipe_id: u32, action: RecipeAction) -> ApiResult<()> {
    send_json_unit(post("/api/recipes/action/"), &RecipeActionArgs { recipe_id, action }).await
}
