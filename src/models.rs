//! Frontend Models
//!
//! Data structures matching backend payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ========================
// Auth
// ========================

/// Response of `GET /api/auth/status/`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub toss_user_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Response of the host and demo login endpoints
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub toss_user_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Demo accounts offered on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoAccount {
    User,
    Admin,
}

// ========================
// Recipes
// ========================

/// Implicit feedback signal sent to the ranking backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeAction {
    Cook,
    Save,
    Skip,
}

impl RecipeAction {
    pub fn label(self) -> &'static str {
        match self {
            RecipeAction::Cook => "요리함",
            RecipeAction::Save => "저장",
            RecipeAction::Skip => "스킵",
        }
    }
}

/// A ranked recommendation, or a search hit (ranking fields absent)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub recipe_id: u32,
    pub title: String,
    #[serde(default)]
    pub cook_time_min: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub missing_ingredients: Vec<String>,
    #[serde(default)]
    pub shopping_list: Vec<String>,
    #[serde(default)]
    pub coverage: Option<f64>,
    #[serde(default)]
    pub missing_count: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeStep {
    #[serde(default)]
    pub step_no: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub step_image_url: Option<String>,
}

impl RecipeStep {
    /// Uploaded step image first, external image second
    pub fn image(&self) -> Option<&str> {
        self.step_image_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.image_url.as_deref().filter(|u| !u.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeDetail {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub cook_time_min: Option<u32>,
    #[serde(default)]
    pub raw_ingredients: Option<String>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub is_saved: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedRecipe {
    pub recipe_id: u32,
    pub title: String,
    #[serde(default)]
    pub cook_time_min: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub saved_at: Option<String>,
}

/// Recipe authored by the current user
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRecipe {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub cook_time_min: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserRecipe {
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail_url
            .as_deref()
            .or(self.image_url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

// ========================
// Pantry
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PantryItem {
    pub id: u32,
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity_text: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Body of `POST /api/pantry/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPantryItem {
    pub ingredient_name: String,
    pub quantity_text: String,
    pub expires_at: Option<String>,
}

/// Body of `PATCH /api/pantry/{id}/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PantryPatch {
    pub quantity_text: String,
    pub expires_at: Option<String>,
}

// ========================
// Admin
// ========================

/// Score breakdown of one recipe for a demo user
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeDebug {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub coverage: f64,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub debug: Option<Map<String, Value>>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub missing_ingredients: Vec<String>,
    #[serde(default)]
    pub shopping_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AdminStatus {
    #[serde(default)]
    pub recipes_total: Option<u64>,
    #[serde(default)]
    pub users: Option<u64>,
    #[serde(default)]
    pub pantry_items: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ConversionStats {
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub recommended_count: u64,
    #[serde(default)]
    pub converted_count: u64,
    #[serde(default)]
    pub window_days: Option<u32>,
}
