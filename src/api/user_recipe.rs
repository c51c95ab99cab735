//! User Recipe Endpoints
//!
//! Authoring: list with title filter, multi-part create, delete.

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use super::{delete, fetch_json, get, post, send_json, send_unit, ApiError, ApiResult};
use crate::models::UserRecipe;
use crate::recipe_form::FormPart;

pub async fn get_user_recipes(query: &str) -> ApiResult<Vec<UserRecipe>> {
    let request = get("/api/recipes/user/");
    let request = if query.is_empty() {
        request
    } else {
        request.query([("q", query)])
    };
    fetch_json(request).await
}

/// Create a recipe with optional thumbnail and per-step images
pub async fn create_user_recipe_multipart(parts: Vec<FormPart<web_sys::File>>) -> ApiResult<UserRecipe> {
    let form = FormData::new().map_err(js_error)?;
    for part in &parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value),
            FormPart::File { name, file } => form.append_with_blob(name, file),
        }
        .map_err(js_error)?;
    }
    // The browser sets the multipart boundary header itself
    let response = post("/api/recipes/user/").body(form)?.send().await?;
    super::decode(super::checked(response).await?).await
}

#[allow(dead_code)]
#[derive(Debug, Clone, Serialize)]
pub struct JsonRecipeStep {
    pub step_no: u32,
    pub description: String,
    pub image_url: String,
}

/// Structured creation body without uploads
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize)]
pub struct JsonRecipe {
    pub title: String,
    pub cook_time_min: Option<u32>,
    pub ingredients: Vec<String>,
    pub image_url: String,
    pub is_public: bool,
    pub steps: Vec<JsonRecipeStep>,
}

/// JSON-encoded create, superseded by the multi-part upload
#[deprecated(note = "use create_user_recipe_multipart")]
#[allow(dead_code)]
pub async fn create_user_recipe(recipe: &JsonRecipe) -> ApiResult<UserRecipe> {
    send_json(post("/api/recipes/user/"), recipe).await
}

pub async fn delete_user_recipe(id: u32) -> ApiResult<()> {
    send_unit(delete(&format!("/api/recipes/user/{}/", id))).await
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_nests_steps() {
        let recipe = JsonRecipe {
            title: "계란말이".into(),
            cook_time_min: Some(10),
            ingredients: vec!["계란".into(), "대파".into()],
            image_url: String::new(),
            is_public: false,
            steps: vec![JsonRecipeStep {
                step_no: 1,
                description: "계란을 푼다".into(),
                image_url: String::new(),
            }],
        };
        let body = serde_json::to_value(&recipe).unwrap();
        assert_eq!(body["ingredients"], serde_json::json!(["계란", "대파"]));
        assert_eq!(body["steps"][0]["step_no"], 1);
        assert_eq!(body["is_public"], false);
    }
}
