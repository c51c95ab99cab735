//! REST API Client
//!
//! Frontend bindings to the backend endpoints, organized by domain.
//! Every call is a single credentialed round trip: no retry, no cache.

mod admin;
mod auth;
mod pantry;
mod recipe;
mod user_recipe;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::config;
use crate::models::{
    AdminStatus, AuthStatus, ConversionStats, DemoAccount, LoginResponse, NewPantryItem,
    PantryItem, PantryPatch, RecipeAction, RecipeDebug, RecipeDetail, Recommendation,
    SavedRecipe, UserRecipe,
};
use crate::recipe_form::FormPart;
use crate::screens::recommend::ResultCount;

// ========================
// Errors
// ========================

pub type ApiResult<T> = Result<T, ApiError>;

/// Client-side failure of a backend call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response
    Network(String),
    /// Non-2xx response
    Status { status: u16, message: String },
    /// 2xx response with a body we could not parse
    Decode(String),
    /// Host app bridge missing or its login failed
    Bridge(String),
    /// 2xx response carrying `ok: false`
    Rejected(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "네트워크 오류: {}", msg),
            ApiError::Status { status, message } => write!(f, "{} ({})", message, status),
            ApiError::Decode(msg) => write!(f, "응답 해석 실패: {}", msg),
            ApiError::Bridge(msg) => write!(f, "{}", msg),
            ApiError::Rejected(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Pull a human message out of a DRF-style error body: `detail`/`error`
/// first, then the first field error (`{"field": ["msg"]}`)
fn error_message(status: u16, body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return format!("요청 실패 (HTTP {})", status);
    };
    ["detail", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        .or_else(|| first_field_error(&value))
        .unwrap_or_else(|| format!("요청 실패 (HTTP {})", status))
}

fn first_field_error(value: &serde_json::Value) -> Option<String> {
    value.as_object()?.iter().find_map(|(field, errors)| {
        let message = match errors {
            serde_json::Value::String(m) => Some(m.as_str()),
            serde_json::Value::Array(list) => list.iter().find_map(|m| m.as_str()),
            _ => None,
        }?;
        Some(if field == "non_field_errors" {
            message.to_string()
        } else {
            format!("{}: {}", field, message)
        })
    })
}

// ========================
// Backend seam
// ========================

/// Every backend operation the screens consume.
///
/// `HttpBackend` is the browser implementation; tests substitute a
/// recording mock.
#[async_trait(?Send)]
pub trait Backend {
    /// File handle carried by multi-part uploads
    type File: Clone + 'static;

    async fn auth_status(&self) -> ApiResult<AuthStatus>;
    async fn host_login(&self, authorization_code: &str, referrer: &str) -> ApiResult<LoginResponse>;
    async fn demo_login(&self, account: DemoAccount) -> ApiResult<LoginResponse>;
    async fn logout(&self) -> ApiResult<()>;

    async fn recommendations(&self, top: ResultCount) -> ApiResult<Vec<Recommendation>>;
    async fn search_recipes(&self, query: &str) -> ApiResult<Vec<Recommendation>>;
    async fn recipe(&self, recipe_id: u32) -> ApiResult<RecipeDetail>;
    async fn save_recipe(&self, recipe_id: u32) -> ApiResult<()>;
    async fn unsave_recipe(&self, recipe_id: u32) -> ApiResult<()>;
    async fn saved_recipes(&self) -> ApiResult<Vec<SavedRecipe>>;
    async fn record_action(&self, recipe_id: u32, action: RecipeAction) -> ApiResult<()>;

    async fn pantry(&self) -> ApiResult<Vec<PantryItem>>;
    async fn add_pantry_item(&self, item: &NewPantryItem) -> ApiResult<PantryItem>;
    async fn update_pantry_item(&self, id: u32, patch: &PantryPatch) -> ApiResult<PantryItem>;
    async fn delete_pantry_item(&self, id: u32) -> ApiResult<()>;

    async fn user_recipes(&self, query: &str) -> ApiResult<Vec<UserRecipe>>;
    async fn create_user_recipe(&self, parts: Vec<FormPart<Self::File>>) -> ApiResult<UserRecipe>;
    async fn delete_user_recipe(&self, id: u32) -> ApiResult<()>;

    async fn recipe_debug(&self, recipe_id: u32, demo_user: u8) -> ApiResult<RecipeDebug>;
    async fn admin_status(&self) -> ApiResult<AdminStatus>;
    async fn conversion(&self, days: u32) -> ApiResult<ConversionStats>;
}

/// Backend reached over HTTP with the session cookie attached
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HttpBackend;

#[async_trait(?Send)]
impl Backend for HttpBackend {
    type File = web_sys::File;

    async fn auth_status(&self) -> ApiResult<AuthStatus> {
        auth::get_auth_status().await
    }

    async fn host_login(&self, authorization_code: &str, referrer: &str) -> ApiResult<LoginResponse> {
        auth::host_login(authorization_code, referrer).await
    }

    async fn demo_login(&self, account: DemoAccount) -> ApiResult<LoginResponse> {
        auth::demo_login(account).await
    }

    async fn logout(&self) -> ApiResult<()> {
        auth::logout().await
    }

    async fn recommendations(&self, top: ResultCount) -> ApiResult<Vec<Recommendation>> {
        recipe::get_recommendations(top.get()).await
    }

    async fn search_recipes(&self, query: &str) -> ApiResult<Vec<Recommendation>> {
        recipe::search_recipes(query).await
    }

    async fn recipe(&self, recipe_id: u32) -> ApiResult<RecipeDetail> {
        recipe::get_recipe(recipe_id).await
    }

    async fn save_recipe(&self, recipe_id: u32) -> ApiResult<()> {
        recipe::save_recipe(recipe_id).await
    }

    async fn unsave_recipe(&self, recipe_id: u32) -> ApiResult<()> {
        recipe::unsave_recipe(recipe_id).await
    }

    async fn saved_recipes(&self) -> ApiResult<Vec<SavedRecipe>> {
        recipe::get_saved_recipes().await
    }

    async fn record_action(&self, recipe_id: u32, action: RecipeAction) -> ApiResult<()> {
        recipe::record_action(recipe_id, action).await
    }

    async fn pantry(&self) -> ApiResult<Vec<PantryItem>> {
        pantry::get_pantry().await
    }

    async fn add_pantry_item(&self, item: &NewPantryItem) -> ApiResult<PantryItem> {
        pantry::add_pantry_item(item).await
    }

    async fn update_pantry_item(&self, id: u32, patch: &PantryPatch) -> ApiResult<PantryItem> {
        pantry::update_pantry_item(id, patch).await
    }

    async fn delete_pantry_item(&self, id: u32) -> ApiResult<()> {
        pantry::delete_pantry_item(id).await
    }

    async fn user_recipes(&self, query: &str) -> ApiResult<Vec<UserRecipe>> {
        user_recipe::get_user_recipes(query).await
    }

    async fn create_user_recipe(&self, parts: Vec<FormPart<web_sys::File>>) -> ApiResult<UserRecipe> {
        user_recipe::create_user_recipe_multipart(parts).await
    }

    async fn delete_user_recipe(&self, id: u32) -> ApiResult<()> {
        user_recipe::delete_user_recipe(id).await
    }

    async fn recipe_debug(&self, recipe_id: u32, demo_user: u8) -> ApiResult<RecipeDebug> {
        admin::get_recipe_debug(recipe_id, demo_user).await
    }

    async fn admin_status(&self) -> ApiResult<AdminStatus> {
        admin::get_admin_status().await
    }

    async fn conversion(&self, days: u32) -> ApiResult<ConversionStats> {
        admin::get_conversion(days).await
    }
}

// ========================
// Request helpers
// ========================

fn get(path: &str) -> RequestBuilder {
    Request::get(&config::client().url(path)).credentials(RequestCredentials::Include)
}

fn post(path: &str) -> RequestBuilder {
    Request::post(&config::client().url(path)).credentials(RequestCredentials::Include)
}

fn patch(path: &str) -> RequestBuilder {
    Request::patch(&config::client().url(path)).credentials(RequestCredentials::Include)
}

fn delete(path: &str) -> RequestBuilder {
    Request::delete(&config::client().url(path)).credentials(RequestCredentials::Include)
}

/// Send and decode a JSON payload
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = request.send().await?;
    decode(checked(response).await?).await
}

/// Send a JSON body and decode the JSON reply
async fn send_json<B: Serialize, T: DeserializeOwned>(request: RequestBuilder, body: &B) -> ApiResult<T> {
    let response = request.json(body)?.send().await?;
    decode(checked(response).await?).await
}

/// Send a JSON body and ignore the reply payload
async fn send_json_unit<B: Serialize>(request: RequestBuilder, body: &B) -> ApiResult<()> {
    let response = request.json(body)?.send().await?;
    checked(response).await.map(|_| ())
}

/// Send without a body and ignore the reply payload
async fn send_unit(request: RequestBuilder) -> ApiResult<()> {
    let response = request.send().await?;
    checked(response).await.map(|_| ())
}

async fn checked(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    log::warn!("[Api] {} {} -> {}", status, response.url(), message);
    Err(ApiError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_detail_then_error() {
        assert_eq!(error_message(400, r#"{"detail":"title is required"}"#), "title is required");
        assert_eq!(error_message(404, r#"{"error":"not found"}"#), "not found");
        assert_eq!(error_message(500, "<html>oops</html>"), "요청 실패 (HTTP 500)");
    }

    #[test]
    fn validation_body_falls_back_to_first_field_error() {
        assert_eq!(
            error_message(400, r#"{"ingredient_name":["This field may not be blank."],"quantity_text":["x"]}"#),
            "ingredient_name: This field may not be blank."
        );
        assert_eq!(
            error_message(400, r#"{"non_field_errors":["중복된 재료입니다."]}"#),
            "중복된 재료입니다."
        );
        assert_eq!(error_message(400, r#"{"count":3}"#), "요청 실패 (HTTP 400)");
    }

    #[test]
    fn status_error_displays_message_and_code() {
        let err = ApiError::Status { status: 403, message: "forbidden".into() };
        assert_eq!(err.to_string(), "forbidden (403)");
        assert_eq!(ApiError::Rejected("로그인 실패".into()).to_string(), "로그인 실패");
    }
}
