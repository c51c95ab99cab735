//! Session State
//!
//! Detects the host app, adopts an existing session or performs the
//! bridge login handshake, and owns logout. Every transition replaces
//! the whole `AuthState`.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use leptos::prelude::*;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::{ApiError, ApiResult, Backend, HttpBackend};
use crate::models::{AuthStatus, DemoAccount, LoginResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub nickname: Option<String>,
    pub is_admin: bool,
}

impl Session {
    fn new(user_id: Option<String>, nickname: Option<String>, is_admin: bool) -> Option<Self> {
        let user_id = user_id.filter(|id| !id.is_empty())?;
        Some(Self {
            user_id,
            nickname: nickname.filter(|n| !n.is_empty()),
            is_admin,
        })
    }

    /// A status claiming a session without a user id counts as none
    pub fn from_status(status: AuthStatus) -> Option<Self> {
        if !status.logged_in {
            return None;
        }
        Self::new(status.toss_user_id, status.nickname, status.is_admin)
    }

    fn from_login(login: LoginResponse) -> ApiResult<Self> {
        if !login.ok {
            return Err(ApiError::Rejected(
                login.error.unwrap_or_else(|| "로그인 실패".to_string()),
            ));
        }
        Self::new(login.toss_user_id, login.nickname, login.is_admin)
            .ok_or_else(|| ApiError::Rejected("로그인 응답에 사용자 정보가 없습니다.".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    LoggedOut { error: Option<String> },
    LoggedIn(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::LoggedIn(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_some_and(|s| s.is_admin)
    }
}

// ========================
// Host bridge
// ========================

/// Authorization handed out by the host app
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostCredentials {
    pub authorization_code: String,
    #[serde(default)]
    pub referrer: Option<String>,
}

/// Host app hooks: environment detection and the login handshake
#[async_trait(?Send)]
pub trait HostBridge {
    fn in_host_app(&self) -> bool;
    async fn app_login(&self) -> ApiResult<HostCredentials>;
}

/// True if any host signal is present: user agent, bridge object, or `?toss=1`
pub fn is_host_environment(user_agent: &str, bridge_present: bool, query: &str) -> bool {
    if user_agent.contains("TossApp") || user_agent.contains("toss") {
        return true;
    }
    if bridge_present {
        return true;
    }
    query
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "toss=1")
}

/// `window.TossAppBridge`
#[derive(Debug, Clone, Copy, Default)]
pub struct TossBridge;

impl TossBridge {
    fn object() -> Option<JsValue> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str("TossAppBridge"))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    }
}

fn current_href() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

fn js_message(err: &JsValue, fallback: &str) -> String {
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[async_trait(?Send)]
impl HostBridge for TossBridge {
    fn in_host_app(&self) -> bool {
        let Some(window) = web_sys::window() else { return false };
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let query = window.location().search().unwrap_or_default();
        is_host_environment(&user_agent, Self::object().is_some(), &query)
    }

    async fn app_login(&self) -> ApiResult<HostCredentials> {
        let bridge = Self::object()
            .ok_or_else(|| ApiError::Bridge("TossAppBridge not available".to_string()))?;
        let app_login: Function = Reflect::get(&bridge, &JsValue::from_str("appLogin"))
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or_else(|| ApiError::Bridge("TossAppBridge.appLogin missing".to_string()))?;

        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            let options = js_sys::Object::new();
            let on_fail = reject.clone();
            let success = Closure::once_into_js(move |result: JsValue| {
                let _ = resolve.call1(&JsValue::NULL, &result);
            });
            let fail = Closure::once_into_js(move |error: JsValue| {
                let _ = on_fail.call1(&JsValue::NULL, &error);
            });
            let _ = Reflect::set(&options, &JsValue::from_str("success"), &success);
            let _ = Reflect::set(&options, &JsValue::from_str("fail"), &fail);
            if let Err(err) = app_login.call1(&bridge, &options) {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });

        let result = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::Bridge(js_message(&e, "appLogin failed")))?;
        let mut credentials: HostCredentials = serde_wasm_bindgen::from_value(result)
            .map_err(|e| ApiError::Bridge(e.to_string()))?;
        if credentials.referrer.as_deref().map_or(true, str::is_empty) {
            credentials.referrer = Some(current_href());
        }
        Ok(credentials)
    }
}

// ========================
// Controller
// ========================

/// Auth controller as provided through context
pub type AuthContext = AuthController<HttpBackend, TossBridge>;

#[derive(Clone, Copy)]
pub struct AuthController<B, H> {
    backend: B,
    bridge: H,
    pub state: RwSignal<AuthState>,
    /// Host environment detected on the last refresh
    pub host_app: RwSignal<bool>,
}

impl<B: Backend, H: HostBridge> AuthController<B, H> {
    pub fn new(backend: B, bridge: H) -> Self {
        Self {
            backend,
            bridge,
            state: RwSignal::new(AuthState::Loading),
            host_app: RwSignal::new(false),
        }
    }

    /// Re-run detection, session adoption and, inside the host app, the
    /// bridge login
    pub async fn refresh(&self) {
        let host_app = self.bridge.in_host_app();
        self.host_app.try_set(host_app);
        self.state.try_set(AuthState::Loading);

        let existing = match self.backend.auth_status().await {
            Ok(status) => Session::from_status(status),
            Err(err) => {
                log::warn!("[Auth] Status check failed, treating as logged out: {}", err);
                None
            }
        };
        if let Some(session) = existing {
            log::info!("[Auth] Session found for {}", session.user_id);
            self.state.try_set(AuthState::LoggedIn(session));
            return;
        }

        if !host_app {
            self.state.try_set(AuthState::LoggedOut { error: None });
            return;
        }

        let next = match self.host_login().await {
            Ok(session) => AuthState::LoggedIn(session),
            Err(err) => {
                log::error!("[Auth] Host login failed: {}", err);
                AuthState::LoggedOut {
                    error: Some(err.to_string()),
                }
            }
        };
        self.state.try_set(next);
    }

    async fn host_login(&self) -> ApiResult<Session> {
        let credentials = self.bridge.app_login().await?;
        let referrer = credentials.referrer.unwrap_or_default();
        let login = self
            .backend
            .host_login(&credentials.authorization_code, &referrer)
            .await?;
        Session::from_login(login)
    }

    /// Demo login followed by a full refresh. Errors are user-facing.
    pub async fn demo_login(&self, account: DemoAccount) -> Result<(), String> {
        log::info!("[Auth] Demo login as {:?}", account);
        let login = self.backend.demo_login(account).await.map_err(|e| e.to_string())?;
        if !login.ok {
            return Err(login.error.unwrap_or_else(|| "로그인 실패".to_string()));
        }
        self.refresh().await;
        Ok(())
    }

    /// Best-effort server logout, then an unconditional local reset
    pub async fn logout(&self) {
        if let Err(err) = self.backend.logout().await {
            log::error!("[Auth] Logout failed: {}", err);
        }
        self.state.try_set(AuthState::LoggedOut { error: None });
    }
}
