//! Auth Endpoints
//!
//! Session bootstrap: host-app code exchange, demo login, status, logout.

use serde::Serialize;

use super::{fetch_json, get, post, send_json, send_unit, ApiResult};
use crate::models::{AuthStatus, DemoAccount, LoginResponse};

#[derive(Serialize)]
struct HostLoginArgs<'a> {
    #[serde(rename = "authorizationCode")]
    authorization_code: &'a str,
    referrer: &'a str,
}

#[derive(Serialize)]
struct DemoLoginArgs {
    demo_user: DemoAccount,
}

/// Exchange a host-bridge authorization code for a session
pub async fn host_login(authorization_code: &str, referrer: &str) -> ApiResult<LoginResponse> {
    send_json(
        post("/api/auth/toss/login/"),
        &HostLoginArgs { authorization_code, referrer },
    )
    .await
}

pub async fn get_auth_status() -> ApiResult<AuthStatus> {
    fetch_json(get("/api/auth/status/")).await
}

pub async fn logout() -> ApiResult<()> {
    send_unit(post("/api/auth/logout/")).await
}

pub async fn demo_login(account: DemoAccount) -> ApiResult<LoginResponse> {
    send_json(post("/api/auth/demo/login/"), &DemoLoginArgs { demo_user: account }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_login_body_uses_camel_case_code() {
        let body = serde_json::to_value(HostLoginArgs {
            authorization_code: "abc",
            referrer: "https://app/",
        })
        .unwrap();
        assert_eq!(body["authorizationCode"], "abc");
        assert_eq!(body["referrer"], "https://app/");
    }
}
