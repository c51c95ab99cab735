//! Login Screen Component
//!
//! Host app login plus demo accounts for browsing outside the host.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{AuthContext, AuthState};
use crate::models::DemoAccount;

#[component]
pub fn LoginScreen() -> impl IntoView {
    let auth = use_context::<AuthContext>().expect("AuthContext should be provided");
    let (busy, set_busy) = signal(false);
    let (local_error, set_local_error) = signal::<Option<String>>(None);

    let error = move || {
        local_error.get().or_else(|| {
            auth.state.with(|s| match s {
                AuthState::LoggedOut { error } => error.clone(),
                _ => None,
            })
        })
    };

    let host_login = move |_: web_sys::MouseEvent| {
        if !auth.host_app.get_untracked() {
            set_local_error.set(Some("토스 앱 환경에서만 사용 가능합니다.".to_string()));
            return;
        }
        set_local_error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            auth.refresh().await;
            set_busy.try_set(false);
        });
    };

    let demo_login = move |account: DemoAccount| {
        set_local_error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            let result = auth.demo_login(account).await;
            set_busy.try_set(false);
            if let Err(message) = result {
                set_local_error.try_set(Some(message));
            }
        });
    };

    view! {
        <div class="page login-page center">
            <div class="login-logo">"🍳"</div>
            <h1 class="title">"오늘 뭐 먹지?"</h1>
            <p class="sub">"냉장고 재료로 만들 수 있는 레시피를 추천해드려요."</p>

            <button
                class="btn primary full mt16"
                disabled=move || busy.get() || !auth.host_app.get()
                on:click=host_login
            >
                {move || if busy.get() { "로그인 중..." } else { "토스로 로그인" }}
            </button>
            <Show when=move || !auth.host_app.get()>
                <p class="tiny muted mt4">"토스 앱 환경에서 사용 가능"</p>
            </Show>

            <div class="demo-login mt16">
                <button
                    class="btn full"
                    disabled=move || busy.get()
                    on:click=move |_| demo_login(DemoAccount::User)
                >
                    {move || if busy.get() { "로그인 중..." } else { "데모 사용자로 시작" }}
                </button>
                <button
                    class="btn ghost full mt8"
                    disabled=move || busy.get()
                    on:click=move |_| demo_login(DemoAccount::Admin)
                >
                    {move || if busy.get() { "로그인 중..." } else { "데모 관리자로 시작" }}
                </button>
            </div>

            {move || error().map(|message| view! { <p class="error-text mt12">{message}</p> })}
        </div>
    }
}
