//! Bottom Navigation Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::AuthContext;
use crate::context::{AppContext, Tab};

#[component]
pub fn BottomNav() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let auth = use_context::<AuthContext>().expect("AuthContext should be provided");

    let is_admin = Memo::new(move |_| auth.state.with(|s| s.is_admin()));
    let current = move || ctx.active_tab.get().resolve(is_admin.get());

    let logout_title = move || {
        let nickname = auth.state.with(|s| {
            s.session()
                .and_then(|session| session.nickname.clone())
                .unwrap_or_default()
        });
        format!("{} 로그아웃", nickname).trim_start().to_string()
    };

    view! {
        <nav class="bottom-nav">
            {move || Tab::visible(is_admin.get()).into_iter().map(|tab| view! {
                <button
                    class=move || if current() == tab { "nav-btn active" } else { "nav-btn" }
                    on:click=move |_| ctx.select_tab(tab)
                >
                    {tab.label()}
                </button>
            }).collect_view()}
            <button
                class="nav-btn logout"
                title=logout_title
                on:click=move |_| spawn_local(async move { auth.logout().await })
            >
                "로그아웃"
            </button>
        </nav>
    }
}
