//! Hankki Frontend App
//!
//! Session gate, router, and the tabbed shell.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;

use crate::api::HttpBackend;
use crate::auth::{AuthContext, AuthController, AuthState, TossBridge};
use crate::components::{
    AdminScreen, BottomNav, LoginScreen, MyRecipesScreen, PantryScreen, RecipeDetailPage,
    RecommendScreen, SavedScreen,
};
use crate::context::{AppContext, Tab};

/// Coarse auth phase; switching on it avoids rebuilding the shell when
/// only session details change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    LoggedOut,
    LoggedIn,
}

#[component]
pub fn App() -> impl IntoView {
    let auth: AuthContext = AuthController::new(HttpBackend, TossBridge);
    provide_context(auth);
    provide_context(AppContext::new(signal(0u32), signal(Tab::default())));

    spawn_local(async move { auth.refresh().await });

    let phase = Memo::new(move |_| {
        auth.state.with(|s| match s {
            AuthState::Loading => Phase::Loading,
            AuthState::LoggedOut { .. } => Phase::LoggedOut,
            AuthState::LoggedIn(_) => Phase::LoggedIn,
        })
    });

    move || match phase.get() {
        Phase::Loading => view! {
            <div class="page center splash">
                <div class="login-logo">"🍳"</div>
                <p class="muted mt8">"로그인 확인 중..."</p>
            </div>
        }
        .into_any(),
        Phase::LoggedOut => view! { <LoginScreen /> }.into_any(),
        Phase::LoggedIn => view! {
            <Router>
                <Shell />
            </Router>
        }
        .into_any(),
    }
}

#[component]
fn Shell() -> impl IntoView {
    let location = use_location();
    let on_home = move || location.pathname.get() == "/";

    view! {
        <div class="app-layout">
            <main class="app-main">
                <Routes fallback=|| view! { <div class="page center">"페이지를 찾을 수 없습니다."</div> }>
                    <Route path=path!("/") view=TabContent />
                    <Route path=path!("/recipes/:id") view=RecipeDetailPage />
                </Routes>
            </main>
            <Show when=on_home>
                <BottomNav />
            </Show>
        </div>
    }
}

#[component]
fn TabContent() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let auth = use_context::<AuthContext>().expect("AuthContext should be provided");
    let tab = Memo::new(move |_| ctx.active_tab.get().resolve(auth.state.with(|s| s.is_admin())));

    move || match tab.get() {
        Tab::Recommend => view! { <RecommendScreen /> }.into_any(),
        Tab::Saved => view! { <SavedScreen /> }.into_any(),
        Tab::Pantry => view! { <PantryScreen /> }.into_any(),
        Tab::MyRecipes => view! { <MyRecipesScreen /> }.into_any(),
        Tab::Admin => view! { <AdminScreen /> }.into_any(),
    }
}
