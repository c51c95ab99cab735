//! Saved Screen Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api::HttpBackend;
use crate::dialog;
use crate::screens::cook_time_label;
use crate::screens::saved::{SavedController, SavedState};

#[component]
pub fn SavedScreen() -> impl IntoView {
    let state = RwSignal::new(SavedState::default());
    let ctrl = SavedController::new(HttpBackend, state);

    spawn_local(async move { ctrl.load().await });

    let unsave = move |ev: web_sys::MouseEvent, recipe_id: u32| {
        ev.prevent_default();
        ev.stop_propagation();
        if !dialog::confirm("저장함에서 삭제하시겠습니까?") {
            return;
        }
        spawn_local(async move {
            if let Err(message) = ctrl.unsave(recipe_id).await {
                dialog::alert(&message);
            }
        });
    };

    view! {
        <div class="page">
            <div class="card header-card">
                <h2 class="title">"저장한 레시피"</h2>
                <p class="sub">"다시 보고 싶은 레시피를 저장해두세요."</p>
            </div>

            <Show when=move || state.with(|s| s.loading)>
                <p class="center muted mt16">"불러오는 중..."</p>
            </Show>
            {move || state.with(|s| s.error.clone()).map(|err| view! {
                <p class="center error mt16">{err}</p>
            })}
            <Show when=move || state.with(|s| !s.loading && s.error.is_none() && s.items.is_empty())>
                <p class="center muted mt16">"저장된 레시피가 없습니다."</p>
            </Show>

            <div class="list mt12">
                <For
                    each=move || state.with(|s| s.items.clone())
                    key=|r| r.recipe_id
                    children=move |r| {
                        let id = r.recipe_id;
                        view! {
                            <div class="card recipe-card">
                                <A href=format!("/recipes/{}", id) attr:class="recipe-card-link">
                                    <div class="recipe-image-placeholder">
                                        {match r.image_url.clone().filter(|u| !u.is_empty()) {
                                            Some(src) => view! { <img src=src alt=r.title.clone() class="recipe-image" /> }.into_any(),
                                            None => view! { <span>"🍽️"</span> }.into_any(),
                                        }}
                                    </div>
                                    <div class="row space-between">
                                        <h3 class="recipe-title">{r.title.clone()}</h3>
                                        <span class="pill">{cook_time_label(r.cook_time_min)}</span>
                                    </div>
                                </A>
                                <div class="row space-between mt12 align-center">
                                    <span></span>
                                    <button class="btn ghost" on:click=move |ev| unsave(ev, id)>
                                        "저장 취소"
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
