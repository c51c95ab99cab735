//! Recipe Detail Page Component
//!
//! Route `/recipes/:id`. Shown without the bottom navigation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use leptos_router::NavigateOptions;

use crate::api::HttpBackend;
use crate::dialog;
use crate::models::{RecipeAction, RecipeDetail};
use crate::screens::detail::{DetailController, DetailState, DetailView};

#[component]
pub fn RecipeDetailPage() -> impl IntoView {
    let params = use_params_map();
    let navigate = use_navigate();
    let state = RwSignal::new(DetailState::default());
    let ctrl = DetailController::new(HttpBackend, state);

    let recipe_id = Memo::new(move |_| {
        params.with(|p| p.get("id").and_then(|id| id.parse::<u32>().ok()))
    });

    Effect::new(move |_| match recipe_id.get() {
        Some(id) => spawn_local(async move { ctrl.load(id).await }),
        None => {
            state.set(DetailState {
                view: DetailView::NotFound,
                ..DetailState::default()
            });
        }
    });

    let go_back = {
        let navigate = navigate.clone();
        move |_: web_sys::MouseEvent| {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ = history.back();
            } else {
                navigate("/", NavigateOptions::default());
            }
        }
    };

    let toggle_save = move |_: web_sys::MouseEvent| {
        let Some(id) = recipe_id.get_untracked() else { return };
        spawn_local(async move {
            if let Err(message) = ctrl.toggle_save(id).await {
                dialog::alert(&message);
            }
        });
    };

    let act = StoredValue::new_local(move |action: RecipeAction| {
        let Some(id) = recipe_id.get_untracked() else { return };
        let navigate = navigate.clone();
        spawn_local(async move {
            match ctrl.act(id, action).await {
                Ok(()) => navigate("/", NavigateOptions::default()),
                Err(message) => dialog::alert(&message),
            }
        });
    });

    let page = Memo::new(move |_| state.with(|s| s.view.clone()));

    move || match page.get() {
        DetailView::Loading => view! { <div class="page center">"로딩중..."</div> }.into_any(),
        DetailView::NotFound => {
            view! { <div class="page center">"레시피를 찾을 수 없습니다."</div> }.into_any()
        }
        DetailView::Ready(recipe) => {
            let go_back = go_back.clone();
            view! {
                <div class="page recipe-detail-page">
                    <div class="header">
                        <button class="back-btn" on:click=go_back>"←"</button>
                    </div>
                    <RecipeBody recipe=recipe />
                    <div class="cta-bar">
                        <button
                            class=move || if state.with(|s| s.is_saved) { "btn" } else { "btn primary" }
                            disabled=move || state.with(|s| s.saving)
                            on:click=toggle_save
                        >
                            {move || if state.with(|s| s.is_saved) { "저장해제" } else { "저장" }}
                        </button>
                        <button class="btn primary" on:click=move |_| act.with_value(|f| f(RecipeAction::Cook))>
                            {RecipeAction::Cook.label()}
                        </button>
                        <button class="btn ghost" on:click=move |_| act.with_value(|f| f(RecipeAction::Skip))>
                            {RecipeAction::Skip.label()}
                        </button>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn RecipeBody(recipe: RecipeDetail) -> impl IntoView {
    let hero = recipe.image_url.clone().filter(|u| !u.is_empty());
    let steps = recipe.steps.clone();

    view! {
        <div class="card">
            {match hero {
                Some(src) => view! { <img src=src alt=recipe.title.clone() class="recipe-hero-image" /> }.into_any(),
                None => view! {
                    <div class="recipe-hero-placeholder">
                        <span class="hero-glyph">"🍽️"</span>
                        <span class="tiny muted">"이미지 없음"</span>
                    </div>
                }.into_any(),
            }}
            <h2 class="title mt16">{recipe.title.clone()}</h2>

            <div class="badge-wrap mt8">
                {recipe.reasons.iter().map(|reason| view! {
                    <span class="badge">{reason.clone()}</span>
                }).collect_view()}
            </div>

            <h3 class="mt16">"재료"</h3>
            <div class="ingredients-box mt8">{recipe.raw_ingredients.clone().unwrap_or_default()}</div>

            <h3 class="mt16">"만드는 방법"</h3>
            <ol class="list-decimal mt8 pl20">
                {steps.into_iter().enumerate().map(|(index, step)| {
                    let number = step.step_no.unwrap_or(index as u32 + 1);
                    let image = step.image().map(str::to_string);
                    view! {
                        <li class="mb12">
                            <p>{step.description.clone()}</p>
                            {image.map(|src| view! {
                                <img src=src alt=format!("Step {}", number) class="recipe-step-image mt8" />
                            })}
                        </li>
                    }
                }).collect_view()}
            </ol>

            {recipe.source.clone().filter(|s| !s.is_empty()).map(|source| view! {
                <div class="source-box mt16">{format!("출처: {}", source)}</div>
            })}
        </div>
    }
}
