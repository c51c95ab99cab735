//! My Recipes Screen Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpBackend;
use crate::components::AddRecipeForm;
use crate::config::SEARCH_DEBOUNCE_MS;
use crate::debounce::{BrowserSchedule, Debouncer};
use crate::dialog;
use crate::models::UserRecipe;
use crate::screens::cook_time_label;
use crate::screens::my_recipes::{MyRecipesController, MyRecipesState};

#[component]
pub fn MyRecipesScreen() -> impl IntoView {
    let state = RwSignal::new(MyRecipesState::default());
    let ctrl = MyRecipesController::new(HttpBackend, state);

    let search = StoredValue::new_local(Debouncer::new(
        SEARCH_DEBOUNCE_MS,
        BrowserSchedule,
        move |query: String| spawn_local(async move { ctrl.load(&query).await }),
    ));

    on_cleanup(move || {
        search.try_with_value(|d| d.cancel());
    });

    spawn_local(async move { ctrl.load("").await });

    let on_delete = Callback::new(move |id: u32| {
        if !dialog::confirm("레시피를 삭제하시겠습니까?") {
            return;
        }
        spawn_local(async move {
            match ctrl.delete(id).await {
                Ok(()) => dialog::alert("레시피 삭제 완료!"),
                Err(message) => dialog::alert(&message),
            }
        });
    });

    view! {
        <div class="page">
            <AddRecipeForm ctrl=ctrl state=state />

            <div class="card mt16">
                <h2 class="title">"내가 등록한 레시피"</h2>
                <input
                    type="search"
                    class="input mt12"
                    placeholder="제목으로 검색"
                    prop:value=move || state.with(|s| s.query.clone())
                    on:input=move |ev| {
                        let query = event_target_value(&ev);
                        ctrl.set_query(query.clone());
                        search.with_value(|d| d.call(query));
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            search.with_value(|d| d.flush());
                        }
                    }
                />

                <Show when=move || state.with(|s| s.loading)>
                    <p class="center muted mt16">"불러오는 중..."</p>
                </Show>
                {move || state.with(|s| s.error.clone()).map(|err| view! {
                    <p class="center error mt16">{err}</p>
                })}
                <Show when=move || state.with(|s| !s.loading && s.error.is_none() && s.items.is_empty())>
                    <p class="center muted mt16">"등록된 레시피가 없습니다."</p>
                </Show>

                <div class="list mt12">
                    <For
                        each=move || state.with(|s| s.items.clone())
                        key=|r| r.id
                        children=move |recipe| view! { <MyRecipeRow recipe=recipe on_delete=on_delete /> }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn MyRecipeRow(recipe: UserRecipe, on_delete: Callback<u32>) -> impl IntoView {
    let id = recipe.id;
    let thumbnail = recipe.thumbnail().map(str::to_string);

    view! {
        <div class="card recipe-card">
            <div class="recipe-image-placeholder">
                {match thumbnail {
                    Some(src) => view! { <img src=src alt=recipe.title.clone() class="recipe-image" /> }.into_any(),
                    None => view! { <span>"🍽️"</span> }.into_any(),
                }}
            </div>
            <div class="row space-between">
                <h3 class="recipe-title">{recipe.title.clone()}</h3>
                <span class="pill">{cook_time_label(recipe.cook_time_min)}</span>
            </div>
            <div class="row space-between mt12 align-center">
                <span class=if recipe.is_public { "badge" } else { "badge muted" }>
                    {if recipe.is_public { "공개 레시피" } else { "비공개 레시피" }}
                </span>
                <button class="btn ghost" on:click=move |_| on_delete.run(id)>"삭제"</button>
            </div>
        </div>
    }
}
