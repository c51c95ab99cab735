//! Recommend Screen Component
//!
//! Ranked list with count selector, title search and feedback banner.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api::HttpBackend;
use crate::config::{ACTION_DEBOUNCE_MS, FEEDBACK_BANNER_MS};
use crate::context::AppContext;
use crate::debounce::{BrowserSchedule, Debouncer};
use crate::models::{RecipeAction, Recommendation};
use crate::screens::cook_time_label;
use crate::screens::recommend::{
    coverage_line, missing_summary, FeedbackBanner, ListMode, RecommendController,
    RecommendState, ResultCount,
};

#[component]
pub fn RecommendScreen() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = RwSignal::new(RecommendState::default());
    let ctrl = RecommendController::new(HttpBackend, state);
    let (query, set_query) = signal(String::new());

    // Cook/skip taps collapse into one call per burst
    let actions = StoredValue::new_local(Debouncer::new(
        ACTION_DEBOUNCE_MS,
        BrowserSchedule,
        move |(recipe_id, action, title): (u32, RecipeAction, String)| {
            spawn_local(async move { ctrl.act(recipe_id, action, title).await });
        },
    ));
    // Leaving the screen still records a pending tap
    on_cleanup(move || {
        actions.try_with_value(|d| d.flush());
    });
    let on_action = Callback::new(move |(recipe_id, action, title): (u32, RecipeAction, String)| {
        actions.with_value(|d| d.call((recipe_id, action, title)));
    });
    let on_save = Callback::new(move |(recipe_id, title): (u32, String)| {
        spawn_local(async move { ctrl.save(recipe_id, title).await });
    });

    // Pantry edits elsewhere force a refetch
    Effect::new(move |_| {
        let revision = ctx.pantry_revision.get();
        spawn_local(async move {
            ctrl.sync_pantry(revision).await;
        });
    });

    // Banner self-expires; a newer banner is left alone
    let banner_id = Memo::new(move |_| state.with(|s| s.banner.as_ref().map(|b| b.id)));
    Effect::new(move |_| {
        if let Some(id) = banner_id.get() {
            Timeout::new(FEEDBACK_BANNER_MS, move || ctrl.dismiss_banner(id)).forget();
        }
    });

    let run_search = move || {
        let q = query.get_untracked();
        spawn_local(async move { ctrl.search(&q).await });
    };

    let items = Memo::new(move |_| state.with(|s| s.items.clone()));
    let mode = Memo::new(move |_| state.with(|s| s.mode.clone()));

    view! {
        <div class="page">
            <div class="card header-card">
                <h2 class="title">"냉장고 한끼"</h2>
                <p class="sub">"냉장고 재료 기반 맞춤 레시피 추천"</p>

                <div class="row mt12">
                    <label class="label">"추천 개수"</label>
                    <select
                        class="select"
                        prop:value=move || state.with(|s| s.top.get().to_string())
                        on:change=move |ev| {
                            let top = event_target_value(&ev)
                                .parse::<u32>()
                                .ok()
                                .and_then(ResultCount::from_value)
                                .unwrap_or_default();
                            spawn_local(async move { ctrl.set_top(top).await });
                        }
                    >
                        {ResultCount::ALL.into_iter().map(|count| view! {
                            <option value=count.get().to_string()>{format!("{}개", count.get())}</option>
                        }).collect_view()}
                    </select>
                    <button class="btn ghost" on:click=move |_| spawn_local(async move { ctrl.load().await; })>
                        "새로고침"
                    </button>
                </div>

                <div class="row mt12 gap8">
                    <input
                        class="input flex-grow"
                        placeholder="레시피 제목 검색..."
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                run_search();
                            }
                        }
                    />
                    <button class="btn primary" on:click=move |_| run_search()>"검색"</button>
                    <Show when=move || mode.with(ListMode::is_search)>
                        <button
                            class="btn ghost"
                            on:click=move |_| {
                                set_query.set(String::new());
                                spawn_local(async move { ctrl.reset_search().await });
                            }
                        >
                            "초기화"
                        </button>
                    </Show>
                </div>
                {move || match mode.get() {
                    ListMode::Search { query } => Some(view! {
                        <p class="tiny muted mt8">
                            {format!("\"{}\" 검색 결과 ({}건)", query, items.with(Vec::len))}
                        </p>
                    }),
                    ListMode::Recommend => None,
                }}
            </div>

            {move || state.with(|s| s.banner.clone()).map(|banner| view! { <FeedbackBannerView banner=banner /> })}

            <Show when=move || state.with(|s| s.loading)>
                <p class="center muted mt16">"불러오는 중..."</p>
            </Show>
            {move || state.with(|s| s.error.clone()).map(|err| view! {
                <p class="center error mt16">{err}</p>
            })}

            <div class="list mt12">
                {move || {
                    let mode = mode.get();
                    items.get()
                        .into_iter()
                        .map(|item| view! {
                            <RecipeCard
                                item=item
                                mode=mode.clone()
                                on_save=on_save
                                on_action=on_action
                            />
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn FeedbackBannerView(banner: FeedbackBanner) -> impl IntoView {
    let title = (!banner.title.is_empty()).then(|| view! {
        " — " <em>{banner.title.clone()}</em>
    });
    view! {
        <div class="feedback-banner mt8">
            <span class="feedback-icon">"✓"</span>
            <span>
                <strong>{banner.headline()}</strong>
                {title}
                {banner.detail().map(|detail| view! { <div class="tiny muted mt4">{detail}</div> })}
            </span>
        </div>
    }
}

#[component]
fn RecipeCard(
    item: Recommendation,
    mode: ListMode,
    on_save: Callback<(u32, String)>,
    on_action: Callback<(u32, RecipeAction, String)>,
) -> impl IntoView {
    let id = item.recipe_id;
    let title = item.title.clone();
    let coverage = coverage_line(&item, &mode);
    let shopping = item.shopping_list.clone();

    let action_button = move |action: RecipeAction, class: &'static str| {
        let title = title.clone();
        view! {
            <button
                type="button"
                class=class
                on:click=move |ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    on_action.run((id, action, title.clone()));
                }
            >
                {action.label()}
            </button>
        }
    };
    let save_title = item.title.clone();

    view! {
        <A href=format!("/recipes/{}", id) attr:class="card recipe-card-link">
            <div class="card recipe-card">
                <div class="recipe-image-placeholder">
                    {match item.image_url.clone().filter(|u| !u.is_empty()) {
                        Some(src) => view! { <img src=src alt=item.title.clone() class="recipe-image" /> }.into_any(),
                        None => view! { <span>"🍽️"</span> }.into_any(),
                    }}
                </div>

                <div class="row space-between">
                    <h3 class="recipe-title">{item.title.clone()}</h3>
                    <span class="pill">{cook_time_label(item.cook_time_min)}</span>
                </div>

                <div class="badge-wrap mt8">
                    {item.reasons.iter().take(3).map(|reason| view! {
                        <span class="badge">{reason.clone()}</span>
                    }).collect_view()}
                </div>

                <p class="meta mt8">{format!("부족 재료: {}", missing_summary(&item.missing_ingredients))}</p>

                {(!shopping.is_empty()).then(|| view! {
                    <details class="meta mt8 shopping-details" on:click=|ev| ev.stop_propagation()>
                        <summary>{format!("장보기 목록 ({}개)", shopping.len())}</summary>
                        <ul class="shopping-list" on:click=|ev| { ev.prevent_default(); ev.stop_propagation(); }>
                            {shopping.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}
                        </ul>
                    </details>
                })}

                {coverage.map(|line| view! { <p class="tiny muted mt4">{line}</p> })}

                <div class="row space-between mt12 align-center">
                    <button
                        type="button"
                        class="btn"
                        on:click=move |ev| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            on_save.run((id, save_title.clone()));
                        }
                    >
                        "저장"
                    </button>
                    <div class="row gap8">
                        {action_button(RecipeAction::Cook, "btn primary")}
                        {action_button(RecipeAction::Skip, "btn ghost")}
                    </div>
                </div>
            </div>
        </A>
    }
}
