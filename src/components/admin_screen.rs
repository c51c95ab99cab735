//! Admin Screen Component
//!
//! KPI cards plus the per-recipe score inspector.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpBackend;
use crate::config::DEMO_USERS;
use crate::models::{RecipeDebug, Recommendation};
use crate::screens::admin::{
    conversion_summary, debug_label, debug_value, kpi_count, kpi_rate, AdminController, AdminState,
    PanelState,
};
use crate::screens::cook_time_label;

#[component]
pub fn AdminScreen() -> impl IntoView {
    let state = RwSignal::new(AdminState::default());
    let ctrl = AdminController::new(HttpBackend, state);
    let (query, set_query) = signal(String::new());

    spawn_local(async move { ctrl.load_stats().await });

    let run_search = move || {
        let q = query.get_untracked();
        spawn_local(async move { ctrl.search(&q).await });
    };

    let on_toggle = Callback::new(move |recipe_id: u32| {
        spawn_local(async move { ctrl.toggle_debug(recipe_id).await });
    });

    view! {
        <div class="page">
            <div class="card header-card">
                <h2 class="title">"관리자 대시보드"</h2>
            </div>

            <div class="kpi-grid mt12">
                <KpiCard label="총 레시피 수" value=Signal::derive(move || state.with(|s| kpi_count(s.stats.status.as_ref().and_then(|st| st.recipes_total))))/>
                <KpiCard label="총 사용자 수" value=Signal::derive(move || state.with(|s| kpi_count(s.stats.status.as_ref().and_then(|st| st.users))))/>
                <KpiCard label="Pantry 아이템" value=Signal::derive(move || state.with(|s| kpi_count(s.stats.status.as_ref().and_then(|st| st.pantry_items))))/>
                <KpiCard label="추천 전환율" value=Signal::derive(move || state.with(|s| kpi_rate(s.stats.conversion.as_ref())))/>
            </div>

            {move || state.with(|s| {
                if s.stats.loading {
                    Some(view! { <p class="center muted mt8">"통계 불러오는 중..."</p> }.into_any())
                } else if let Some(err) = s.stats.error.clone() {
                    Some(view! { <p class="error-text mt8">{err}</p> }.into_any())
                } else {
                    s.stats.conversion.as_ref().map(|c| {
                        view! { <p class="tiny muted mt8">{conversion_summary(c)}</p> }.into_any()
                    })
                }
            })}

            <div class="card mt16">
                <h2 class="title">"추천 디버그"</h2>
                <div class="row gap8 mt12">
                    {DEMO_USERS.into_iter().map(|user| view! {
                        <button
                            class=move || if state.with(|s| s.demo_user == user) { "btn primary" } else { "btn" }
                            on:click=move |_| ctrl.select_demo_user(user)
                        >
                            {format!("demo{}", user)}
                        </button>
                    }).collect_view()}
                </div>
                <div class="row gap8 mt12">
                    <input
                        type="text"
                        class="input flex-grow"
                        placeholder="레시피 제목 검색"
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                run_search();
                            }
                        }
                    />
                    <button
                        class="btn primary"
                        disabled=move || state.with(|s| s.searching)
                        on:click=move |_| run_search()
                    >
                        {move || if state.with(|s| s.searching) { "검색 중..." } else { "검색" }}
                    </button>
                </div>

                {move || state.with(|s| s.search_error.clone()).map(|err| view! {
                    <p class="error-text mt8">{err}</p>
                })}
                <div class="list mt12">
                    <For
                        each=move || state.with(|s| s.results.clone())
                        key=|r| r.recipe_id
                        children=move |recipe| view! {
                            <DebugCard recipe=recipe state=state on_toggle=on_toggle />
                        }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn KpiCard(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="card kpi-card">
            <div class="tiny muted">{label}</div>
            <div class="kpi-value">{move || value.get()}</div>
        </div>
    }
}

#[component]
fn DebugCard(
    recipe: Recommendation,
    state: RwSignal<AdminState>,
    on_toggle: Callback<u32>,
) -> impl IntoView {
    let id = recipe.recipe_id;
    let panel = Memo::new(move |_| state.with(|s| s.panels.get(&id).cloned()));

    view! {
        <div class="card debug-card">
            <div class="row space-between align-center">
                <div>
                    <h3 class="recipe-title">{recipe.title.clone()}</h3>
                    <span class="tiny muted">{format!("ID {} · {}", id, cook_time_label(recipe.cook_time_min))}</span>
                </div>
                <button
                    class="btn ghost"
                    disabled=move || matches!(panel.get(), Some(PanelState::Loading))
                    on:click=move |_| on_toggle.run(id)
                >
                    {move || match panel.get() {
                        Some(PanelState::Loading) => "로딩...",
                        Some(_) => "디버그 닫기",
                        None => "디버그 보기",
                    }}
                </button>
            </div>
            {move || match panel.get() {
                None | Some(PanelState::Loading) => None,
                Some(PanelState::Failed(message)) => {
                    Some(view! { <p class="error-text mt8">{message}</p> }.into_any())
                }
                Some(PanelState::Loaded(debug)) => Some(view! { <DebugPanel debug=debug /> }.into_any()),
            }}
        </div>
    }
}

#[component]
fn DebugPanel(debug: RecipeDebug) -> impl IntoView {
    let rows: Vec<(String, String)> = debug
        .debug
        .iter()
        .flatten()
        .map(|(key, value)| (debug_label(key).to_string(), debug_value(value)))
        .collect();

    view! {
        <div class="debug-panel mt8">
            <div class="row gap8">
                <span class="pill">{format!("점수 {:.3}", debug.score)}</span>
                <span class="pill">{format!("커버리지 {:.1}%", debug.coverage * 100.0)}</span>
                <span class="pill">{format!("저장 {}", if debug.saved { "예" } else { "아니오" })}</span>
            </div>
            {(!rows.is_empty()).then(|| view! {
                <table class="debug-table mt8">
                    <tbody>
                        {rows.into_iter().map(|(label, value)| view! {
                            <tr><td>{label}</td><td>{value}</td></tr>
                        }).collect_view()}
                    </tbody>
                </table>
            })}
            <ListLine label="추천 이유" values=debug.reasons.clone() />
            <ListLine label="부족한 재료" values=debug.missing_ingredients.clone() />
            <ListLine label="장보기" values=debug.shopping_list.clone() />
        </div>
    }
}

#[component]
fn ListLine(label: &'static str, values: Vec<String>) -> impl IntoView {
    (!values.is_empty()).then(|| view! {
        <p class="tiny mt4">
            <strong>{label}</strong>
            {format!(": {}", values.join(", "))}
        </p>
    })
}
