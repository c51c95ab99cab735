//! Pantry Screen Component
//!
//! Add form, item list with inline quantity/expiry edit, and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpBackend;
use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::dialog;
use crate::models::PantryItem;
use crate::screens::pantry::{edit_patch, expiry_suffix, PantryController, PantryDraft, PantryState, Unit};

#[component]
pub fn PantryScreen() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = RwSignal::new(PantryState::default());
    let ctrl = PantryController::new(HttpBackend, state, ctx);
    let draft = RwSignal::new(PantryDraft::default());
    let (editing, set_editing) = signal::<Option<u32>>(None);

    spawn_local(async move { ctrl.load().await });

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        spawn_local(async move {
            match ctrl.add(&current).await {
                Ok(()) => {
                    draft.try_set(current.cleared());
                }
                Err(message) => dialog::alert(&message),
            }
        });
    };

    let on_delete = Callback::new(move |id: u32| {
        spawn_local(async move {
            if let Err(message) = ctrl.delete(id).await {
                dialog::alert(&message);
            }
        });
    });

    let on_update = Callback::new(move |(id, quantity, expires): (u32, String, String)| {
        let patch = match edit_patch(&quantity, &expires) {
            Ok(patch) => patch,
            Err(err) => {
                dialog::alert(&err.to_string());
                return;
            }
        };
        spawn_local(async move {
            match ctrl.update(id, patch).await {
                Ok(()) => {
                    set_editing.try_set(None);
                }
                Err(message) => dialog::alert(&message),
            }
        });
    });

    view! {
        <div class="page">
            <div class="card">
                <h2 class="title">"냉장고 재료 추가"</h2>
                <form class="mt12" on:submit=on_add>
                    <div class="row gap8">
                        <input
                            type="text"
                            class="input flex-grow"
                            placeholder="재료 이름 (예: 계란)"
                            prop:value=move || draft.with(|d| d.name.clone())
                            on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                        />
                        <input
                            type="number"
                            class="input amount-input"
                            placeholder="수량"
                            prop:value=move || draft.with(|d| d.amount.clone())
                            on:input=move |ev| draft.update(|d| d.amount = event_target_value(&ev))
                        />
                        <select
                            class="select"
                            prop:value=move || draft.with(|d| d.unit.map(Unit::suffix).unwrap_or_default().to_string())
                            on:change=move |ev| draft.update(|d| d.unit = Unit::from_suffix(&event_target_value(&ev)))
                        >
                            {Unit::ALL.into_iter().map(|unit| view! {
                                <option value=unit.suffix()>{unit.suffix()}</option>
                            }).collect_view()}
                        </select>
                        <input
                            type="date"
                            class="input date-input"
                            prop:value=move || draft.with(|d| d.expires_at.clone())
                            on:input=move |ev| draft.update(|d| d.expires_at = event_target_value(&ev))
                        />
                        <button type="submit" class="btn primary">"추가"</button>
                    </div>
                </form>
            </div>

            <div class="card mt16">
                <h2 class="title">"내 냉장고"</h2>
                <Show when=move || state.with(|s| s.loading)>
                    <p class="center muted mt16">"불러오는 중..."</p>
                </Show>
                {move || state.with(|s| s.error.clone()).map(|err| view! {
                    <p class="center error mt16">{err}</p>
                })}
                <Show when=move || state.with(|s| !s.loading && s.error.is_none() && s.items.is_empty())>
                    <p class="center muted mt16">"냉장고에 재료가 없습니다."</p>
                </Show>

                <ul class="pantry-list mt12">
                    <For
                        each=move || state.with(|s| s.items.clone())
                        key=|item| (item.id, item.quantity_text.clone(), item.expires_at.clone())
                        children=move |item| view! {
                            <PantryRow
                                item=item
                                editing=editing
                                set_editing=set_editing
                                on_update=on_update
                                on_delete=on_delete
                            />
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

#[component]
fn PantryRow(
    item: PantryItem,
    editing: ReadSignal<Option<u32>>,
    set_editing: WriteSignal<Option<u32>>,
    on_update: Callback<(u32, String, String)>,
    on_delete: Callback<u32>,
) -> impl IntoView {
    let id = item.id;
    let (quantity, set_quantity) = signal(item.quantity_text.clone());
    let (expires, set_expires) = signal(item.expires_at.clone().unwrap_or_default());
    let suffix = expiry_suffix(&item);

    view! {
        <li class="pantry-item">
            <span class="pantry-item-name">{item.ingredient_name.clone()}</span>
            {move || if editing.get() == Some(id) {
                view! {
                    <span class="pantry-item-edit">
                        <input
                            type="text"
                            class="input small"
                            prop:value=move || quantity.get()
                            on:input=move |ev| set_quantity.set(event_target_value(&ev))
                        />
                        <input
                            type="date"
                            class="input small"
                            prop:value=move || expires.get()
                            on:input=move |ev| set_expires.set(event_target_value(&ev))
                        />
                        <button
                            class="confirm-btn"
                            on:click=move |_| on_update.run((id, quantity.get_untracked(), expires.get_untracked()))
                        >
                            "✓"
                        </button>
                        <button class="cancel-btn" on:click=move |_| set_editing.set(None)>"✗"</button>
                    </span>
                }.into_any()
            } else {
                let suffix = suffix.clone();
                view! {
                    <span class="pantry-item-quantity" on:click=move |_| set_editing.set(Some(id))>
                        {move || quantity.get()}
                    </span>
                    {suffix.map(|s| view! { <span class="pantry-item-expires">{s}</span> })}
                }.into_any()
            }}
            <DeleteConfirmButton button_class="btn-delete" on_confirm=Callback::new(move |_| on_delete.run(id)) />
        </li>
    }
}
