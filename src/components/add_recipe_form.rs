//! Add Recipe Form Component
//!
//! Title, cook time, ingredients, thumbnail, numbered steps with optional
//! images, and a public toggle. Image previews are local object URLs.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{File, HtmlInputElement, Url};

use crate::api::HttpBackend;
use crate::dialog;
use crate::recipe_form::{Attachment, RecipeForm};
use crate::screens::my_recipes::{MyRecipesController, MyRecipesState};

/// First file of a file input, with a fresh preview URL
fn pick_attachment(ev: &web_sys::Event) -> Option<Attachment<File>> {
    let input: HtmlInputElement = event_target(ev);
    let file = input.files()?.get(0)?;
    let preview_url = Url::create_object_url_with_blob(&file).ok()?;
    Some(Attachment { file, preview_url })
}

fn revoke(attachment: &Attachment<File>) {
    let _ = Url::revoke_object_url(&attachment.preview_url);
}

fn revoke_all(form: &RecipeForm<File>) {
    form.thumbnail.iter().for_each(revoke);
    form.steps.iter().filter_map(|s| s.image.as_ref()).for_each(revoke);
}

#[component]
pub fn AddRecipeForm(
    ctrl: MyRecipesController<HttpBackend>,
    state: RwSignal<MyRecipesState>,
) -> impl IntoView {
    let form = RwSignal::new_local(RecipeForm::<File>::default());
    let thumbnail_ref: NodeRef<html::Input> = NodeRef::new();
    let step_count = Memo::new(move |_| form.with(|f| f.steps.len()));

    let clear_thumbnail = move |_: web_sys::MouseEvent| {
        form.update(|f| {
            if let Some(old) = f.thumbnail.take() {
                revoke(&old);
            }
        });
        if let Some(input) = thumbnail_ref.get() {
            input.set_value("");
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let snapshot = form.get_untracked();
        spawn_local(async move {
            match ctrl.create(&snapshot).await {
                Ok(_) => {
                    dialog::alert("레시피 등록 완료!");
                    form.try_update(|f| {
                        revoke_all(f);
                        *f = RecipeForm::default();
                    });
                    if let Some(input) = thumbnail_ref.get_untracked() {
                        input.set_value("");
                    }
                }
                Err(message) => dialog::alert(&message),
            }
        });
    };

    view! {
        <div class="card">
            <h2 class="title">"레시피 등록"</h2>
            <form class="mt12 add-recipe-form" on:submit=on_submit>
                <input
                    type="text"
                    class="input"
                    placeholder="레시피 제목"
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                />
                <input
                    type="number"
                    min="0"
                    class="input mt8"
                    placeholder="조리 시간 (분)"
                    prop:value=move || form.with(|f| f.cook_time_min.clone())
                    on:input=move |ev| form.update(|f| f.cook_time_min = event_target_value(&ev))
                />
                <input
                    type="text"
                    class="input mt8"
                    placeholder="재료 (콤마로 구분: 계란, 소금, 대파)"
                    prop:value=move || form.with(|f| f.ingredients.clone())
                    on:input=move |ev| form.update(|f| f.ingredients = event_target_value(&ev))
                />

                <label class="field-label mt12">"대표 이미지"</label>
                <input
                    type="file"
                    accept="image/*"
                    node_ref=thumbnail_ref
                    on:change=move |ev| {
                        let Some(picked) = pick_attachment(&ev) else { return };
                        form.update(|f| {
                            if let Some(old) = f.thumbnail.replace(picked) {
                                revoke(&old);
                            }
                        });
                    }
                />
                {move || form.with(|f| f.thumbnail.as_ref().map(|t| t.preview_url.clone())).map(|src| view! {
                    <div class="image-preview mt8">
                        <img src=src alt="대표 이미지 미리보기" />
                        <button type="button" class="btn ghost small" on:click=clear_thumbnail>"이미지 삭제"</button>
                    </div>
                })}

                <label class="field-label mt12">"만드는 방법"</label>
                <For
                    each=move || 0..step_count.get()
                    key=|index| *index
                    children=move |index| view! { <StepEditor form=form index=index step_count=step_count /> }
                />
                <button
                    type="button"
                    class="btn ghost mt8"
                    on:click=move |_| form.update(|f| f.add_step())
                >
                    "+ 단계 추가"
                </button>

                <label class="checkbox-row mt12">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.is_public)
                        on:change=move |ev| {
                            let input: HtmlInputElement = event_target(&ev);
                            form.update(|f| f.is_public = input.checked());
                        }
                    />
                    <span>"다른 사용자에게 공개"</span>
                </label>

                <button
                    type="submit"
                    class="btn primary mt16 full"
                    disabled=move || state.with(|s| s.submitting)
                >
                    {move || if state.with(|s| s.submitting) { "등록 중..." } else { "레시피 등록" }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn StepEditor(
    form: RwSignal<RecipeForm<File>, LocalStorage>,
    index: usize,
    step_count: Memo<usize>,
) -> impl IntoView {
    let preview = move || {
        form.with(|f| {
            f.steps
                .get(index)
                .and_then(|s| s.image.as_ref())
                .map(|a| a.preview_url.clone())
        })
    };

    let set_image = move |image: Option<Attachment<File>>| {
        form.update(|f| {
            if let Some(step) = f.steps.get_mut(index) {
                if let Some(old) = std::mem::replace(&mut step.image, image) {
                    revoke(&old);
                }
            }
        });
    };

    view! {
        <div class="step-editor mt8">
            <div class="row space-between align-center">
                <span class="step-label">{format!("{}단계", index + 1)}</span>
                <Show when=move || { step_count.get() > 1 }>
                    <button
                        type="button"
                        class="btn-delete"
                        on:click=move |_| form.update(|f| {
                            if let Some(image) = f.steps.get(index).and_then(|s| s.image.as_ref()) {
                                revoke(image);
                            }
                            f.remove_step(index);
                        })
                    >
                        "×"
                    </button>
                </Show>
            </div>
            <textarea
                class="textarea mt4"
                rows="2"
                placeholder="이 단계에서 할 일을 적어주세요"
                prop:value=move || form.with(|f| f.steps.get(index).map(|s| s.description.clone()).unwrap_or_default())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    form.update(|f| {
                        if let Some(step) = f.steps.get_mut(index) {
                            step.description = text;
                        }
                    });
                }
            />
            {move || match preview() {
                Some(src) => view! {
                    <div class="image-preview mt4">
                        <img src=src alt=format!("{}단계 이미지", index + 1) />
                        <button type="button" class="btn ghost small" on:click=move |_| set_image(None)>
                            "이미지 삭제"
                        </button>
                    </div>
                }.into_any(),
                None => view! {
                    <input
                        type="file"
                        accept="image/*"
                        class="mt4"
                        on:change=move |ev| {
                            if let Some(picked) = pick_attachment(&ev) {
                                set_image(Some(picked));
                            }
                        }
                    />
                }.into_any(),
            }}
        </div>
    }
}
