//! Recipe Detail Logic
//!
//! The saved flag flips only after the save/unsave call succeeds.

use leptos::prelude::*;

use crate::api::Backend;
use crate::models::{RecipeAction, RecipeDetail};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    NotFound,
    Ready(RecipeDetail),
}

#[derive(Debug, Clone)]
pub struct DetailState {
    pub view: DetailView,
    pub is_saved: bool,
    /// A save toggle is in flight
    pub saving: bool,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            view: DetailView::Loading,
            is_saved: false,
            saving: false,
        }
    }
}

#[derive(Clone, Copy)]
pub struct DetailController<B> {
    backend: B,
    state: RwSignal<DetailState>,
}

impl<B: Backend> DetailController<B> {
    pub fn new(backend: B, state: RwSignal<DetailState>) -> Self {
        Self { backend, state }
    }

    pub async fn load(&self, recipe_id: u32) {
        self.state.try_set(DetailState::default());
        let result = self.backend.recipe(recipe_id).await;
        self.state.try_update(|s| match result {
            Ok(recipe) => {
                s.is_saved = recipe.is_saved;
                s.view = DetailView::Ready(recipe);
            }
            Err(err) => {
                log::warn!("[Detail] Recipe {} unavailable: {}", recipe_id, err);
                s.view = DetailView::NotFound;
            }
        });
    }

    pub async fn toggle_save(&self, recipe_id: u32) -> Result<(), String> {
        let Some(was_saved) = self.state.try_update(|s| {
            s.saving = true;
            s.is_saved
        }) else {
            return Ok(());
        };

        let result = if was_saved {
            self.backend.unsave_recipe(recipe_id).await
        } else {
            self.backend.save_recipe(recipe_id).await
        };

        self.state.try_update(|s| {
            s.saving = false;
            if result.is_ok() {
                s.is_saved = !was_saved;
            }
        });
        result.map_err(|e| {
            log::error!("[Detail] Save toggle on {} failed: {}", recipe_id, e);
            e.to_string()
        })
    }

    pub async fn act(&self, recipe_id: u32, action: RecipeAction) -> Result<(), String> {
        self.backend
            .record_action(recipe_id, action)
            .await
            .map_err(|e| {
                log::error!("[Detail] {:?} on {} failed: {}", action, recipe_id, e);
                e.to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::mock::{Call, MockBackend};

    fn detail(is_saved: bool) -> RecipeDetail {
        RecipeDetail {
            id: 21,
            title: "된장찌개".into(),
            image_url: None,
            cook_time_min: Some(25),
            raw_ingredients: Some("된장, 두부, 애호박".into()),
            steps: Vec::new(),
            source: None,
            reasons: Vec::new(),
            is_saved,
        }
    }

    #[test]
    fn save_then_unsave_restores_flag() {
        let mock = MockBackend::default().with_recipe(detail(false));
        let ctrl = DetailController::new(mock.clone(), RwSignal::new(DetailState::default()));
        block_on(ctrl.load(21));
        mock.clear_calls();

        block_on(ctrl.toggle_save(21)).unwrap();
        assert!(ctrl.state.with_untracked(|s| s.is_saved));
        block_on(ctrl.toggle_save(21)).unwrap();

        assert!(!ctrl.state.with_untracked(|s| s.is_saved));
        assert_eq!(mock.calls(), vec![Call::Save(21), Call::Unsave(21)]);
    }

    #[test]
    fn failed_toggle_keeps_flag() {
        let mock = MockBackend::default().with_recipe(detail(true)).failing_saves();
        let ctrl = DetailController::new(mock.clone(), RwSignal::new(DetailState::default()));
        block_on(ctrl.load(21));

        assert!(block_on(ctrl.toggle_save(21)).is_err());
        let (saved, saving) = ctrl.state.with_untracked(|s| (s.is_saved, s.saving));
        assert!(saved);
        assert!(!saving);
    }

    #[test]
    fn missing_recipe_is_not_found() {
        let mock = MockBackend::default();
        let ctrl = DetailController::new(mock, RwSignal::new(DetailState::default()));
        block_on(ctrl.load(404));
        assert_eq!(ctrl.state.with_untracked(|s| s.view.clone()), DetailView::NotFound);
    }
}
