//! Saved Screen Logic

use leptos::prelude::*;

use crate::api::Backend;
use crate::models::SavedRecipe;

#[derive(Debug, Clone, Default)]
pub struct SavedState {
    pub items: Vec<SavedRecipe>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
pub struct SavedController<B> {
    backend: B,
    state: RwSignal<SavedState>,
}

impl<B: Backend> SavedController<B> {
    pub fn new(backend: B, state: RwSignal<SavedState>) -> Self {
        Self { backend, state }
    }

    pub async fn load(&self) {
        self.state.try_update(|s| {
            s.loading = true;
            s.error = None;
        });
        let result = self.backend.saved_recipes().await;
        self.state.try_update(|s| {
            s.loading = false;
            match result {
                Ok(items) => s.items = items,
                Err(err) => {
                    log::error!("[Saved] Load failed: {}", err);
                    s.error = Some(err.to_string());
                }
            }
        });
    }

    /// Remove from saved, then reload. Confirmation is the caller's job.
    pub async fn unsave(&self, recipe_id: u32) -> Result<(), String> {
        self.backend.unsave_recipe(recipe_id).await.map_err(|e| {
            log::error!("[Saved] Unsave {} failed: {}", recipe_id, e);
            e.to_string()
        })?;
        self.load().await;
        Ok(())
    }
}
