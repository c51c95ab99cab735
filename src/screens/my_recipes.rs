//! My Recipes Logic
//!
//! Authored recipe list with a debounced title filter, plus submission of
//! the add-recipe form.

use leptos::prelude::*;

use crate::api::Backend;
use crate::models::UserRecipe;
use crate::recipe_form::RecipeForm;

#[derive(Debug, Clone, Default)]
pub struct MyRecipesState {
    pub items: Vec<UserRecipe>,
    pub loading: bool,
    /// Last list failure, cleared by the next load
    pub error: Option<String>,
    /// Raw search box text
    pub query: String,
    /// Upload in flight; the submit button is disabled meanwhile
    pub submitting: bool,
}

#[derive(Clone, Copy)]
pub struct MyRecipesController<B> {
    backend: B,
    state: RwSignal<MyRecipesState>,
}

impl<B: Backend> MyRecipesController<B> {
    pub fn new(backend: B, state: RwSignal<MyRecipesState>) -> Self {
        Self { backend, state }
    }

    /// Fetch with `query` trimmed; an empty query lists everything
    pub async fn load(&self, query: &str) {
        self.state.try_update(|s| {
            s.loading = true;
            s.error = None;
        });
        let result = self.backend.user_recipes(query.trim()).await;
        self.state.try_update(|s| {
            s.loading = false;
            match result {
                Ok(items) => s.items = items,
                Err(err) => {
                    log::error!("[MyRecipes] Load failed: {}", err);
                    s.error = Some(err.to_string());
                }
            }
        });
    }

    pub fn set_query(&self, query: String) {
        self.state.try_update(|s| s.query = query);
    }

    /// Reload keeping whatever is in the search box
    pub async fn reload(&self) {
        let Some(query) = self.state.try_with_untracked(|s| s.query.clone()) else {
            return;
        };
        self.load(&query).await;
    }

    pub async fn delete(&self, id: u32) -> Result<(), String> {
        self.backend.delete_user_recipe(id).await.map_err(|e| {
            log::error!("[MyRecipes] Delete {} failed: {}", id, e);
            e.to_string()
        })?;
        self.reload().await;
        Ok(())
    }

    /// Validate, upload, then reload. Nothing is sent if validation fails.
    pub async fn create(&self, form: &RecipeForm<B::File>) -> Result<UserRecipe, String> {
        let parts = form.to_parts().map_err(|e| e.to_string())?;
        let already = self
            .state
            .try_update(|s| std::mem::replace(&mut s.submitting, true))
            .unwrap_or(true);
        if already {
            return Err("이미 등록 중입니다.".to_string());
        }

        let result = self.backend.create_user_recipe(parts).await;
        self.state.try_update(|s| s.submitting = false);
        let created = result.map_err(|e| {
            log::error!("[MyRecipes] Create failed: {}", e);
            format!("에러: {}", e)
        })?;
        log::info!("[MyRecipes] Created recipe {}", created.id);
        self.reload().await;
        Ok(created)
    }
}
