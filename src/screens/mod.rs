//! Screen Controllers
//!
//! Per-screen state plus the async operations that drive it. Components
//! own a controller over `HttpBackend`; tests drive the same controller
//! over a recording backend.

pub mod admin;
pub mod detail;
pub mod my_recipes;
pub mod pantry;
pub mod recommend;
pub mod saved;

/// Cook time pill text, `?` when unknown
pub fn cook_time_label(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}분", m),
        _ => "?분".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use leptos::prelude::*;

    use super::*;
    use crate::api::mock::MockBackend;
    use crate::context::{AppContext, Tab};

    /// First fetch each tab's screen issues when mounted
    fn mount(tab: Tab, mock: &MockBackend, ctx: AppContext) {
        match tab {
            Tab::Recommend => {
                let state = RwSignal::new(recommend::RecommendState::default());
                block_on(recommend::RecommendController::new(mock.clone(), state).sync_pantry(0));
            }
            Tab::Saved => {
                let state = RwSignal::new(saved::SavedState::default());
                block_on(saved::SavedController::new(mock.clone(), state).load());
            }
            Tab::Pantry => {
                let state = RwSignal::new(pantry::PantryState::default());
                block_on(pantry::PantryController::new(mock.clone(), state, ctx).load());
            }
            Tab::MyRecipes => {
                let state = RwSignal::new(my_recipes::MyRecipesState::default());
                block_on(my_recipes::MyRecipesController::new(mock.clone(), state).load(""));
            }
            Tab::Admin => {
                let state = RwSignal::new(admin::AdminState::default());
                block_on(admin::AdminController::new(mock.clone(), state).load_stats());
            }
        }
    }

    #[test]
    fn non_admin_choosing_admin_tab_makes_no_admin_calls() {
        let mock = MockBackend::default();
        let ctx = AppContext::new(signal(0), signal(Tab::default()));
        ctx.select_tab(Tab::Admin);

        let shown = ctx.active_tab.get_untracked().resolve(false);
        mount(shown, &mock, ctx);

        assert_eq!(shown, Tab::Recommend);
        assert!(!mock.calls().is_empty());
        assert!(mock.calls().iter().all(|call| !call.is_admin()));

        mount(ctx.active_tab.get_untracked().resolve(true), &mock, ctx);
        assert!(mock.calls().iter().any(|call| call.is_admin()));
    }

    #[test]
    fn unknown_cook_time_shows_question_mark() {
        assert_eq!(cook_time_label(Some(15)), "15분");
        assert_eq!(cook_time_label(None), "?분");
        assert_eq!(cook_time_label(Some(0)), "?분");
    }
}
