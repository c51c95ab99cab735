//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// Main screens reachable from the bottom navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Recommend,
    Saved,
    Pantry,
    MyRecipes,
    Admin,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Recommend => "추천",
            Tab::Saved => "저장함",
            Tab::Pantry => "냉장고",
            Tab::MyRecipes => "내 레시피",
            Tab::Admin => "관리자",
        }
    }

    /// The screen actually shown: Admin needs privilege, otherwise Recommend
    pub fn resolve(self, is_admin: bool) -> Tab {
        match self {
            Tab::Admin if !is_admin => Tab::Recommend,
            tab => tab,
        }
    }

    /// Tabs listed in the nav bar, Admin last and only for admins
    pub fn visible(is_admin: bool) -> Vec<Tab> {
        let mut tabs = vec![Tab::Recommend, Tab::Saved, Tab::Pantry, Tab::MyRecipes];
        if is_admin {
            tabs.push(Tab::Admin);
        }
        tabs
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bumped on every pantry mutation - read
    pub pantry_revision: ReadSignal<u32>,
    /// Bumped on every pantry mutation - write
    set_pantry_revision: WriteSignal<u32>,
    /// Selected tab (not URL-backed) - read
    pub active_tab: ReadSignal<Tab>,
    /// Selected tab (not URL-backed) - write
    set_active_tab: WriteSignal<Tab>,
}

impl AppContext {
    pub fn new(
        pantry_revision: (ReadSignal<u32>, WriteSignal<u32>),
        active_tab: (ReadSignal<Tab>, WriteSignal<Tab>),
    ) -> Self {
        Self {
            pantry_revision: pantry_revision.0,
            set_pantry_revision: pantry_revision.1,
            active_tab: active_tab.0,
            set_active_tab: active_tab.1,
        }
    }

    /// Invalidate anything derived from pantry contents
    pub fn bump_pantry(&self) {
        self.set_pantry_revision.try_update(|v| *v += 1);
    }

    pub fn select_tab(&self, tab: Tab) {
        self.set_active_tab.set(tab);
    }
}
