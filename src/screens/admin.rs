//! Admin Dashboard Logic
//!
//! Operating statistics plus a per-recipe score inspector scoped to a
//! demo user. Debug panels load lazily on expand; collapsing discards
//! the result so the next expand refetches.

use std::collections::HashMap;

use leptos::prelude::*;
use serde_json::Value;

use crate::api::Backend;
use crate::config::{CONVERSION_WINDOW_DAYS, DEMO_USERS};
use crate::models::{AdminStatus, ConversionStats, RecipeDebug, Recommendation};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Loading,
    Loaded(RecipeDebug),
    Failed(String),
}

/// Expanded debug panels keyed by recipe id
pub type DebugPanels = HashMap<u32, PanelState>;

#[derive(Debug, Clone, Default)]
pub struct StatsState {
    pub loading: bool,
    pub status: Option<AdminStatus>,
    pub conversion: Option<ConversionStats>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AdminState {
    pub stats: StatsState,
    pub demo_user: u8,
    pub results: Vec<Recommendation>,
    pub searching: bool,
    pub search_error: Option<String>,
    pub panels: DebugPanels,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            stats: StatsState {
                loading: true,
                ..StatsState::default()
            },
            demo_user: DEMO_USERS[0],
            results: Vec::new(),
            searching: false,
            search_error: None,
            panels: DebugPanels::new(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AdminController<B> {
    backend: B,
    state: RwSignal<AdminState>,
}

impl<B: Backend> AdminController<B> {
    pub fn new(backend: B, state: RwSignal<AdminState>) -> Self {
        Self { backend, state }
    }

    /// Status and conversion load concurrently; only a double failure is an error
    pub async fn load_stats(&self) {
        self.state.try_update(|s| {
            s.stats.loading = true;
            s.stats.error = None;
        });

        let (status, conversion) = futures::join!(
            self.backend.admin_status(),
            self.backend.conversion(CONVERSION_WINDOW_DAYS)
        );
        if let Err(err) = &status {
            log::warn!("[Admin] Status failed: {}", err);
        }
        if let Err(err) = &conversion {
            log::warn!("[Admin] Conversion failed: {}", err);
        }

        self.state.try_update(|s| {
            s.stats.loading = false;
            if status.is_err() && conversion.is_err() {
                s.stats.error = Some("통계 데이터를 불러올 수 없습니다.".to_string());
            }
            s.stats.status = status.ok();
            s.stats.conversion = conversion.ok();
        });
    }

    pub fn select_demo_user(&self, demo_user: u8) {
        self.state.try_update(|s| {
            s.demo_user = demo_user;
            s.panels.clear();
        });
    }

    /// Title search; blank queries are ignored
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.state.try_update(|s| {
            s.searching = true;
            s.search_error = None;
            s.panels.clear();
        });
        let result = self.backend.search_recipes(query).await;
        self.state.try_update(|s| {
            s.searching = false;
            match result {
                Ok(results) => s.results = results,
                Err(err) => {
                    log::error!("[Admin] Search failed: {}", err);
                    s.results.clear();
                    s.search_error = Some(err.to_string());
                }
            }
        });
    }

    /// Expand (fetching) or collapse the debug panel of one recipe
    pub async fn toggle_debug(&self, recipe_id: u32) {
        let demo_user = self.state.try_update(|s| match s.panels.get(&recipe_id) {
            Some(PanelState::Loading) => None,
            Some(_) => {
                s.panels.remove(&recipe_id);
                None
            }
            None => {
                s.panels.insert(recipe_id, PanelState::Loading);
                Some(s.demo_user)
            }
        });
        let Some(demo_user) = demo_user.flatten() else { return };

        let panel = match self.backend.recipe_debug(recipe_id, demo_user).await {
            Ok(debug) => PanelState::Loaded(debug),
            Err(err) => {
                log::error!("[Admin] Debug for {} failed: {}", recipe_id, err);
                PanelState::Failed("조회 실패".to_string())
            }
        };
        self.state.try_update(|s| {
            // Dropped if the panels were cleared meanwhile
            if let Some(slot @ PanelState::Loading) = s.panels.get_mut(&recipe_id) {
                *slot = panel;
            }
        });
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// KPI card value, `—` when missing
pub fn kpi_count(value: Option<u64>) -> String {
    value.map(group_thousands).unwrap_or_else(|| "—".to_string())
}

pub fn kpi_rate(conversion: Option<&ConversionStats>) -> String {
    conversion
        .and_then(|c| c.conversion_rate)
        .map(|r| format!("{:.1}%", r * 100.0))
        .unwrap_or_else(|| "—".to_string())
}

pub fn conversion_summary(c: &ConversionStats) -> String {
    format!(
        "추천 성능 (최근 {}일): 추천 노출 {}건 중 {}건 전환 (조리/저장)",
        c.window_days.filter(|d| *d > 0).unwrap_or(CONVERSION_WINDOW_DAYS),
        c.recommended_count,
        c.converted_count
    )
}

pub fn debug_label(key: &str) -> &str {
    match key {
        "base" => "기본점수",
        "penalty_recent_cooked_saved" => "최근 요리/저장 감점",
        "penalty_recent_skipped" => "최근 스킵 감점",
        "penalty_cooldown" => "최근 노출 감점",
        "penalty_exposure_no_convert" => "미전환 노출 감점",
        "bonus_converted" => "전환 보너스",
        "exposure" => "최근 노출 수",
        "converted" => "전환 여부",
        "pop_users" => "인기 사용자 수",
        "pop_bonus" => "인기 보너스",
        other => other,
    }
}

pub fn debug_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "O".to_string(),
        Value::Bool(false) => "X".to_string(),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::mock::{recommendation, Call, MockBackend};

    fn debug() -> RecipeDebug {
        serde_json::from_value(json!({
            "score": 1.25,
            "coverage": 0.5,
            "saved": false,
            "debug": {"base": 1.0, "converted": true}
        }))
        .unwrap()
    }

    fn controller(mock: &MockBackend) -> AdminController<MockBackend> {
        AdminController::new(mock.clone(), RwSignal::new(AdminState::default()))
    }

    #[test]
    fn reexpanding_refetches_for_same_demo_user() {
        let mock = MockBackend::default().with_debug(debug());
        let ctrl = controller(&mock);

        ctrl.select_demo_user(2);
        block_on(ctrl.toggle_debug(42));
        assert!(matches!(
            ctrl.state.with_untracked(|s| s.panels.get(&42).cloned()),
            Some(PanelState::Loaded(_))
        ));
        block_on(ctrl.toggle_debug(42));
        assert!(ctrl.state.with_untracked(|s| s.panels.is_empty()));
        block_on(ctrl.toggle_debug(42));

        assert_eq!(mock.calls(), vec![Call::RecipeDebug(42, 2), Call::RecipeDebug(42, 2)]);
    }

    #[test]
    fn failed_debug_renders_inline() {
        let mock = MockBackend::default();
        let ctrl = controller(&mock);
        block_on(ctrl.toggle_debug(5));
        assert_eq!(
            ctrl.state.with_untracked(|s| s.panels.get(&5).cloned()),
            Some(PanelState::Failed("조회 실패".into()))
        );
    }

    #[test]
    fn new_search_clears_panels_and_blank_is_ignored() {
        let mock = MockBackend::default()
            .with_debug(debug())
            .with_search(vec![recommendation(42, 0.0)]);
        let ctrl = controller(&mock);

        block_on(ctrl.toggle_debug(42));
        block_on(ctrl.search("  "));
        assert_eq!(ctrl.state.with_untracked(|s| s.panels.len()), 1);

        block_on(ctrl.search("라면"));
        assert!(ctrl.state.with_untracked(|s| s.panels.is_empty()));
        assert_eq!(ctrl.state.with_untracked(|s| s.results.len()), 1);
        assert_eq!(mock.calls().last(), Some(&Call::Search("라면".into())));
    }

    #[test]
    fn stats_error_only_when_both_fail() {
        let mock = MockBackend::default().failing_admin();
        let ctrl = controller(&mock);
        block_on(ctrl.load_stats());
        assert!(ctrl.state.with_untracked(|s| s.stats.error.is_some()));
        assert_eq!(
            mock.calls(),
            vec![Call::AdminStatus, Call::Conversion(CONVERSION_WINDOW_DAYS)]
        );

        let status = AdminStatus { recipes_total: Some(1234), users: None, pantry_items: Some(7) };
        let conversion = ConversionStats { conversion_rate: Some(0.125), ..ConversionStats::default() };
        let ok = MockBackend::default().with_admin_stats(status, conversion);
        let ctrl = controller(&ok);
        block_on(ctrl.load_stats());
        let stats = ctrl.state.with_untracked(|s| s.stats.clone());
        assert!(stats.error.is_none());
        assert_eq!(kpi_count(stats.status.as_ref().and_then(|s| s.recipes_total)), "1,234");
        assert_eq!(kpi_count(stats.status.as_ref().and_then(|s| s.users)), "—");
        assert_eq!(kpi_rate(stats.conversion.as_ref()), "12.5%");
    }

    #[test]
    fn debug_table_formatting() {
        assert_eq!(debug_label("pop_bonus"), "인기 보너스");
        assert_eq!(debug_label("custom"), "custom");
        assert_eq!(debug_value(&json!(true)), "O");
        assert_eq!(debug_value(&json!(0.5)), "0.5");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn failed_search_shows_error_instead_of_empty_results() {
        let mock = MockBackend::default().failing_lists();
        let ctrl = controller(&mock);

        block_on(ctrl.search("라면"));

        let (searching, results, error) = ctrl
            .state
            .with_untracked(|s| (s.searching, s.results.len(), s.search_error.clone()));
        assert!(!searching);
        assert_eq!(results, 0);
        assert_eq!(error.as_deref(), Some("네트워크 오류: offline"));
    }
}
