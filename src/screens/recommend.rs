//! Recommend Screen Logic
//!
//! Ranked list with a selectable result count, an exclusive title-search
//! mode, and the feedback banner shown after cook/save/skip.

use leptos::prelude::*;

use crate::api::Backend;
use crate::models::{RecipeAction, Recommendation};

/// How many recommendations to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultCount {
    Three,
    #[default]
    Five,
    Ten,
}

impl ResultCount {
    pub const ALL: [ResultCount; 3] = [ResultCount::Three, ResultCount::Five, ResultCount::Ten];

    pub fn get(self) -> u32 {
        match self {
            ResultCount::Three => 3,
            ResultCount::Five => 5,
            ResultCount::Ten => 10,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.get() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListMode {
    #[default]
    Recommend,
    Search { query: String },
}

impl ListMode {
    pub fn is_search(&self) -> bool {
        matches!(self, ListMode::Search { .. })
    }
}

/// Transient confirmation of a feedback action
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackBanner {
    pub id: u64,
    pub action: RecipeAction,
    pub title: String,
    pub before: Option<f64>,
    pub after: Option<f64>,
    /// The recipe left the list
    pub hidden: bool,
}

impl FeedbackBanner {
    pub fn delta(&self) -> Option<f64> {
        Some(self.after? - self.before?)
    }

    pub fn headline(&self) -> String {
        format!("{} 반영 완료", self.action.label())
    }

    pub fn detail(&self) -> Option<String> {
        if self.hidden {
            return Some("숨김 처리됨 (추천에서 제외)".to_string());
        }
        let (before, after) = (self.before?, self.after?);
        Some(format!(
            "점수 변화: {:.2} → {:.2} (Δ {:+.2})",
            before,
            after,
            after - before
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecommendState {
    pub items: Vec<Recommendation>,
    pub loading: bool,
    pub error: Option<String>,
    pub top: ResultCount,
    pub mode: ListMode,
    pub banner: Option<FeedbackBanner>,
    /// Id of the most recent fetch; older responses are dropped
    request_seq: u64,
    banner_seq: u64,
    /// Pantry revision the current list was fetched for
    pantry_revision: Option<u32>,
}

#[derive(Clone, Copy)]
pub struct RecommendController<B> {
    backend: B,
    state: RwSignal<RecommendState>,
}

impl<B: Backend> RecommendController<B> {
    pub fn new(backend: B, state: RwSignal<RecommendState>) -> Self {
        Self { backend, state }
    }

    pub fn state(&self) -> RwSignal<RecommendState> {
        self.state
    }

    /// Mark a fetch as started and return its id
    fn begin(&self) -> Option<u64> {
        self.state.try_update(|s| {
            s.request_seq += 1;
            s.loading = true;
            s.error = None;
            s.request_seq
        })
    }

    /// Apply a fetch result if it is still the latest one.
    /// Returns the list that was applied.
    fn finish(
        &self,
        seq: u64,
        mode: ListMode,
        result: crate::api::ApiResult<Vec<Recommendation>>,
    ) -> Option<Vec<Recommendation>> {
        self.state
            .try_update(|s| {
                if s.request_seq != seq {
                    log::debug!("[Recommend] Dropping stale response #{}", seq);
                    return None;
                }
                s.loading = false;
                match result {
                    Ok(items) => {
                        s.items = items.clone();
                        s.mode = mode;
                        Some(items)
                    }
                    Err(err) => {
                        log::error!("[Recommend] Load failed: {}", err);
                        s.error = Some(err.to_string());
                        None
                    }
                }
            })
            .flatten()
    }

    /// Fetch the ranked list, leaving search mode
    pub async fn load(&self) -> Option<Vec<Recommendation>> {
        let seq = self.begin()?;
        let top = self.state.try_with_untracked(|s| s.top)?;
        let result = self.backend.recommendations(top).await;
        if let Ok(items) = &result {
            log::info!("[Recommend] Loaded {} recommendations (top={})", items.len(), top.get());
        }
        self.finish(seq, ListMode::Recommend, result)
    }

    /// Refetch when the pantry revision differs from the one last seen.
    /// The first call always loads.
    pub async fn sync_pantry(&self, revision: u32) -> bool {
        let stale = self
            .state
            .try_update(|s| s.pantry_revision.replace(revision) != Some(revision))
            .unwrap_or(false);
        if stale {
            log::debug!("[Recommend] Loading for pantry revision {}", revision);
            self.load().await;
        }
        stale
    }

    pub async fn set_top(&self, top: ResultCount) {
        let changed = self
            .state
            .try_update(|s| {
                let changed = s.top != top;
                s.top = top;
                changed
            })
            .unwrap_or(false);
        if changed {
            self.load().await;
        }
    }

    /// Title search; a blank query returns to the ranked list
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.load().await;
            return;
        }
        let Some(seq) = self.begin() else { return };
        let result = self.backend.search_recipes(query).await;
        self.finish(
            seq,
            ListMode::Search {
                query: query.to_string(),
            },
            result,
        );
    }

    pub async fn reset_search(&self) {
        self.load().await;
    }

    pub async fn save(&self, recipe_id: u32, title: String) {
        if let Err(err) = self.backend.save_recipe(recipe_id).await {
            log::error!("[Recommend] Save {} failed: {}", recipe_id, err);
            self.state.try_update(|s| s.error = Some(err.to_string()));
            return;
        }
        self.show_banner(RecipeAction::Save, title, None, None, true);
        self.load().await;
    }

    /// Record cook/skip, reload, and report the score change
    pub async fn act(&self, recipe_id: u32, action: RecipeAction, title: String) {
        let before = self
            .state
            .try_with_untracked(|s| score_of(&s.items, recipe_id))
            .flatten();

        if let Err(err) = self.backend.record_action(recipe_id, action).await {
            log::error!("[Recommend] {:?} on {} failed: {}", action, recipe_id, err);
            self.state.try_update(|s| s.error = Some(err.to_string()));
            return;
        }

        let Some(fresh) = self.load().await else { return };
        match fresh.iter().find(|r| r.recipe_id == recipe_id) {
            Some(item) => self.show_banner(action, title, before, item.score, false),
            None => self.show_banner(action, title, before, None, true),
        };
    }

    fn show_banner(
        &self,
        action: RecipeAction,
        title: String,
        before: Option<f64>,
        after: Option<f64>,
        hidden: bool,
    ) -> Option<u64> {
        self.state.try_update(|s| {
            s.banner_seq += 1;
            s.banner = Some(FeedbackBanner {
                id: s.banner_seq,
                action,
                title,
                before,
                after,
                hidden,
            });
            s.banner_seq
        })
    }

    /// Clear the banner only if it is still the one with `id`
    pub fn dismiss_banner(&self, id: u64) {
        self.state.try_update(|s| {
            if s.banner.as_ref().map(|b| b.id) == Some(id) {
                s.banner = None;
            }
        });
    }
}

fn score_of(items: &[Recommendation], recipe_id: u32) -> Option<f64> {
    items
        .iter()
        .find(|r| r.recipe_id == recipe_id)
        .and_then(|r| r.score)
}

/// Coverage as a whole percentage; fractions are scaled by 100
pub fn format_coverage(coverage: f64) -> String {
    let percent = if coverage <= 1.0 { coverage * 100.0 } else { coverage };
    format!("{}%", percent.round() as i64)
}

/// Ranked-mode coverage line, absent in search mode
pub fn coverage_line(item: &Recommendation, mode: &ListMode) -> Option<String> {
    if mode.is_search() {
        return None;
    }
    let coverage = item.coverage?;
    let mut line = format!("재료 매칭률: {}", format_coverage(coverage));
    if let Some(missing) = item.missing_count.filter(|n| *n > 0) {
        line.push_str(&format!(", 부족: {}개", missing));
    }
    Some(line)
}

/// First three missing ingredients with a `+N` overflow
pub fn missing_summary(missing: &[String]) -> String {
    if missing.is_empty() {
        return "없음".to_string();
    }
    let shown = missing.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if missing.len() > 3 {
        format!("{} +{}", shown, missing.len() - 3)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::mock::{recommendation, Call, MockBackend};
    use crate::debounce::manual::ManualSchedule;
    use crate::debounce::Debouncer;

    fn controller(mock: &MockBackend) -> RecommendController<MockBackend> {
        RecommendController::new(mock.clone(), RwSignal::new(RecommendState::default()))
    }

    fn ids(ctrl: &RecommendController<MockBackend>) -> Vec<u32> {
        ctrl.state()
            .with_untracked(|s| s.items.iter().map(|r| r.recipe_id).collect())
    }

    #[test]
    fn each_count_change_fetches_once_and_replaces_list() {
        let mock = MockBackend::default();
        mock.push_recommendations(vec![recommendation(1, 0.9), recommendation(2, 0.8), recommendation(3, 0.7)]);
        mock.push_recommendations(vec![recommendation(4, 0.9)]);
        mock.push_recommendations(vec![recommendation(5, 0.9), recommendation(6, 0.1)]);
        let ctrl = controller(&mock);

        block_on(ctrl.set_top(ResultCount::Three));
        assert_eq!(ids(&ctrl), vec![1, 2, 3]);
        block_on(ctrl.set_top(ResultCount::Five));
        assert_eq!(ids(&ctrl), vec![4]);
        block_on(ctrl.set_top(ResultCount::Ten));
        assert_eq!(ids(&ctrl), vec![5, 6]);
        block_on(ctrl.set_top(ResultCount::Ten));

        assert_eq!(
            mock.calls(),
            vec![Call::Recommendations(3), Call::Recommendations(5), Call::Recommendations(10)]
        );
    }

    #[test]
    fn clearing_search_returns_to_ranked_list() {
        let mock = MockBackend::default().with_search(vec![recommendation(9, 0.0)]);
        mock.push_recommendations(vec![recommendation(1, 0.5)]);
        let ctrl = controller(&mock);

        block_on(ctrl.search(" 계란 "));
        assert_eq!(ctrl.state().with_untracked(|s| s.mode.clone()), ListMode::Search { query: "계란".into() });
        assert_eq!(ids(&ctrl), vec![9]);

        block_on(ctrl.search("   "));
        assert_eq!(ctrl.state().with_untracked(|s| s.mode.clone()), ListMode::Recommend);
        assert_eq!(ids(&ctrl), vec![1]);
        assert_eq!(
            mock.calls(),
            vec![Call::Search("계란".into()), Call::Recommendations(5)]
        );
    }

    #[test]
    fn rapid_skips_send_one_action() {
        let mock = MockBackend::default();
        mock.push_recommendations(vec![recommendation(3, 0.4)]);
        let ctrl = controller(&mock);
        let clock = ManualSchedule::default();
        let debouncer = Debouncer::new(300, clock.clone(), {
            let ctrl = ctrl.clone();
            move |(id, action, title): (u32, RecipeAction, String)| {
                block_on(ctrl.act(id, action, title));
            }
        });

        for _ in 0..4 {
            debouncer.call((3, RecipeAction::Skip, "레시피 3".to_string()));
        }
        clock.fire_all();

        let actions: Vec<Call> = mock
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Action(..)))
            .collect();
        assert_eq!(actions, vec![Call::Action(3, RecipeAction::Skip)]);
    }

    #[test]
    fn empty_pantry_still_requests_recommendations() {
        let mut far = recommendation(7, 0.1);
        far.missing_ingredients = vec!["두부".into(), "파".into(), "마늘".into(), "간장".into()];
        far.missing_count = Some(4);
        let mock = MockBackend::default().with_pantry(Vec::new());
        mock.push_recommendations(vec![far]);
        let ctrl = controller(&mock);

        block_on(ctrl.load());

        assert_eq!(mock.calls(), vec![Call::Recommendations(5)]);
        let item = ctrl.state().with_untracked(|s| s.items[0].clone());
        assert_eq!(missing_summary(&item.missing_ingredients), "두부, 파, 마늘 +1");
    }

    #[test]
    fn cook_reports_score_change() {
        let mock = MockBackend::default();
        mock.push_recommendations(vec![recommendation(1, 0.8)]);
        mock.push_recommendations(vec![recommendation(1, 0.5)]);
        let ctrl = controller(&mock);

        block_on(ctrl.load());
        block_on(ctrl.act(1, RecipeAction::Cook, "레시피 1".into()));

        let banner = ctrl.state().with_untracked(|s| s.banner.clone()).unwrap();
        assert!(!banner.hidden);
        assert_eq!(banner.headline(), "요리함 반영 완료");
        assert_eq!(banner.detail().unwrap(), "점수 변화: 0.80 → 0.50 (Δ -0.30)");
    }

    #[test]
    fn skipped_recipe_leaving_list_is_hidden() {
        let mock = MockBackend::default();
        mock.push_recommendations(vec![recommendation(1, 0.8), recommendation(2, 0.6)]);
        mock.push_recommendations(vec![recommendation(2, 0.6)]);
        let ctrl = controller(&mock);

        block_on(ctrl.load());
        block_on(ctrl.act(1, RecipeAction::Skip, "레시피 1".into()));

        let banner = ctrl.state().with_untracked(|s| s.banner.clone()).unwrap();
        assert!(banner.hidden);
        assert_eq!(banner.before, Some(0.8));
        assert_eq!(banner.detail().unwrap(), "숨김 처리됨 (추천에서 제외)");
    }

    #[test]
    fn expiring_banner_only_clears_itself() {
        let mock = MockBackend::default();
        let ctrl = controller(&mock);

        block_on(ctrl.save(1, "첫번째".into()));
        let first = ctrl.state().with_untracked(|s| s.banner.as_ref().unwrap().id);
        block_on(ctrl.save(2, "두번째".into()));

        ctrl.dismiss_banner(first);
        assert_eq!(
            ctrl.state().with_untracked(|s| s.banner.as_ref().map(|b| b.title.clone())),
            Some("두번째".to_string())
        );
    }

    #[test]
    fn pantry_edit_triggers_refetch() {
        use crate::context::{AppContext, Tab};
        use crate::screens::pantry::{PantryController, PantryDraft, PantryState};

        let mock = MockBackend::default();
        let ctx = AppContext::new(signal(0), signal(Tab::Recommend));
        let recommend = controller(&mock);
        let pantry = PantryController::new(mock.clone(), RwSignal::new(PantryState::default()), ctx);

        assert!(block_on(recommend.sync_pantry(ctx.pantry_revision.get_untracked())));
        assert!(!block_on(recommend.sync_pantry(ctx.pantry_revision.get_untracked())));

        let draft = PantryDraft {
            name: "두부".into(),
            amount: "1".into(),
            ..PantryDraft::default()
        };
        block_on(pantry.add(&draft)).unwrap();
        mock.clear_calls();
        assert!(block_on(recommend.sync_pantry(ctx.pantry_revision.get_untracked())));

        assert_eq!(mock.calls(), vec![Call::Recommendations(ResultCount::default().get())]);
    }

    #[test]
    fn coverage_formatting() {
        assert_eq!(format_coverage(0.456), "46%");
        assert_eq!(format_coverage(73.0), "73%");

        let mut item = recommendation(1, 0.3);
        item.coverage = Some(0.5);
        item.missing_count = Some(2);
        assert_eq!(coverage_line(&item, &ListMode::Recommend).unwrap(), "재료 매칭률: 50%, 부족: 2개");
        assert_eq!(coverage_line(&item, &ListMode::Search { query: "a".into() }), None);
        assert_eq!(missing_summary(&[]), "없음");
    }
}
