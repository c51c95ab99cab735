//! Recording Backend for Tests
//!
//! Logs every call in order and serves canned responses.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use super::{ApiError, ApiResult, Backend};
use crate::models::{
    AdminStatus, AuthStatus, ConversionStats, DemoAccount, LoginResponse, NewPantryItem,
    PantryItem, PantryPatch, RecipeAction, RecipeDebug, RecipeDetail, Recommendation,
    SavedRecipe, UserRecipe,
};
use crate::recipe_form::FormPart;
use crate::screens::recommend::ResultCount;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AuthStatus,
    HostLogin(String),
    DemoLogin(DemoAccount),
    Logout,
    Recommendations(u32),
    Search(String),
    Recipe(u32),
    Save(u32),
    Unsave(u32),
    Saved,
    Action(u32, RecipeAction),
    Pantry,
    AddPantry(NewPantryItem),
    UpdatePantry(u32, PantryPatch),
    DeletePantry(u32),
    UserRecipes(String),
    CreateUserRecipe(Vec<String>),
    DeleteUserRecipe(u32),
    RecipeDebug(u32, u8),
    AdminStatus,
    Conversion(u32),
}

impl Call {
    pub fn is_admin(&self) -> bool {
        matches!(self, Call::RecipeDebug(..) | Call::AdminStatus | Call::Conversion(_))
    }
}

#[derive(Default)]
struct Canned {
    auth_status: Option<ApiResult<AuthStatus>>,
    login: Option<ApiResult<LoginResponse>>,
    /// Successive recommendation lists; the last one repeats
    recommendations: VecDeque<Vec<Recommendation>>,
    search: Vec<Recommendation>,
    recipe: Option<RecipeDetail>,
    pantry: Vec<PantryItem>,
    user_recipes: Vec<UserRecipe>,
    saved: Vec<SavedRecipe>,
    debug: Option<RecipeDebug>,
    admin_status: Option<AdminStatus>,
    conversion: Option<ConversionStats>,
    fail_saves: bool,
    fail_admin: bool,
    /// Pantry, saved, authored and search listings fail
    fail_lists: bool,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    calls: Rc<RefCell<Vec<Call>>>,
    canned: Rc<RefCell<Canned>>,
}

fn offline() -> ApiError {
    ApiError::Network("offline".to_string())
}

impl MockBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn with_auth_status(self, status: ApiResult<AuthStatus>) -> Self {
        self.canned.borrow_mut().auth_status = Some(status);
        self
    }

    pub fn with_login(self, login: ApiResult<LoginResponse>) -> Self {
        self.canned.borrow_mut().login = Some(login);
        self
    }

    pub fn push_recommendations(&self, list: Vec<Recommendation>) {
        self.canned.borrow_mut().recommendations.push_back(list);
    }

    pub fn with_search(self, hits: Vec<Recommendation>) -> Self {
        self.canned.borrow_mut().search = hits;
        self
    }

    pub fn with_recipe(self, recipe: RecipeDetail) -> Self {
        self.canned.borrow_mut().recipe = Some(recipe);
        self
    }

    pub fn with_pantry(self, items: Vec<PantryItem>) -> Self {
        self.canned.borrow_mut().pantry = items;
        self
    }

    pub fn with_user_recipes(self, items: Vec<UserRecipe>) -> Self {
        self.canned.borrow_mut().user_recipes = items;
        self
    }

    pub fn with_saved(self, items: Vec<SavedRecipe>) -> Self {
        self.canned.borrow_mut().saved = items;
        self
    }

    pub fn with_debug(self, debug: RecipeDebug) -> Self {
        self.canned.borrow_mut().debug = Some(debug);
        self
    }

    pub fn with_admin_stats(self, status: AdminStatus, conversion: ConversionStats) -> Self {
        {
            let mut canned = self.canned.borrow_mut();
            canned.admin_status = Some(status);
            canned.conversion = Some(conversion);
        }
        self
    }

    pub fn failing_saves(self) -> Self {
        self.canned.borrow_mut().fail_saves = true;
        self
    }

    pub fn failing_admin(self) -> Self {
        self.canned.borrow_mut().fail_admin = true;
        self
    }

    pub fn failing_lists(self) -> Self {
        self.canned.borrow_mut().fail_lists = true;
        self
    }

    /// Listing result, or `offline` when lists are set to fail
    fn listing<T: Clone>(&self, pick: impl FnOnce(&Canned) -> &Vec<T>) -> ApiResult<Vec<T>> {
        let canned = self.canned.borrow();
        if canned.fail_lists {
            return Err(offline());
        }
        Ok(pick(&*canned).clone())
    }
}

pub fn recommendation(recipe_id: u32, score: f64) -> Recommendation {
    Recommendation {
        recipe_id,
        title: format!("레시피 {}", recipe_id),
        cook_time_min: Some(10),
        image_url: None,
        reasons: vec!["냉장고 재료 활용".to_string()],
        missing_ingredients: Vec::new(),
        shopping_list: Vec::new(),
        coverage: Some(0.5),
        missing_count: Some(0),
        score: Some(score),
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    type File = &'static str;

    async fn auth_status(&self) -> ApiResult<AuthStatus> {
        self.record(Call::AuthStatus);
        self.canned.borrow().auth_status.clone().unwrap_or(Ok(AuthStatus::default()))
    }

    async fn host_login(&self, authorization_code: &str, _referrer: &str) -> ApiResult<LoginResponse> {
        self.record(Call::HostLogin(authorization_code.to_string()));
        self.canned.borrow().login.clone().unwrap_or(Err(offline()))
    }

    async fn demo_login(&self, account: DemoAccount) -> ApiResult<LoginResponse> {
        self.record(Call::DemoLogin(account));
        self.canned.borrow().login.clone().unwrap_or(Err(offline()))
    }

    async fn logout(&self) -> ApiResult<()> {
        self.record(Call::Logout);
        Err(offline())
    }

    async fn recommendations(&self, top: ResultCount) -> ApiResult<Vec<Recommendation>> {
        self.record(Call::Recommendations(top.get()));
        let mut canned = self.canned.borrow_mut();
        let list = if canned.recommendations.len() > 1 {
            canned.recommendations.pop_front().unwrap_or_default()
        } else {
            canned.recommendations.front().cloned().unwrap_or_default()
        };
        Ok(list)
    }

    async fn search_recipes(&self, query: &str) -> ApiResult<Vec<Recommendation>> {
        self.record(Call::Search(query.to_string()));
        self.listing(|c| &c.search)
    }

    async fn recipe(&self, recipe_id: u32) -> ApiResult<RecipeDetail> {
        self.record(Call::Recipe(recipe_id));
        self.canned.borrow().recipe.clone().ok_or(ApiError::Status {
            status: 404,
            message: "Not found.".to_string(),
        })
    }

    async fn save_recipe(&self, recipe_id: u32) -> ApiResult<()> {
        self.record(Call::Save(recipe_id));
        if self.canned.borrow().fail_saves {
            return Err(offline());
        }
        Ok(())
    }

    async fn unsave_recipe(&self, recipe_id: u32) -> ApiResult<()> {
        self.record(Call::Unsave(recipe_id));
        if self.canned.borrow().fail_saves {
            return Err(offline());
        }
        Ok(())
    }

    async fn saved_recipes(&self) -> ApiResult<Vec<SavedRecipe>> {
        self.record(Call::Saved);
        self.listing(|c| &c.saved)
    }

    async fn record_action(&self, recipe_id: u32, action: RecipeAction) -> ApiResult<()> {
        self.record(Call::Action(recipe_id, action));
        Ok(())
    }

    async fn pantry(&self) -> ApiResult<Vec<PantryItem>> {
        self.record(Call::Pantry);
        self.listing(|c| &c.pantry)
    }

    async fn add_pantry_item(&self, item: &NewPantryItem) -> ApiResult<PantryItem> {
        self.record(Call::AddPantry(item.clone()));
        Ok(PantryItem {
            id: 99,
            ingredient_name: item.ingredient_name.clone(),
            quantity_text: item.quantity_text.clone(),
            expires_at: item.expires_at.clone(),
        })
    }

    async fn update_pantry_item(&self, id: u32, patch: &PantryPatch) -> ApiResult<PantryItem> {
        self.record(Call::UpdatePantry(id, patch.clone()));
        Ok(PantryItem {
            id,
            ingredient_name: String::new(),
            quantity_text: patch.quantity_text.clone(),
            expires_at: patch.expires_at.clone(),
        })
    }

    async fn delete_pantry_item(&self, id: u32) -> ApiResult<()> {
        self.record(Call::DeletePantry(id));
        Ok(())
    }

    async fn user_recipes(&self, query: &str) -> ApiResult<Vec<UserRecipe>> {
        self.record(Call::UserRecipes(query.to_string()));
        self.listing(|c| &c.user_recipes)
    }

    async fn create_user_recipe(&self, parts: Vec<FormPart<&'static str>>) -> ApiResult<UserRecipe> {
        self.record(Call::CreateUserRecipe(
            parts.iter().map(|p| p.name().to_string()).collect(),
        ));
        Ok(UserRecipe {
            id: 500,
            title: String::new(),
            cook_time_min: None,
            image_url: None,
            thumbnail_url: None,
            is_public: true,
            created_at: None,
        })
    }

    async fn delete_user_recipe(&self, id: u32) -> ApiResult<()> {
        self.record(Call::DeleteUserRecipe(id));
        Ok(())
    }

    async fn recipe_debug(&self, recipe_id: u32, demo_user: u8) -> ApiResult<RecipeDebug> {
        self.record(Call::RecipeDebug(recipe_id, demo_user));
        self.canned.borrow().debug.clone().ok_or_else(offline)
    }

    async fn admin_status(&self) -> ApiResult<AdminStatus> {
        self.record(Call::AdminStatus);
        let canned = self.canned.borrow();
        if canned.fail_admin {
            return Err(offline());
        }
        Ok(canned.admin_status.clone().unwrap_or_default())
    }

    async fn conversion(&self, days: u32) -> ApiResult<ConversionStats> {
        self.record(Call::Conversion(days));
        let canned = self.canned.borrow();
        if canned.fail_admin {
            return Err(offline());
        }
        Ok(canned.conversion.clone().unwrap_or_default())
    }
}
