//! UI Components
//!
//! Leptos views over the screen controllers.

mod add_recipe_form;
mod admin_screen;
mod bottom_nav;
mod delete_confirm_button;
mod login_screen;
mod my_recipes_screen;
mod pantry_screen;
mod recipe_detail_page;
mod recommend_screen;
mod saved_screen;

pub use add_recipe_form::AddRecipeForm;
pub use admin_screen::AdminScreen;
pub use bottom_nav::BottomNav;
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_screen::LoginScreen;
pub use my_recipes_screen::MyRecipesScreen;
pub use pantry_screen::PantryScreen;
pub use recipe_detail_page::RecipeDetailPage;
pub use recommend_screen::RecommendScreen;
pub use saved_screen::SavedScreen;
