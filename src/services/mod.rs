pub mod ingredient_service;
pub mod post_service;

pub use ingredient_service::IngredientService;
pub use post_service::PostService;
