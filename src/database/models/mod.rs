pub mod ingredient;
pub mod post;
pub mod user;

pub use ingredient::Ingredient;
pub use post::{NewPost, Post};
pub use user::User;
