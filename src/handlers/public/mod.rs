// handlers/public/mod.rs - handlers reachable without a token

pub mod ingredient;
pub mod post;
pub mod system;
