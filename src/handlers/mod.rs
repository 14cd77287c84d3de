// handlers/mod.rs - two handler tiers
//
// public:    no token (/, /health, /posts, ingredient lookups)
// protected: JWT required (/post/**)

pub mod protected;
pub mod public;
pub mod utils;
