// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (auth layer from `middleware::protect`)
pub mod extract;
pub mod protected;
pub mod public;
