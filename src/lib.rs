//! Gamebook Engine: choice-driven interactive fiction for games.
//!
//! Walks a player through a directed graph of narrative scenes, applies
//! inventory, ability, and status effects attached to choices, and
//! resolves branching endings from accumulated state. Front ends drive
//! the engine through a rendering sink and a single choice-selection
//! call; rendering, input, and persistence mechanics stay outside.

pub mod core;
pub mod schema;
