pub mod catalog;
pub mod effects;
pub mod machine;
pub mod navigation;
pub mod pool;
pub mod state;
