pub mod action;
pub mod save;
pub mod scene;
