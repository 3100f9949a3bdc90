pub mod core;
pub mod painting;
pub mod settings;
pub mod tool;
