pub mod keys;
pub mod raw;
pub mod render;
pub mod theme;
