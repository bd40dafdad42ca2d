// src/collections/mod.rs
pub mod map;

pub use map::Map;
