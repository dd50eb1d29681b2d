pub mod config;
pub mod geometry;
pub mod landmarks;

// Per-exercise rule sets
pub mod exercises;

// Request handling and dispatch
pub mod form_analyzer;
