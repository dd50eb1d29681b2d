// Data models for body landmarks and exercise form analysis

pub mod analysis;
pub mod pose;
