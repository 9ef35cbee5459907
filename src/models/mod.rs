// src/models/mod.rs

pub mod ai;
pub mod dashboard;
pub mod feedback;
pub mod menu;
pub mod order;
pub mod table;
pub mod waste;
