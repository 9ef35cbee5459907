// src/handlers/mod.rs

pub mod dashboard;
pub mod feedback;
pub mod orders;
pub mod tables;
pub mod waste;
