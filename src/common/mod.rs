// src/common/mod.rs

pub mod error;
pub mod ids;
