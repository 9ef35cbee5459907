// src/middleware/mod.rs

pub mod i18n;
