// src/pdf/mod.rs
pub mod models;
pub mod reader;
