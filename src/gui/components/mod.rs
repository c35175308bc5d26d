// src/gui/components/mod.rs
pub mod confirm_delete;
pub mod data_table;
pub mod notifications;
pub mod toolbar;
