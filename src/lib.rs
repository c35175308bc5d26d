// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod log;

pub mod csv;
pub mod dashboard;
pub mod export;
pub mod file;
pub mod gui;
pub mod model;
pub mod net;
pub mod notify;
pub mod store;
pub mod view;
