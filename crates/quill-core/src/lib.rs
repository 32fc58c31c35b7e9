//! Core Quill library (config, session, data model, backend API client).

pub mod api;
pub mod config;
pub mod models;
pub mod session;
