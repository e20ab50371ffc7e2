//! HTTP handlers

pub mod health;
pub mod dashboard;
pub mod profiles;
pub mod alerts;
pub mod timeline;
pub mod predict;
