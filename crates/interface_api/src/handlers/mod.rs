//! Request handlers

pub mod associations;
pub mod health;
pub mod objects;
pub mod webhooks;
