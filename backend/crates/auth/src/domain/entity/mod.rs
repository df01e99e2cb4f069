//! Entity Module

pub mod profile;
pub mod refresh_token;
