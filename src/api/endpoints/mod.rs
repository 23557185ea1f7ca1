//! API endpoint handlers.
//!
//! Each module corresponds to a screen or feature of the client.

pub mod analysis;
pub mod chat;
pub mod dashboard;
pub mod emergency;
pub mod health;
pub mod profiles;
pub mod searches;
