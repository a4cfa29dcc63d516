//! HTTP route handlers.

pub mod auth;
pub mod chats;
pub mod health;
pub mod participants;
pub mod requests;
pub mod trips;
