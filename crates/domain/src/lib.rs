//! Domain layer for the TripNect backend.
//!
//! This crate contains:
//! - Domain models (User, Trip, TripRequest, TripParticipant, chat types)
//! - The membership state machine rules shared by the API and tests
//! - Request/response payload types with validation

pub mod models;
pub mod services;
