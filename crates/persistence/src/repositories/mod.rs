//! Repository implementations for database operations.

pub mod chat;
pub mod participant;
pub mod trip;
pub mod trip_request;
pub mod user;

pub use chat::ChatRepository;
pub use participant::ParticipantRepository;
pub use trip::TripRepository;
pub use trip_request::{AcceptOutcome, TripRequestRepository};
pub use user::UserRepository;
