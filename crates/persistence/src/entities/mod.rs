//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod chat;
pub mod participant;
pub mod trip;
pub mod trip_request;
pub mod user;

pub use chat::{ChatMessageEntity, GroupChatEntity, MessageTypeDb, MessageWithUserEntity};
pub use participant::{ParticipantRoleDb, ParticipantWithUserEntity, TripParticipantEntity};
pub use trip::{TripEntity, TripStatusDb, TripWithHostEntity};
pub use trip_request::{RequestStatusDb, RequestWithContextEntity, TripRequestEntity};
pub use user::UserEntity;
