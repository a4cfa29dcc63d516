//! Domain model definitions.

pub mod chat;
pub mod participant;
pub mod trip;
pub mod trip_request;
pub mod user;

pub use chat::{ChatMessage, ChatMessageView, GroupChat, MessageType, SendMessagePayload};
pub use participant::{ParticipantRole, ParticipantView, TripParticipant};
pub use trip::{
    CreateTripRequest, DestinationSuggestions, Trip, TripDetail, TripFeedFilters, TripStatus,
    TripSummary, UpdateTripRequest,
};
pub use trip_request::{
    CreateTripRequestPayload, RequestDecision, RequestDecisionResponse, RequestStatus, TripRequest,
    TripRequestView, UpdateRequestStatusPayload,
};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, TokenPair, User, UserProfile};
