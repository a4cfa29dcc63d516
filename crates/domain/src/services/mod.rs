//! Pure domain services: rules that do not touch the database.

pub mod membership;

pub use membership::{
    check_decision, check_remove, check_submit, MembershipError, RemovalKind, TripGate,
};
