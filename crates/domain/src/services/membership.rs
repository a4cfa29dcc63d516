//! Membership rules for the join-request and participant state machine.
//!
//! These checks are advisory at submission time and authoritative at
//! acceptance time: the persistence layer re-runs the acceptance gate under
//! a row lock, so the functions here must stay side-effect free.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{ParticipantRole, RequestDecision, RequestStatus, TripStatus};

/// The slice of trip state that membership decisions depend on.
#[derive(Debug, Clone, Copy)]
pub struct TripGate {
    pub host_id: Uuid,
    pub status: TripStatus,
    pub open_slots: i32,
    pub current_participants: i32,
}

impl TripGate {
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.open_slots
    }
}

/// Everything that can stop a membership transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("Trip is no longer active")]
    TripNotActive,
    #[error("You cannot request to join your own trip")]
    OwnTrip,
    #[error("You have already requested to join this trip")]
    DuplicateRequest,
    #[error("You are already a participant of this trip")]
    AlreadyParticipant,
    #[error("No open slots available")]
    NoOpenSlots,
    #[error("Request has already been processed")]
    RequestNotPending,
    #[error("Only the trip host can perform this action")]
    NotHost,
    #[error("Only the trip host or the participant themselves can remove a participant")]
    NotHostOrSelf,
    #[error("The host cannot be removed from their own trip")]
    HostNotRemovable,
}

/// How a participant left the trip; drives the response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// The participant removed themselves.
    Left,
    /// The host removed them.
    Removed,
}

/// Gate for submitting a join request. Checks run in a fixed order so the
/// caller always reports the most specific failure first.
pub fn check_submit(
    gate: &TripGate,
    requester_id: Uuid,
    has_existing_request: bool,
    is_participant: bool,
) -> Result<(), MembershipError> {
    if !gate.status.is_active() {
        return Err(MembershipError::TripNotActive);
    }
    if requester_id == gate.host_id {
        return Err(MembershipError::OwnTrip);
    }
    if has_existing_request {
        return Err(MembershipError::DuplicateRequest);
    }
    if is_participant {
        return Err(MembershipError::AlreadyParticipant);
    }
    if gate.is_full() {
        return Err(MembershipError::NoOpenSlots);
    }
    Ok(())
}

/// Gate for a host decision on a request. Capacity and liveness are only
/// enforced when accepting; a rejection of a stale request is still allowed.
pub fn check_decision(
    gate: &TripGate,
    actor_id: Uuid,
    request_status: RequestStatus,
    decision: RequestDecision,
) -> Result<(), MembershipError> {
    if actor_id != gate.host_id {
        return Err(MembershipError::NotHost);
    }
    if request_status.is_terminal() {
        return Err(MembershipError::RequestNotPending);
    }
    if decision == RequestDecision::Accepted {
        if !gate.status.is_active() {
            return Err(MembershipError::TripNotActive);
        }
        if gate.is_full() {
            return Err(MembershipError::NoOpenSlots);
        }
    }
    Ok(())
}

/// Gate for removing a participant. The actor must be the host or the
/// participant themselves, and the host row itself is never removable.
pub fn check_remove(
    gate: &TripGate,
    actor_id: Uuid,
    participant_user_id: Uuid,
    participant_role: ParticipantRole,
) -> Result<RemovalKind, MembershipError> {
    let is_self = actor_id == participant_user_id;
    if !is_self && actor_id != gate.host_id {
        return Err(MembershipError::NotHostOrSelf);
    }
    if !participant_role.is_removable() {
        return Err(MembershipError::HostNotRemovable);
    }
    if is_self {
        Ok(RemovalKind::Left)
    } else {
        Ok(RemovalKind::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(status: TripStatus, open_slots: i32, current: i32) -> TripGate {
        TripGate {
            host_id: Uuid::new_v4(),
            status,
            open_slots,
            current_participants: current,
        }
    }

    #[test]
    fn test_submit_ok() {
        let g = gate(TripStatus::Active, 4, 1);
        assert!(check_submit(&g, Uuid::new_v4(), false, false).is_ok());
    }

    #[test]
    fn test_submit_rejects_cancelled_trip() {
        let g = gate(TripStatus::Cancelled, 4, 1);
        assert_eq!(
            check_submit(&g, Uuid::new_v4(), false, false),
            Err(MembershipError::TripNotActive)
        );
    }

    #[test]
    fn test_submit_rejects_host() {
        let g = gate(TripStatus::Active, 4, 1);
        assert_eq!(
            check_submit(&g, g.host_id, false, false),
            Err(MembershipError::OwnTrip)
        );
    }

    #[test]
    fn test_submit_rejects_duplicate() {
        let g = gate(TripStatus::Active, 4, 1);
        assert_eq!(
            check_submit(&g, Uuid::new_v4(), true, false),
            Err(MembershipError::DuplicateRequest)
        );
    }

    #[test]
    fn test_submit_rejects_existing_participant() {
        let g = gate(TripStatus::Active, 4, 1);
        assert_eq!(
            check_submit(&g, Uuid::new_v4(), false, true),
            Err(MembershipError::AlreadyParticipant)
        );
    }

    #[test]
    fn test_submit_rejects_full_trip() {
        let g = gate(TripStatus::Active, 2, 2);
        assert_eq!(
            check_submit(&g, Uuid::new_v4(), false, false),
            Err(MembershipError::NoOpenSlots)
        );
    }

    #[test]
    fn test_submit_check_order_host_before_capacity() {
        // A full, inactive trip still reports the liveness failure first.
        let g = gate(TripStatus::Cancelled, 1, 1);
        assert_eq!(
            check_submit(&g, g.host_id, true, true),
            Err(MembershipError::TripNotActive)
        );
    }

    #[test]
    fn test_decision_requires_host() {
        let g = gate(TripStatus::Active, 4, 1);
        assert_eq!(
            check_decision(&g, Uuid::new_v4(), RequestStatus::Pending, RequestDecision::Accepted),
            Err(MembershipError::NotHost)
        );
    }

    #[test]
    fn test_decision_rejects_processed_request() {
        let g = gate(TripStatus::Active, 4, 1);
        assert_eq!(
            check_decision(&g, g.host_id, RequestStatus::Accepted, RequestDecision::Rejected),
            Err(MembershipError::RequestNotPending)
        );
    }

    #[test]
    fn test_accept_rejects_full_trip() {
        let g = gate(TripStatus::Active, 2, 2);
        assert_eq!(
            check_decision(&g, g.host_id, RequestStatus::Pending, RequestDecision::Accepted),
            Err(MembershipError::NoOpenSlots)
        );
    }

    #[test]
    fn test_accept_rejects_cancelled_trip() {
        let g = gate(TripStatus::Cancelled, 4, 1);
        assert_eq!(
            check_decision(&g, g.host_id, RequestStatus::Pending, RequestDecision::Accepted),
            Err(MembershipError::TripNotActive)
        );
    }

    #[test]
    fn test_reject_allowed_on_full_or_cancelled_trip() {
        let full = gate(TripStatus::Active, 2, 2);
        assert!(
            check_decision(&full, full.host_id, RequestStatus::Pending, RequestDecision::Rejected)
                .is_ok()
        );
        let cancelled = gate(TripStatus::Cancelled, 4, 1);
        assert!(check_decision(
            &cancelled,
            cancelled.host_id,
            RequestStatus::Pending,
            RequestDecision::Rejected
        )
        .is_ok());
    }

    #[test]
    fn test_accept_ok_with_last_slot() {
        let g = gate(TripStatus::Active, 3, 2);
        assert!(
            check_decision(&g, g.host_id, RequestStatus::Pending, RequestDecision::Accepted)
                .is_ok()
        );
    }

    #[test]
    fn test_remove_self_leaves() {
        let g = gate(TripStatus::Active, 4, 2);
        let member = Uuid::new_v4();
        assert_eq!(
            check_remove(&g, member, member, ParticipantRole::Participant),
            Ok(RemovalKind::Left)
        );
    }

    #[test]
    fn test_remove_by_host() {
        let g = gate(TripStatus::Active, 4, 2);
        assert_eq!(
            check_remove(&g, g.host_id, Uuid::new_v4(), ParticipantRole::Participant),
            Ok(RemovalKind::Removed)
        );
    }

    #[test]
    fn test_remove_by_stranger_forbidden() {
        let g = gate(TripStatus::Active, 4, 2);
        assert_eq!(
            check_remove(&g, Uuid::new_v4(), Uuid::new_v4(), ParticipantRole::Participant),
            Err(MembershipError::NotHostOrSelf)
        );
    }

    #[test]
    fn test_host_row_never_removable() {
        let g = gate(TripStatus::Active, 4, 2);
        assert_eq!(
            check_remove(&g, g.host_id, g.host_id, ParticipantRole::Host),
            Err(MembershipError::HostNotRemovable)
        );
    }
}
