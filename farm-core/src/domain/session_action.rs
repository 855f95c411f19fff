//! Session action domain types

use super::StatusTone;

wire_enum! {
    /// Execution status of a session action
    SessionActionStatus {
        Assigned => "ASSIGNED",
        Running => "RUNNING",
        Canceling => "CANCELING",
        Succeeded => "SUCCEEDED",
        Failed => "FAILED",
        Interrupted => "INTERRUPTED",
        Canceled => "CANCELED",
        NeverAttempted => "NEVER_ATTEMPTED",
        Scheduled => "SCHEDULED",
        Reclaiming => "RECLAIMING",
        Reclaimed => "RECLAIMED",
    }
}

impl SessionActionStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            SessionActionStatus::Succeeded => StatusTone::Good,
            SessionActionStatus::Assigned
            | SessionActionStatus::Running
            | SessionActionStatus::Scheduled
            | SessionActionStatus::Canceling
            | SessionActionStatus::Reclaiming => StatusTone::Pending,
            SessionActionStatus::Failed | SessionActionStatus::Interrupted => StatusTone::Bad,
            SessionActionStatus::Canceled
            | SessionActionStatus::NeverAttempted
            | SessionActionStatus::Reclaimed => StatusTone::Neutral,
        }
    }
}
