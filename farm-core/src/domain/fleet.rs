//! Fleet domain types

use super::StatusTone;

wire_enum! {
    /// Lifecycle status of a worker fleet
    FleetStatus {
        Active => "ACTIVE",
        CreateInProgress => "CREATE_IN_PROGRESS",
        UpdateInProgress => "UPDATE_IN_PROGRESS",
        CreateFailed => "CREATE_FAILED",
        UpdateFailed => "UPDATE_FAILED",
    }
}

impl FleetStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            FleetStatus::Active => StatusTone::Good,
            FleetStatus::CreateInProgress | FleetStatus::UpdateInProgress => StatusTone::Pending,
            FleetStatus::CreateFailed | FleetStatus::UpdateFailed => StatusTone::Bad,
        }
    }
}
