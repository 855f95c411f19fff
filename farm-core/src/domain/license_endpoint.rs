//! License endpoint domain types

use super::StatusTone;

wire_enum! {
    /// Provisioning status of a license endpoint
    LicenseEndpointStatus {
        CreateInProgress => "CREATE_IN_PROGRESS",
        DeleteInProgress => "DELETE_IN_PROGRESS",
        Ready => "READY",
        NotReady => "NOT_READY",
    }
}

impl LicenseEndpointStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            LicenseEndpointStatus::Ready => StatusTone::Good,
            LicenseEndpointStatus::CreateInProgress | LicenseEndpointStatus::DeleteInProgress => {
                StatusTone::Pending
            }
            LicenseEndpointStatus::NotReady => StatusTone::Bad,
        }
    }
}
