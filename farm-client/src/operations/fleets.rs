//! Fleet routes

use super::{Method, Route};

pub(super) const ROUTES: &[Route] = &[
    Route::new("ListFleets", Method::Get, "/2023-10-12/farms/{FarmId}/fleets"),
    Route::new("GetFleet", Method::Get, "/2023-10-12/farms/{FarmId}/fleets/{FleetId}"),
    Route::new("CreateFleet", Method::Post, "/2023-10-12/farms/{FarmId}/fleets"),
    Route::new("UpdateFleet", Method::Patch, "/2023-10-12/farms/{FarmId}/fleets/{FleetId}"),
    Route::new("DeleteFleet", Method::Delete, "/2023-10-12/farms/{FarmId}/fleets/{FleetId}"),
];
