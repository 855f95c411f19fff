//! Session action routes

use super::{Method, Route};

pub(super) const ROUTES: &[Route] = &[
    Route::new(
        "ListSessionActions",
        Method::Get,
        "/2023-10-12/farms/{FarmId}/queues/{QueueId}/jobs/{JobId}/session-actions",
    ),
    Route::new(
        "GetSessionAction",
        Method::Get,
        "/2023-10-12/farms/{FarmId}/queues/{QueueId}/jobs/{JobId}/session-actions/{SessionActionId}",
    ),
];
