//! Storage profile routes

use super::{Method, Route};

pub(super) const ROUTES: &[Route] = &[
    Route::new(
        "ListStorageProfiles",
        Method::Get,
        "/2023-10-12/farms/{FarmId}/storage-profiles",
    ),
    Route::new(
        "GetStorageProfile",
        Method::Get,
        "/2023-10-12/farms/{FarmId}/storage-profiles/{StorageProfileId}",
    ),
    Route::new(
        "CreateStorageProfile",
        Method::Post,
        "/2023-10-12/farms/{FarmId}/storage-profiles",
    ),
    Route::new(
        "UpdateStorageProfile",
        Method::Patch,
        "/2023-10-12/farms/{FarmId}/storage-profiles/{StorageProfileId}",
    ),
    Route::new(
        "DeleteStorageProfile",
        Method::Delete,
        "/2023-10-12/farms/{FarmId}/storage-profiles/{StorageProfileId}",
    ),
];
