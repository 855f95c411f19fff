//! License endpoint and metered product routes

use super::{Method, Route};

pub(super) const ROUTES: &[Route] = &[
    Route::new("ListLicenseEndpoints", Method::Get, "/2023-10-12/license-endpoints"),
    Route::new(
        "GetLicenseEndpoint",
        Method::Get,
        "/2023-10-12/license-endpoints/{LicenseEndpointId}",
    ),
    Route::new("CreateLicenseEndpoint", Method::Post, "/2023-10-12/license-endpoints"),
    Route::new(
        "DeleteLicenseEndpoint",
        Method::Delete,
        "/2023-10-12/license-endpoints/{LicenseEndpointId}",
    ),
    // Metered products hang off a license endpoint
    Route::new(
        "ListMeteredProducts",
        Method::Get,
        "/2023-10-12/license-endpoints/{LicenseEndpointId}/metered-products",
    ),
    Route::new(
        "PutMeteredProduct",
        Method::Put,
        "/2023-10-12/license-endpoints/{LicenseEndpointId}/metered-products/{ProductId}",
    ),
    Route::new(
        "DeleteMeteredProduct",
        Method::Delete,
        "/2023-10-12/license-endpoints/{LicenseEndpointId}/metered-products/{ProductId}",
    ),
    Route::new(
        "ListAvailableMeteredProducts",
        Method::Get,
        "/2023-10-12/metered-products",
    ),
];
