//! Metered product commands

use farm_core::{CommandDefinition, Noun, ParamDescriptor, ParamKind};

use super::license_endpoints::LICENSE_ENDPOINT_ID;
use super::{MAX_RESULTS, NEXT_TOKEN};

const PRODUCT_ID: ParamDescriptor =
    ParamDescriptor::required("ProductId", ParamKind::String, "Metered product to act on");

pub(super) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "ListMeteredProducts",
        noun: Noun::MeteredProduct,
        synopsis: "List the products metered by a license endpoint",
        params: &[LICENSE_ENDPOINT_ID, MAX_RESULTS, NEXT_TOKEN],
        response_fields: &["MeteredProducts", "NextToken"],
        default_select: "MeteredProducts",
        cancellable: false,
    },
    CommandDefinition {
        name: "ListAvailableMeteredProducts",
        noun: Noun::MeteredProduct,
        synopsis: "List the products that can be metered",
        params: &[MAX_RESULTS, NEXT_TOKEN],
        response_fields: &["MeteredProducts", "NextToken"],
        default_select: "MeteredProducts",
        cancellable: false,
    },
    CommandDefinition {
        name: "PutMeteredProduct",
        noun: Noun::MeteredProduct,
        synopsis: "Add a metered product to a license endpoint",
        params: &[LICENSE_ENDPOINT_ID, PRODUCT_ID],
        response_fields: &[],
        default_select: "*",
        cancellable: false,
    },
    CommandDefinition {
        name: "DeleteMeteredProduct",
        noun: Noun::MeteredProduct,
        synopsis: "Remove a metered product from a license endpoint",
        params: &[LICENSE_ENDPOINT_ID, PRODUCT_ID],
        response_fields: &[],
        default_select: "*",
        cancellable: false,
    },
];
