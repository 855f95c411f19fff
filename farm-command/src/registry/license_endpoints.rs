//! License endpoint commands

use farm_core::{CommandDefinition, Noun, ParamDescriptor, ParamKind};

use super::{CLIENT_TOKEN, MAX_RESULTS, NEXT_TOKEN, TAGS};

pub(super) const LICENSE_ENDPOINT_ID: ParamDescriptor = ParamDescriptor::required(
    "LicenseEndpointId",
    ParamKind::String,
    "License endpoint to act on",
);

pub(super) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "ListLicenseEndpoints",
        noun: Noun::LicenseEndpoint,
        synopsis: "List license endpoints",
        params: &[MAX_RESULTS, NEXT_TOKEN],
        response_fields: &["LicenseEndpoints", "NextToken"],
        default_select: "LicenseEndpoints",
        cancellable: false,
    },
    CommandDefinition {
        name: "GetLicenseEndpoint",
        noun: Noun::LicenseEndpoint,
        synopsis: "Get the details of a license endpoint",
        params: &[LICENSE_ENDPOINT_ID.with_aliases(&["Id"])],
        response_fields: &[
            "LicenseEndpointId",
            "Status",
            "StatusMessage",
            "VpcId",
            "DnsName",
            "SubnetIds",
            "SecurityGroupIds",
        ],
        default_select: "*",
        cancellable: false,
    },
    CommandDefinition {
        name: "CreateLicenseEndpoint",
        noun: Noun::LicenseEndpoint,
        synopsis: "Create a license endpoint inside a VPC",
        params: &[
            ParamDescriptor::required("VpcId", ParamKind::String, "VPC to place the endpoint in"),
            ParamDescriptor::required("SubnetIds", ParamKind::StringList, "Subnets for the endpoint")
                .with_aliases(&["SubnetId"]),
            ParamDescriptor::required(
                "SecurityGroupIds",
                ParamKind::StringList,
                "Security groups for the endpoint",
            )
            .with_aliases(&["SecurityGroupId"]),
            TAGS,
            CLIENT_TOKEN,
        ],
        response_fields: &["LicenseEndpointId"],
        default_select: "LicenseEndpointId",
        cancellable: false,
    },
    CommandDefinition {
        name: "DeleteLicenseEndpoint",
        noun: Noun::LicenseEndpoint,
        synopsis: "Delete a license endpoint",
        params: &[LICENSE_ENDPOINT_ID.with_aliases(&["Id"])],
        response_fields: &[],
        default_select: "*",
        cancellable: false,
    },
];
