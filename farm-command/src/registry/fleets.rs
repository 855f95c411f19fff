//! Fleet commands

use farm_core::domain::FleetStatus;
use farm_core::{CommandDefinition, Noun, ParamDescriptor, ParamKind};

use super::{CLIENT_TOKEN, FARM_ID, MAX_RESULTS, NEXT_TOKEN, TAGS};

const FLEET_ID: ParamDescriptor =
    ParamDescriptor::required("FleetId", ParamKind::String, "Fleet to act on").with_aliases(&["Id"]);

const FLEET_FIELDS: &[&str] = &[
    "FleetId",
    "FarmId",
    "DisplayName",
    "Description",
    "Status",
    "AutoScalingStatus",
    "TargetWorkerCount",
    "WorkerCount",
    "MinWorkerCount",
    "MaxWorkerCount",
    "Capabilities",
    "RoleArn",
    "Configuration",
    "CreatedAt",
    "CreatedBy",
    "UpdatedAt",
    "UpdatedBy",
];

pub(super) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "ListFleets",
        noun: Noun::Fleet,
        synopsis: "List the fleets in a farm",
        params: &[
            FARM_ID,
            ParamDescriptor::optional("DisplayName", ParamKind::String, "Only fleets with this name"),
            ParamDescriptor::optional(
                "PrincipalId",
                ParamKind::String,
                "Only fleets this principal is a member of",
            ),
            ParamDescriptor::optional(
                "Status",
                ParamKind::Enum(FleetStatus::WIRE_NAMES),
                "Only fleets in this status",
            ),
            MAX_RESULTS,
            NEXT_TOKEN,
        ],
        response_fields: &["Fleets", "NextToken"],
        default_select: "Fleets",
        cancellable: false,
    },
    CommandDefinition {
        name: "GetFleet",
        noun: Noun::Fleet,
        synopsis: "Get the details of a fleet",
        params: &[FARM_ID, FLEET_ID],
        response_fields: FLEET_FIELDS,
        default_select: "*",
        cancellable: false,
    },
    CommandDefinition {
        name: "CreateFleet",
        noun: Noun::Fleet,
        synopsis: "Create a fleet of workers in a farm",
        params: &[
            FARM_ID,
            ParamDescriptor::required("DisplayName", ParamKind::String, "Name shown for the fleet")
                .with_aliases(&["Name"]),
            ParamDescriptor::optional("Description", ParamKind::String, "Fleet description"),
            ParamDescriptor::required(
                "RoleArn",
                ParamKind::String,
                "Role the fleet's workers assume",
            ),
            ParamDescriptor::optional("MinWorkerCount", ParamKind::Int, "Minimum number of workers"),
            ParamDescriptor::required("MaxWorkerCount", ParamKind::Int, "Maximum number of workers"),
            ParamDescriptor::required(
                "Configuration",
                ParamKind::Object,
                "Worker configuration, as a JSON object",
            ),
            TAGS,
            CLIENT_TOKEN,
        ],
        response_fields: &["FleetId"],
        default_select: "FleetId",
        cancellable: false,
    },
    CommandDefinition {
        name: "UpdateFleet",
        noun: Noun::Fleet,
        synopsis: "Update the settings of a fleet",
        params: &[
            FARM_ID,
            FLEET_ID,
            ParamDescriptor::optional("DisplayName", ParamKind::String, "Name shown for the fleet")
                .with_aliases(&["Name"]),
            ParamDescriptor::optional(
                "Description",
                ParamKind::String,
                "Fleet description; null clears it",
            )
            .tracked(),
            ParamDescriptor::optional("RoleArn", ParamKind::String, "Role the fleet's workers assume"),
            ParamDescriptor::optional("MinWorkerCount", ParamKind::Int, "Minimum number of workers"),
            ParamDescriptor::optional("MaxWorkerCount", ParamKind::Int, "Maximum number of workers"),
            ParamDescriptor::optional(
                "Configuration",
                ParamKind::Object,
                "Worker configuration, as a JSON object",
            ),
            CLIENT_TOKEN,
        ],
        response_fields: &[],
        default_select: "*",
        cancellable: false,
    },
    CommandDefinition {
        name: "DeleteFleet",
        noun: Noun::Fleet,
        synopsis: "Delete a fleet",
        params: &[FARM_ID, FLEET_ID, CLIENT_TOKEN],
        response_fields: &[],
        default_select: "*",
        cancellable: false,
    },
];
