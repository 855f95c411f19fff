//! Storage profile commands

use farm_core::domain::OsFamily;
use farm_core::{CommandDefinition, Noun, ParamDescriptor, ParamKind};

use super::{CLIENT_TOKEN, FARM_ID, MAX_RESULTS, NEXT_TOKEN};

const STORAGE_PROFILE_ID: ParamDescriptor = ParamDescriptor::required(
    "StorageProfileId",
    ParamKind::String,
    "Storage profile to act on",
)
.with_aliases(&["Id"]);

const OS_FAMILY: ParamKind = ParamKind::Enum(OsFamily::WIRE_NAMES);

pub(super) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "ListStorageProfiles",
        noun: Noun::StorageProfile,
        synopsis: "List the storage profiles in a farm",
        params: &[FARM_ID, MAX_RESULTS, NEXT_TOKEN],
        response_fields: &["StorageProfiles", "NextToken"],
        default_select: "StorageProfiles",
        cancellable: false,
    },
    CommandDefinition {
        name: "GetStorageProfile",
        noun: Noun::StorageProfile,
        synopsis: "Get the details of a storage profile",
        params: &[FARM_ID, STORAGE_PROFILE_ID],
        response_fields: &[
            "StorageProfileId",
            "DisplayName",
            "OsFamily",
            "FileSystemLocations",
            "CreatedAt",
            "CreatedBy",
            "UpdatedAt",
            "UpdatedBy",
        ],
        default_select: "*",
        cancellable: false,
    },
    CommandDefinition {
        name: "CreateStorageProfile",
        noun: Noun::StorageProfile,
        synopsis: "Create a storage profile for a farm",
        params: &[
            FARM_ID,
            ParamDescriptor::required(
                "DisplayName",
                ParamKind::String,
                "Name shown for the storage profile",
            )
            .with_aliases(&["Name"]),
            ParamDescriptor::required("OsFamily", OS_FAMILY, "Operating system family"),
            ParamDescriptor::optional(
                "FileSystemLocations",
                ParamKind::ObjectList,
                "File system locations, as JSON objects",
            ),
            CLIENT_TOKEN,
        ],
        response_fields: &["StorageProfileId"],
        default_select: "StorageProfileId",
        cancellable: false,
    },
    CommandDefinition {
        name: "UpdateStorageProfile",
        noun: Noun::StorageProfile,
        synopsis: "Update a storage profile",
        params: &[
            FARM_ID,
            STORAGE_PROFILE_ID,
            ParamDescriptor::optional(
                "DisplayName",
                ParamKind::String,
                "Name shown for the storage profile",
            )
            .with_aliases(&["Name"]),
            ParamDescriptor::optional("OsFamily", OS_FAMILY, "Operating system family"),
            ParamDescriptor::optional(
                "FileSystemLocationsToAdd",
                ParamKind::ObjectList,
                "File system locations to add",
            ),
            ParamDescriptor::optional(
                "FileSystemLocationsToRemove",
                ParamKind::ObjectList,
                "File system locations to remove",
            ),
            CLIENT_TOKEN,
        ],
        response_fields: &[],
        default_select: "*",
        cancellable: false,
    },
    CommandDefinition {
        name: "DeleteStorageProfile",
        noun: Noun::StorageProfile,
        synopsis: "Delete a storage profile",
        params: &[FARM_ID, STORAGE_PROFILE_ID],
        response_fields: &[],
        default_select: "*",
        cancellable: false,
    },
];
