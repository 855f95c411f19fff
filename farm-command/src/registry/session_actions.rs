//! Session action commands

use farm_core::{CommandDefinition, Noun, ParamDescriptor, ParamKind};

use super::{FARM_ID, MAX_RESULTS, NEXT_TOKEN};

const QUEUE_ID: ParamDescriptor =
    ParamDescriptor::required("QueueId", ParamKind::String, "Queue the job belongs to");

const JOB_ID: ParamDescriptor =
    ParamDescriptor::required("JobId", ParamKind::String, "Job the session actions belong to");

pub(super) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "ListSessionActions",
        noun: Noun::SessionAction,
        synopsis: "List the session actions of a job",
        params: &[
            FARM_ID,
            QUEUE_ID,
            JOB_ID,
            ParamDescriptor::optional("SessionId", ParamKind::String, "Only actions of this session"),
            ParamDescriptor::optional("TaskId", ParamKind::String, "Only actions of this task"),
            MAX_RESULTS,
            NEXT_TOKEN,
        ],
        response_fields: &["SessionActions", "NextToken"],
        default_select: "SessionActions",
        // Large jobs page slowly; this is the one command that honours a stop request
        cancellable: true,
    },
    CommandDefinition {
        name: "GetSessionAction",
        noun: Noun::SessionAction,
        synopsis: "Get the details of a session action",
        params: &[
            FARM_ID,
            QUEUE_ID,
            JOB_ID,
            ParamDescriptor::required(
                "SessionActionId",
                ParamKind::String,
                "Session action to get",
            )
            .with_aliases(&["Id"]),
        ],
        response_fields: &[
            "SessionActionId",
            "Status",
            "StartedAt",
            "EndedAt",
            "WorkerUpdatedAt",
            "ProgressPercent",
            "SessionId",
            "ProcessExitCode",
            "ProgressMessage",
            "Definition",
        ],
        default_select: "*",
        cancellable: false,
    },
];
