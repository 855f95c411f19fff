//! Command table
//!
//! Every built-in command is a row of static data. Definitions are checked
//! when registered so that a bad default selector or a clashing alias is
//! caught before any invocation runs.

mod fleets;
mod license_endpoints;
mod metered_products;
mod session_actions;
mod storage_profiles;

use farm_core::{CommandDefinition, Noun, ParamDescriptor, ParamKind};

use crate::error::DefinitionError;
use crate::projection::Projection;

// Parameters shared by many commands

pub(crate) const FARM_ID: ParamDescriptor =
    ParamDescriptor::required("FarmId", ParamKind::String, "Farm that owns the resource");

pub(crate) const MAX_RESULTS: ParamDescriptor =
    ParamDescriptor::optional("MaxResults", ParamKind::Int, "Maximum number of items to return")
        .with_aliases(&["MaxItems"]);

pub(crate) const NEXT_TOKEN: ParamDescriptor = ParamDescriptor::optional(
    "NextToken",
    ParamKind::String,
    "Token from a previous call to continue listing",
);

pub(crate) const CLIENT_TOKEN: ParamDescriptor = ParamDescriptor::optional(
    "ClientToken",
    ParamKind::String,
    "Idempotency token for the request",
);

pub(crate) const TAGS: ParamDescriptor =
    ParamDescriptor::optional("Tags", ParamKind::Object, "Tags to attach, as a JSON object");

const BUILTIN: &[&[CommandDefinition]] = &[
    fleets::COMMANDS,
    storage_profiles::COMMANDS,
    license_endpoints::COMMANDS,
    metered_products::COMMANDS,
    session_actions::COMMANDS,
];

/// Registered command definitions
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<&'static CommandDefinition>,
}

impl CommandRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command
    pub fn builtin() -> Result<Self, DefinitionError> {
        let mut registry = Self::new();
        for definition in BUILTIN.iter().flat_map(|commands| commands.iter()) {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Validate and add a definition
    ///
    /// # Errors
    /// Returns an error if the name is already registered, a parameter name or
    /// alias is declared twice, or the default selector does not resolve.
    pub fn register(&mut self, definition: &'static CommandDefinition) -> Result<(), DefinitionError> {
        if self.get(definition.name).is_some() {
            return Err(DefinitionError::DuplicateCommand(definition.name));
        }

        validate(definition)?;
        self.commands.push(definition);
        Ok(())
    }

    /// Look up a command by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&'static CommandDefinition> {
        self.commands
            .iter()
            .copied()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static CommandDefinition> + '_ {
        self.commands.iter().copied()
    }

    pub fn by_noun(&self, noun: Noun) -> impl Iterator<Item = &'static CommandDefinition> + '_ {
        self.iter().filter(move |definition| definition.noun == noun)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn validate(definition: &'static CommandDefinition) -> Result<(), DefinitionError> {
    let mut keys: Vec<String> = Vec::new();
    for param in definition.params {
        for key in std::iter::once(&param.name).chain(param.aliases) {
            let key = key.to_ascii_lowercase();
            if keys.contains(&key) {
                return Err(DefinitionError::DuplicateParameter {
                    command: definition.name,
                    key,
                });
            }
            keys.push(key);
        }
    }

    Projection::resolve(definition, None).map_err(|e| DefinitionError::InvalidDefaultSelect {
        command: definition.name,
        reason: e.to_string(),
    })?;

    Ok(())
}
