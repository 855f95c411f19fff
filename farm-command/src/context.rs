//! Per-invocation context

use std::collections::BTreeMap;

use farm_core::{CommandDefinition, Supplied};

use crate::projection::Projection;

static ABSENT: Supplied = Supplied::Absent;

/// Parameters one caller actually supplied, plus the resolved projection
///
/// Created by binding, owned by a single invocation and dropped when it
/// completes.
#[derive(Debug, Clone)]
pub struct InvocationContext<'d> {
    definition: &'d CommandDefinition,
    values: BTreeMap<&'static str, Supplied>,
    projection: Projection,
}

impl<'d> InvocationContext<'d> {
    pub(crate) fn new(
        definition: &'d CommandDefinition,
        values: BTreeMap<&'static str, Supplied>,
        projection: Projection,
    ) -> Self {
        Self {
            definition,
            values,
            projection,
        }
    }

    pub fn definition(&self) -> &'d CommandDefinition {
        self.definition
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Value supplied for a parameter, by primary name
    pub fn get(&self, param: &str) -> &Supplied {
        self.values.get(param).unwrap_or(&ABSENT)
    }

    pub fn is_supplied(&self, param: &str) -> bool {
        self.get(param).is_supplied()
    }

    /// Supplied parameters, by primary name
    pub fn supplied(&self) -> impl Iterator<Item = (&'static str, &Supplied)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}
