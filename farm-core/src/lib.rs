//! Farm Core
//!
//! Shared data model for the farm command pipeline.
//!
//! This crate contains:
//! - Command definitions: static descriptions of remote operations and their parameters
//! - Supplied values: the tri-state used to track which parameters a caller set
//! - Domain types: farm enums whose wire names back enumerated parameters

pub mod definition;
pub mod domain;
pub mod value;

pub use definition::{CommandDefinition, KeyMatch, Noun, ParamDescriptor, ParamKind};
pub use value::Supplied;
