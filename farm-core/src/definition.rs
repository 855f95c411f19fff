//! Command definitions
//!
//! A [`CommandDefinition`] is the static description of one remote operation:
//! the parameters a caller may bind, the fields the response is known to
//! carry, and the projection applied when the caller does not choose one.
//! Definitions are `'static` and never mutated at runtime.

use std::fmt;

/// Resource group a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Noun {
    Fleet,
    StorageProfile,
    LicenseEndpoint,
    MeteredProduct,
    SessionAction,
}

impl Noun {
    pub const ALL: &'static [Noun] = &[
        Noun::Fleet,
        Noun::StorageProfile,
        Noun::LicenseEndpoint,
        Noun::MeteredProduct,
        Noun::SessionAction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Noun::Fleet => "Fleet",
            Noun::StorageProfile => "StorageProfile",
            Noun::LicenseEndpoint => "LicenseEndpoint",
            Noun::MeteredProduct => "MeteredProduct",
            Noun::SessionAction => "SessionAction",
        }
    }

    /// Parse a noun, ignoring ASCII case
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|noun| noun.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value type accepted by a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Int,
    /// One of a fixed set of wire names
    Enum(&'static [&'static str]),
    StringList,
    Object,
    ObjectList,
}

impl ParamKind {
    /// Whether repeated occurrences of the parameter accumulate
    pub fn is_list(&self) -> bool {
        matches!(self, ParamKind::StringList | ParamKind::ObjectList)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::String => f.write_str("string"),
            ParamKind::Int => f.write_str("int"),
            ParamKind::Enum(variants) => write!(f, "{}", variants.join("|")),
            ParamKind::StringList => f.write_str("string[]"),
            ParamKind::Object => f.write_str("object"),
            ParamKind::ObjectList => f.write_str("object[]"),
        }
    }
}

/// How a caller-supplied key matched a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyMatch {
    /// Matched the primary name
    Primary,
    /// Matched the alias at this position in the declaration
    Alias(usize),
}

/// Static description of one command parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: ParamKind,
    pub required: bool,
    /// Forward an explicit null to the request instead of treating it as absent
    pub track_presence: bool,
    pub help: &'static str,
}

impl ParamDescriptor {
    pub const fn required(name: &'static str, kind: ParamKind, help: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            kind,
            required: true,
            track_presence: false,
            help,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind, help: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            kind,
            required: false,
            track_presence: false,
            help,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn tracked(mut self) -> Self {
        self.track_presence = true;
        self
    }

    /// Match a caller key against the primary name and aliases, ignoring ASCII case
    pub fn matches(&self, key: &str) -> Option<KeyMatch> {
        if self.name.eq_ignore_ascii_case(key) {
            return Some(KeyMatch::Primary);
        }

        self.aliases
            .iter()
            .position(|alias| alias.eq_ignore_ascii_case(key))
            .map(KeyMatch::Alias)
    }
}

/// Static description of one remote operation exposed as a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDefinition {
    /// Operation name, also the command name
    pub name: &'static str,
    pub noun: Noun,
    pub synopsis: &'static str,
    pub params: &'static [ParamDescriptor],
    /// Top-level fields the response is known to carry
    pub response_fields: &'static [&'static str],
    /// Projection used when the caller does not select one
    pub default_select: &'static str,
    /// Invocations race the remote call against a cancel signal
    pub cancellable: bool,
}

impl CommandDefinition {
    /// Find the parameter a caller key refers to
    pub fn param(&self, key: &str) -> Option<(&'static ParamDescriptor, KeyMatch)> {
        self.params
            .iter()
            .find_map(|param| param.matches(key).map(|m| (param, m)))
    }

    /// Canonical spelling of a response field, ignoring ASCII case
    pub fn response_field(&self, key: &str) -> Option<&'static str> {
        self.response_fields
            .iter()
            .copied()
            .find(|field| field.eq_ignore_ascii_case(key))
    }

    pub fn required_params(&self) -> impl Iterator<Item = &'static ParamDescriptor> {
        self.params.iter().filter(|param| param.required)
    }
}
