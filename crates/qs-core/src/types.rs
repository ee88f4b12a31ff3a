use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::QuestError;

/// The entity on whose behalf a script line runs.
///
/// Absence is always spelled `Option<&ActorContext>`; there is no "empty" actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorContext {
    pub id: String,
}

impl ActorContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for ActorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

fn name_regex() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("name regex must compile"))
}

pub fn is_valid_name(raw: &str) -> bool {
    name_regex().is_match(raw)
}

/// Names a declared instruction, e.g. a single test line in a suite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstructionId {
    pub package: Option<String>,
    pub name: String,
}

impl InstructionId {
    pub fn new(package: Option<String>, name: impl Into<String>) -> Self {
        Self {
            package,
            name: name.into(),
        }
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{}>{}", package, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Names a condition known to a [`crate::ConditionBackend`]. Written `[package>]name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PredicateId {
    pub package: Option<String>,
    pub name: String,
}

impl PredicateId {
    pub fn new(package: Option<String>, name: impl Into<String>) -> Self {
        Self {
            package,
            name: name.into(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let (package, name) = match raw.split_once('>') {
            Some((package, name)) => (Some(package), name),
            None => (None, raw),
        };
        if let Some(package) = package {
            if !is_valid_name(package) {
                return Err(format!("Invalid condition package \"{}\".", package));
            }
        }
        if !is_valid_name(name) {
            return Err(format!("Invalid condition name \"{}\".", raw));
        }
        Ok(Self::new(package.map(str::to_string), name))
    }
}

impl std::str::FromStr for PredicateId {
    type Err = QuestError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw).map_err(|message| QuestError::instruction_format(raw, message))
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{}>{}", package, self.name),
            None => f.write_str(&self.name),
        }
    }
}
