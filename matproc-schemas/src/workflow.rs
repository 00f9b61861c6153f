use serde::{Deserialize, Serialize};

/// What a workflow link points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LinkTarget {
    /// Another entry, by reference.
    Entry(String),
    /// A pure substance, by name or PubChem CID.
    Substance(String),
    /// A step of the same process, by index.
    Step(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub name: Option<String>,
    pub target: LinkTarget,
}

/// One node of the workflow graph derived from a process.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Task {
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<Link>,
    #[serde(default)]
    pub outputs: Vec<Link>,
}
