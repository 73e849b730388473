use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

const SEPARATOR: &str = "/";

/// Position of a construct in the tree, from the app down
///
/// The app itself has an empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstructPath(Vec<String>);

impl ConstructPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, id: &str) -> Self {
        let mut components = self.0.clone();
        components.push(id.to_string());
        Self(components)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// The local id, i.e. the last component
    pub fn id(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Whether the path is this one or lies somewhere below it
    pub fn contains(&self, other: &ConstructPath) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Identifier which stays stable as long as the path does
    ///
    /// Readable part is built from alphanumerics of every component,
    /// and a hash of the full path is appended for uniqueness.
    pub fn logical_id(&self) -> String {
        format!(
            "{}{}",
            self.0
                .iter()
                .flat_map(|c| c.chars())
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>(),
            sha256::digest(self.to_string())
                .to_uppercase()
                .chars()
                .take(8)
                .collect::<String>(),
        )
    }

    pub(crate) fn display_or(&self, root_name: &str) -> String {
        if self.is_root() {
            root_name.to_string()
        } else {
            self.to_string()
        }
    }
}

impl std::fmt::Display for ConstructPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.join(SEPARATOR))
    }
}

impl Serialize for ConstructPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check that the id can be used as a path component
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidId {
            id: id.to_string(),
            reason: "must not be empty".into(),
        });
    }

    if id.contains(SEPARATOR) {
        return Err(Error::InvalidId {
            id: id.to_string(),
            reason: format!("must not contain {SEPARATOR:?}"),
        });
    }

    Ok(())
}

/// Identity of a construct and the ids of its direct children
#[derive(Debug, Clone, Default)]
pub struct Node {
    path: ConstructPath,
    children: BTreeSet<String>,
}

impl Node {
    pub fn root() -> Self {
        Self::default()
    }

    pub(crate) fn new(path: ConstructPath) -> Self {
        Self {
            path,
            children: BTreeSet::new(),
        }
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn id(&self) -> Option<&str> {
        self.path.id()
    }

    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(String::as_str)
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.contains(id)
    }

    /// Reserve an id for a new child and return its path
    pub fn add_child(&mut self, id: &str) -> Result<ConstructPath> {
        validate_id(id)?;

        if !self.children.insert(id.to_string()) {
            return Err(Error::DuplicateId {
                scope: self.path.clone(),
                id: id.to_string(),
            });
        }

        log::debug!("Declared {}", self.path.child(id));
        Ok(self.path.child(id))
    }
}
