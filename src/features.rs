//! Feature set bookkeeping

use crate::error::{Result, StepdownError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered collection of unique column names still included in the search.
///
/// Mutated only by removing exactly one name per completed elimination
/// round; the set never regrows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    names: Vec<String>,
}

impl FeatureSet {
    /// Build a set from column names, rejecting duplicates
    pub fn new(names: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(StepdownError::InvalidConfiguration(format!(
                    "duplicate feature column '{name}'"
                )));
            }
        }
        Ok(Self { names })
    }

    /// Number of features still included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no features remain
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at the given enumeration index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|s| s.as_str())
    }

    /// All included names, in enumeration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether the named column is still included
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Iterate included names in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    /// Permanently remove one name from the set
    pub fn remove(&mut self, name: &str) -> Result<()> {
        match self.names.iter().position(|n| n == name) {
            Some(index) => {
                self.names.remove(index);
                Ok(())
            }
            None => Err(StepdownError::FeatureNotFound(name.to_string())),
        }
    }

    /// The candidate subset with one name left out, order preserved
    pub fn without(&self, name: &str) -> Vec<String> {
        self.names
            .iter()
            .filter(|n| n.as_str() != name)
            .cloned()
            .collect()
    }
}
