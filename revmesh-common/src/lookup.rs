//! Reverse lookup table shared by the taxonomy and relation indices
//!
//! Members are inserted in declaration order and a later declaration
//! overwrites an earlier one. Every overwrite that changes the owning group
//! is recorded so configuration authors can find accidental duplicates
//! without the lookup result changing.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Members are exact lookup keys: non-empty and already trimmed
pub(crate) fn validate_member(group: &str, member: &str) -> Result<()> {
    if member.is_empty() || member.trim() != member {
        return Err(Error::InvalidMember {
            group: group.to_string(),
            member: member.to_string(),
        });
    }
    Ok(())
}

/// A member string that moved from one group to another during index build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reassignment<G> {
    /// The member string (family or flavor)
    pub member: String,
    /// Group that held the member before the overwrite
    pub previous: G,
    /// Group declared later that now owns the member
    pub winner: G,
}

/// Member → group map with last-declaration-wins semantics
#[derive(Debug, Clone)]
pub struct ReverseIndex<G> {
    entries: HashMap<String, G>,
    reassignments: Vec<Reassignment<G>>,
}

impl<G> Default for ReverseIndex<G> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            reassignments: Vec::new(),
        }
    }
}

impl<G: Clone + PartialEq> ReverseIndex<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `member` to `group`, overwriting any earlier assignment
    pub fn insert(&mut self, member: &str, group: &G) {
        if let Some(previous) = self.entries.insert(member.to_string(), group.clone()) {
            if previous != *group {
                self.reassignments.push(Reassignment {
                    member: member.to_string(),
                    previous,
                    winner: group.clone(),
                });
            }
        }
    }

    pub fn get(&self, member: &str) -> Option<&G> {
        self.entries.get(member)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrites in the order they happened
    pub fn reassignments(&self) -> &[Reassignment<G>] {
        &self.reassignments
    }
}
