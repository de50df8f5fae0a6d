use crate::organism::OrganismId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ClusterId = Uuid;

/// A named group of organisms. By convention the name ends in a number that
/// encodes the cluster's power, e.g. `Haven42`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
    pub members: Vec<OrganismId>,
}

impl Cluster {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &OrganismId) -> bool {
        self.members.contains(id)
    }
}
