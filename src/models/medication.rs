use serde::{Deserialize, Serialize};

/// A tracked medication. The id is opaque and assigned at creation;
/// only the name is mutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
}
