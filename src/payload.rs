use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response payload, classified once right after the receive hook runs:
/// a JSON array becomes a sequence of records, anything else is a single
/// record. Downstream render and hook logic branch on this tag only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Sequence(Vec<Value>),
    Single(Value),
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(records) => Self::Sequence(records),
            record => Self::Single(record),
        }
    }
}

impl Payload {
    /// Records in order: the elements of a sequence, or the single record.
    pub fn records(&self) -> impl Iterator<Item = &Value> {
        match self {
            Self::Sequence(records) => records.iter(),
            Self::Single(record) => std::slice::from_ref(record).iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(records) => records.len(),
            Self::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
