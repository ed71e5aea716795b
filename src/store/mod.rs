//! In-memory entity store.
//!
//! The store is the single source of truth for rendering. Collections are only ever
//! swapped as a whole; there is no merge and no per-record mutation.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::ClientError;
use crate::models::{Area, Assignment, EntityKind, Schedule, Student, Trade};

/// Store handle shared by the synchronizer and its callers.
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// A whole collection of one entity kind, in server order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Collection {
    Students(Vec<Student>),
    Areas(Vec<Area>),
    Schedules(Vec<Schedule>),
    Assignments(Vec<Assignment>),
    Trades(Vec<Trade>),
}

impl Collection {
    pub fn kind(&self) -> EntityKind {
        match self {
            Collection::Students(_) => EntityKind::Students,
            Collection::Areas(_) => EntityKind::Areas,
            Collection::Schedules(_) => EntityKind::Schedules,
            Collection::Assignments(_) => EntityKind::Assignments,
            Collection::Trades(_) => EntityKind::Trades,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Students(records) => records.len(),
            Collection::Areas(records) => records.len(),
            Collection::Schedules(records) => records.len(),
            Collection::Assignments(records) => records.len(),
            Collection::Trades(records) => records.len(),
        }
    }

    /// Decode a list payload into a typed collection.
    ///
    /// The whole payload must decode; a single malformed record rejects it.
    pub fn decode(kind: EntityKind, payload: &Value) -> Result<Self, ClientError> {
        if !payload.is_array() {
            return Err(ClientError::Decode(format!(
                "Expected a list of {}, got {}",
                kind,
                json_type(payload)
            )));
        }

        let payload = payload.clone();
        let collection = match kind {
            EntityKind::Students => Collection::Students(serde_json::from_value(payload)?),
            EntityKind::Areas => Collection::Areas(serde_json::from_value(payload)?),
            EntityKind::Schedules => Collection::Schedules(serde_json::from_value(payload)?),
            EntityKind::Assignments => Collection::Assignments(serde_json::from_value(payload)?),
            EntityKind::Trades => Collection::Trades(serde_json::from_value(payload)?),
        };
        Ok(collection)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Current contents of all five collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    students: Vec<Student>,
    areas: Vec<Area>,
    schedules: Vec<Schedule>,
    assignments: Vec<Assignment>,
    trades: Vec<Trade>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Snapshot of one kind's collection.
    pub fn get(&self, kind: EntityKind) -> Collection {
        match kind {
            EntityKind::Students => Collection::Students(self.students.clone()),
            EntityKind::Areas => Collection::Areas(self.areas.clone()),
            EntityKind::Schedules => Collection::Schedules(self.schedules.clone()),
            EntityKind::Assignments => Collection::Assignments(self.assignments.clone()),
            EntityKind::Trades => Collection::Trades(self.trades.clone()),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Students => self.students.len(),
            EntityKind::Areas => self.areas.len(),
            EntityKind::Schedules => self.schedules.len(),
            EntityKind::Assignments => self.assignments.len(),
            EntityKind::Trades => self.trades.len(),
        }
    }

    /// Swap in a new collection for its kind, discarding the previous one.
    pub fn replace(&mut self, collection: Collection) {
        match collection {
            Collection::Students(records) => self.students = records,
            Collection::Areas(records) => self.areas = records,
            Collection::Schedules(records) => self.schedules = records,
            Collection::Assignments(records) => self.assignments = records,
            Collection::Trades(records) => self.trades = records,
        }
    }
}
