//! Entity kinds known to the client.

use std::fmt;

/// One of the five collections the client mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Students,
    Areas,
    Schedules,
    Assignments,
    Trades,
}

impl EntityKind {
    /// All kinds in the order a full synchronization visits them.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Students,
        EntityKind::Areas,
        EntityKind::Schedules,
        EntityKind::Assignments,
        EntityKind::Trades,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Students => "students",
            EntityKind::Areas => "areas",
            EntityKind::Schedules => "schedules",
            EntityKind::Assignments => "assignments",
            EntityKind::Trades => "trades",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "students" => Some(EntityKind::Students),
            "areas" => Some(EntityKind::Areas),
            "schedules" => Some(EntityKind::Schedules),
            "assignments" => Some(EntityKind::Assignments),
            "trades" => Some(EntityKind::Trades),
            _ => None,
        }
    }

    /// List endpoint for this kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            EntityKind::Students => "/students/",
            EntityKind::Areas => "/areas/",
            EntityKind::Schedules => "/schedules/",
            EntityKind::Assignments => "/assignments/",
            EntityKind::Trades => "/trades/",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
