// record.rs — Audit record and actor filter model.
//
// The audit log does not know what a permission decision looks like. It
// stores any entry that can name the actor it was made for, wrapped in an
// AuditRecord that carries the sequence id assigned at append time.

use serde::{Deserialize, Serialize};

/// An entry that can be attributed to an actor.
///
/// The returned id is used only for filtering history; entries made on
/// behalf of anonymous actors return `None`.
pub trait Attributed {
    fn actor_id(&self) -> Option<String>;
}

/// One stored entry plus the sequence id it was appended under.
///
/// Sequence ids start at 1, increase strictly with each append and are
/// never reused, even after the record has been evicted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord<T> {
    pub seq: u64,
    pub entry: T,
}

/// Which records to return from [`crate::AuditLog::recent`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActorFilter {
    /// Every record.
    #[default]
    All,
    /// Records whose actor id differs from the given one. Anonymous
    /// records are included, since they never equal the id.
    ExcludeActor(String),
    /// Records whose actor id equals the given one. Anonymous records are
    /// never included.
    OnlyActor(String),
}

impl ActorFilter {
    /// Shorthand for `ActorFilter::OnlyActor(id.into())`.
    pub fn only(id: impl Into<String>) -> Self {
        ActorFilter::OnlyActor(id.into())
    }

    /// Shorthand for `ActorFilter::ExcludeActor(id.into())`.
    pub fn exclude(id: impl Into<String>) -> Self {
        ActorFilter::ExcludeActor(id.into())
    }

    /// Check whether an entry passes this filter.
    pub fn matches<T: Attributed>(&self, entry: &T) -> bool {
        match self {
            ActorFilter::All => true,
            ActorFilter::ExcludeActor(id) => entry.actor_id().as_deref() != Some(id.as_str()),
            ActorFilter::OnlyActor(id) => entry.actor_id().as_deref() == Some(id.as_str()),
        }
    }
}
