//! Lifecycle of table mutations

use super::notice::Operation;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Number of settled mutations kept for inspection
const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState {
    /// Request issued, no response yet
    Pending,
    /// Server confirmed and the local collection was updated
    Committed,
    /// Request failed; the local collection was left as it was
    Failed { reason: String },
}

/// One create, update or delete issued by the table
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub id: Uuid,
    pub operation: Operation,
    /// Record identity; creates learn theirs on commit
    pub target: Option<String>,
    pub state: MutationState,
    pub started_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

/// Ordered log of recent mutations
#[derive(Debug, Clone, Default)]
pub struct MutationLog {
    entries: Vec<Mutation>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly issued mutation
    pub fn begin(&mut self, operation: Operation, target: Option<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(Mutation {
            id,
            operation,
            target,
            state: MutationState::Pending,
            started_at: Utc::now(),
            settled_at: None,
        });
        self.trim();
        id
    }

    pub fn commit(&mut self, id: Uuid, target: Option<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|m| m.id == id) {
            if target.is_some() {
                entry.target = target;
            }
            entry.state = MutationState::Committed;
            entry.settled_at = Some(Utc::now());
        }
    }

    pub fn fail(&mut self, id: Uuid, reason: impl Into<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|m| m.id == id) {
            entry.state = MutationState::Failed {
                reason: reason.into(),
            };
            entry.settled_at = Some(Utc::now());
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Mutation> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// Most recent mutation
    pub fn last(&self) -> Option<&Mutation> {
        self.entries.last()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Mutation> {
        self.entries
            .iter()
            .filter(|m| m.state == MutationState::Pending)
    }

    pub fn entries(&self) -> &[Mutation] {
        &self.entries
    }

    // Drop the oldest settled entries; pending ones always stay
    fn trim(&mut self) {
        while self.entries.len() > HISTORY_LIMIT {
            match self
                .entries
                .iter()
                .position(|m| m.state != MutationState::Pending)
            {
                Some(oldest) => {
                    self.entries.remove(oldest);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut log = MutationLog::new();
        let create = log.begin(Operation::Create, None);
        let delete = log.begin(Operation::Delete, Some("4".into()));
        assert_eq!(log.pending().count(), 2);

        log.commit(create, Some("9".into()));
        log.fail(delete, "server responded with status 500");

        let created = log.get(create).expect("logged");
        assert_eq!(created.state, MutationState::Committed);
        assert_eq!(created.target.as_deref(), Some("9"));
        assert!(created.settled_at.is_some());

        assert!(matches!(
            log.get(delete).map(|m| &m.state),
            Some(MutationState::Failed { .. })
        ));
        assert_eq!(log.pending().count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut log = MutationLog::new();
        for _ in 0..(HISTORY_LIMIT + 20) {
            let id = log.begin(Operation::Update, Some("1".into()));
            log.commit(id, None);
        }
        assert_eq!(log.entries().len(), HISTORY_LIMIT);
    }
}
