//! In-memory request ledger.
//!
//! Each record sits in its own `DashMap` entry. `compare_and_set` runs the
//! status check and the write under that entry's write guard, which makes
//! the pair indivisible with respect to other writers of the same request.
//! Inserts are serialised by a single mutex so the duplicate-pending scan and
//! the write happen as one step.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::ports::{
    CasOutcome, ExchangeRequestRepository, ExchangeRequestRepositoryError, InsertOutcome,
};
use crate::domain::{ExchangeRequest, RequestId, RequestStatus, UserId};

#[derive(Debug, Clone)]
struct Stored {
    /// Insertion order; breaks ties between equal `created_at` values.
    seq: u64,
    request: ExchangeRequest,
}

#[derive(Debug, Default)]
pub struct InMemoryExchangeRequestRepository {
    requests: DashMap<RequestId, Stored>,
    next_seq: AtomicU64,
    insert_lock: Mutex<()>,
}

impl InMemoryExchangeRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_inserts(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.insert_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, request: ExchangeRequest) -> Result<(), ExchangeRequestRepositoryError> {
        match self.requests.entry(request.id()) {
            Entry::Occupied(_) => Err(ExchangeRequestRepositoryError::duplicate_id(
                request.id().to_string(),
            )),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Stored { seq, request });
                Ok(())
            }
        }
    }

    fn has_pending_like(&self, request: &ExchangeRequest) -> bool {
        self.requests.iter().any(|entry| {
            let r = &entry.request;
            r.status() == RequestStatus::Pending
                && r.from_user() == request.from_user()
                && r.to_user() == request.to_user()
                && r.requested_skill() == request.requested_skill()
        })
    }

    /// Matching records, newest first.
    fn collect_newest_first<F>(&self, keep: F) -> Vec<ExchangeRequest>
    where
        F: Fn(&ExchangeRequest) -> bool,
    {
        let mut rows: Vec<Stored> = self
            .requests
            .iter()
            .filter(|entry| keep(&entry.request))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            b.request
                .created_at()
                .cmp(&a.request.created_at())
                .then(b.seq.cmp(&a.seq))
        });
        rows.into_iter().map(|row| row.request).collect()
    }
}

#[async_trait]
impl ExchangeRequestRepository for InMemoryExchangeRequestRepository {
    async fn insert(&self, request: ExchangeRequest) -> Result<(), ExchangeRequestRepositoryError> {
        let _guard = self.lock_inserts();
        self.store(request)
    }

    async fn find(
        &self,
        id: RequestId,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError> {
        Ok(self.requests.get(&id).map(|entry| entry.request.clone()))
    }

    async fn compare_and_set(
        &self,
        next: ExchangeRequest,
        expected: RequestStatus,
    ) -> Result<CasOutcome, ExchangeRequestRepositoryError> {
        let Some(mut entry) = self.requests.get_mut(&next.id()) else {
            return Ok(CasOutcome::NotFound);
        };
        if entry.request.status() != expected {
            return Ok(CasOutcome::Conflict(entry.request.clone()));
        }
        entry.request = next.clone();
        Ok(CasOutcome::Updated(next))
    }

    async fn list_sent(
        &self,
        user: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        Ok(self.collect_newest_first(|r| r.from_user() == user))
    }

    async fn list_received(
        &self,
        user: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        Ok(self.collect_newest_first(|r| r.to_user() == user))
    }

    async fn insert_unless_pending(
        &self,
        request: ExchangeRequest,
    ) -> Result<InsertOutcome, ExchangeRequestRepositoryError> {
        let _guard = self.lock_inserts();
        if self.has_pending_like(&request) {
            return Ok(InsertOutcome::PendingExists);
        }
        self.store(request)?;
        Ok(InsertOutcome::Inserted)
    }
}
