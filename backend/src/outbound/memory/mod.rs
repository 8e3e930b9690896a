//! In-process adapters for every driven port.
//!
//! State lives in memory for the lifetime of the process. The request ledger
//! keys records in a [`dashmap::DashMap`] so a status compare-and-set holds
//! only that request's shard lock; the reference-data stores use `RwLock`s
//! because reads dominate.

use std::sync::Arc;

mod catalog;
mod directory;
mod ledger;
mod reviews;
mod user_skills;

pub use catalog::InMemoryCatalog;
pub use directory::InMemoryMemberDirectory;
pub use ledger::InMemoryExchangeRequestRepository;
pub use reviews::InMemoryReviewRepository;
pub use user_skills::InMemoryUserSkillRepository;

/// Message used when a lock was poisoned by a panicking writer.
const POISONED: &str = "in-memory store lock poisoned";

/// Every in-memory store, shared between the services built on top of them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    pub catalog: Arc<InMemoryCatalog>,
    pub directory: Arc<InMemoryMemberDirectory>,
    pub user_skills: Arc<InMemoryUserSkillRepository>,
    pub ledger: Arc<InMemoryExchangeRequestRepository>,
    pub reviews: Arc<InMemoryReviewRepository>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }
}
