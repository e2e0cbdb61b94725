//! In-memory document store and repositories.
//!
//! Backs the server when no database is configured and gives tests a store
//! with real transaction semantics. A session applies its writes to a private
//! copy for immediate feedback, then replays them against the live documents
//! under one lock at commit, so readers never observe half of a unit.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    DocumentStore, DocumentStoreError, PlacePersistenceError, PlaceRepository, StoreSession,
    UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, Place, PlaceId, User, UserId};

/// Session operations that can be made to fail on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOp {
    /// Staging a new place document.
    InsertPlace,
    /// Staging a place deletion.
    DeletePlace,
    /// Staging a place reference added to its owner.
    AttachPlace,
    /// Staging a place reference removed from its owner.
    DetachPlace,
    /// Committing the session.
    Commit,
}

#[derive(Debug, Clone, Default)]
struct Documents {
    places: BTreeMap<PlaceId, Place>,
    users: BTreeMap<UserId, User>,
}

#[derive(Debug, Clone)]
enum StagedWrite {
    InsertPlace(Place),
    DeletePlace(PlaceId),
    AttachPlace { owner: UserId, place: PlaceId },
    DetachPlace { owner: UserId, place: PlaceId },
}

impl StagedWrite {
    fn op(&self) -> SessionOp {
        match self {
            Self::InsertPlace(_) => SessionOp::InsertPlace,
            Self::DeletePlace(_) => SessionOp::DeletePlace,
            Self::AttachPlace { .. } => SessionOp::AttachPlace,
            Self::DetachPlace { .. } => SessionOp::DetachPlace,
        }
    }
}

impl Documents {
    fn apply(&mut self, write: &StagedWrite) -> Result<(), DocumentStoreError> {
        match write {
            StagedWrite::InsertPlace(place) => {
                if self.places.contains_key(place.id()) {
                    return Err(DocumentStoreError::query(format!(
                        "place {} already exists",
                        place.id()
                    )));
                }
                self.places.insert(*place.id(), place.clone());
            }
            StagedWrite::DeletePlace(id) => {
                self.places
                    .remove(id)
                    .ok_or_else(|| DocumentStoreError::missing_place(*id))?;
            }
            StagedWrite::AttachPlace { owner, place } => {
                self.user_mut(owner)?.attach_place(*place);
            }
            StagedWrite::DetachPlace { owner, place } => {
                self.user_mut(owner)?.detach_place(place);
            }
        }
        Ok(())
    }

    fn user_mut(&mut self, id: &UserId) -> Result<&mut User, DocumentStoreError> {
        self.users
            .get_mut(id)
            .ok_or_else(|| DocumentStoreError::missing_user(*id))
    }
}

#[derive(Debug, Default)]
struct Shared {
    documents: Mutex<Documents>,
    faults: Mutex<Vec<SessionOp>>,
}

impl Shared {
    // Writers swap in a fully built copy, so a poisoned lock still guards
    // consistent data.
    fn documents(&self) -> MutexGuard<'_, Documents> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn take_fault(&self, op: SessionOp) -> bool {
        let mut faults = self.faults.lock().unwrap_or_else(PoisonError::into_inner);
        match faults.iter().position(|fault| *fault == op) {
            Some(index) => {
                faults.remove(index);
                true
            }
            None => false,
        }
    }
}

fn injected(op: SessionOp) -> DocumentStoreError {
    DocumentStoreError::query(format!("injected {op:?} failure"))
}

/// Shared in-memory document store.
///
/// Clones share the same documents. Repository views for reads and
/// single-document writes come from [`Self::place_repository`] and
/// [`Self::user_repository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    shared: Arc<Shared>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place repository reading the same documents.
    #[must_use]
    pub fn place_repository(&self) -> InMemoryPlaceRepository {
        InMemoryPlaceRepository {
            shared: Arc::clone(&self.shared),
        }
    }

    /// User repository reading the same documents.
    #[must_use]
    pub fn user_repository(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of committed place documents.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn place_count(&self) -> usize {
        self.shared.documents().places.len()
    }

    /// Make the next session call of kind `op` fail with a query error.
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail_next(&self, op: SessionOp) {
        self.shared
            .faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn begin(&self) -> Result<Box<dyn StoreSession>, DocumentStoreError> {
        let view = self.shared.documents().clone();
        Ok(Box::new(InMemorySession {
            shared: Arc::clone(&self.shared),
            view,
            writes: Vec::new(),
            open: true,
        }))
    }
}

struct InMemorySession {
    shared: Arc<Shared>,
    view: Documents,
    writes: Vec<StagedWrite>,
    open: bool,
}

impl InMemorySession {
    fn stage(&mut self, write: StagedWrite) -> Result<(), DocumentStoreError> {
        if !self.open {
            return Err(DocumentStoreError::closed());
        }
        let op = write.op();
        if self.shared.take_fault(op) {
            return Err(injected(op));
        }
        self.view.apply(&write)?;
        self.writes.push(write);
        Ok(())
    }
}

#[async_trait]
impl StoreSession for InMemorySession {
    async fn insert_place(&mut self, place: &Place) -> Result<(), DocumentStoreError> {
        self.stage(StagedWrite::InsertPlace(place.clone()))
    }

    async fn delete_place(&mut self, place: &PlaceId) -> Result<(), DocumentStoreError> {
        self.stage(StagedWrite::DeletePlace(*place))
    }

    async fn attach_place(
        &mut self,
        owner: &UserId,
        place: &PlaceId,
    ) -> Result<(), DocumentStoreError> {
        self.stage(StagedWrite::AttachPlace {
            owner: *owner,
            place: *place,
        })
    }

    async fn detach_place(
        &mut self,
        owner: &UserId,
        place: &PlaceId,
    ) -> Result<(), DocumentStoreError> {
        self.stage(StagedWrite::DetachPlace {
            owner: *owner,
            place: *place,
        })
    }

    async fn commit(&mut self) -> Result<(), DocumentStoreError> {
        if !self.open {
            return Err(DocumentStoreError::closed());
        }
        self.open = false;
        let writes = std::mem::take(&mut self.writes);
        if self.shared.take_fault(SessionOp::Commit) {
            return Err(injected(SessionOp::Commit));
        }

        let mut documents = self.shared.documents();
        let mut next = documents.clone();
        // A place deleted by an earlier commit stays a missing place, so
        // callers can report it as not found.
        for write in &writes {
            next.apply(write).map_err(|failure| match failure {
                DocumentStoreError::MissingPlace { .. } => failure,
                other => DocumentStoreError::conflict(other.to_string()),
            })?;
        }
        *documents = next;
        Ok(())
    }

    async fn abort(&mut self) -> Result<(), DocumentStoreError> {
        if !self.open {
            return Err(DocumentStoreError::closed());
        }
        self.open = false;
        self.writes.clear();
        Ok(())
    }
}

/// Place repository over [`InMemoryDocumentStore`] documents.
#[derive(Debug, Clone)]
pub struct InMemoryPlaceRepository {
    shared: Arc<Shared>,
}

#[async_trait]
impl PlaceRepository for InMemoryPlaceRepository {
    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, PlacePersistenceError> {
        Ok(self.shared.documents().places.get(id).cloned())
    }

    async fn find_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Place>, PlacePersistenceError> {
        let mut owned: Vec<Place> = self
            .shared
            .documents()
            .places
            .values()
            .filter(|place| place.creator() == creator)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.title().as_str().cmp(b.title().as_str()));
        Ok(owned)
    }

    async fn save(&self, place: &Place) -> Result<bool, PlacePersistenceError> {
        let mut documents = self.shared.documents();
        match documents.places.get_mut(place.id()) {
            Some(stored) => {
                *stored = place.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// User repository over [`InMemoryDocumentStore`] documents.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    shared: Arc<Shared>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut documents = self.shared.documents();
        if documents
            .users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserPersistenceError::duplicate_email(user.email().as_str()));
        }
        if documents.users.contains_key(user.id()) {
            return Err(UserPersistenceError::query(format!(
                "user {} already exists",
                user.id()
            )));
        }
        documents.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.shared.documents().users.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .shared
            .documents()
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = self.shared.documents().users.values().cloned().collect();
        users.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(users)
    }
}

#[cfg(test)]
mod tests;
