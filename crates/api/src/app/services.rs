//! Service wiring behind the route handlers.
//!
//! The demo services here are in-memory directories guarded by `RwLock`, but
//! they consume the access layer exactly the way production services do:
//! queries are scoped by the caller's accessible entity, writes check
//! ownership first. Swapping in persistent stores changes nothing above this
//! module.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use mandir_auth::{StoreError, User, UserStore};
use mandir_core::{EntityId, UserId};

/// Shared service container handed to handlers via request extensions.
pub struct AppServices {
    pub users: Arc<InMemoryUserStore>,
    pub events: EventDirectory,
    pub sevas: SevaDirectory,
}

pub fn build_services(seed_users: Vec<User>) -> AppServices {
    AppServices {
        users: Arc::new(InMemoryUserStore::new(seed_users)),
        events: EventDirectory::default(),
        sevas: SevaDirectory::default(),
    }
}

/// Account lookup backed by a seeded map.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new(seed: impl IntoIterator<Item = User>) -> Self {
        Self {
            inner: RwLock::new(seed.into_iter().map(|user| (user.id, user)).collect()),
        }
    }
}

impl UserStore for InMemoryUserStore {
    fn find(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("user store lock poisoned".into()))?;
        Ok(map.get(&id).copied())
    }
}

/// A temple event: aarti, festival, discourse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempleEvent {
    pub id: Uuid,
    pub entity_id: EntityId,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub created_by: UserId,
}

#[derive(Debug, Default)]
pub struct EventDirectory {
    inner: RwLock<HashMap<Uuid, TempleEvent>>,
}

impl EventDirectory {
    pub fn add(&self, event: TempleEvent) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(event.id, event);
        }
    }

    /// Events visible in `scope`; `None` is the global view.
    pub fn list(&self, scope: Option<EntityId>) -> Vec<TempleEvent> {
        let map = match self.inner.read() {
            Ok(map) => map,
            Err(_) => return Vec::new(),
        };
        let mut events: Vec<_> = map
            .values()
            .filter(|event| scope.map_or(true, |id| event.entity_id == id))
            .cloned()
            .collect();
        // v7 ids sort by creation time.
        events.sort_by_key(|event| event.id);
        events
    }
}

/// A bookable offering in a temple's catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seva {
    pub id: Uuid,
    pub entity_id: EntityId,
    pub name: String,
    /// Price in the smallest currency unit.
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SevaBooking {
    pub id: Uuid,
    pub seva_id: Uuid,
    pub entity_id: EntityId,
    pub booked_by: UserId,
    pub devotee_name: Option<String>,
    pub booked_at: DateTime<Utc>,
}

/// Seva catalog and its bookings, keyed by temple entity.
#[derive(Debug, Default)]
pub struct SevaDirectory {
    sevas: RwLock<HashMap<Uuid, Seva>>,
    bookings: RwLock<HashMap<Uuid, SevaBooking>>,
}

impl SevaDirectory {
    pub fn add_seva(&self, seva: Seva) {
        if let Ok(mut map) = self.sevas.write() {
            map.insert(seva.id, seva);
        }
    }

    pub fn seva(&self, id: Uuid) -> Option<Seva> {
        self.sevas.read().ok()?.get(&id).cloned()
    }

    pub fn list_sevas(&self, scope: Option<EntityId>) -> Vec<Seva> {
        let map = match self.sevas.read() {
            Ok(map) => map,
            Err(_) => return Vec::new(),
        };
        let mut sevas: Vec<_> = map
            .values()
            .filter(|seva| scope.map_or(true, |id| seva.entity_id == id))
            .cloned()
            .collect();
        sevas.sort_by_key(|seva| seva.id);
        sevas
    }

    pub fn add_booking(&self, booking: SevaBooking) {
        if let Ok(mut map) = self.bookings.write() {
            map.insert(booking.id, booking);
        }
    }

    pub fn list_bookings(&self, scope: Option<EntityId>) -> Vec<SevaBooking> {
        let map = match self.bookings.read() {
            Ok(map) => map,
            Err(_) => return Vec::new(),
        };
        let mut bookings: Vec<_> = map
            .values()
            .filter(|booking| scope.map_or(true, |id| booking.entity_id == id))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.id);
        bookings
    }
}
