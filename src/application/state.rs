//! Shared state store - The single transactional home of dashboard state.
//!
//! Every operation here takes the lock exactly once, so reads and writes that
//! span settings, user data, registries and the connection counter are always
//! consistent with each other. No I/O happens while the lock is held.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::foundation::{DeviceId, DomainError, GroupId, SessionToken};
use crate::domain::lights::{Group, LightEnvelope, Light, Registries, RegistrySnapshot};
use crate::domain::session::UserData;
use crate::ports::{LightUpdatePublisher, PersistedState};

/// Presentation settings shared by every page build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub title: String,
    pub diagnostics: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Lightboard".to_string(),
            diagnostics: true,
        }
    }
}

/// Everything guarded by the store's lock.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub settings: DashboardSettings,
    pub user_data: HashMap<SessionToken, UserData>,
    pub registries: Registries,
    pub connected_users: usize,
}

/// Result of the atomic read performed when a session opens.
#[derive(Debug, Clone)]
pub struct SessionOpening {
    pub is_new: bool,
    pub user_data: UserData,
    pub snapshot: RegistrySnapshot,
    pub settings: DashboardSettings,
}

/// Transactional store injected into every handler as `Arc<SharedStateStore>`.
#[derive(Debug, Default)]
pub struct SharedStateStore {
    state: Mutex<DashboardState>,
}

impl SharedStateStore {
    pub fn new(settings: DashboardSettings) -> Self {
        Self::from_persisted(settings, PersistedState::default())
    }

    /// Seeds the store from previously saved state. The counter always starts at zero.
    pub fn from_persisted(settings: DashboardSettings, persisted: PersistedState) -> Self {
        Self {
            state: Mutex::new(DashboardState {
                settings,
                user_data: persisted.user_data,
                registries: persisted.registries,
                connected_users: 0,
            }),
        }
    }

    /// Runs `f` over the whole state atomically.
    ///
    /// `f` must not block or perform I/O.
    pub fn transact<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        let mut state = self.state.lock();
        f(&mut state)
    }

    /// Returns the user's data, creating defaults if the token is unseen.
    pub fn resolve_or_create_user(&self, token: &SessionToken) -> (bool, UserData) {
        self.transact(|state| resolve_or_create(state, token))
    }

    /// Resolves the user and takes the registry snapshot in one transaction.
    pub fn open_session(&self, token: &SessionToken) -> SessionOpening {
        self.transact(|state| {
            let (is_new, user_data) = resolve_or_create(state, token);
            SessionOpening {
                is_new,
                user_data,
                snapshot: state.registries.snapshot(),
                settings: state.settings.clone(),
            }
        })
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.transact(|state| state.registries.snapshot())
    }

    /// Adds `delta` to the connected-user counter and returns the new value.
    ///
    /// The counter saturates at zero instead of going negative.
    pub fn adjust_counter(&self, delta: isize) -> usize {
        self.transact(|state| {
            state.connected_users = if delta.is_negative() {
                state.connected_users.saturating_sub(delta.unsigned_abs())
            } else {
                state.connected_users.saturating_add(delta.unsigned_abs())
            };
            state.connected_users
        })
    }

    pub fn connected_users(&self) -> usize {
        self.transact(|state| state.connected_users)
    }

    pub fn settings(&self) -> DashboardSettings {
        self.transact(|state| state.settings.clone())
    }

    /// Copy of everything that should survive a restart.
    pub fn persisted(&self) -> PersistedState {
        self.transact(|state| PersistedState {
            registries: state.registries.clone(),
            user_data: state.user_data.clone(),
        })
    }

    /// Folds an update into the registries and publishes it in the same
    /// transaction, returning how many cursors it was queued for.
    ///
    /// Publishing never blocks, and holding the lock across both steps keeps
    /// every cursor's order identical to the order the store applied updates.
    pub fn apply_and_publish(
        &self,
        envelope: LightEnvelope,
        publisher: &dyn LightUpdatePublisher,
    ) -> Result<usize, DomainError> {
        self.transact(|state| {
            state.registries.apply(&envelope)?;
            Ok(publisher.publish(envelope))
        })
    }

    /// Flips a group's expansion for one user and returns the new state.
    pub fn toggle_group(&self, token: &SessionToken, group: &GroupId) -> bool {
        self.transact(|state| {
            state
                .user_data
                .entry(token.clone())
                .or_default()
                .toggle_group(group)
        })
    }

    pub fn light(&self, id: &DeviceId) -> Option<Light> {
        self.transact(|state| state.registries.lights.get(id).cloned())
    }

    pub fn group(&self, id: &GroupId) -> Option<Group> {
        self.transact(|state| state.registries.groups.get(id).cloned())
    }

    /// Registry sizes as (lights, groups, scenes, schedules).
    pub fn registry_sizes(&self) -> (usize, usize, usize, usize) {
        self.transact(|state| {
            let registries = &state.registries;
            (
                registries.lights.len(),
                registries.groups.len(),
                registries.scenes.len(),
                registries.schedules.len(),
            )
        })
    }
}

fn resolve_or_create(state: &mut DashboardState, token: &SessionToken) -> (bool, UserData) {
    let mut is_new = false;
    let user_data = state
        .user_data
        .entry(token.clone())
        .or_insert_with(|| {
            is_new = true;
            UserData::new()
        })
        .clone();
    (is_new, user_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::broadcast::BroadcastStream;
    use crate::domain::lights::LightUpdate;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn token(value: &str) -> SessionToken {
        SessionToken::new(value).unwrap()
    }

    #[test]
    fn fresh_token_creates_default_user_data() {
        let store = SharedStateStore::default();

        let (is_new, data) = store.resolve_or_create_user(&token("abc"));
        assert!(is_new);
        assert!(data.expanded_groups.is_empty());

        let (is_new, _) = store.resolve_or_create_user(&token("abc"));
        assert!(!is_new);
    }

    #[test]
    fn known_token_returns_stored_preferences() {
        let store = SharedStateStore::default();
        let group = GroupId::new("kitchen").unwrap();
        store.resolve_or_create_user(&token("abc"));
        assert!(store.toggle_group(&token("abc"), &group));

        let (is_new, data) = store.resolve_or_create_user(&token("abc"));
        assert!(!is_new);
        assert!(data.is_expanded(&group));
    }

    #[test]
    fn snapshot_is_not_invalidated_by_later_mutation() {
        let store = SharedStateStore::default();
        let id = DeviceId::new("1").unwrap();
        store.transact(|state| state.registries.lights.upsert(Light::new(id.clone(), "Desk")));

        let snapshot = store.snapshot();
        let stream = BroadcastStream::new(4);
        store
            .apply_and_publish(LightEnvelope::new(id.clone(), LightUpdate::OnOff(true)), &stream)
            .unwrap();

        assert!(!snapshot.lights[0].on);
        assert!(store.light(&id).unwrap().on);
    }

    #[test]
    fn counter_never_goes_negative() {
        let store = SharedStateStore::default();
        assert_eq!(store.adjust_counter(-1), 0);
        assert_eq!(store.adjust_counter(2), 2);
        assert_eq!(store.adjust_counter(-5), 0);
    }

    #[test]
    fn persisted_round_trips_through_from_persisted() {
        let store = SharedStateStore::default();
        store.resolve_or_create_user(&token("abc"));
        store.adjust_counter(3);

        let reloaded = SharedStateStore::from_persisted(DashboardSettings::default(), store.persisted());
        assert_eq!(reloaded.connected_users(), 0);
        assert!(!reloaded.resolve_or_create_user(&token("abc")).0);
    }

    #[test]
    fn concurrent_increments_and_decrements_balance() {
        let store = Arc::new(SharedStateStore::default());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        store.adjust_counter(1);
                        store.adjust_counter(-1);
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }
        assert_eq!(store.connected_users(), 0);
    }

    proptest! {
        #[test]
        fn counter_tracks_open_connections(opens in proptest::collection::vec(any::<bool>(), 0..200)) {
            let store = SharedStateStore::default();
            let mut open = 0usize;
            for is_open in opens {
                let value = if is_open {
                    open += 1;
                    store.adjust_counter(1)
                } else if open > 0 {
                    open -= 1;
                    store.adjust_counter(-1)
                } else {
                    continue;
                };
                prop_assert_eq!(value, open);
            }
        }
    }
}
