//! Integration tests for the connection lifecycle.
//!
//! These tests drive the full open → live updates → disconnect path through
//! the public API with a recording client in place of a socket:
//! 1. Commit ordering on open
//! 2. Fan-out of one update to every live worker
//! 3. Counter balance across concurrent opens and closes
//! 4. Stale elements and per-user expansion

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use lightboard::adapters::broadcast::BroadcastStream;
use lightboard::adapters::controller::LoopbackLightController;
use lightboard::adapters::render::HtmlTileRenderer;
use lightboard::adapters::storage::InMemoryConfigStorage;
use lightboard::application::{
    CommitPageHandler, ConnectionWorker, DashboardSettings, HandleUserActionHandler,
    LiveConnection, OpenConnectionCommand, OpenConnectionHandler, PublishLightUpdateHandler,
    ResolveSessionHandler, SharedStateStore, StatePersister, UserActionCommand,
};
use lightboard::domain::foundation::{DeviceId, GroupId, SessionToken};
use lightboard::domain::lights::{Group, Light, LightEnvelope, LightUpdate};
use lightboard::domain::view::{
    DomEvent, ElementId, ElementRole, UserAction, ViewCommand, ViewMutation,
};
use lightboard::ports::{ConfigStorage, ViewClient, ViewError};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Client that records every transmission in order.
#[derive(Default)]
struct RecordingViewClient {
    transmissions: Mutex<Vec<Vec<ViewCommand>>>,
}

impl RecordingViewClient {
    fn transmissions(&self) -> Vec<Vec<ViewCommand>> {
        self.transmissions.lock().clone()
    }

    fn mutations(&self) -> Vec<ViewMutation> {
        self.transmissions
            .lock()
            .iter()
            .flatten()
            .filter_map(|command| match command {
                ViewCommand::Mutate(mutation) => Some(mutation.clone()),
                _ => None,
            })
            .collect()
    }

    fn clear(&self) {
        self.transmissions.lock().clear();
    }
}

#[async_trait]
impl ViewClient for RecordingViewClient {
    async fn send(&self, command: ViewCommand) -> Result<(), ViewError> {
        self.transmissions.lock().push(vec![command]);
        Ok(())
    }

    async fn send_batch(&self, commands: Vec<ViewCommand>) -> Result<(), ViewError> {
        self.transmissions.lock().push(commands);
        Ok(())
    }
}

struct Harness {
    store: Arc<SharedStateStore>,
    stream: BroadcastStream,
    storage: Arc<InMemoryConfigStorage>,
    open: OpenConnectionHandler,
    actions: HandleUserActionHandler,
    publish: PublishLightUpdateHandler,
}

fn device(id: &str) -> DeviceId {
    DeviceId::new(id).unwrap()
}

fn living_room() -> GroupId {
    GroupId::new("living-room").unwrap()
}

fn harness() -> Harness {
    let store = Arc::new(SharedStateStore::new(DashboardSettings {
        title: "Home".to_string(),
        diagnostics: false,
    }));
    store.transact(|state| {
        state.registries.lights.upsert(Light::new(device("1"), "Sofa"));
        state.registries.lights.upsert(Light::new(device("2"), "Ceiling"));
        state.registries.groups.upsert(Group::new(
            living_room(),
            "Living Room",
            vec![device("1"), device("2")],
        ));
    });

    let stream = BroadcastStream::new(64);
    let storage = Arc::new(InMemoryConfigStorage::new());
    let commit = Arc::new(CommitPageHandler::new(Arc::new(HtmlTileRenderer::new())));
    let persister = StatePersister::new(store.clone(), storage.clone());

    let open = OpenConnectionHandler::new(
        Arc::new(stream.clone()),
        ResolveSessionHandler::new(store.clone()),
        commit.clone(),
        ConnectionWorker::new(store.clone(), Duration::from_millis(500)),
    );
    let controller = Arc::new(LoopbackLightController::new(
        store.clone(),
        Arc::new(stream.clone()),
    ));
    let actions = HandleUserActionHandler::new(store.clone(), controller, commit, persister);
    let publish = PublishLightUpdateHandler::new(store.clone(), Arc::new(stream.clone()));

    Harness {
        store,
        stream,
        storage,
        open,
        actions,
        publish,
    }
}

async fn open(
    harness: &Harness,
    token: &str,
) -> (LiveConnection, Arc<RecordingViewClient>) {
    let client = Arc::new(RecordingViewClient::default());
    let connection = harness
        .open
        .handle(OpenConnectionCommand {
            token: SessionToken::new(token).unwrap(),
            client: client.clone(),
        })
        .await
        .unwrap();
    (connection, client)
}

/// Lets spawned workers drain their cursors.
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Connections that may be open between reading `finished_before` and now.
fn open_bound(started: &AtomicUsize, finished_before: usize) -> usize {
    started.load(Ordering::SeqCst) - finished_before
}

fn animates(mutations: &[ViewMutation], element: &ElementId) -> bool {
    mutations
        .iter()
        .any(|m| matches!(m, ViewMutation::Animate { .. }) && m.target() == element)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn open_commits_content_before_registrations_then_ready() {
    let harness = harness();
    let (connection, client) = open(&harness, "abc").await;

    let transmissions = client.transmissions();
    assert_eq!(transmissions.len(), 3);
    assert!(matches!(
        transmissions[0].as_slice(),
        [ViewCommand::ReplaceContent { .. }]
    ));
    assert!(!transmissions[1].is_empty());
    assert!(transmissions[1]
        .iter()
        .all(|c| matches!(c, ViewCommand::RegisterHandler { .. })));
    assert_eq!(transmissions[2], vec![ViewCommand::Ready]);

    connection.disconnect();
}

#[tokio::test]
async fn group_first_on_reaches_every_worker() {
    let harness = harness();
    let (first, first_client) = open(&harness, "first").await;
    let (second, second_client) = open(&harness, "second").await;

    harness
        .publish
        .handle(LightEnvelope::new(
            device("1"),
            LightUpdate::GroupFirstOn(living_room()),
        ))
        .unwrap();
    settle().await;

    let switch = ElementId::group(&living_room(), ElementRole::Switch);
    assert_eq!(switch.as_str(), "group-living-room-switch");
    assert!(animates(&first_client.mutations(), &switch));
    assert!(animates(&second_client.mutations(), &switch));

    first.disconnect();
    second.disconnect();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn counter_returns_to_zero_after_concurrent_opens_and_closes() {
    let harness = Arc::new(harness());
    // `started` is bumped before an open begins and `finished` after its
    // disconnect returns. Reading `finished`, then the counter, then `started`
    // brackets the counter by the connections open at that moment.
    let started = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicUsize::new(0));
    let tasks: Vec<_> = (0..16)
        .map(|n| {
            let harness = Arc::clone(&harness);
            let started = Arc::clone(&started);
            let finished = Arc::clone(&finished);
            tokio::spawn(async move {
                started.fetch_add(1, Ordering::SeqCst);
                let (connection, _client) = open(&harness, &format!("user{}", n)).await;

                let finished_before = finished.load(Ordering::SeqCst);
                let live = harness.store.connected_users();
                assert!(live >= 1);
                assert!(live <= open_bound(&started, finished_before));

                tokio::task::yield_now().await;

                let finished_before = finished.load(Ordering::SeqCst);
                let remaining = connection.disconnect();
                // This connection is still counted in the bound but no longer live.
                assert!(remaining < open_bound(&started, finished_before));
                finished.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(harness.store.connected_users(), 0);

    // Aborted workers release their cursors once the runtime reaps them.
    for _ in 0..100 {
        if harness.stream.subscriber_count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert_eq!(harness.stream.subscriber_count(), 0);
}

#[tokio::test]
async fn dropped_connection_decrements_like_disconnect() {
    let harness = harness();
    let (connection, _client) = open(&harness, "abc").await;
    assert_eq!(harness.store.connected_users(), 1);

    drop(connection);
    assert_eq!(harness.store.connected_users(), 0);
}

#[tokio::test]
async fn update_for_hidden_light_is_skipped_without_stopping_worker() {
    let harness = harness();
    // Groups start collapsed, so light tiles are not in the view.
    let (connection, client) = open(&harness, "abc").await;
    client.clear();

    harness
        .publish
        .handle(LightEnvelope::new(device("1"), LightUpdate::Brightness(255)))
        .unwrap();
    harness
        .publish
        .handle(LightEnvelope::new(device("1"), LightUpdate::FirstOn))
        .unwrap();
    settle().await;

    let mutations = client.mutations();
    assert_eq!(mutations.len(), 1);
    assert!(animates(&mutations, &ElementId::all_lights()));

    connection.disconnect();
}

#[tokio::test]
async fn session_token_is_new_once() {
    let harness = harness();

    let (first, _) = open(&harness, "abc").await;
    assert!(first.is_new());
    first.disconnect();

    let (second, _) = open(&harness, "abc").await;
    assert!(!second.is_new());
    second.disconnect();
}

#[tokio::test]
async fn expanding_a_group_persists_and_shows_member_tiles() {
    let harness = harness();
    let (connection, client) = open(&harness, "abc").await;
    client.clear();

    let action = connection
        .action_for("group-living-room-expand", DomEvent::Click)
        .unwrap();
    assert_eq!(action, UserAction::ToggleGroupExpanded(living_room()));
    harness
        .actions
        .handle(
            &connection,
            UserActionCommand {
                action,
                position: None,
            },
        )
        .await
        .unwrap();

    // The rebuilt view now registers the member tiles.
    assert_eq!(
        connection.action_for("light-1-tile", DomEvent::Click),
        Some(UserAction::ToggleLight(device("1")))
    );

    // Member brightness now reaches this client.
    client.clear();
    harness
        .publish
        .handle(LightEnvelope::new(device("1"), LightUpdate::Brightness(128)))
        .unwrap();
    settle().await;
    let texts: Vec<String> = client
        .mutations()
        .into_iter()
        .filter_map(|m| match m {
            ViewMutation::SetText { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["50%".to_string()]);

    // The preference was saved in the background.
    for _ in 0..20 {
        if harness.storage.save_count().await > 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    let saved = harness.storage.load().await.unwrap().unwrap();
    assert!(saved.user_data[&SessionToken::new("abc").unwrap()].is_expanded(&living_room()));

    connection.disconnect();
}

#[tokio::test]
async fn toggling_a_group_switch_round_trips_through_the_stream() {
    let harness = harness();
    let (connection, client) = open(&harness, "abc").await;
    client.clear();

    let action = connection
        .action_for("group-living-room-switch", DomEvent::Click)
        .unwrap();
    harness
        .actions
        .handle(
            &connection,
            UserActionCommand {
                action,
                position: None,
            },
        )
        .await
        .unwrap();
    settle().await;

    let mutations = client.mutations();
    assert!(animates(
        &mutations,
        &ElementId::group(&living_room(), ElementRole::Switch)
    ));
    assert!(animates(&mutations, &ElementId::all_lights()));
    assert!(harness.store.light(&device("1")).unwrap().on);

    connection.disconnect();
}

#[tokio::test]
async fn cursors_opened_at_different_times_see_their_own_suffix() {
    let harness = harness();
    let mut early = harness.stream.subscribe();
    for level in [1u8, 2] {
        harness
            .publish
            .handle(LightEnvelope::new(device("1"), LightUpdate::Brightness(level)))
            .unwrap();
    }
    let mut late = harness.stream.subscribe();
    harness
        .publish
        .handle(LightEnvelope::new(device("1"), LightUpdate::Brightness(3)))
        .unwrap();

    let drain = |cursor: &mut lightboard::adapters::broadcast::Cursor| {
        let mut levels = Vec::new();
        while let Some(envelope) = cursor.try_next() {
            if let LightUpdate::Brightness(level) = envelope.update {
                levels.push(level);
            }
        }
        levels
    };
    assert_eq!(drain(&mut early), vec![1, 2, 3]);
    assert_eq!(drain(&mut late), vec![3]);
}
