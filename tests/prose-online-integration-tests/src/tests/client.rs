// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;

use prose_online::dtos::PresenceEventKind;
use prose_online::infra::presence::InMemoryPresenceRegistry;
use prose_online::{
    user_id, AppConfig, Client, ClientBuilderError, ClientDelegate, ClientEvent,
    OnlineUsersService,
};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<ClientEvent>>,
}

impl ClientDelegate for Recorder {
    fn handle_event(&self, event: ClientEvent) {
        self.events.lock().push(event)
    }
}

/// Records the number of online users at the time each event is received.
struct CountingDelegate {
    service: OnlineUsersService,
    counts: Mutex<Vec<usize>>,
}

impl ClientDelegate for CountingDelegate {
    fn handle_event(&self, _event: ClientEvent) {
        self.counts.lock().push(self.service.online_user_count())
    }
}

/// Turns the online users off when the first user changes its online state.
struct TurnOffDelegate {
    service: OnlineUsersService,
    did_turn_off: AtomicBool,
}

impl ClientDelegate for TurnOffDelegate {
    fn handle_event(&self, event: ClientEvent) {
        let ClientEvent::UserOnlineStateChanged { .. } = event else {
            return;
        };
        if !self.did_turn_off.swap(true, Ordering::SeqCst) {
            self.service.off()
        }
    }
}

fn client(registry: &Arc<InMemoryPresenceRegistry>) -> Client {
    Client::builder()
        .set_presence_registry(registry.clone())
        .build()
        .expect("Failed to build client")
}

#[test]
fn test_build_requires_presence_registry() {
    assert_eq!(
        Client::builder().build().err(),
        Some(ClientBuilderError::MissingPresenceRegistry)
    );
}

#[test]
fn test_connect_mirrors_existing_entries_without_self() {
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    registry.set("jane-doe", json!(true));
    registry.set("u1", json!(true));
    registry.set("u2", json!(1_700_000_000_u64));

    let client = client(&registry);
    client.connect(user_id!("jane-doe"));

    assert!(client.online_users.is_on());
    assert_eq!(client.connected_id(), Some(user_id!("jane-doe")));

    let mut ids = client.online_users.online_user_ids();
    ids.sort();
    assert_eq!(ids, vec![user_id!("u1"), user_id!("u2")]);
}

#[test]
fn test_delegates_receive_events() {
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    let recorder = Arc::new(Recorder::default());

    let client = Client::builder()
        .set_presence_registry(registry.clone())
        .add_delegate(recorder.clone())
        .build()
        .unwrap();

    client.connect(user_id!("jane-doe"));
    registry.set("u1", json!(true));
    let user = client.online_users.online_user(&user_id!("u1")).unwrap();
    registry.remove("u1");

    assert_eq!(
        *recorder.events.lock(),
        vec![
            ClientEvent::OnlineUserAdded,
            ClientEvent::UserOnlineStateChanged { user: user.clone() },
            ClientEvent::OnlineUserRemoved,
            ClientEvent::UserOnlineStateChanged { user },
        ]
    );
}

#[test]
fn test_delegates_can_read_online_users_while_handling_events() {
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    let client = client(&registry);

    let delegate = Arc::new(CountingDelegate {
        service: client.online_users.clone(),
        counts: Default::default(),
    });
    let handle = client.add_delegate(delegate.clone());

    client.connect(user_id!("jane-doe"));
    registry.set("u1", json!(true));
    registry.set("u2", json!(true));
    registry.remove("u1");

    assert_eq!(*delegate.counts.lock(), vec![1, 1, 2, 2, 1, 1]);
    assert!(client.remove_delegate(handle));
}

#[test]
fn test_disconnect_resets_session() -> Result<()> {
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    let client = client(&registry);

    client.connect(user_id!("jane-doe"));
    registry.set("u1", json!(true));

    let user = client.online_users.online_user(&user_id!("u1")).unwrap();
    user.set_blocked(true);
    user.set_friend(true);

    client.disconnect()?;

    assert!(!client.online_users.is_on());
    assert_eq!(client.online_users.online_user_count(), 0);
    assert_eq!(client.connected_id(), None);
    assert!(!user.is_blocked());
    assert!(!user.is_friend());

    // Changes while disconnected are picked up on the next connect.
    registry.set("u2", json!(true));
    client.connect(user_id!("u1"));

    assert_eq!(client.online_users.online_user_ids(), vec![user_id!("u2")]);

    let reconnected_user = client.online_users.online_user(&user_id!("u2")).unwrap();
    assert!(!reconnected_user.is_blocked());

    Ok(())
}

#[test]
fn test_connect_without_observing_online_users() {
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    registry.set("u1", json!(true));

    let client = Client::builder()
        .set_config(AppConfig {
            observe_online_users_on_connect: false,
        })
        .set_presence_registry(registry.clone())
        .build()
        .unwrap();

    client.connect(user_id!("jane-doe"));
    assert!(!client.online_users.is_on());
    assert_eq!(client.online_users.online_user_count(), 0);

    client.online_users.on();
    assert_eq!(client.online_users.online_user_count(), 1);
}

#[test]
fn test_turning_off_while_entries_are_replayed_leaves_no_observers() {
    let registry = Arc::new(InMemoryPresenceRegistry::new());
    registry.set("u1", json!(true));

    let client = Client::builder()
        .set_config(AppConfig {
            observe_online_users_on_connect: false,
        })
        .set_presence_registry(registry.clone())
        .build()
        .unwrap();
    client.connect(user_id!("jane-doe"));

    let turn_off = Arc::new(TurnOffDelegate {
        service: client.online_users.clone(),
        did_turn_off: Default::default(),
    });
    let handle = client.add_delegate(turn_off);
    client.online_users.on();

    assert!(!client.online_users.is_on());
    assert_eq!(client.online_users.online_user_count(), 0);
    assert_eq!(registry.observer_count(PresenceEventKind::Added), 0);
    assert_eq!(registry.observer_count(PresenceEventKind::Removed), 0);

    assert!(client.remove_delegate(handle));
    let recorder = Arc::new(Recorder::default());
    client.add_delegate(recorder.clone());

    client.online_users.on();
    assert_eq!(registry.observer_count(PresenceEventKind::Added), 1);
    assert_eq!(registry.observer_count(PresenceEventKind::Removed), 1);

    registry.set("u2", json!(true));
    let user = client.online_users.online_user(&user_id!("u2")).unwrap();
    registry.remove("u2");

    let events = recorder.events.lock();
    let state_changed = ClientEvent::UserOnlineStateChanged { user };
    assert_eq!(events.iter().filter(|e| **e == state_changed).count(), 2);
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == ClientEvent::OnlineUserRemoved)
            .count(),
        1
    );
    assert_eq!(client.online_users.online_user_ids(), vec![user_id!("u1")]);
}
