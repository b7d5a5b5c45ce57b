// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::{ClientDelegate, ClientEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelegateHandle(u64);

/// Hands each event synchronously to all delegates registered at the time of dispatch.
pub struct ImmediateClientEventDispatcher {
    delegates: RwLock<Vec<(DelegateHandle, Arc<dyn ClientDelegate>)>>,
    next_handle: AtomicU64,
}

impl ImmediateClientEventDispatcher {
    pub fn new() -> Self {
        Self {
            delegates: Default::default(),
            next_handle: AtomicU64::new(1),
        }
    }

    pub fn add_delegate(&self, delegate: Arc<dyn ClientDelegate>) -> DelegateHandle {
        let handle = DelegateHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.delegates.write().push((handle, delegate));
        handle
    }

    /// Returns false if no delegate was registered for `handle`.
    pub fn remove_delegate(&self, handle: DelegateHandle) -> bool {
        let mut delegates = self.delegates.write();
        let count = delegates.len();
        delegates.retain(|(h, _)| *h != handle);
        delegates.len() != count
    }

    pub fn delegate_count(&self) -> usize {
        self.delegates.read().len()
    }
}

impl Default for ImmediateClientEventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientEventDispatcherTrait for ImmediateClientEventDispatcher {
    fn dispatch_event(&self, event: ClientEvent) {
        // Delegates may add or remove delegates while handling the event.
        let delegates = self
            .delegates
            .read()
            .iter()
            .map(|(_, delegate)| delegate.clone())
            .collect::<Vec<_>>();

        for delegate in delegates {
            delegate.handle_event(event.clone());
        }
    }
}
