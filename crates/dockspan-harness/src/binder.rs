#![forbid(unsafe_code)]

//! Event binder stand-in.

use dockspan_core::event::{
    EventBinder, EventTarget, ListenerOptions, NativeEventKind, SubscriptionId,
};

/// A live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub target: EventTarget,
    pub kind: NativeEventKind,
    pub options: ListenerOptions,
}

/// Binder that tracks live and cancelled subscriptions.
#[derive(Debug, Default)]
pub struct RecordingBinder {
    next: u64,
    live: Vec<Subscription>,
    cancelled: Vec<SubscriptionId>,
}

impl RecordingBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn live(&self) -> &[Subscription] {
        &self.live
    }

    #[must_use]
    pub fn cancelled(&self) -> &[SubscriptionId] {
        &self.cancelled
    }

    /// Live subscriptions of `kind`.
    #[must_use]
    pub fn live_of(&self, kind: NativeEventKind) -> Vec<Subscription> {
        self.live.iter().copied().filter(|s| s.kind == kind).collect()
    }
}

impl EventBinder for RecordingBinder {
    fn subscribe(
        &mut self,
        target: EventTarget,
        kind: NativeEventKind,
        options: ListenerOptions,
    ) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.live.push(Subscription {
            id,
            target,
            kind,
            options,
        });
        id
    }

    fn cancel(&mut self, id: SubscriptionId) {
        self.live.retain(|s| s.id != id);
        self.cancelled.push(id);
    }
}
