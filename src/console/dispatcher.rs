use super::event::UiEvent;
use crate::gateway::NeoGateway;
use crate::panel_control::{FeedPanel, LookupPanel};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc;

/// Maps trigger events to task-spawning panel handlers. Each handler owns
/// exactly one panel's state transition; panels never share mutable state, so
/// concurrent triggers on different panels proceed independently.
pub struct Dispatcher {
    gateway: Arc<NeoGateway>,
    lookup_panel: Arc<RwLock<LookupPanel>>,
    feed_panel: Arc<RwLock<FeedPanel>>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<NeoGateway>) -> Self {
        Self {
            gateway,
            lookup_panel: Arc::new(RwLock::new(LookupPanel::new())),
            feed_panel: Arc::new(RwLock::new(FeedPanel::new())),
        }
    }

    pub fn lookup_panel(&self) -> Arc<RwLock<LookupPanel>> { Arc::clone(&self.lookup_panel) }
    pub fn feed_panel(&self) -> Arc<RwLock<FeedPanel>> { Arc::clone(&self.feed_panel) }

    /// Drains the event queue until it closes or a `Quit` trigger arrives.
    /// Handlers are spawned, not awaited: a slow lookup never blocks the feed
    /// panel, and a retry backoff never blocks anything but its own task.
    pub async fn run(&self, mut events: mpsc::Receiver<UiEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                UiEvent::Lookup(id) => {
                    let panel = self.lookup_panel();
                    let gateway = Arc::clone(&self.gateway);
                    tokio::spawn(LookupPanel::on_search(panel, gateway, id));
                }
                UiEvent::Factsheet => {
                    let panel = self.lookup_panel();
                    let gateway = Arc::clone(&self.gateway);
                    tokio::spawn(LookupPanel::on_generate_factsheet(panel, gateway));
                }
                UiEvent::Feed => {
                    let panel = self.feed_panel();
                    let gateway = Arc::clone(&self.gateway);
                    tokio::spawn(FeedPanel::on_fetch(panel, gateway));
                }
                UiEvent::AssessImpact(id) => {
                    let panel = self.feed_panel();
                    let gateway = Arc::clone(&self.gateway);
                    tokio::spawn(FeedPanel::on_assess_impact(panel, gateway, id));
                }
                UiEvent::Quit => break,
            }
        }
    }
}
