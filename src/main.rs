#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod console;
mod formatter;
mod gateway;
mod http_handler;
mod logger;
mod panel_control;

use crate::console::Dispatcher;
use crate::gateway::NeoGateway;
use std::{env, sync::Arc};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let base_url_var = env::var("NEO_BASE_URL");
    let base_url = base_url_var.as_ref().map_or("http://localhost:5000", |v| v.as_str());
    info!("NEO console using backend at {base_url}");
    info!("Commands: lookup <spk-id> | feed | factsheet | impact <spk-id> | quit");

    let dispatcher = Dispatcher::new(Arc::new(NeoGateway::new(base_url)));
    let events = console::spawn_stdin_reader();
    dispatcher.run(events).await;
    info!("Shutting down.");
}
