mod dispatcher;
mod event;

pub use dispatcher::Dispatcher;
pub use event::UiEvent;

use crate::warn;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Spawns the stdin reader task and returns the trigger-event queue it feeds.
/// Unknown commands are reported and dropped; blank lines are ignored.
pub fn spawn_stdin_reader() -> mpsc::Receiver<UiEvent> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match UiEvent::parse(&line) {
                Some(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                None => warn!("unknown command: {}", line.trim()),
            }
        }
    });
    rx
}
