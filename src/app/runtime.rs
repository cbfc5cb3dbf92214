use crate::input::{InputAction, InputService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Blocking input thread plus its shutdown flag.
#[derive(Debug)]
pub struct InputThread {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    /// Start polling the terminal; actions go to `tx`.
    pub fn spawn(
        tx: UnboundedSender<InputAction>,
        poll_interval: Duration,
        initial_search: String,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = spawn_input_thread(tx, Arc::clone(&shutdown), poll_interval, initial_search);
        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Signal the thread and wait for it. It notices within one poll interval.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Input thread panicked");
            }
        }
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a blocking thread that collects terminal input and forwards actions onto a channel.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
    initial_search: String,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut service = InputService::with_search_text(initial_search);
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::error!("Input thread error: {err}");
                    break;
                }
            }
        }
        log::debug!("Input thread stopped");
    })
}
