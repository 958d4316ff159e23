//! Background execution with a foreground spinner.
//!
//! The task runs on a scoped worker thread and sends its result over a
//! channel. The foreground loop waits on that channel, refreshing the
//! spinner's elapsed time between waits, and joins the worker before
//! returning. There is no cancellation: a hung external command keeps the
//! loop waiting.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{DepsError, Result};
use crate::ui::UserInterface;

/// How often the spinner message is refreshed.
const TICK: Duration = Duration::from_millis(250);

/// Run `task` on a worker thread while a spinner shows `message`.
///
/// The spinner finishes with `done` on success or with the error text on
/// failure. A worker that panics is reported as an error.
pub fn run_in_background<T, F>(
    ui: &mut dyn UserInterface,
    message: &str,
    done: &str,
    task: F,
) -> Result<T>
where
    T: Send,
    F: FnOnce() -> Result<T> + Send,
{
    let start = Instant::now();
    let mut spinner = ui.start_spinner(message);

    let outcome = thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        let worker = scope.spawn(move || {
            let _ = tx.send(task());
        });

        loop {
            match rx.recv_timeout(TICK) {
                Ok(result) => {
                    let _ = worker.join();
                    break result;
                }
                Err(RecvTimeoutError::Timeout) => {
                    spinner.set_message(&format!(
                        "{} ({}s)",
                        message,
                        start.elapsed().as_secs()
                    ));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    let _ = worker.join();
                    break Err(DepsError::Other(anyhow::anyhow!(
                        "{} stopped unexpectedly",
                        message
                    )));
                }
            }
        }
    });

    match &outcome {
        Ok(_) => spinner.finish_success(done),
        Err(e) => spinner.finish_error(&e.to_string()),
    }
    tracing::debug!("{} finished after {:?}", message, start.elapsed());

    outcome
}
