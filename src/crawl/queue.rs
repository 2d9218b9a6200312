// src/crawl/queue.rs
// =============================================================================
// The bounded FIFO of URLs waiting to be fetched.
//
// How it works:
// - A consumer that finds the buffer empty registers a oneshot sender in
//   `waiters` and sleeps on the receiving end
// - A producer first hands its URL straight to the oldest live waiter.
//   Only when nobody is waiting does it go into the buffer, and only if
//   the buffer has room
// - Producers that found neither a waiter nor room sleep on `changed`,
//   which fires whenever an item leaves the buffer or a consumer shows up
//
// Invariant: the buffer never holds more than `capacity` URLs, and it is
// never non-empty while a live consumer is waiting. With capacity 0 the
// handoff path is the only one, which gives a synchronous rendezvous.
//
// Both sides are bounded by a timeout. Running out of time is not an error
// for the crawl: a producer drops its link, a consumer treats it as "no
// more work".
// =============================================================================

use std::collections::VecDeque;
use std::pin::pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{oneshot, Notify};
use tokio::time::{self, Instant};

use crate::error::QueueTimeout;

#[derive(Debug)]
struct State {
    items: VecDeque<String>,
    waiters: VecDeque<oneshot::Sender<String>>,
}

/// Bounded multi-producer multi-consumer queue with timed push and pop.
#[derive(Debug)]
pub struct PendingQueue {
    state: Mutex<State>,
    changed: Notify,
    capacity: usize,
}

impl PendingQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                items: VecDeque::with_capacity(capacity),
                waiters: VecDeque::new(),
            }),
            changed: Notify::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of URLs currently buffered.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Appends `url`, waiting up to `timeout` for a consumer or for room.
    pub async fn push(&self, mut url: String, timeout: Duration) -> Result<(), QueueTimeout> {
        let deadline = Instant::now() + timeout;

        loop {
            // Register for wakeups before looking, so a pop that lands
            // between the check and the await is not missed
            let mut changed = pin!(self.changed.notified());
            changed.as_mut().enable();

            {
                let mut state = self.lock();
                while let Some(waiter) = state.waiters.pop_front() {
                    match waiter.send(url) {
                        Ok(()) => return Ok(()),
                        // That consumer gave up; try the next one
                        Err(returned) => url = returned,
                    }
                }
                if state.items.len() < self.capacity {
                    state.items.push_back(url);
                    return Ok(());
                }
            }

            if time::timeout_at(deadline, changed).await.is_err() {
                return Err(QueueTimeout(timeout));
            }
        }
    }

    /// Removes the oldest URL, waiting up to `timeout` for one to arrive.
    pub async fn pop(&self, timeout: Duration) -> Result<String, QueueTimeout> {
        let mut receiver = {
            let mut state = self.lock();
            if let Some(url) = state.items.pop_front() {
                drop(state);
                self.changed.notify_waiters();
                return Ok(url);
            }
            let (sender, receiver) = oneshot::channel();
            state.waiters.push_back(sender);
            receiver
        };
        // A producer blocked on a full (or zero-size) buffer can now hand off
        self.changed.notify_waiters();

        match time::timeout(timeout, &mut receiver).await {
            Ok(Ok(url)) => Ok(url),
            _ => {
                // Closing first means a producer either delivered already
                // or gets its URL back from send()
                receiver.close();
                receiver.try_recv().map_err(|_| QueueTimeout(timeout))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not tokio::sync::mpsc?
//    - mpsc has a single receiver; every worker here is a consumer
//    - mpsc::channel(0) panics, and a zero-size queue is a valid setting
//
// 2. Why notify_waiters() and not notify_one()?
//    - A woken producer may be timing out at the same moment. Waking every
//      blocked producer lets the others retry instead of losing the wakeup
//    - notify_waiters() stores no permit, hence enable() before the check
//
// 3. Why a std Mutex inside async code?
//    - The lock is never held across an .await, only for one push/pop
// -----------------------------------------------------------------------------
