// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Pieces, leaves first:
// - seen: grow-only set of every URL ever scheduled
// - queue: bounded FIFO of URLs waiting for a worker
// - frontier: filter + seen set + queue behind offer()/take()
// - report: events, reporters and counters
// - worker: the take -> fetch -> offer loop
// - coordinator: starts the workers, plants the seed, waits for quiescence
//
// Termination is timeout-based: a worker that waits a full timeout without
// getting work assumes the crawl is done. That is a heuristic, not a proof,
// so slow fetches can end a crawl early.
// =============================================================================

mod coordinator;
mod frontier;
mod queue;
mod report;
mod seen;
mod worker;

pub use coordinator::Crawler;

// Only the test doubles need these outside the engine
#[cfg(test)]
pub use frontier::OfferOutcome;
#[cfg(test)]
pub use report::{CrawlEvent, CrawlReporter};
