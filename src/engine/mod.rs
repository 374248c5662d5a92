//! # Engine
//!
//! The fan-out/fan-in substrate the optimizers run on. A [`WorkerPool`] owns a fixed set
//! of worker threads. Work is submitted inside a [`WorkerPool::scope`] as closures tagged
//! with a sequence number, grouped under a [`TaskGroup`] which acts as a completion
//! barrier: waiting on the group returns only once every task in it has finished.
//!
//! A failing task never takes the pool down. Its error or panic is captured, the rest of
//! the group still runs, and the failures are reported together after the drain.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use genswarm::engine::WorkerPool;
//!
//! let pool = WorkerPool::new(4).unwrap();
//! let mut slots = vec![0_usize; 16];
//! let visited = AtomicUsize::new(0);
//! let visited = &visited;
//!
//! let report = pool
//!     .run_batch(slots.iter_mut().enumerate().map(|(i, slot)| {
//!         move || -> genswarm::Result<()> {
//!             *slot = i * i;
//!             visited.fetch_add(1, Ordering::Relaxed);
//!             Ok(())
//!         }
//!     }))
//!     .unwrap();
//!
//! assert_eq!(report.completed, 16);
//! assert_eq!(visited.load(Ordering::Relaxed), 16);
//! assert_eq!(slots[3], 9);
//! ```
mod group;
mod pool;

pub use group::{BatchReport, Completion, TaskGroup};
pub use pool::{TaskScope, WorkerPool};
