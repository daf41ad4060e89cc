//! Incremental multi-population genetic algorithm for the Traveling
//! Salesman Problem.
//!
//! - **GA engine** ([`ga`]): evolves closed tours over a fixed point set with
//!   elitist selection, order crossover and swap mutation. Several isolated
//!   populations advance per tick, and a lazy [`ga::GenerationProducer`]
//!   yields one [`ga::Generation`] snapshot at a time.
//! - **Sessions** ([`session`]): a registry of cancellation tokens keyed by
//!   session id, and a [`session::ProgressStream`] that turns generations
//!   into progress notifications and honours stop requests between ticks.
//!
//! # Architecture
//!
//! The crate is a stochastic heuristic, not an exact solver. Transport
//! (HTTP, SSE), input parsing and rendering are left to consumers; the data
//! types serialize with `serde` when the `serde` feature is enabled.

pub mod error;
pub mod ga;
pub mod session;

pub use error::{Result, TspError};
