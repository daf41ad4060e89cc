//! Genetic Algorithm engine for closed tours.
//!
//! Evolves several isolated populations of tours over a fixed point set and
//! yields one [`Generation`] per tick through [`GenerationProducer`].
//!
//! # Key Types
//!
//! - [`TspParams`]: Run parameters (population sizes, mutation rate, termination)
//! - [`PointSet`]: Indexed point lookup and closed-tour distance
//! - [`GenerationProducer`]: Lazy, fused iterator of generations
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover (OX) and swap mutation on id paths
//! - [`stopping`]: Fixed-count and until-converged termination
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod fitness;
mod geometry;
pub mod operators;
mod runner;
mod selection;
pub mod stopping;
mod types;

pub use config::{DataMode, Generations, TspParams, MAX_GENERATIONS};
pub use fitness::evaluate;
pub use geometry::PointSet;
pub use runner::{
    advance, initialize_population, initialize_populations, overall_best, GenerationProducer,
};
pub use selection::{pick_parent, select_elite};
pub use types::{Generation, Point, PointId, Population, Route};
