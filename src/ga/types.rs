//! Core value types for the TSP evolution.
//!
//! Every type here is a plain value: populations and generations are rebuilt
//! from scratch on each tick and never shared across runs.

use super::config::DataMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of an input point.
pub type PointId = i64;

/// A 2-D input point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(id: PointId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One candidate closed tour.
///
/// `path` visits every input point exactly once; `distance` is the closed
/// tour length including the edge back to the first point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    pub path: Vec<PointId>,
    pub distance: f64,
}

impl Route {
    pub fn new(path: Vec<PointId>, distance: f64) -> Self {
        Self { path, distance }
    }
}

/// An independently evolving pool of routes.
///
/// After every evaluation `routes` is sorted ascending by distance and
/// `best_route == routes[0]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Population {
    pub id: usize,
    pub routes: Vec<Route>,
    pub best_route: Route,
}

/// Snapshot of all populations at one tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Generation {
    /// Zero-based tick counter.
    pub id: usize,
    pub populations: Vec<Population>,
    /// Minimum-distance `best_route` across `populations`.
    pub overall_best_route: Route,
}

impl Generation {
    /// Applies the data-volume filter.
    ///
    /// With [`DataMode::Best`] each population keeps only its best route;
    /// [`DataMode::Full`] returns an unmodified copy.
    pub fn filtered(&self, mode: DataMode) -> Generation {
        match mode {
            DataMode::Full => self.clone(),
            DataMode::Best => Generation {
                id: self.id,
                populations: self
                    .populations
                    .iter()
                    .map(|pop| Population {
                        id: pop.id,
                        routes: vec![pop.best_route.clone()],
                        best_route: pop.best_route.clone(),
                    })
                    .collect(),
                overall_best_route: self.overall_best_route.clone(),
            },
        }
    }
}
