//! Closed-tour geometry.
//!
//! [`PointSet`] indexes the input points by id so that tour lengths can be
//! computed directly from a path of ids.

use super::types::{Point, PointId};
use crate::error::{Result, TspError};
use std::collections::HashMap;

/// The fixed set of points a run evolves tours over.
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Vec<Point>,
    index: HashMap<PointId, usize>,
}

impl PointSet {
    /// Builds a point set.
    ///
    /// Fails with [`TspError::DuplicatePoint`] if two points share an id and
    /// with [`TspError::InvalidParameter`] if `points` is empty.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(TspError::InvalidParameter(
                "point set must not be empty".into(),
            ));
        }
        let mut index = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if index.insert(p.id, i).is_some() {
                return Err(TspError::DuplicatePoint { id: p.id });
            }
        }
        Ok(Self { points, index })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point ids in input order.
    pub fn ids(&self) -> Vec<PointId> {
        self.points.iter().map(|p| p.id).collect()
    }

    /// Looks up a point by id.
    pub fn get(&self, id: PointId) -> Result<&Point> {
        self.index
            .get(&id)
            .map(|&i| &self.points[i])
            .ok_or(TspError::PointNotFound { id })
    }

    /// Closed-tour length of `path`.
    ///
    /// Sums the edges between consecutive ids plus the edge from the last id
    /// back to the first. An empty path has length zero.
    pub fn distance(&self, path: &[PointId]) -> Result<f64> {
        let Some(&first) = path.first() else {
            return Ok(0.0);
        };

        let mut total = 0.0;
        let mut prev = self.get(first)?;
        for &id in &path[1..] {
            let next = self.get(id)?;
            total += prev.distance_to(next);
            prev = next;
        }
        total += prev.distance_to(self.get(first)?);
        Ok(total)
    }
}
