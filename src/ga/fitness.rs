//! Fitness evaluation: distance recomputation and rank ordering.

use super::geometry::PointSet;
use super::types::Route;
use crate::error::Result;
use std::cmp::Ordering;

/// Recomputes every route's distance and returns them sorted ascending.
///
/// The sort is stable: routes with equal distance keep their input order.
pub fn evaluate(points: &PointSet, routes: &[Route]) -> Result<Vec<Route>> {
    let mut evaluated = routes
        .iter()
        .map(|r| Ok(Route::new(r.path.clone(), points.distance(&r.path)?)))
        .collect::<Result<Vec<_>>>()?;
    sort_routes(&mut evaluated);
    Ok(evaluated)
}

/// Stable ascending sort by distance.
pub(crate) fn sort_routes(routes: &mut [Route]) {
    routes.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::ga::Point;

    fn line() -> PointSet {
        PointSet::new(vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 1.0, 0.0),
            Point::new(3, 2.0, 0.0),
            Point::new(4, 3.0, 0.0),
        ])
        .unwrap()
    }

    fn square() -> PointSet {
        PointSet::new(vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 1.0, 0.0),
            Point::new(3, 1.0, 1.0),
            Point::new(4, 0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_recomputes_stale_distances() {
        let routes = vec![
            Route::new(vec![1, 2, 3, 4], 0.0),
            Route::new(vec![1, 3, 2, 4], 0.0),
            Route::new(vec![1, 4, 2, 3], 0.0),
        ];
        let result = evaluate(&square(), &routes).unwrap();

        assert_eq!(result.len(), 3);
        assert!(result.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(result[0].path, vec![1, 2, 3, 4]);
        assert!((result[0].distance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Every tour over collinear points has the same length.
        let routes = vec![
            Route::new(vec![4, 3, 2, 1], 100.0),
            Route::new(vec![1, 2, 3, 4], 50.0),
            Route::new(vec![2, 1, 4, 3], 0.0),
        ];
        let result = evaluate(&line(), &routes).unwrap();
        let paths: Vec<_> = result.iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            paths,
            vec![vec![4, 3, 2, 1], vec![1, 2, 3, 4], vec![2, 1, 4, 3]]
        );
    }

    #[test]
    fn test_input_is_untouched() {
        let routes = vec![Route::new(vec![1, 3, 2, 4], 0.0)];
        let _ = evaluate(&square(), &routes).unwrap();
        assert_eq!(routes[0].distance, 0.0);
    }

    #[test]
    fn test_unknown_point_propagates() {
        let routes = vec![Route::new(vec![1, 2, 5], 0.0)];
        assert_eq!(
            evaluate(&square(), &routes),
            Err(TspError::PointNotFound { id: 5 })
        );
    }
}
