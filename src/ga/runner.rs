//! Evolutionary loop execution.
//!
//! [`GenerationProducer`] drives the whole process one tick at a time:
//! initialization → (evaluation → elite selection → crossover → mutation)
//! per population → cross-population best → emit → repeat.

use super::config::TspParams;
use super::fitness::{evaluate, sort_routes};
use super::geometry::PointSet;
use super::operators::{order_crossover, swap_mutation};
use super::selection::{pick_parent, select_elite};
use super::stopping::should_stop;
use super::types::{Generation, Point, Population, Route};
use crate::error::{Result, TspError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::iter::FusedIterator;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ============================================================================
// Initializer
// ============================================================================

/// Builds one population of `population_size` uniformly shuffled tours,
/// sorted ascending by distance.
pub fn initialize_population<R: Rng>(
    points: &PointSet,
    id: usize,
    population_size: usize,
    rng: &mut R,
) -> Result<Population> {
    let ids = points.ids();
    let mut routes = (0..population_size)
        .map(|_| {
            let mut path = ids.clone();
            path.shuffle(rng);
            let distance = points.distance(&path)?;
            Ok(Route::new(path, distance))
        })
        .collect::<Result<Vec<_>>>()?;
    sort_routes(&mut routes);
    population_from_sorted(id, routes)
}

/// Builds `params.number_of_populations` independent populations.
pub fn initialize_populations<R: Rng>(
    points: &PointSet,
    params: &TspParams,
    rng: &mut R,
) -> Result<Vec<Population>> {
    (0..params.number_of_populations)
        .map(|id| initialize_population(points, id, params.population_size, rng))
        .collect()
}

// ============================================================================
// Advancer
// ============================================================================

/// Produces the next generation of one population.
///
/// The elite of the evaluated population forms the breeding pool. Offspring
/// are bred from two parents drawn uniformly from the pool (with
/// replacement), crossed over and then mutated, until the population is
/// refilled. The merged set is re-evaluated and sorted; `id` is unchanged.
pub fn advance<R: Rng>(
    points: &PointSet,
    population: &Population,
    params: &TspParams,
    rng: &mut R,
) -> Result<Population> {
    let evaluated = evaluate(points, &population.routes)?;
    let elite = select_elite(&evaluated, params.elite_size)?;

    let offspring_count = params.population_size.saturating_sub(elite.len());
    let mut next = Vec::with_capacity(elite.len() + offspring_count);
    next.extend(elite.iter().cloned());
    for _ in 0..offspring_count {
        let parent1 = pick_parent(&elite, rng);
        let parent2 = pick_parent(&elite, rng);
        let child = order_crossover(&parent1.path, &parent2.path, rng)?;
        let child = swap_mutation(&child, params.mutation_rate, rng);
        let distance = points.distance(&child)?;
        next.push(Route::new(child, distance));
    }

    sort_routes(&mut next);
    population_from_sorted(population.id, next)
}

fn population_from_sorted(id: usize, routes: Vec<Route>) -> Result<Population> {
    let best_route = routes
        .first()
        .cloned()
        .ok_or_else(|| TspError::InvalidParameter("population must not be empty".into()))?;
    Ok(Population {
        id,
        routes,
        best_route,
    })
}

/// The minimum-distance best route across `populations`.
///
/// Ties resolve to the lowest population index.
pub fn overall_best(populations: &[Population]) -> Option<&Route> {
    populations
        .iter()
        .map(|p| &p.best_route)
        .min_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        })
}

// ============================================================================
// Producer
// ============================================================================

/// Lazy, finite sequence of generations.
///
/// Each call to [`next`](Iterator::next) checks the stopping policy, then
/// advances every population by one tick and yields the resulting
/// [`Generation`]. Populations never exchange routes. The sequence is fused:
/// after the policy stops it, or after an error is yielded, it only returns
/// `None`. Re-running requires a new producer.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{Generations, GenerationProducer, Point, TspParams};
///
/// let points = vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 4.0, 0.0),
///     Point::new(3, 4.0, 3.0),
///     Point::new(4, 0.0, 3.0),
/// ];
/// let params = TspParams::default()
///     .with_population_size(20)
///     .with_elite_size(4)
///     .with_number_of_populations(2)
///     .with_generations(Generations::Fixed(3))
///     .with_seed(42);
///
/// let generations: Vec<_> = GenerationProducer::new(points, params)
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(generations.len(), 3);
/// ```
pub struct GenerationProducer<R: Rng = StdRng> {
    points: PointSet,
    params: TspParams,
    rng: R,
    populations: Vec<Population>,
    tick: usize,
    finished: bool,
}

impl GenerationProducer<StdRng> {
    /// Creates a producer seeded from `params.seed`, or randomly when unset.
    pub fn new(points: Vec<Point>, params: TspParams) -> Result<Self> {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(points, params, rng)
    }
}

impl<R: Rng> GenerationProducer<R> {
    /// Creates a producer drawing all randomness from `rng`.
    ///
    /// Validates `params` and the point set, then initializes every
    /// population. No tick runs until the first call to `next`.
    pub fn with_rng(points: Vec<Point>, params: TspParams, mut rng: R) -> Result<Self> {
        params.validate()?;
        let points = PointSet::new(points)?;
        let populations = initialize_populations(&points, &params, &mut rng)?;
        Ok(Self::from_populations(points, params, populations, rng))
    }

    /// Resumes from already built populations. Neither `params` nor the
    /// routes are checked against `points`; a bad route fails its tick.
    pub(crate) fn from_populations(
        points: PointSet,
        params: TspParams,
        populations: Vec<Population>,
        rng: R,
    ) -> Self {
        Self {
            points,
            params,
            rng,
            populations,
            tick: 0,
            finished: false,
        }
    }

    /// Number of generations produced so far.
    pub fn ticks(&self) -> usize {
        self.tick
    }

    /// Current populations (the initial ones before the first tick).
    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn params(&self) -> &TspParams {
        &self.params
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    fn step(&mut self) -> Result<Generation> {
        let populations = self.advance_all()?;
        let overall_best_route = overall_best(&populations)
            .cloned()
            .ok_or_else(|| TspError::InvalidParameter("no populations to advance".into()))?;

        tracing::debug!(
            tick = self.tick,
            best_distance = overall_best_route.distance,
            "generation produced"
        );

        let generation = Generation {
            id: self.tick,
            populations: populations.clone(),
            overall_best_route,
        };
        self.populations = populations;
        self.tick += 1;
        Ok(generation)
    }

    /// Advances every population with its own child RNG, seeded from the
    /// master RNG in population order, so sequential and parallel runs agree.
    fn advance_all(&mut self) -> Result<Vec<Population>> {
        let seeds: Vec<u64> = self.populations.iter().map(|_| self.rng.random()).collect();
        let points = &self.points;
        let params = &self.params;
        let advance_one = |(pop, seed): (&Population, u64)| {
            advance(points, pop, params, &mut StdRng::seed_from_u64(seed))
        };

        #[cfg(feature = "parallel")]
        {
            if params.parallel {
                return self
                    .populations
                    .par_iter()
                    .zip(seeds)
                    .map(advance_one)
                    .collect();
            }
        }

        self.populations.iter().zip(seeds).map(advance_one).collect()
    }
}

impl<R: Rng> Iterator for GenerationProducer<R> {
    type Item = Result<Generation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || should_stop(self.params.generations, &self.populations, self.tick) {
            self.finished = true;
            return None;
        }
        let result = self.step();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl<R: Rng> FusedIterator for GenerationProducer<R> {}

// ============================================================================
// Tests
// ============================================================================
