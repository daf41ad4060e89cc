//! Cancellable progress stream for one session.
//!
//! [`ProgressStream`] pulls generations from a [`GenerationProducer`] and
//! wraps each in a [`Progress`] notification. Between pulls it checks the
//! session's cancellation token, so a stop request takes effect at the next
//! tick boundary and never interrupts a tick in flight.

use super::progress::{progress_percent, Progress, Status};
use super::registry::{SessionGuard, SessionRegistry};
use crate::error::Result;
use crate::ga::{DataMode, Generation, GenerationProducer, Generations, Point, TspParams};
use rand::rngs::StdRng;
use rand::Rng;
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::instrument;

/// Ordered, lazy sequence of progress notifications for one run.
///
/// Yields one [`Status::Running`] notification per tick, followed by exactly
/// one terminal notification:
///
/// - [`Status::Completed`] when the stopping policy ends the run (progress 100)
/// - [`Status::Stopped`] when the session was cancelled; it carries the last
///   completed generation
/// - [`Status::Error`] when a tick fails; `message` holds the error
///
/// Every emitted generation passes through the run's [`DataMode`] filter.
/// The session entry is released when the terminal notification is produced
/// or when the stream is dropped, whichever comes first.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_tsp::ga::{Generations, Point, TspParams};
/// use u_tsp::session::{ProgressStream, SessionRegistry, Status};
///
/// let registry = Arc::new(SessionRegistry::new());
/// let points = vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 2.0, 0.0),
///     Point::new(3, 2.0, 2.0),
///     Point::new(4, 0.0, 2.0),
/// ];
/// let params = TspParams::default()
///     .with_population_size(10)
///     .with_elite_size(2)
///     .with_number_of_populations(1)
///     .with_generations(Generations::Fixed(2));
///
/// let updates: Vec<_> = ProgressStream::start(&registry, "demo", points, params)
///     .unwrap()
///     .collect();
/// assert_eq!(updates.len(), 3);
/// assert_eq!(updates[2].status, Status::Completed);
/// assert!(!registry.is_active("demo"));
/// ```
pub struct ProgressStream<R: Rng = StdRng> {
    producer: GenerationProducer<R>,
    guard: Option<SessionGuard>,
    data_mode: DataMode,
    generations: Generations,
    last: Option<Generation>,
    ticks: usize,
}

impl ProgressStream<StdRng> {
    /// Validates the input, builds the populations and registers the session.
    ///
    /// Invalid parameters or points are rejected here, before any session
    /// entry exists or any tick runs.
    #[instrument(skip(registry, points, params), fields(points = points.len()))]
    pub fn start(
        registry: &Arc<SessionRegistry>,
        session_id: &str,
        points: Vec<Point>,
        params: TspParams,
    ) -> Result<Self> {
        let producer = GenerationProducer::new(points, params).inspect_err(|err| {
            tracing::warn!(err = %err, "Rejected run");
        })?;
        Ok(Self::with_producer(registry, session_id, producer))
    }
}

impl<R: Rng> ProgressStream<R> {
    /// Registers `session_id` and streams the given producer.
    pub fn with_producer(
        registry: &Arc<SessionRegistry>,
        session_id: &str,
        producer: GenerationProducer<R>,
    ) -> Self {
        let params = producer.params();
        tracing::info!(
            session_id,
            population_size = params.population_size,
            number_of_populations = params.number_of_populations,
            generations = ?params.generations,
            "Run started"
        );
        Self {
            data_mode: params.data_mode,
            generations: params.generations,
            guard: Some(registry.start(session_id)),
            producer,
            last: None,
            ticks: 0,
        }
    }

    /// Session id, until the stream has terminated.
    pub fn session_id(&self) -> Option<&str> {
        self.guard.as_ref().map(SessionGuard::session_id)
    }

    /// Number of generations emitted so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Last completed generation, unfiltered.
    pub fn last_generation(&self) -> Option<&Generation> {
        self.last.as_ref()
    }

    /// Whether the terminal notification has been produced.
    pub fn is_finished(&self) -> bool {
        self.guard.is_none()
    }

    fn terminate(&mut self, status: Status, progress: f64, message: Option<String>) -> Progress {
        if let Some(guard) = self.guard.take() {
            tracing::info!(
                session_id = guard.session_id(),
                status = ?status,
                ticks = self.ticks,
                "Run finished"
            );
        }
        Progress {
            generation: self.last.as_ref().map(|g| g.filtered(self.data_mode)),
            status,
            progress,
            message,
        }
    }
}

impl<R: Rng> Iterator for ProgressStream<R> {
    type Item = Progress;

    fn next(&mut self) -> Option<Progress> {
        let cancelled = self.guard.as_ref()?.is_cancelled();
        let progress = progress_percent(self.ticks, self.generations);

        if cancelled {
            return Some(self.terminate(Status::Stopped, progress, None));
        }

        match self.producer.next() {
            Some(Ok(generation)) => {
                self.ticks += 1;
                let emitted = generation.filtered(self.data_mode);
                self.last = Some(generation);
                Some(Progress {
                    generation: Some(emitted),
                    status: Status::Running,
                    progress: progress_percent(self.ticks, self.generations),
                    message: None,
                })
            }
            Some(Err(err)) => {
                tracing::error!(err = %err, ticks = self.ticks, "Run failed");
                Some(self.terminate(Status::Error, progress, Some(err.to_string())))
            }
            None => Some(self.terminate(Status::Completed, 100.0, None)),
        }
    }
}

impl<R: Rng> FusedIterator for ProgressStream<R> {}
