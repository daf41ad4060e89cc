//! TSP GA configuration.
//!
//! [`TspParams`] holds all parameters that control the evolutionary loop.

use crate::error::{Result, TspError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard cap on ticks for [`Generations::UntilLastAlive`] runs.
pub const MAX_GENERATIONS: usize = 1000;

/// Termination mode.
///
/// On the wire this is either a JSON number or the string `"untilLastAlive"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GenerationsRepr", into = "GenerationsRepr")
)]
pub enum Generations {
    /// Stop after exactly this many ticks.
    Fixed(usize),
    /// Stop once every population has converged, or at [`MAX_GENERATIONS`].
    #[default]
    UntilLastAlive,
}

impl Generations {
    /// Denominator used for progress reporting.
    pub fn effective_max(self) -> usize {
        match self {
            Generations::Fixed(n) => n,
            Generations::UntilLastAlive => MAX_GENERATIONS,
        }
    }
}

#[cfg(feature = "serde")]
const UNTIL_LAST_ALIVE: &str = "untilLastAlive";

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum GenerationsRepr {
    Count(usize),
    Keyword(String),
}

#[cfg(feature = "serde")]
impl TryFrom<GenerationsRepr> for Generations {
    type Error = String;

    fn try_from(repr: GenerationsRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            GenerationsRepr::Count(n) => Ok(Generations::Fixed(n)),
            GenerationsRepr::Keyword(k) if k == UNTIL_LAST_ALIVE => {
                Ok(Generations::UntilLastAlive)
            }
            GenerationsRepr::Keyword(k) => Err(format!(
                "generations must be a number or \"{UNTIL_LAST_ALIVE}\", got \"{k}\""
            )),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Generations> for GenerationsRepr {
    fn from(g: Generations) -> Self {
        match g {
            Generations::Fixed(n) => GenerationsRepr::Count(n),
            Generations::UntilLastAlive => GenerationsRepr::Keyword(UNTIL_LAST_ALIVE.into()),
        }
    }
}

/// How much of each generation is emitted to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataMode {
    /// Every route of every population.
    #[default]
    Full,
    /// Only each population's best route.
    Best,
}

/// Parameters of a TSP evolution run.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::{Generations, TspParams};
///
/// let params = TspParams::default();
/// assert_eq!(params.population_size, 500);
/// assert_eq!(params.generations, Generations::UntilLastAlive);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{DataMode, Generations, TspParams};
///
/// let params = TspParams::default()
///     .with_population_size(100)
///     .with_elite_size(10)
///     .with_generations(Generations::Fixed(50))
///     .with_data_mode(DataMode::Best)
///     .with_seed(42);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TspParams {
    /// Number of routes in each population.
    pub population_size: usize,

    /// Number of best routes carried unchanged into the breeding pool.
    ///
    /// Must be positive and strictly less than `population_size`.
    pub elite_size: usize,

    /// Probability of a swap mutation per offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Termination mode.
    pub generations: Generations,

    /// Number of independent populations evolved side by side.
    #[cfg_attr(feature = "serde", serde(default = "default_number_of_populations"))]
    pub number_of_populations: usize,

    /// Data-volume filter applied when generations are emitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data_mode: DataMode,

    /// Whether to advance populations in parallel (needs the `parallel` feature).
    #[cfg_attr(feature = "serde", serde(default))]
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub seed: Option<u64>,
}

#[cfg(feature = "serde")]
fn default_number_of_populations() -> usize {
    1
}

impl Default for TspParams {
    fn default() -> Self {
        Self {
            population_size: 500,
            elite_size: 50,
            mutation_rate: 0.2,
            generations: Generations::UntilLastAlive,
            number_of_populations: 10,
            data_mode: DataMode::Full,
            parallel: false,
            seed: None,
        }
    }
}

impl TspParams {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the elite size.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the termination mode.
    pub fn with_generations(mut self, generations: Generations) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the number of independent populations.
    pub fn with_number_of_populations(mut self, n: usize) -> Self {
        self.number_of_populations = n;
        self
    }

    /// Sets the data-volume filter.
    pub fn with_data_mode(mut self, mode: DataMode) -> Self {
        self.data_mode = mode;
        self
    }

    /// Enables or disables parallel population advancement.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters.
    ///
    /// Returns [`TspError::InvalidParameter`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 1 {
            return Err(invalid("population_size must be at least 1"));
        }
        if self.elite_size == 0 {
            return Err(invalid("elite_size must be at least 1"));
        }
        if self.elite_size >= self.population_size {
            return Err(invalid("elite_size must be less than population_size"));
        }
        if self.number_of_populations < 1 {
            return Err(invalid("number_of_populations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> TspError {
    TspError::InvalidParameter(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = TspParams::default();
        assert_eq!(params.population_size, 500);
        assert_eq!(params.elite_size, 50);
        assert!((params.mutation_rate - 0.2).abs() < 1e-10);
        assert_eq!(params.generations, Generations::UntilLastAlive);
        assert_eq!(params.number_of_populations, 10);
        assert_eq!(params.data_mode, DataMode::Full);
        assert!(!params.parallel);
        assert!(params.seed.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let params = TspParams::default()
            .with_population_size(40)
            .with_elite_size(4)
            .with_mutation_rate(0.05)
            .with_generations(Generations::Fixed(12))
            .with_number_of_populations(3)
            .with_data_mode(DataMode::Best)
            .with_parallel(true)
            .with_seed(7);

        assert_eq!(params.population_size, 40);
        assert_eq!(params.elite_size, 4);
        assert!((params.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(params.generations, Generations::Fixed(12));
        assert_eq!(params.number_of_populations, 3);
        assert_eq!(params.data_mode, DataMode::Best);
        assert!(params.parallel);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn test_clamp_mutation_rate() {
        assert!((TspParams::default().with_mutation_rate(2.0).mutation_rate - 1.0).abs() < 1e-10);
        assert!(TspParams::default().with_mutation_rate(-1.0).mutation_rate.abs() < 1e-10);
    }

    #[test]
    fn test_validate_elite_not_below_population() {
        let params = TspParams::default()
            .with_population_size(10)
            .with_elite_size(10);
        assert!(matches!(
            params.validate(),
            Err(TspError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_zero_elite() {
        let params = TspParams::default().with_elite_size(0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_zero_population() {
        let params = TspParams::default()
            .with_population_size(0)
            .with_elite_size(0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_zero_populations() {
        let params = TspParams::default().with_number_of_populations(0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_mutation_rate_out_of_range() {
        let mut params = TspParams::default();
        params.mutation_rate = 1.5;
        assert!(params.validate().is_err());
        params.mutation_rate = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_effective_max() {
        assert_eq!(Generations::Fixed(25).effective_max(), 25);
        assert_eq!(Generations::UntilLastAlive.effective_max(), MAX_GENERATIONS);
    }

    // ---- Wire format ----

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_numeric_generations() {
        let params: TspParams = serde_json::from_str(
            r#"{"populationSize":4,"eliteSize":2,"mutationRate":0.1,"generations":10}"#,
        )
        .unwrap();
        assert_eq!(params.generations, Generations::Fixed(10));
        assert_eq!(params.number_of_populations, 1);
        assert_eq!(params.data_mode, DataMode::Full);
        assert!(params.seed.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_until_last_alive() {
        let params: TspParams = serde_json::from_str(
            r#"{"populationSize":500,"eliteSize":50,"mutationRate":0.2,
                "generations":"untilLastAlive","numberOfPopulations":10,"dataMode":"best"}"#,
        )
        .unwrap();
        assert_eq!(params.generations, Generations::UntilLastAlive);
        assert_eq!(params.number_of_populations, 10);
        assert_eq!(params.data_mode, DataMode::Best);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_unknown_keyword() {
        let result: std::result::Result<TspParams, _> = serde_json::from_str(
            r#"{"populationSize":4,"eliteSize":2,"mutationRate":0.1,"generations":"forever"}"#,
        );
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_generations() {
        assert_eq!(
            serde_json::to_value(Generations::UntilLastAlive).unwrap(),
            serde_json::json!("untilLastAlive")
        );
        assert_eq!(
            serde_json::to_value(Generations::Fixed(5)).unwrap(),
            serde_json::json!(5)
        );
    }
}
