//! Bagged regression-tree ensemble over lag and calendar features.

use crate::core::{DailySeries, ForecastResult};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

/// Lag offsets fed to every tree; the longest bounds the minimum history.
const LAGS: [usize; 3] = [1, 7, 14];

/// Features per training row: the lags plus day-of-week and day-of-year.
const NUM_FEATURES: usize = LAGS.len() + 2;

/// Hyperparameters for the bagged tree ensemble.
///
/// The defaults trade accuracy against fit cost for daily series a few
/// hundred to a few thousand days long; all of them are overridable.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of bagged trees.
    pub trees: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum number of rows required to attempt a split.
    pub min_split: usize,
    /// Features sampled per split.
    pub split_features: usize,
    /// Seed for bootstrap resampling and feature subsampling. Fixed by
    /// default so identical input yields bit-identical forecasts.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 50,
            max_depth: 8,
            min_split: 4,
            split_features: 3,
            seed: 42,
        }
    }
}

impl ForestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trees(mut self, trees: usize) -> Self {
        self.trees = trees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// One node of a regression tree.
#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: &[f64; NUM_FEATURES]) -> f64 {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }
}

/// Bagged regression-tree ensemble predicting the next day's count.
///
/// Each tree trains on a bootstrap resample of (lag, calendar) → next-day
/// rows and considers a random feature subset at every split; the forecast
/// is the mean over trees, floored at 0.
///
/// Multi-step forecasts are recursive: each predicted day is appended to
/// the lag window that feeds the following day, so forecast errors compound
/// with the horizon rather than staying independent.
///
/// All randomness comes from one `StdRng` seeded from the config, so
/// repeated fits on identical input produce bit-identical forecasts.
#[derive(Debug, Clone, Default)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<Node>,
    history: Vec<f64>,
    last_date: Option<NaiveDate>,
}

impl RandomForest {
    pub fn new() -> Self {
        Self::with_config(ForestConfig::default())
    }

    pub fn with_config(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            history: Vec::new(),
            last_date: None,
        }
    }

    /// Longest lag; both the feature window and the minimum-history bound.
    pub fn max_lag() -> usize {
        LAGS[LAGS.len() - 1]
    }
}

/// Feature row for predicting the value at `index`, where `history[..index]`
/// is already known and `date` is the calendar date at `index`.
fn feature_row(history: &[f64], index: usize, date: NaiveDate) -> [f64; NUM_FEATURES] {
    let mut row = [0.0; NUM_FEATURES];
    for (slot, lag) in LAGS.iter().enumerate() {
        row[slot] = history[index - lag];
    }
    row[LAGS.len()] = date.weekday().num_days_from_monday() as f64;
    row[LAGS.len() + 1] = date.ordinal() as f64;
    row
}

/// Best threshold for one feature over `rows`, by summed squared error.
///
/// Sorts the rows by the feature, then sweeps split positions with prefix
/// sums. Returns `None` when the feature cannot separate the rows.
fn best_split(
    features: &[[f64; NUM_FEATURES]],
    targets: &[f64],
    rows: &[usize],
    feature: usize,
) -> Option<(f64, f64)> {
    let mut order = rows.to_vec();
    order.sort_by(|&a, &b| {
        features[a][feature]
            .partial_cmp(&features[b][feature])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let n = order.len();
    let mut prefix = Vec::with_capacity(n);
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for &row in &order {
        sum += targets[row];
        sum_sq += targets[row] * targets[row];
        prefix.push((sum, sum_sq));
    }
    let (total, total_sq) = prefix[n - 1];

    let mut best: Option<(f64, f64)> = None;
    for split in 1..n {
        let left_x = features[order[split - 1]][feature];
        let right_x = features[order[split]][feature];
        if left_x == right_x {
            continue;
        }

        let (left_sum, left_sq) = prefix[split - 1];
        let left_n = split as f64;
        let right_n = (n - split) as f64;
        let right_sum = total - left_sum;
        let right_sq = total_sq - left_sq;

        let sse = (left_sq - left_sum * left_sum / left_n)
            + (right_sq - right_sum * right_sum / right_n);
        if best.map_or(true, |(_, best_sse)| sse < best_sse) {
            best = Some(((left_x + right_x) / 2.0, sse));
        }
    }
    best
}

/// Grow one tree over the given bootstrap rows.
fn grow_tree(
    features: &[[f64; NUM_FEATURES]],
    targets: &[f64],
    rows: &[usize],
    depth: usize,
    config: &ForestConfig,
    rng: &mut StdRng,
) -> Node {
    let mean = rows.iter().map(|&r| targets[r]).sum::<f64>() / rows.len() as f64;
    if depth >= config.max_depth || rows.len() < config.min_split {
        return Node::Leaf { value: mean };
    }

    let sampled = index::sample(
        rng,
        NUM_FEATURES,
        config.split_features.min(NUM_FEATURES),
    )
    .into_vec();

    let mut best: Option<(usize, f64, f64)> = None;
    for feature in sampled {
        if let Some((threshold, sse)) = best_split(features, targets, rows, feature) {
            if best.map_or(true, |(_, _, best_sse)| sse < best_sse) {
                best = Some((feature, threshold, sse));
            }
        }
    }

    let Some((feature, threshold, _)) = best else {
        return Node::Leaf { value: mean };
    };

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
        .iter()
        .copied()
        .partition(|&row| features[row][feature] <= threshold);
    if left_rows.is_empty() || right_rows.is_empty() {
        return Node::Leaf { value: mean };
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_tree(features, targets, &left_rows, depth + 1, config, rng)),
        right: Box::new(grow_tree(features, targets, &right_rows, depth + 1, config, rng)),
    }
}

impl Forecaster for RandomForest {
    fn fit(&mut self, series: &DailySeries) -> Result<()> {
        let values = series.values();
        let dates = series.dates();
        let max_lag = Self::max_lag();

        // One complete feature vector needs `max_lag` days behind it, and a
        // usable ensemble needs at least a lag window's worth of rows.
        let rows = values.len().saturating_sub(max_lag);
        if rows < max_lag {
            return Err(ForecastError::ModelFit {
                model: "RandomForest",
                needed: 2 * max_lag,
                got: values.len(),
            });
        }

        let mut features = Vec::with_capacity(rows);
        let mut targets = Vec::with_capacity(rows);
        for i in max_lag..values.len() {
            features.push(feature_row(values, i, dates[i]));
            targets.push(values[i]);
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut trees = Vec::with_capacity(self.config.trees);
        for _ in 0..self.config.trees {
            let sample: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();
            trees.push(grow_tree(&features, &targets, &sample, 0, &self.config, &mut rng));
        }

        self.trees = trees;
        self.history = values.to_vec();
        self.last_date = Some(series.last_date());
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        if self.trees.is_empty() {
            return Err(ForecastError::FitRequired);
        }
        let last_date = self.last_date.ok_or(ForecastError::FitRequired)?;

        let mut window = self.history.clone();
        let mut dates = Vec::with_capacity(horizon);
        let mut values = Vec::with_capacity(horizon);
        for h in 1..=horizon {
            let date = last_date + Duration::days(h as i64);
            let row = feature_row(&window, window.len(), date);
            let mean_vote =
                self.trees.iter().map(|tree| tree.predict(&row)).sum::<f64>()
                    / self.trees.len() as f64;
            let prediction = mean_vote.max(0.0);

            // The clipped prediction becomes a lag for later steps.
            window.push(prediction);
            dates.push(date);
            values.push(prediction);
        }

        ForecastResult::new(dates, values)
    }

    fn name(&self) -> &str {
        "RandomForest"
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}
