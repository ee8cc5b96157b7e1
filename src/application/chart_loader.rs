// Chart loader - Lazy, memoized chart construction per time range
use crate::domain::chart::{ChartRange, ChartSpec};
use crate::domain::dataset::Dataset;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no canvas target for chart {0}")]
    MissingTarget(String),
    #[error("no configuration for chart {0}")]
    MissingSpec(ChartRange),
    #[error("failed to serialize chart configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The charting library, seen from the loader: one call builds one chart.
pub trait ChartRenderer {
    type Chart;

    fn construct(
        &mut self,
        spec: &ChartSpec,
        datasets: &[Dataset],
    ) -> Result<Self::Chart, ChartError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Constructed,
    AlreadyLoaded,
    Failed(ChartError),
}

impl LoadOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadOutcome::Constructed => "constructed",
            LoadOutcome::AlreadyLoaded => "already_loaded",
            LoadOutcome::Failed(_) => "failed",
        }
    }
}

pub struct ChartLoader<R: ChartRenderer> {
    renderer: R,
    specs: BTreeMap<ChartRange, ChartSpec>,
    datasets: Vec<Dataset>,
    charts: BTreeMap<ChartRange, R::Chart>,
}

impl<R: ChartRenderer> ChartLoader<R> {
    /// Set up the loader and build the daily chart straight away.
    pub fn new(renderer: R, specs: Vec<ChartSpec>, datasets: Vec<Dataset>) -> Self {
        let mut loader = Self {
            renderer,
            specs: specs.into_iter().map(|spec| (spec.range, spec)).collect(),
            datasets,
            charts: BTreeMap::new(),
        };

        if let LoadOutcome::Failed(err) = loader.load(ChartRange::Daily) {
            tracing::warn!(error = %err, "daily chart could not be built");
        }

        loader
    }

    /// Build the chart for `range` unless it is already built.
    ///
    /// A failed construction leaves the chart unloaded so a later call
    /// tries again.
    pub fn load(&mut self, range: ChartRange) -> LoadOutcome {
        if self.charts.contains_key(&range) {
            tracing::debug!(chart = %range, "chart already loaded");
            return LoadOutcome::AlreadyLoaded;
        }

        let Some(spec) = self.specs.get(&range) else {
            return LoadOutcome::Failed(ChartError::MissingSpec(range));
        };

        match self.renderer.construct(spec, &self.datasets) {
            Ok(chart) => {
                tracing::info!(chart = %range, datasets = self.datasets.len(), "chart constructed");
                self.charts.insert(range, chart);
                LoadOutcome::Constructed
            }
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    pub fn state(&self, range: ChartRange) -> LoadState {
        if self.charts.contains_key(&range) {
            LoadState::Loaded
        } else {
            LoadState::NotLoaded
        }
    }

    pub fn chart(&self, range: ChartRange) -> Option<&R::Chart> {
        self.charts.get(&range)
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[derive(Default)]
    struct CountingRenderer {
        calls: Vec<ChartRange>,
        broken: Vec<ChartRange>,
    }

    impl ChartRenderer for CountingRenderer {
        type Chart = usize;

        fn construct(
            &mut self,
            spec: &ChartSpec,
            datasets: &[Dataset],
        ) -> Result<usize, ChartError> {
            self.calls.push(spec.range);
            if self.broken.contains(&spec.range) {
                return Err(ChartError::MissingTarget(spec.canvas_id.clone()));
            }
            Ok(datasets.len())
        }
    }

    fn specs() -> Vec<ChartSpec> {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        ChartRange::ALL
            .into_iter()
            .map(|range| ChartSpec::for_range(range, now))
            .collect()
    }

    fn count(renderer: &CountingRenderer, range: ChartRange) -> usize {
        renderer.calls.iter().filter(|r| **r == range).count()
    }

    #[test]
    fn test_daily_is_loaded_eagerly() {
        let loader = ChartLoader::new(CountingRenderer::default(), specs(), Vec::new());

        assert_eq!(loader.state(ChartRange::Daily), LoadState::Loaded);
        assert_eq!(loader.renderer().calls, vec![ChartRange::Daily]);
        for range in &ChartRange::ALL[1..] {
            assert_eq!(loader.state(*range), LoadState::NotLoaded);
        }
    }

    #[test]
    fn test_week_is_constructed_once() {
        let mut loader = ChartLoader::new(CountingRenderer::default(), specs(), Vec::new());

        assert!(matches!(loader.load(ChartRange::Weekly), LoadOutcome::Constructed));
        assert_eq!(count(loader.renderer(), ChartRange::Weekly), 1);

        assert!(matches!(loader.load(ChartRange::Weekly), LoadOutcome::AlreadyLoaded));
        assert_eq!(count(loader.renderer(), ChartRange::Weekly), 1);
        assert_eq!(loader.state(ChartRange::Weekly), LoadState::Loaded);
    }

    #[test]
    fn test_reactivating_daily_does_not_rebuild() {
        let mut loader = ChartLoader::new(CountingRenderer::default(), specs(), Vec::new());
        assert!(matches!(loader.load(ChartRange::Daily), LoadOutcome::AlreadyLoaded));
        assert_eq!(count(loader.renderer(), ChartRange::Daily), 1);
    }

    #[test]
    fn test_failure_is_reported_and_retried() {
        let renderer = CountingRenderer {
            broken: vec![ChartRange::Monthly],
            ..Default::default()
        };
        let mut loader = ChartLoader::new(renderer, specs(), Vec::new());

        assert!(matches!(
            loader.load(ChartRange::Monthly),
            LoadOutcome::Failed(ChartError::MissingTarget(_))
        ));
        assert_eq!(loader.state(ChartRange::Monthly), LoadState::NotLoaded);

        assert!(matches!(loader.load(ChartRange::Monthly), LoadOutcome::Failed(_)));
        assert_eq!(count(loader.renderer(), ChartRange::Monthly), 2);
    }

    #[test]
    fn test_missing_spec_fails_without_renderer_call() {
        let only_daily = specs().into_iter().take(1).collect();
        let mut loader = ChartLoader::new(CountingRenderer::default(), only_daily, Vec::new());

        assert!(matches!(
            loader.load(ChartRange::Yearly),
            LoadOutcome::Failed(ChartError::MissingSpec(ChartRange::Yearly))
        ));
        assert_eq!(count(loader.renderer(), ChartRange::Yearly), 0);
    }
}
