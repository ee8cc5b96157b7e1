// Heating service - Use case for building the heating charts view
use crate::application::chart_loader::{ChartLoader, LoadOutcome, LoadState};
use crate::application::palette::SensorPalette;
use crate::application::sensor_repository::{SensorRepository, SnapshotError};
use crate::application::shortlist::{default_priority, Shortlist};
use crate::application::tabs::{
    Collapsible, Panel, PanelBoard, SectionVisibility, TabController, TabError,
};
use crate::domain::chart::{ChartRange, ChartSpec};
use crate::domain::dataset::{Dataset, HeatPumpSeries};
use crate::domain::reading::SensorReading;
use crate::infrastructure::chartjs::ChartJsRenderer;
use crate::infrastructure::config::AppConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const TAB_GROUP: &str = "tab";
pub const CURRENT_TEMPS_SECTION: &str = "current-temps";

#[derive(Clone)]
pub struct HeatingService {
    repository: Arc<dyn SensorRepository>,
    palette: SensorPalette,
    priority: Vec<String>,
    canvas_ranges: Vec<ChartRange>,
}

impl HeatingService {
    pub fn new(
        repository: Arc<dyn SensorRepository>,
        palette: SensorPalette,
        priority: Vec<String>,
        canvas_ranges: Vec<ChartRange>,
    ) -> Self {
        Self {
            repository,
            palette,
            priority,
            canvas_ranges,
        }
    }

    pub fn from_config(repository: Arc<dyn SensorRepository>, config: &AppConfig) -> Self {
        Self::new(
            repository,
            SensorPalette::from_config(&config.palette),
            config.ordering.priority.clone().unwrap_or_else(default_priority),
            config.charts.ranges.clone(),
        )
    }

    /// Build a fresh view from the current snapshot, with the daily chart loaded.
    pub async fn build_view(&self, now: DateTime<Utc>) -> Result<HeatingView, SnapshotError> {
        let snapshot = self.repository.snapshot().await?;

        let mut shortlist = Shortlist::new(&self.palette);
        let heat_pump = [
            (HeatPumpSeries::RoomSetpoint, &snapshot.room_setpoint_records),
            (HeatPumpSeries::TankSetpoint, &snapshot.tank_setpoint_records),
            (HeatPumpSeries::FlowTemperature, &snapshot.flow_temperature_records),
            (HeatPumpSeries::ReturnTemperature, &snapshot.return_temperature_records),
        ];
        for (series, records) in heat_pump {
            shortlist.add_heat_pump(series, records);
        }
        for (name, records) in snapshot.sensors()? {
            shortlist.add(&name, &records, None, None);
        }
        let datasets = shortlist.into_ordered(&self.priority);

        Ok(HeatingView::new(now, datasets, &self.canvas_ranges))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TabActivation {
    pub range: ChartRange,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Configuration to instantiate, present only when this activation built it
    pub chart: Option<Value>,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestReading {
    pub label: String,
    pub color: String,
    pub reading: Option<SensorReading>,
}

/// One rendered page: shared datasets, lazily built charts and panel state.
pub struct HeatingView {
    generated_at: DateTime<Utc>,
    loader: ChartLoader<ChartJsRenderer>,
    tabs: PanelBoard,
    sections: BTreeMap<String, Collapsible>,
}

impl HeatingView {
    pub fn new(now: DateTime<Utc>, datasets: Vec<Dataset>, canvas_ranges: &[ChartRange]) -> Self {
        let specs = ChartRange::ALL
            .into_iter()
            .map(|range| ChartSpec::for_range(range, now))
            .collect();
        let renderer = ChartJsRenderer::new(canvas_ranges.iter().map(|range| range.canvas_id()));
        let loader = ChartLoader::new(renderer, specs, datasets);

        let mut tabs = PanelBoard::new();
        tabs.add_group(TAB_GROUP, ChartRange::ALL.iter().map(|range| range.tab_id()));
        if let Err(err) = tabs.activate_tab(TAB_GROUP, &ChartRange::Daily.tab_id()) {
            tracing::warn!(error = %err, "could not show the daily tab");
        }

        let mut sections = BTreeMap::new();
        sections.insert(
            CURRENT_TEMPS_SECTION.to_string(),
            Collapsible::new(CURRENT_TEMPS_SECTION, true),
        );

        Self {
            generated_at: now,
            loader,
            tabs,
            sections,
        }
    }

    /// Handle a tab click: build the chart if needed, then switch panels.
    ///
    /// Chart failures are logged and reported but never stop the switch.
    pub fn activate(&mut self, range: ChartRange) -> Result<TabActivation, TabError> {
        let outcome = self.loader.load(range);

        let (chart, error) = match &outcome {
            LoadOutcome::Constructed => (self.loader.chart(range).cloned(), None),
            LoadOutcome::AlreadyLoaded => (None, None),
            LoadOutcome::Failed(err) => {
                tracing::warn!(
                    chart = %range,
                    error = %err,
                    "chart construction failed, switching tab anyway"
                );
                (None, Some(err.to_string()))
            }
        };

        self.tabs.activate_tab(TAB_GROUP, &range.tab_id())?;

        Ok(TabActivation {
            range,
            outcome: outcome.as_str(),
            error,
            chart,
            panels: self.tabs.panels(TAB_GROUP).to_vec(),
        })
    }

    pub fn toggle_section(&mut self, prefix: &str) -> Option<SectionVisibility> {
        self.sections.get_mut(prefix).map(Collapsible::toggle)
    }

    pub fn section(&self, prefix: &str) -> Option<&Collapsible> {
        self.sections.get(prefix)
    }

    /// Last reading of each dataset, in display order.
    pub fn latest_readings(&self) -> Vec<LatestReading> {
        self.loader
            .datasets()
            .iter()
            .map(|dataset| LatestReading {
                label: dataset.label.clone(),
                color: dataset.color.clone(),
                reading: dataset.latest().copied(),
            })
            .collect()
    }

    pub fn datasets(&self) -> &[Dataset] {
        self.loader.datasets()
    }

    pub fn daily_chart(&self) -> Option<&Value> {
        self.loader.chart(ChartRange::Daily)
    }

    pub fn chart_state(&self, range: ChartRange) -> LoadState {
        self.loader.state(range)
    }

    pub fn has_canvas(&self, range: ChartRange) -> bool {
        self.loader.renderer().has_target(&range.canvas_id())
    }

    pub fn active_range(&self) -> Option<ChartRange> {
        let panel = self.tabs.visible(TAB_GROUP)?;
        ChartRange::ALL
            .into_iter()
            .find(|range| range.tab_id() == panel.id)
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}
