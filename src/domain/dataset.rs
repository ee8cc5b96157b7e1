// Dataset domain model
use super::reading::SensorReading;
use serde::Serialize;

/// One named, coloured series of readings drawn as a single chart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub readings: Vec<SensorReading>,
    pub color: String,
    pub hidden: bool,
}

impl Dataset {
    pub fn new(label: String, readings: Vec<SensorReading>, color: String, hidden: bool) -> Self {
        Self {
            label,
            readings,
            color,
            hidden,
        }
    }

    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.last()
    }
}

/// The four series reported by the heat pump itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatPumpSeries {
    RoomSetpoint,
    TankSetpoint,
    FlowTemperature,
    ReturnTemperature,
}

impl HeatPumpSeries {
    pub fn label(self) -> &'static str {
        match self {
            HeatPumpSeries::RoomSetpoint => "Room Setpoint",
            HeatPumpSeries::TankSetpoint => "Tank Setpoint",
            HeatPumpSeries::FlowTemperature => "Flow Temperature",
            HeatPumpSeries::ReturnTemperature => "Return Temperature",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            HeatPumpSeries::RoomSetpoint => "#9C5013",
            HeatPumpSeries::TankSetpoint => "darkblue",
            HeatPumpSeries::FlowTemperature => "#204809",
            HeatPumpSeries::ReturnTemperature => "#B7B863",
        }
    }

    /// Setpoints start hidden; measured temperatures start visible.
    pub fn hidden(self) -> bool {
        matches!(
            self,
            HeatPumpSeries::RoomSetpoint | HeatPumpSeries::TankSetpoint
        )
    }
}
