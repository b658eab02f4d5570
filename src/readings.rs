use serde::Serialize;

use crate::cell::Cell;
use crate::session::Session;
use crate::temperature::TemperatureSource;

/// One row of the detail table; also the data every chart is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellReading {
    #[serde(rename = "Cell")]
    pub label: String,
    #[serde(rename = "Voltage (V)")]
    pub voltage: f64,
    #[serde(rename = "Current (A)")]
    pub current: f64,
    #[serde(rename = "Temperature (°C)")]
    pub temperature: f64,
    #[serde(rename = "Capacity (Ah)")]
    pub capacity: f64,
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(skip)]
    pub color: &'static str,
    #[serde(skip)]
    pub level_percent: f64,
}

/// Aggregates shown in the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub total_cells: usize,
    /// `None` when there are no cells.
    pub avg_temperature_c: Option<f64>,
    pub total_capacity_ah: f64,
}

impl SessionSummary {
    pub fn avg_temperature_label(&self) -> String {
        match self.avg_temperature_c {
            Some(t) => format!("{:.1}°C", t),
            None => "—".to_string(),
        }
    }

    pub fn total_capacity_label(&self) -> String {
        format!("{:.2} Ah", self.total_capacity_ah)
    }
}

pub fn read_cell(cell: &Cell, full_capacity_ah: f64) -> CellReading {
    CellReading {
        label: cell.label(),
        voltage: cell.nominal_voltage,
        current: cell.current_a(),
        temperature: cell.temperature_c,
        capacity: cell.capacity_ah(),
        kind: cell.kind.label(),
        color: cell.kind.color(),
        level_percent: cell.battery_level_percent(full_capacity_ah),
    }
}

pub fn read_cells<T: TemperatureSource>(session: &Session<T>) -> Vec<CellReading> {
    let full = session.config().full_level_capacity_ah;
    session.cells().iter().map(|cell| read_cell(cell, full)).collect()
}

pub fn summarize(cells: &[Cell]) -> SessionSummary {
    let avg_temperature_c = if cells.is_empty() {
        None
    } else {
        Some(cells.iter().map(|c| c.temperature_c).sum::<f64>() / cells.len() as f64)
    };
    SessionSummary {
        total_cells: cells.len(),
        avg_temperature_c,
        total_capacity_ah: cells.iter().map(|c| c.capacity_ah()).sum(),
    }
}

/// Setup progress as a fraction of the cell cap, with its caption.
pub fn setup_progress<T: TemperatureSource>(session: &Session<T>) -> (f64, String) {
    let max = session.config().max_cells;
    let added = session.cells().len();
    (
        added as f64 / max as f64,
        format!("{}/{} cells added", added, max),
    )
}

/// Detail table as CSV, one row per cell in creation order.
pub fn to_csv(readings: &[CellReading]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for reading in readings {
        writer.serialize(reading)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;
    use crate::config::DashboardConfig;
    use crate::temperature::scripted;

    #[test]
    fn test_average_temperature() {
        let cells = vec![
            Cell::new(1, CellKind::Lfp, 25.0),
            Cell::new(2, CellKind::Nmc, 40.0),
        ];
        let summary = summarize(&cells);
        assert_eq!(summary.total_cells, 2);
        assert_eq!(summary.avg_temperature_c, Some(32.5));
        assert_eq!(summary.avg_temperature_label(), "32.5°C");
    }

    #[test]
    fn test_empty_summary_has_no_average() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_cells, 0);
        assert_eq!(summary.avg_temperature_c, None);
        assert_eq!(summary.total_capacity_ah, 0.0);
        assert_eq!(summary.avg_temperature_label(), "—");
    }

    #[test]
    fn test_total_capacity_sums_cells() {
        let mut session = Session::new(DashboardConfig::default(), scripted(vec![30.0]));
        session.add_cell(Some(CellKind::Lfp));
        session.add_cell(Some(CellKind::Nmc));
        session.set_current("cell_1_lfp", 5.0);
        session.set_current("cell_2_nmc", 2.0);
        let summary = summarize(session.cells());
        assert!((summary.total_capacity_ah - 23.2).abs() < 1e-9);
        assert_eq!(summary.total_capacity_label(), "23.20 Ah");
    }

    #[test]
    fn test_readings_follow_session() {
        let mut session = Session::new(DashboardConfig::default(), scripted(vec![27.3]));
        session.add_cell(Some(CellKind::Nmc));
        session.set_current("cell_1_nmc", 2.0);
        let readings = read_cells(&session);
        assert_eq!(readings.len(), 1);
        let r = &readings[0];
        assert_eq!(r.label, "Cell 1 Nmc");
        assert_eq!(r.kind, "NMC");
        assert_eq!(r.voltage, 3.6);
        assert_eq!(r.capacity, 7.2);
        assert!((r.level_percent - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_setup_progress() {
        let mut session = Session::new(DashboardConfig::default(), scripted(vec![30.0]));
        session.add_cell(Some(CellKind::Lfp));
        session.add_cell(Some(CellKind::Lfp));
        let (fraction, caption) = setup_progress(&session);
        assert_eq!(fraction, 0.25);
        assert_eq!(caption, "2/8 cells added");
    }

    #[test]
    fn test_csv_export() {
        let mut session = Session::new(DashboardConfig::default(), scripted(vec![25.0, 40.0]));
        session.add_cell(Some(CellKind::Lfp));
        session.add_cell(Some(CellKind::Nmc));
        session.set_current("cell_1_lfp", 5.0);
        let csv = to_csv(&read_cells(&session)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Cell,Voltage (V),Current (A),Temperature (°C),Capacity (Ah),Type"
        );
        assert_eq!(lines[1], "Cell 1 Lfp,3.2,5.0,25.0,16.0,LFP");
        assert_eq!(lines[2], "Cell 2 Nmc,3.6,0.0,40.0,0.0,NMC");
    }
}
