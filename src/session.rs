use crate::cell::{Cell, CellKind};
use crate::config::DashboardConfig;
use crate::temperature::TemperatureSource;

/// Workflow stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Monitor,
}

impl Phase {
    pub fn title(self) -> &'static str {
        match self {
            Phase::Setup => "Step 1: Add Battery Cells",
            Phase::Monitor => "Step 2: Monitor & Control",
        }
    }
}

/// State of one interactive session: the cells entered so far and the current phase.
///
/// Every action returns `true` when it changed the session and `false` when its
/// precondition did not hold, in which case nothing was modified.
pub struct Session<T: TemperatureSource> {
    config: DashboardConfig,
    temperature: T,
    cells: Vec<Cell>,
    phase: Phase,
}

impl<T: TemperatureSource> Session<T> {
    pub fn new(config: DashboardConfig, temperature: T) -> Self {
        Self {
            config,
            temperature,
            cells: Vec::new(),
            phase: Phase::Setup,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: &str) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.id == id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() >= self.config.max_cells
    }

    /// Whether "Add" is enabled for the current selection.
    pub fn can_add(&self, kind: Option<CellKind>) -> bool {
        kind.is_some() && !self.is_full()
    }

    pub fn can_continue(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Append a cell of the selected kind. `None` means nothing is selected yet.
    pub fn add_cell(&mut self, kind: Option<CellKind>) -> bool {
        let kind = match kind {
            Some(kind) if !self.is_full() => kind,
            Some(kind) => {
                log::warn!(
                    "Ignoring {} cell: session already holds {} cells",
                    kind,
                    self.cells.len()
                );
                return false;
            }
            None => {
                log::debug!("Ignoring add: no cell kind selected");
                return false;
            }
        };
        let temperature_c = self.temperature.sample();
        let cell = Cell::new(self.cells.len() + 1, kind, temperature_c);
        log::debug!("Added {} at {:.1} °C", cell.id, temperature_c);
        self.cells.push(cell);
        true
    }

    /// Set the current of cell `id`, clamped to the configured range.
    pub fn set_current(&mut self, id: &str, current_a: f64) -> bool {
        let Some(clamped) = self.config.clamp_current(current_a) else {
            log::warn!("Ignoring NaN current for {}", id);
            return false;
        };
        let Some(cell) = self.cells.iter_mut().find(|cell| cell.id == id) else {
            log::debug!("Ignoring current for unknown cell {}", id);
            return false;
        };
        let changed = cell.set_current(clamped);
        if changed {
            log::debug!(
                "{}: current {:.2} A, capacity {:.2} Ah",
                cell.id,
                cell.current_a(),
                cell.capacity_ah()
            );
        }
        changed
    }

    pub fn continue_to_monitor(&mut self) -> bool {
        if self.phase == Phase::Monitor || !self.can_continue() {
            return false;
        }
        self.phase = Phase::Monitor;
        log::info!("Monitoring {} cells", self.cells.len());
        true
    }

    pub fn back_to_setup(&mut self) -> bool {
        if self.phase == Phase::Setup {
            return false;
        }
        self.phase = Phase::Setup;
        true
    }

    /// Clear every cell and return to setup.
    pub fn reset(&mut self) -> bool {
        let changed = !self.cells.is_empty() || self.phase != Phase::Setup;
        self.cells.clear();
        self.phase = Phase::Setup;
        log::info!("Session reset");
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temperature::scripted;

    fn session(temps: Vec<f64>) -> Session<impl TemperatureSource> {
        Session::new(DashboardConfig::default(), scripted(temps))
    }

    #[test]
    fn test_ninth_add_is_noop() {
        let mut s = session(vec![30.0]);
        for i in 0..8 {
            assert!(s.add_cell(Some(CellKind::ALL[i % 2])));
        }
        let before = s.cells().to_vec();
        assert!(!s.add_cell(Some(CellKind::Lfp)), "Ninth add should be rejected");
        assert_eq!(s.cells(), &before[..]);
        assert!(!s.can_add(Some(CellKind::Nmc)));
    }

    #[test]
    fn test_add_without_kind_is_noop() {
        let mut s = session(vec![30.0]);
        assert!(!s.can_add(None));
        assert!(!s.add_cell(None));
        assert!(s.cells().is_empty());
    }

    #[test]
    fn test_cells_keep_creation_order_and_ids() {
        let mut s = session(vec![25.0, 40.0, 31.5]);
        s.add_cell(Some(CellKind::Lfp));
        s.add_cell(Some(CellKind::Nmc));
        s.add_cell(Some(CellKind::Lfp));
        let ids: Vec<&str> = s.cells().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["cell_1_lfp", "cell_2_nmc", "cell_3_lfp"]);
        let temps: Vec<f64> = s.cells().iter().map(|c| c.temperature_c).collect();
        assert_eq!(temps, [25.0, 40.0, 31.5]);
    }

    #[test]
    fn test_set_current_updates_capacity() {
        let mut s = session(vec![30.0]);
        s.add_cell(Some(CellKind::Lfp));
        assert!(s.set_current("cell_1_lfp", 5.0));
        assert_eq!(s.cell("cell_1_lfp").unwrap().capacity_ah(), 16.0);
    }

    #[test]
    fn test_set_current_is_idempotent() {
        let mut s = session(vec![30.0]);
        s.add_cell(Some(CellKind::Nmc));
        assert!(s.set_current("cell_1_nmc", 2.5));
        let once = s.cells().to_vec();
        assert!(!s.set_current("cell_1_nmc", 2.5));
        assert_eq!(s.cells(), &once[..]);
    }

    #[test]
    fn test_set_current_clamps_and_rejects() {
        let mut s = session(vec![30.0]);
        s.add_cell(Some(CellKind::Lfp));
        assert!(s.set_current("cell_1_lfp", 250.0));
        assert_eq!(s.cell("cell_1_lfp").unwrap().current_a(), 100.0);
        assert!(s.set_current("cell_1_lfp", -3.0));
        assert_eq!(s.cell("cell_1_lfp").unwrap().current_a(), 0.0);
        assert!(!s.set_current("cell_1_lfp", f64::NAN));
        assert!(!s.set_current("cell_9_nmc", 1.0), "Unknown cell should be a no-op");
        assert_eq!(s.cell("cell_1_lfp").unwrap().capacity_ah(), 0.0);
    }

    #[test]
    fn test_out_of_range_current_at_bound_is_noop() {
        let mut s = session(vec![30.0]);
        s.add_cell(Some(CellKind::Lfp));
        assert!(!s.set_current("cell_1_lfp", -5.0), "Clamps to the stored 0 A");
        assert_eq!(s.cell("cell_1_lfp").unwrap().current_a(), 0.0);
        assert!(s.set_current("cell_1_lfp", 100.0));
        assert!(!s.set_current("cell_1_lfp", 250.0), "Clamps to the stored 100 A");
        let cell = s.cell("cell_1_lfp").unwrap();
        assert_eq!(cell.current_a(), 100.0);
        assert_eq!(cell.capacity_ah(), 320.0);
    }

    #[test]
    fn test_continue_requires_cells() {
        let mut s = session(vec![30.0]);
        assert!(!s.continue_to_monitor());
        assert_eq!(s.phase(), Phase::Setup);
        s.add_cell(Some(CellKind::Lfp));
        assert!(s.continue_to_monitor(), "One cell is enough to continue");
        assert_eq!(s.phase(), Phase::Monitor);
    }

    #[test]
    fn test_phase_round_trip_preserves_cells() {
        let mut s = session(vec![26.0, 38.0]);
        s.add_cell(Some(CellKind::Lfp));
        s.add_cell(Some(CellKind::Nmc));
        s.continue_to_monitor();
        s.set_current("cell_2_nmc", 4.0);
        let snapshot = s.cells().to_vec();
        assert!(s.back_to_setup());
        assert!(s.continue_to_monitor());
        assert_eq!(s.cells(), &snapshot[..]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = session(vec![30.0]);
        s.add_cell(Some(CellKind::Lfp));
        s.add_cell(Some(CellKind::Nmc));
        s.continue_to_monitor();
        s.set_current("cell_1_lfp", 9.0);
        assert!(s.reset());
        assert!(s.cells().is_empty());
        assert_eq!(s.phase(), Phase::Setup);
        assert!(!s.reset(), "Resetting an empty session changes nothing");
    }

    #[test]
    fn test_ids_restart_after_reset() {
        let mut s = session(vec![30.0]);
        s.add_cell(Some(CellKind::Nmc));
        s.reset();
        s.add_cell(Some(CellKind::Lfp));
        assert_eq!(s.cells()[0].id, "cell_1_lfp");
    }
}
