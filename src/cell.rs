use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Cell chemistry preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellKind {
    /// Lithium iron phosphate.
    Lfp,
    /// Nickel manganese cobalt.
    Nmc,
}

impl CellKind {
    pub const ALL: [CellKind; 2] = [CellKind::Lfp, CellKind::Nmc];

    pub fn nominal_voltage(self) -> f64 {
        match self {
            CellKind::Lfp => 3.2,
            CellKind::Nmc => 3.6,
        }
    }

    /// Operating window `(min, max)` in volts.
    pub fn voltage_window(self) -> (f64, f64) {
        match self {
            CellKind::Lfp => (2.8, 3.6),
            CellKind::Nmc => (3.2, 4.0),
        }
    }

    /// Lowercase tag used inside cell identifiers.
    pub fn tag(self) -> &'static str {
        match self {
            CellKind::Lfp => "lfp",
            CellKind::Nmc => "nmc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CellKind::Lfp => "LFP",
            CellKind::Nmc => "NMC",
        }
    }

    /// Series color shared by cards and charts.
    pub fn color(self) -> &'static str {
        match self {
            CellKind::Lfp => "#38ef7d",
            CellKind::Nmc => "#764ba2",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CellKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lfp" => Ok(CellKind::Lfp),
            "nmc" => Ok(CellKind::Nmc),
            other => Err(format!("unknown cell kind '{}', expected LFP or NMC", other)),
        }
    }
}

/// Round to two decimals, the precision capacity is displayed and stored with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One simulated battery cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: String,
    pub kind: CellKind,
    pub nominal_voltage: f64,
    pub min_voltage: f64,
    pub max_voltage: f64,
    pub temperature_c: f64,
    current_a: f64,
    capacity_ah: f64,
}

impl Cell {
    /// Create the cell at 1-based `position` with its creation temperature.
    pub fn new(position: usize, kind: CellKind, temperature_c: f64) -> Self {
        let (min_voltage, max_voltage) = kind.voltage_window();
        Cell {
            id: format!("cell_{}_{}", position, kind.tag()),
            kind,
            nominal_voltage: kind.nominal_voltage(),
            min_voltage,
            max_voltage,
            temperature_c,
            current_a: 0.0,
            capacity_ah: 0.0,
        }
    }

    pub fn current_a(&self) -> f64 {
        self.current_a
    }

    pub fn capacity_ah(&self) -> f64 {
        self.capacity_ah
    }

    /// Set the current and recompute capacity.
    ///
    /// Returns `false` without touching the cell when the value is unchanged.
    /// Callers are expected to have clamped `current_a` to the allowed range.
    pub fn set_current(&mut self, current_a: f64) -> bool {
        if current_a == self.current_a {
            return false;
        }
        self.current_a = current_a;
        self.capacity_ah = round2(self.nominal_voltage * current_a);
        true
    }

    /// Title-cased identifier, e.g. `cell_3_nmc` becomes `Cell 3 Nmc`.
    pub fn label(&self) -> String {
        self.id
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fill level for the battery bar, in percent of `full_capacity_ah`.
    pub fn battery_level_percent(&self, full_capacity_ah: f64) -> f64 {
        if self.capacity_ah > 0.0 {
            (self.capacity_ah / full_capacity_ah * 100.0).min(100.0)
        } else {
            0.0
        }
    }
}
