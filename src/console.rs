use std::fmt::Write;

use crate::cell::CellKind;
use crate::readings::{read_cells, setup_progress, summarize, to_csv};
use crate::session::{Phase, Session};
use crate::temperature::TemperatureSource;

pub const HELP: &str = "\
Commands:
  add <lfp|nmc>        add a cell (setup step)
  continue             go to monitoring (needs at least one cell)
  current <n> <amps>   set the current of cell #n (monitoring step)
  back                 return to setup
  reset                clear all cells
  show                 print the current step
  table                print the detailed cell data
  csv                  print the detailed cell data as CSV
  help                 print this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(CellKind),
    SetCurrent { position: usize, current_a: f64 },
    Continue,
    Back,
    Reset,
    Show,
    Table,
    Csv,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("").to_ascii_lowercase();
    let command = match verb.as_str() {
        "add" => {
            let kind = words.next().ok_or("usage: add <lfp|nmc>")?;
            Command::Add(kind.parse()?)
        }
        "current" => {
            let position = words
                .next()
                .and_then(|w| w.parse::<usize>().ok())
                .ok_or("usage: current <n> <amps>")?;
            let current_a = words
                .next()
                .and_then(|w| w.parse::<f64>().ok())
                .ok_or("usage: current <n> <amps>")?;
            Command::SetCurrent {
                position,
                current_a,
            }
        }
        "continue" => Command::Continue,
        "back" => Command::Back,
        "reset" => Command::Reset,
        "show" | "" => Command::Show,
        "table" => Command::Table,
        "csv" => Command::Csv,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(command)
}

/// Apply `command` to the session and render what the user should see next.
pub fn execute<T: TemperatureSource>(session: &mut Session<T>, command: &Command) -> String {
    match command {
        Command::Add(kind) => {
            if session.phase() != Phase::Setup {
                return "Cells can only be added during setup; use 'back' first.".to_string();
            }
            if session.add_cell(Some(*kind)) {
                render(session)
            } else {
                format!(
                    "Cannot add more cells: limit of {} reached.",
                    session.config().max_cells
                )
            }
        }
        Command::SetCurrent {
            position,
            current_a,
        } => {
            if session.phase() != Phase::Monitor {
                return "Currents are set on the monitoring step; use 'continue' first."
                    .to_string();
            }
            let Some(id) = position
                .checked_sub(1)
                .and_then(|i| session.cells().get(i))
                .map(|cell| cell.id.clone())
            else {
                return format!("No cell #{}.", position);
            };
            session.set_current(&id, *current_a);
            render(session)
        }
        Command::Continue => {
            if session.continue_to_monitor() || session.phase() == Phase::Monitor {
                render(session)
            } else {
                "Add at least one cell before continuing.".to_string()
            }
        }
        Command::Back => {
            session.back_to_setup();
            render(session)
        }
        Command::Reset => {
            session.reset();
            render(session)
        }
        Command::Show => render(session),
        Command::Table => table(session),
        Command::Csv => match to_csv(&read_cells(session)) {
            Ok(csv) => csv,
            Err(e) => {
                log::error!("CSV export failed: {}", e);
                format!("CSV export failed: {}", e)
            }
        },
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    }
}

/// Step header, quick stats and the step-specific body.
pub fn render<T: TemperatureSource>(session: &Session<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", session.phase().title());

    let summary = summarize(session.cells());
    if summary.total_cells > 0 {
        let _ = writeln!(
            out,
            "Total Cells: {} | Avg Temperature: {} | Total Capacity: {}",
            summary.total_cells,
            summary.avg_temperature_label(),
            summary.total_capacity_label()
        );
    }

    match session.phase() {
        Phase::Setup => {
            for (idx, cell) in session.cells().iter().enumerate() {
                let _ = writeln!(out, "  Cell #{}: {} (ready)", idx + 1, cell.kind);
            }
            let (_, caption) = setup_progress(session);
            let _ = write!(out, "Progress: {}", caption);
        }
        Phase::Monitor => {
            for reading in read_cells(session) {
                let _ = writeln!(
                    out,
                    "  {:<12} {:>4.1} V {:>6.1} A {:>5.1} °C {:>7.2} Ah  [{:<10}]",
                    reading.label,
                    reading.voltage,
                    reading.current,
                    reading.temperature,
                    reading.capacity,
                    "#".repeat((reading.level_percent / 10.0).round() as usize)
                );
            }
            out.pop();
        }
    }
    out
}

fn table<T: TemperatureSource>(session: &Session<T>) -> String {
    let mut out = format!(
        "{:<12} {:>11} {:>11} {:>16} {:>13} {:>5}",
        "Cell", "Voltage (V)", "Current (A)", "Temperature (°C)", "Capacity (Ah)", "Type"
    );
    for r in read_cells(session) {
        let _ = write!(
            out,
            "\n{:<12} {:>11} {:>11} {:>16} {:>13} {:>5}",
            r.label, r.voltage, r.current, r.temperature, r.capacity, r.kind
        );
    }
    out
}
