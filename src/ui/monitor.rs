use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::charts::{ChartKind, CellChart};
use crate::cell::Cell;
use crate::config::DashboardConfig;
use crate::readings::CellReading;

pub struct MonitorView<'a> {
    pub readings: Vec<CellReading>,
    pub cells: &'a [Cell],
    pub config: &'a DashboardConfig,
    pub on_current: Callback<(String, f64)>,
    pub on_back: Callback<MouseEvent>,
}

/// Step 2: current inputs, per-cell metrics, charts and the detail table.
pub fn view(monitor: MonitorView<'_>) -> Html {
    let readings = monitor.readings;

    html! {
        <section>
            <h2>{ "Step 2: Battery Monitoring Dashboard" }</h2>
            <button onclick={monitor.on_back}>{ "Back to Cell Setup" }</button>

            <h3>{ "Set Current Values" }</h3>
            <div style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem;">
                { for monitor.cells.iter().zip(&readings).map(|(cell, reading)| {
                    current_input(cell, reading, monitor.config, &monitor.on_current)
                }) }
            </div>

            <h3>{ "Real-Time Cell Monitoring" }</h3>
            { for readings.iter().map(metric_row) }

            <h3>{ "Data Visualizations" }</h3>
            <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 1rem;">
                <CellChart kind={ChartKind::VoltageVsCurrent} readings={readings.clone()} />
                <CellChart kind={ChartKind::Temperature} readings={readings.clone()} />
            </div>
            <CellChart kind={ChartKind::Capacity} readings={readings.clone()} />

            <h3>{ "Detailed Cell Data" }</h3>
            { detail_table(&readings) }
        </section>
    }
}

fn current_input(
    cell: &Cell,
    reading: &CellReading,
    config: &DashboardConfig,
    on_current: &Callback<(String, f64)>,
) -> Html {
    let id = cell.id.clone();
    let stored = cell.current_a();
    let limits = config.clone();
    let on_change = on_current.reform(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let accepted = accepted_current(&limits, stored, input.value_as_number());
        // the session may not change (and so not re-render); keep the field in step with it
        input.set_value_as_number(accepted);
        (id.clone(), accepted)
    });
    let (min, max) = config.current_range_a;

    html! {
        <div>
            <h4 style={format!("color: {};", reading.color)}>{ reading.label.clone() }</h4>
            <label>
                { "Current (A): " }
                <input
                    type="number"
                    min={min.to_string()}
                    max={max.to_string()}
                    step={config.current_step_a.to_string()}
                    value={cell.current_a().to_string()}
                    onchange={on_change}
                />
            </label>
        </div>
    }
}

/// What a current input should hold after the user typed `raw`: the clamped value,
/// or the `stored` one when the field was cleared.
fn accepted_current(config: &DashboardConfig, stored: f64, raw: f64) -> f64 {
    config.clamp_current(raw).unwrap_or(stored)
}

fn metric_row(reading: &CellReading) -> Html {
    html! {
        <div style="margin-bottom: 1rem; border-bottom: 1px solid #e5e7eb;">
            <div style="display: grid; grid-template-columns: repeat(4, 1fr);">
                { metric(&reading.label, format!("{}V", reading.voltage)) }
                { metric("Current", format!("{}A", reading.current)) }
                { metric("Temperature", format!("{}°C", reading.temperature)) }
                { metric("Capacity", format!("{} Ah", reading.capacity)) }
            </div>
            { super::progress_bar(reading.level_percent / 100.0, reading.color) }
        </div>
    }
}

fn metric(label: &str, value: String) -> Html {
    html! {
        <div>
            <div style="color: #6b7280; font-size: 0.9rem;">{ label.to_string() }</div>
            <div style="font-size: 1.6rem; font-weight: bold;">{ value }</div>
        </div>
    }
}

fn detail_table(readings: &[CellReading]) -> Html {
    html! {
        <table style="width: 100%; border-collapse: collapse;">
            <thead>
                <tr>
                    <th>{ "Cell" }</th>
                    <th>{ "Voltage (V)" }</th>
                    <th>{ "Current (A)" }</th>
                    <th>{ "Temperature (°C)" }</th>
                    <th>{ "Capacity (Ah)" }</th>
                    <th>{ "Type" }</th>
                </tr>
            </thead>
            <tbody>
                { for readings.iter().map(|r| html! {
                    <tr>
                        <td>{ r.label.clone() }</td>
                        <td>{ r.voltage.to_string() }</td>
                        <td>{ r.current.to_string() }</td>
                        <td>{ r.temperature.to_string() }</td>
                        <td>{ r.capacity.to_string() }</td>
                        <td>{ r.kind }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
