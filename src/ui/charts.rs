use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::readings::CellReading;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    /// Scatter of nominal voltage against current, marker size by capacity.
    VoltageVsCurrent,
    /// Temperature bar per cell.
    Temperature,
    /// Capacity bar per cell.
    Capacity,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::VoltageVsCurrent => "Voltage vs Current Analysis",
            ChartKind::Temperature => "Temperature Distribution",
            ChartKind::Capacity => "Cell Capacity Overview",
        }
    }

    fn bar_value(self, reading: &CellReading) -> f64 {
        match self {
            ChartKind::Temperature => reading.temperature,
            _ => reading.capacity,
        }
    }
}

/// Value range of an axis, padded so points never sit on the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Self {
        let (mut min, mut max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() || !max.is_finite() {
            return Axis { min: 0.0, max: 1.0 };
        }
        let padding = if max > min { (max - min) * 0.1 } else { 1.0 };
        min -= padding;
        max += padding;
        Axis { min, max }
    }

    /// Axis for bars: always starts at zero.
    pub fn from_zero(values: impl IntoIterator<Item = f64>) -> Self {
        let max = values.into_iter().fold(0.0_f64, f64::max);
        Axis {
            min: 0.0,
            max: if max > 0.0 { max * 1.1 } else { 1.0 },
        }
    }

    /// Map `value` into `[0, 1]` along this axis.
    pub fn fraction(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Marker radius in pixels; the largest capacity gets the largest marker.
pub fn marker_radius(capacity: f64, max_capacity: f64) -> f64 {
    if max_capacity > 0.0 && capacity > 0.0 {
        4.0 + 12.0 * (capacity / max_capacity).sqrt()
    } else {
        4.0
    }
}

/// Legend entries `(label, color)` for the kinds present, in first-seen order.
pub fn legend_entries(readings: &[CellReading]) -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<(&'static str, &'static str)> = Vec::new();
    for reading in readings {
        if !entries.iter().any(|(label, _)| *label == reading.kind) {
            entries.push((reading.kind, reading.color));
        }
    }
    entries
}

#[derive(Properties, PartialEq)]
pub struct CellChartProps {
    pub kind: ChartKind,
    pub readings: Vec<CellReading>,
}

/// One of the monitoring charts, drawn on a canvas whenever its readings change.
#[function_component(CellChart)]
pub fn cell_chart(props: &CellChartProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let kind = props.kind;
        use_effect_with_deps(
            move |readings: &Vec<CellReading>| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    draw(&canvas, kind, readings);
                }
                || ()
            },
            props.readings.clone(),
        );
    }

    html! {
        <canvas ref={canvas_ref} width={WIDTH.to_string()} height={HEIGHT.to_string()}
            style="width: 100%; border-radius: 8px;" />
    }
}

fn draw(canvas: &HtmlCanvasElement, kind: ChartKind, readings: &[CellReading]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => {
            log::warn!("No 2d context for {:?} chart", kind);
            return;
        }
    };

    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, WIDTH, HEIGHT);
    ctx.set_fill_style(&"#111827".into());
    ctx.set_font("16px sans-serif");
    let _ = ctx.fill_text(kind.title(), MARGIN_LEFT, 22.0);

    if readings.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        let _ = ctx.fill_text("No cells", WIDTH / 2.0 - 30.0, HEIGHT / 2.0);
        return;
    }

    match kind {
        ChartKind::VoltageVsCurrent => draw_scatter(&ctx, readings),
        ChartKind::Temperature | ChartKind::Capacity => draw_bars(&ctx, kind, readings),
    }
    draw_legend(&ctx, readings);
}

fn draw_legend(ctx: &CanvasRenderingContext2d, readings: &[CellReading]) {
    ctx.set_font("12px sans-serif");
    let mut x = WIDTH - MARGIN_RIGHT - 110.0;
    for (label, color) in legend_entries(readings) {
        ctx.set_fill_style(&color.into());
        ctx.begin_path();
        let _ = ctx.arc(x, 17.0, 5.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
        ctx.set_fill_style(&"#374151".into());
        let _ = ctx.fill_text(label, x + 9.0, 21.0);
        x += 55.0;
    }
}

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

fn draw_y_grid(ctx: &CanvasRenderingContext2d, axis: Axis) {
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = MARGIN_TOP + (i as f64 / 4.0) * plot_height();
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(WIDTH - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = axis.max - (i as f64 / 4.0) * (axis.max - axis.min);
        ctx.set_fill_style(&"#6b7280".into());
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }
}

fn draw_scatter(ctx: &CanvasRenderingContext2d, readings: &[CellReading]) {
    let x_axis = Axis::fit(readings.iter().map(|r| r.voltage));
    let y_axis = Axis::fit(readings.iter().map(|r| r.current));
    let max_capacity = readings.iter().map(|r| r.capacity).fold(0.0, f64::max);

    draw_y_grid(ctx, y_axis);

    ctx.set_font("11px sans-serif");
    for reading in readings {
        let x = MARGIN_LEFT + x_axis.fraction(reading.voltage) * plot_width();
        let y = MARGIN_TOP + (1.0 - y_axis.fraction(reading.current)) * plot_height();
        let radius = marker_radius(reading.capacity, max_capacity);
        ctx.set_fill_style(&reading.color.into());
        ctx.begin_path();
        let _ = ctx.arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();

        // no hover on a plain canvas, so the temperature is printed beside the marker
        ctx.set_fill_style(&"#374151".into());
        let _ = ctx.fill_text(&format!("{:.1}°C", reading.temperature), x + radius + 3.0, y + 4.0);
    }

    ctx.set_fill_style(&"#6b7280".into());
    let _ = ctx.fill_text(
        &format!("Voltage (V): {:.1} to {:.1}", x_axis.min, x_axis.max),
        MARGIN_LEFT,
        HEIGHT - 15.0,
    );
}

fn draw_bars(ctx: &CanvasRenderingContext2d, kind: ChartKind, readings: &[CellReading]) {
    let axis = Axis::from_zero(readings.iter().map(|r| kind.bar_value(r)));
    draw_y_grid(ctx, axis);

    let slot = plot_width() / readings.len() as f64;
    let bar_width = slot * 0.7;
    for (i, reading) in readings.iter().enumerate() {
        let value = kind.bar_value(reading);
        let bar_height = axis.fraction(value) * plot_height();
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = MARGIN_TOP + plot_height() - bar_height;

        ctx.set_fill_style(&reading.color.into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style(&"#374151".into());
        ctx.set_font("11px sans-serif");
        let _ = ctx.fill_text(&reading.label, x, HEIGHT - 30.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellKind};
    use crate::readings::read_cell;

    #[test]
    fn test_axis_fit_pads_range() {
        let axis = Axis::fit([3.2, 3.6]);
        assert!(axis.min < 3.2 && axis.max > 3.6);
        assert_eq!(axis.fraction(axis.min), 0.0);
        assert_eq!(axis.fraction(axis.max), 1.0);
    }

    #[test]
    fn test_axis_fit_single_value() {
        let axis = Axis::fit([0.0, 0.0]);
        assert_eq!(axis, Axis { min: -1.0, max: 1.0 });
        assert_eq!(axis.fraction(0.0), 0.5);
    }

    #[test]
    fn test_bar_axis_starts_at_zero() {
        let axis = Axis::from_zero([16.0, 7.2]);
        assert_eq!(axis.min, 0.0);
        assert!(axis.fraction(16.0) < 1.0);
        assert_eq!(Axis::from_zero([0.0]).max, 1.0, "All-zero bars still need a scale");
    }

    #[test]
    fn test_marker_radius_grows_with_capacity() {
        assert_eq!(marker_radius(0.0, 10.0), 4.0);
        assert!(marker_radius(2.5, 10.0) < marker_radius(10.0, 10.0));
        assert_eq!(marker_radius(10.0, 10.0), 16.0);
    }

    fn reading(kind: CellKind) -> CellReading {
        read_cell(&Cell::new(1, kind, 30.0), 10.0)
    }

    #[test]
    fn test_legend_lists_each_kind_once() {
        let readings = vec![
            reading(CellKind::Nmc),
            reading(CellKind::Lfp),
            reading(CellKind::Nmc),
        ];
        assert_eq!(
            legend_entries(&readings),
            vec![("NMC", "#764ba2"), ("LFP", "#38ef7d")]
        );
        assert!(legend_entries(&[]).is_empty());
    }
}
