//! Views for the dashboard. Each page is a plain function from session data to `Html`;
//! only the charts need their own component, to reach a canvas element.

pub mod charts;
pub mod monitor;
pub mod setup;
pub mod sidebar;

use yew::prelude::*;

/// Horizontal progress bar, `fraction` in `[0, 1]`.
pub fn progress_bar(fraction: f64, color: &str) -> Html {
    let percent = (fraction.clamp(0.0, 1.0) * 100.0).round();
    html! {
        <div style="background: #e5e7eb; border-radius: 4px; height: 8px; margin: 0.5rem 0;">
            <div style={format!("background: {}; width: {}%; height: 100%; border-radius: 4px;", color, percent)} />
        </div>
    }
}
