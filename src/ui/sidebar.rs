use yew::prelude::*;

use crate::readings::SessionSummary;
use crate::session::Phase;

/// Control panel: reset, step indicator and quick stats.
pub fn view(phase: Phase, summary: &SessionSummary, on_reset: Callback<MouseEvent>) -> Html {
    let step_color = match phase {
        Phase::Setup => "#dbeafe",
        Phase::Monitor => "#dcfce7",
    };

    html! {
        <aside style="width: 16rem; padding: 1rem; background: #f3f4f6; min-height: 100vh;">
            <h2>{ "Control Panel" }</h2>
            <button onclick={on_reset}>{ "Reset All" }</button>

            <h3>{ "Current Step" }</h3>
            <p style={format!("background: {}; padding: 0.5rem; border-radius: 6px;", step_color)}>
                { phase.title() }
            </p>

            if summary.total_cells > 0 {
                <>
                    <h3>{ "Quick Stats" }</h3>
                    <p>{ format!("Total Cells: {}", summary.total_cells) }</p>
                    <p>{ format!("Avg Temperature: {}", summary.avg_temperature_label()) }</p>
                    <p>{ format!("Total Capacity: {}", summary.total_capacity_label()) }</p>
                </>
            }
        </aside>
    }
}
