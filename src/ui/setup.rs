use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::cell::{Cell, CellKind};

pub struct SetupView<'a> {
    pub cells: &'a [Cell],
    pub selected_kind: Option<CellKind>,
    pub can_add: bool,
    pub progress: f64,
    pub caption: String,
    pub on_select: Callback<Option<CellKind>>,
    pub on_add: Callback<MouseEvent>,
    pub on_continue: Callback<MouseEvent>,
}

/// Step 1: pick cell kinds one at a time, preview what was added.
pub fn view(setup: SetupView<'_>) -> Html {
    let on_change = setup.on_select.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value().parse::<CellKind>().ok()
    });

    html! {
        <section>
            <h2>{ "Step 1: Add Your Battery Cells" }</h2>
            <p>{ "Select LFP (Lithium Iron Phosphate) or NMC (Nickel Manganese Cobalt)" }</p>

            <label>
                { format!("Cell #{} Type: ", setup.cells.len() + 1) }
                <select onchange={on_change}>
                    <option value="" selected={setup.selected_kind.is_none()}>{ "Select cell type..." }</option>
                    { for CellKind::ALL.iter().map(|kind| html! {
                        <option value={kind.label()} selected={setup.selected_kind == Some(*kind)}>
                            { kind.label() }
                        </option>
                    }) }
                </select>
            </label>
            <button onclick={setup.on_add} disabled={!setup.can_add}>{ "Add Cell" }</button>

            if !setup.cells.is_empty() {
                <>
                    <h3>{ "Added Cells Preview" }</h3>
                    <div style="display: grid; grid-template-columns: repeat(4, 1fr); gap: 0.5rem;">
                        { for setup.cells.iter().enumerate().map(|(idx, cell)| preview_card(idx, cell)) }
                    </div>
                    { super::progress_bar(setup.progress, "#667eea") }
                    <p><strong>{ "Progress: " }</strong>{ setup.caption }</p>
                    <button onclick={setup.on_continue}>{ "Continue to Monitoring Dashboard" }</button>
                </>
            }
        </section>
    }
}

fn preview_card(idx: usize, cell: &Cell) -> Html {
    html! {
        <div style={format!("background: {}; color: white; padding: 1rem; border-radius: 15px;", cell.kind.color())}>
            <h3>{ format!("Cell #{}", idx + 1) }</h3>
            <p><strong>{ "Type: " }</strong>{ cell.kind.label() }</p>
            <p><strong>{ "Status: " }</strong>{ "Ready" }</p>
        </div>
    }
}
