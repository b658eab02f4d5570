use yew::prelude::*;

use crate::cell::CellKind;
use crate::config::DashboardConfig;
use crate::readings::{read_cells, setup_progress, summarize};
use crate::session::{Phase, Session};
use crate::temperature::SeededTemperature;
use crate::ui;

/// The dashboard component. Each mounted instance owns its own session.
pub struct Dashboard {
    session: Session<SeededTemperature>,
    selected_kind: Option<CellKind>,
}

/// User actions on the dashboard.
pub enum Msg {
    SelectKind(Option<CellKind>),
    AddCell,
    SetCurrent(String, f64),
    Continue,
    Back,
    Reset,
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = DashboardConfig::default();
        let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
        log::debug!("Temperature seed {}", seed);
        let temperature = SeededTemperature::new(seed, config.temperature_range_c);
        Self {
            session: Session::new(config, temperature),
            selected_kind: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectKind(kind) => {
                let changed = self.selected_kind != kind;
                self.selected_kind = kind;
                changed
            }
            Msg::AddCell => {
                let added = self.session.add_cell(self.selected_kind);
                if added {
                    // the selector starts over for the next cell
                    self.selected_kind = None;
                }
                added
            }
            Msg::SetCurrent(id, current) => self.session.set_current(&id, current),
            Msg::Continue => self.session.continue_to_monitor(),
            Msg::Back => self.session.back_to_setup(),
            Msg::Reset => {
                self.selected_kind = None;
                self.session.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let summary = summarize(self.session.cells());
        let phase = self.session.phase();

        let page = match phase {
            Phase::Setup => {
                let (progress, caption) = setup_progress(&self.session);
                ui::setup::view(ui::setup::SetupView {
                    cells: self.session.cells(),
                    selected_kind: self.selected_kind,
                    can_add: self.session.can_add(self.selected_kind),
                    progress,
                    caption,
                    on_select: link.callback(Msg::SelectKind),
                    on_add: link.callback(|_| Msg::AddCell),
                    on_continue: link.callback(|_| Msg::Continue),
                })
            }
            Phase::Monitor => ui::monitor::view(ui::monitor::MonitorView {
                readings: read_cells(&self.session),
                cells: self.session.cells(),
                config: self.session.config(),
                on_current: link.callback(|(id, value): (String, f64)| Msg::SetCurrent(id, value)),
                on_back: link.callback(|_| Msg::Back),
            }),
        };

        html! {
            <div style="display: flex; font-family: sans-serif;">
                { ui::sidebar::view(phase, &summary, link.callback(|_| Msg::Reset)) }
                <main style="flex: 1; padding: 1rem 2rem;">
                    <h1 style="text-align: center; color: #667eea;">{ "Battery Cell Monitor Dashboard" }</h1>
                    { page }
                </main>
            </div>
        }
    }
}
