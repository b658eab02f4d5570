//! Battery cell monitor: a two-step dashboard where mock LFP/NMC cells are added,
//! given a current, and inspected through derived capacity, temperature and charts.
//!
//! [`session::Session`] holds the workflow state; the Yew dashboard in [`app`] and the
//! console front end in [`console`] are two presentations of the same actions.

pub mod app;
pub mod cell;
pub mod config;
pub mod console;
pub mod readings;
pub mod session;
pub mod temperature;
mod ui;

use log::Level;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    console_log::init_with_level(Level::Debug).expect("error initializing logger");
    yew::Renderer::<app::Dashboard>::new().render();
}
