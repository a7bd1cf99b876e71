//! Component plots.
//!
//! The renderer produces a [`Figure`] description rather than an image:
//! one panel per component stacked vertically, seasonalities folded onto
//! their cycle, and trend changepoints marked in the trend panel.

mod config;
mod figure;
mod renderer;

pub use config::RenderConfig;
pub use figure::{Axis, AxisValues, Dash, Figure, LineStyle, Panel, Trace};
pub use renderer::{select_panels, ComponentRenderer, PanelSelection};
