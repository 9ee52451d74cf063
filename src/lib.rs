//! Beverage nutrition explorer: dataset loading, column classification and
//! chart selection, plus the egui dashboard that hosts them.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
