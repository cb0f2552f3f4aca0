//! Animated laptop-statistics dashboard.
//!
//! The dataset store lives in [`state::AppState`]; [`data::jitter`] perturbs
//! it on refresh, [`charts::dispatch`] pushes snapshots to the animated chart
//! board, and [`background`] drives the bubble field behind the panels.

pub mod app;
pub mod background;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod schedule;
pub mod state;
pub mod ui;
