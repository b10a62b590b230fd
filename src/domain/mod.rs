//! Core domain types and pipeline logic.

pub mod panel;
pub mod rolling;
pub mod ranking;
pub mod schedule;
pub mod strategy;
pub mod screens;
pub mod weights;
pub mod positions;
pub mod returns;
pub mod pipeline;
pub mod orders;
pub mod config_validation;
pub mod error;
