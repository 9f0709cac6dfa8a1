//! Compensation Projection Engine
//!
//! This crate projects an employee's total compensation over several years
//! from recurring pay, a percentage bonus, RSU grants, ESPP purchase windows
//! and scheduled raises, normalizing every figure into one output currency.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
