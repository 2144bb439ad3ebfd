//! Pure simulation logic for the virtual twin.
//!
//! This crate models a synthetic patient's disease progression and drug
//! response day by day, and ranks candidate drugs by a simple score. It is
//! educational only: the numbers are illustrative, not clinical. Functions
//! take plain data plus an explicit RNG and return results, so every run is
//! reproducible under a fixed seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cohort`] | Batch runs over many patients with a best-drug summary |
//! | [`config`] | Scenario configuration (patient, disease, drugs, horizon, seed) |
//! | [`disease`] | Disease parameter table with generic fallback |
//! | [`drug`] | Drug parameters, exponential concentration decay, suggestions |
//! | [`organs`] | Organ health state and daily toxicity/disease damage |
//! | [`patient`] | Virtual patient description |
//! | [`ranking`] | Per-drug isolated runs and composite scoring |
//! | [`report`] | Comma-separated timeline export |
//! | [`simulation`] | The day-by-day engine and its `Timeline` result |
//! | [`validation`] | Range checks for patients and drugs |

pub mod cohort;
pub mod config;
pub mod disease;
pub mod drug;
pub mod organs;
pub mod patient;
pub mod ranking;
pub mod report;
pub mod simulation;
pub mod validation;
