//! Workout tracking: a weekly program of exercise targets, per-session set
//! counters, and an append-only CSV log with Epley one-rep-max estimates.

pub mod config;
pub mod error;
pub mod estimate;
pub mod history;
pub mod log_store;
pub mod models;
pub mod progress;
pub mod rest_timer;
pub mod routines;
pub mod session;
