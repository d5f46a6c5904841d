//! Departure board server.
//!
//! Reconciles scheduled stop times with live predictions to answer:
//! "when do the next trains leave my stop for my destination?"

pub mod board;
pub mod cache;
pub mod domain;
pub mod mbta;
pub mod tracker;
pub mod web;
