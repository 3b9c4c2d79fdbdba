//! Fuel-stop route planner server.
//!
//! A web application that answers: "I'm driving from here to there, where
//! should I stop to refuel along the way?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod geomath;
pub mod history;
pub mod planner;
pub mod routing;
pub mod web;
