//! Per-point labels for the tabular view of a plan.

use serde::Serialize;

use crate::domain::{Coordinate, RoutePolyline, Waypoint};

/// What a polyline point corresponds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "label", content = "name", rename_all = "snake_case")]
pub enum Label {
    Start,
    End,
    Station(String),
    NoStation,
    RoutePoint,
}

impl Label {
    fn for_waypoint(index: usize, count: usize, waypoint: &Waypoint) -> Self {
        match waypoint {
            Waypoint::Station { station } => Label::Station(station.name.clone()),
            Waypoint::NoStation { .. } => Label::NoStation,
            Waypoint::Location { .. } if index == 0 => Label::Start,
            Waypoint::Location { .. } if index + 1 == count => Label::End,
            Waypoint::Location { .. } => Label::RoutePoint,
        }
    }
}

/// Label every point of `polyline` against `waypoints`.
///
/// A point takes the label of the first waypoint within `tolerance_deg` on
/// both axes (see [`Coordinate::within_box`]). Points matching nothing are
/// [`Label::RoutePoint`].
pub fn classify(polyline: &RoutePolyline, waypoints: &[Waypoint], tolerance_deg: f64) -> Vec<Label> {
    polyline
        .points()
        .iter()
        .map(|point| {
            waypoints
                .iter()
                .enumerate()
                .find(|(_, w)| point.within_box(&w.coordinate(), tolerance_deg))
                .map(|(index, w)| Label::for_waypoint(index, waypoints.len(), w))
                .unwrap_or(Label::RoutePoint)
        })
        .collect()
}

/// A polyline point together with its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledPoint {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(flatten)]
    pub label: Label,
}

/// Flatten a polyline into labelled rows.
pub fn label_points(
    polyline: &RoutePolyline,
    waypoints: &[Waypoint],
    tolerance_deg: f64,
) -> Vec<LabeledPoint> {
    polyline
        .points()
        .iter()
        .zip(classify(polyline, waypoints, tolerance_deg))
        .map(|(&coordinate, label)| LabeledPoint { coordinate, label })
        .collect()
}
