//! Geometry for the radar chart on the quiz result page.

use std::f64::consts::PI;
use std::fmt::Write;

use serde::Serialize;

use crate::domain::quiz::{Dimension, QuizScores};

/// Percentages at which concentric grid rings are drawn.
pub const GRID_LEVELS: [f64; 4] = [25.0, 50.0, 75.0, 100.0];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Position and size of a radar chart in SVG user units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarLayout {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RadarLabel {
    pub dimension: Dimension,
    pub text: &'static str,
    pub anchor: Point,
}

/// Everything a front end needs to draw the chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RadarChart {
    pub polygon: Vec<Point>,
    pub path: String,
    pub grid: Vec<Vec<Point>>,
    pub axes: Vec<Point>,
    pub labels: Vec<RadarLabel>,
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self {
            cx: 150.0,
            cy: 150.0,
            radius: 110.0,
        }
    }
}

impl RadarLayout {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self { cx, cy, radius }
    }

    /// Angle of axis `index` out of `count`; the first axis points up.
    pub fn angle(index: usize, count: usize) -> f64 {
        -PI / 2.0 + 2.0 * PI * index as f64 / count as f64
    }

    /// Point for `value` (percentage, clamped to 0..=100) on axis `index`.
    pub fn point(&self, index: usize, count: usize, value: f64) -> Point {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
        self.at_distance(index, count, self.radius * value / 100.0)
    }

    fn at_distance(&self, index: usize, count: usize, distance: f64) -> Point {
        let theta = Self::angle(index, count);
        Point {
            x: self.cx + distance * theta.cos(),
            y: self.cy + distance * theta.sin(),
        }
    }

    pub fn polygon(&self, values: &[f64]) -> Vec<Point> {
        let count = values.len();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| self.point(i, count, v))
            .collect()
    }

    pub fn grid_ring(&self, count: usize, level: f64) -> Vec<Point> {
        (0..count).map(|i| self.point(i, count, level)).collect()
    }

    pub fn axes(&self, count: usize) -> Vec<Point> {
        self.grid_ring(count, 100.0)
    }

    /// Label positions `offset` units outside the outer ring.
    pub fn label_anchors(&self, count: usize, offset: f64) -> Vec<Point> {
        (0..count)
            .map(|i| self.at_distance(i, count, self.radius + offset))
            .collect()
    }

    /// Builds the full chart for a set of quiz scores.
    pub fn chart(&self, scores: &QuizScores) -> RadarChart {
        let values: Vec<f64> = Dimension::ALL
            .iter()
            .map(|&d| scores.percentage(d))
            .collect();
        let count = values.len();
        let polygon = self.polygon(&values);
        let labels = Dimension::ALL
            .iter()
            .zip(self.label_anchors(count, 18.0))
            .map(|(&dimension, anchor)| RadarLabel {
                dimension,
                text: dimension.label(),
                anchor,
            })
            .collect();

        RadarChart {
            path: svg_path(&polygon),
            polygon,
            grid: GRID_LEVELS
                .iter()
                .map(|&level| self.grid_ring(count, level))
                .collect(),
            axes: self.axes(count),
            labels,
        }
    }
}

/// Closed SVG path through `points`, coordinates with two decimals.
pub fn svg_path(points: &[Point]) -> String {
    let mut path = String::new();
    for (i, p) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            path.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(path, "{command}{:.2},{:.2}", p.x, p.y);
    }
    if !points.is_empty() {
        path.push_str(" Z");
    }
    path
}
