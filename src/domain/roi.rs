//! Return-on-investment estimate shown next to the quiz result.

use serde::{Deserialize, Serialize};

use crate::domain::quiz::{Dimension, QuizScores};

/// Cost of one coordinator hour in euros.
pub const HOURLY_RATE_EUR: f64 = 25.04;
/// Coordination hours spent per volunteer per month.
pub const COORDINATION_HOURS_PER_VOLUNTEER: f64 = 0.5;
/// Happiness moments (geluksmomenten) produced per volunteer-hour.
pub const HAPPINESS_MOMENTS_PER_HOUR: f64 = 5.0;
/// Average volunteer hours per month when the visitor leaves it blank.
pub const DEFAULT_HOURS_PER_MONTH: f64 = 8.0;

const BASE_EFFICIENCY: f64 = 0.25;
const GAP_EFFICIENCY: f64 = 0.25;
const BASE_RETENTION_POINTS: f64 = 5.0;
const GAP_RETENTION_POINTS: f64 = 10.0;

/// Organisation figures feeding the estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiInput {
    pub volunteer_count: u32,
    pub hours_per_month: f64,
}

impl RoiInput {
    pub fn new(volunteer_count: u32, hours_per_month: f64) -> Self {
        Self {
            volunteer_count,
            hours_per_month,
        }
    }
}

/// Yearly effect of using DAAR.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoiEstimate {
    pub hours_saved: f64,
    pub cost_saved: f64,
    pub retention_improvement: f64,
    pub volunteers_retained: u32,
    pub happiness_moments: u64,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Share of the way still to go for the given dimensions, in `0.0..=1.0`.
fn gap(scores: &QuizScores, dimensions: &[Dimension]) -> f64 {
    let mean = dimensions
        .iter()
        .map(|&d| scores.percentage(d).clamp(0.0, 100.0))
        .sum::<f64>()
        / dimensions.len() as f64;
    (1.0 - mean / 100.0).clamp(0.0, 1.0)
}

/// Derives the yearly ROI from the organisation size and quiz scores.
pub fn estimate(input: RoiInput, scores: &QuizScores) -> RoiEstimate {
    let volunteers = f64::from(input.volunteer_count);
    let hours_per_month = non_negative(input.hours_per_month);

    let coordination_gap = gap(scores, &[Dimension::Organisatie, Dimension::Communicatie]);
    let yearly_coordination = volunteers * COORDINATION_HOURS_PER_VOLUNTEER * 12.0;
    let hours_saved = yearly_coordination * (BASE_EFFICIENCY + GAP_EFFICIENCY * coordination_gap);
    let hours_saved = (hours_saved * 10.0).round() / 10.0;

    let cost_saved = (hours_saved * HOURLY_RATE_EUR * 100.0).round() / 100.0;

    let welfare_gap = gap(scores, &[Dimension::Waardering, Dimension::Betrokkenheid]);
    let retention_improvement = BASE_RETENTION_POINTS + GAP_RETENTION_POINTS * welfare_gap;
    let retention_improvement = (retention_improvement * 10.0).round() / 10.0;

    let volunteers_retained = (volunteers * retention_improvement / 100.0).round() as u32;

    let happiness_moments =
        (volunteers * hours_per_month * 12.0 * HAPPINESS_MOMENTS_PER_HOUR).round() as u64;

    RoiEstimate {
        hours_saved,
        cost_saved,
        retention_improvement,
        volunteers_retained,
        happiness_moments,
    }
}
