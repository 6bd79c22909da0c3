//! Persisted quiz submissions.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::quiz::{Answer, OrganizationSize, Profile, QuizScores, score_answers};
use crate::domain::roi::{self, RoiEstimate, RoiInput};
use crate::domain::types::{LeadId, QuizResultId};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizResult {
    pub id: QuizResultId,
    pub lead_id: Option<LeadId>,
    pub organization_size: OrganizationSize,
    pub volunteer_count: u32,
    pub hours_per_month: f64,
    pub answers: Vec<Answer>,
    pub scores: QuizScores,
    pub profile: Profile,
    pub roi: RoiEstimate,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewQuizResult {
    pub lead_id: Option<LeadId>,
    pub organization_size: OrganizationSize,
    pub volunteer_count: u32,
    pub hours_per_month: f64,
    pub answers: Vec<Answer>,
    pub scores: QuizScores,
    pub profile: Profile,
    pub roi: RoiEstimate,
}

impl NewQuizResult {
    /// Scores `answers` and derives the profile and ROI.
    ///
    /// An explicit `volunteer_count` overrides the size default.
    pub fn evaluate(
        organization_size: OrganizationSize,
        volunteer_count: Option<u32>,
        hours_per_month: f64,
        answers: Vec<Answer>,
    ) -> Self {
        let volunteer_count = volunteer_count.unwrap_or(organization_size.volunteer_count());
        let scores = score_answers(&answers);
        let roi = roi::estimate(RoiInput::new(volunteer_count, hours_per_month), &scores);
        Self {
            lead_id: None,
            organization_size,
            volunteer_count,
            hours_per_month,
            profile: scores.profile(),
            answers,
            scores,
            roi,
        }
    }

    pub fn with_lead(mut self, lead_id: LeadId) -> Self {
        self.lead_id = Some(lead_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::QUESTIONS;

    #[test]
    fn explicit_volunteer_count_overrides_size() {
        let answers: Vec<Answer> = QUESTIONS.iter().map(|q| Answer::new(q.id, 2)).collect();
        let by_size = NewQuizResult::evaluate(OrganizationSize::Md, None, 8.0, answers.clone());
        assert_eq!(by_size.volunteer_count, 150);

        let explicit = NewQuizResult::evaluate(OrganizationSize::Md, Some(42), 8.0, answers);
        assert_eq!(explicit.volunteer_count, 42);
        assert_eq!(explicit.profile, explicit.scores.profile());
        assert_eq!(explicit.roi.happiness_moments, 42 * 8 * 12 * 5);
    }
}
