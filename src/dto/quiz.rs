use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::quiz::{Benchmark, Dimension, Profile, QUESTIONS, QuizOption, QuizScores};
use crate::domain::quiz_result::{NewQuizResult, QuizResult};
use crate::domain::radar::{RadarChart, RadarLayout};
use crate::domain::roi::RoiEstimate;
use crate::domain::types::{LeadId, QuizResultId};

/// Profile with its display texts.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub key: Profile,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        Self {
            key: profile,
            title: profile.title(),
            description: profile.description(),
        }
    }
}

/// Everything the result page renders for a scored quiz.
#[derive(Debug, Serialize)]
pub struct QuizEvaluation {
    pub id: Option<QuizResultId>,
    pub lead_id: Option<LeadId>,
    pub volunteer_count: u32,
    pub hours_per_month: f64,
    pub scores: QuizScores,
    pub profile: ProfileView,
    pub roi: RoiEstimate,
    pub benchmark: Benchmark,
    pub radar: RadarChart,
    pub created_at: Option<NaiveDateTime>,
}

impl QuizEvaluation {
    fn build(
        scores: QuizScores,
        profile: Profile,
        roi: RoiEstimate,
        volunteer_count: u32,
        hours_per_month: f64,
    ) -> Self {
        Self {
            id: None,
            lead_id: None,
            volunteer_count,
            hours_per_month,
            benchmark: crate::domain::quiz::benchmark(&scores),
            radar: RadarLayout::default().chart(&scores),
            profile: profile.into(),
            roi,
            scores,
            created_at: None,
        }
    }
}

impl From<NewQuizResult> for QuizEvaluation {
    fn from(result: NewQuizResult) -> Self {
        let mut evaluation = Self::build(
            result.scores,
            result.profile,
            result.roi,
            result.volunteer_count,
            result.hours_per_month,
        );
        evaluation.lead_id = result.lead_id;
        evaluation
    }
}

impl From<QuizResult> for QuizEvaluation {
    fn from(result: QuizResult) -> Self {
        let mut evaluation = Self::build(
            result.scores,
            result.profile,
            result.roi,
            result.volunteer_count,
            result.hours_per_month,
        );
        evaluation.id = Some(result.id);
        evaluation.lead_id = result.lead_id;
        evaluation.created_at = Some(result.created_at);
        evaluation
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: &'static str,
    pub dimension: Dimension,
    pub text: &'static str,
    pub options: &'static [QuizOption],
}

/// The catalog in the order it is asked.
pub fn question_catalog() -> Vec<QuestionView> {
    QUESTIONS
        .iter()
        .map(|q| QuestionView {
            id: q.id,
            dimension: q.dimension,
            text: q.text,
            options: &q.options,
        })
        .collect()
}
