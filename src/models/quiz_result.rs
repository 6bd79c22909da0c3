//! Diesel models for stored quiz results.
//!
//! Answers, dimension scores and the ROI estimate are kept as JSON text.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::quiz::QuizScores;
use crate::domain::quiz_result::{NewQuizResult as DomainNewQuizResult, QuizResult as DomainQuizResult};
use crate::domain::types::{LeadId, QuizResultId, TypeConstraintError};
use crate::models::customer::{volunteer_count_from_db, volunteer_count_to_db};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::quiz_results)]
pub struct QuizResult {
    pub id: i32,
    pub lead_id: Option<i32>,
    pub organization_size: String,
    pub volunteer_count: i32,
    pub hours_per_month: f64,
    pub answers: String,
    pub dimension_scores: String,
    pub overall_score: f64,
    pub profile: String,
    pub roi: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quiz_results)]
pub struct NewQuizResult<'a> {
    pub lead_id: Option<i32>,
    pub organization_size: &'a str,
    pub volunteer_count: i32,
    pub hours_per_month: f64,
    pub answers: String,
    pub dimension_scores: String,
    pub overall_score: f64,
    pub profile: &'a str,
    pub roi: String,
}

fn json_error(err: serde_json::Error) -> TypeConstraintError {
    TypeConstraintError::InvalidValue(format!("malformed JSON column: {err}"))
}

impl TryFrom<QuizResult> for DomainQuizResult {
    type Error = TypeConstraintError;

    fn try_from(result: QuizResult) -> Result<Self, Self::Error> {
        let dimensions = serde_json::from_str(&result.dimension_scores).map_err(json_error)?;
        Ok(Self {
            id: QuizResultId::try_from(result.id)?,
            lead_id: result.lead_id.map(LeadId::try_from).transpose()?,
            organization_size: result.organization_size.parse()?,
            volunteer_count: volunteer_count_from_db(result.volunteer_count)?,
            hours_per_month: result.hours_per_month,
            answers: serde_json::from_str(&result.answers).map_err(json_error)?,
            scores: QuizScores {
                dimensions,
                overall: result.overall_score,
            },
            profile: result.profile.parse()?,
            roi: serde_json::from_str(&result.roi).map_err(json_error)?,
            created_at: result.created_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewQuizResult> for NewQuizResult<'a> {
    type Error = TypeConstraintError;

    fn try_from(result: &'a DomainNewQuizResult) -> Result<Self, Self::Error> {
        Ok(Self {
            lead_id: result.lead_id.map(LeadId::get),
            organization_size: result.organization_size.as_str(),
            volunteer_count: volunteer_count_to_db(result.volunteer_count),
            hours_per_month: result.hours_per_month,
            answers: serde_json::to_string(&result.answers).map_err(json_error)?,
            dimension_scores: serde_json::to_string(&result.scores.dimensions)
                .map_err(json_error)?,
            overall_score: result.scores.overall,
            profile: result.profile.as_str(),
            roi: serde_json::to_string(&result.roi).map_err(json_error)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::{Answer, OrganizationSize, QUESTIONS};
    use chrono::Utc;

    #[test]
    fn json_columns_survive_a_round_trip() {
        let answers: Vec<Answer> = QUESTIONS.iter().map(|q| Answer::new(q.id, 1)).collect();
        let domain = DomainNewQuizResult::evaluate(OrganizationSize::Sm, None, 8.0, answers);
        let insertable = NewQuizResult::try_from(&domain).unwrap();

        let row = QuizResult {
            id: 9,
            lead_id: None,
            organization_size: insertable.organization_size.to_string(),
            volunteer_count: insertable.volunteer_count,
            hours_per_month: insertable.hours_per_month,
            answers: insertable.answers.clone(),
            dimension_scores: insertable.dimension_scores.clone(),
            overall_score: insertable.overall_score,
            profile: insertable.profile.to_string(),
            roi: insertable.roi.clone(),
            created_at: Utc::now().naive_utc(),
        };
        let loaded = DomainQuizResult::try_from(row).unwrap();
        assert_eq!(loaded.scores, domain.scores);
        assert_eq!(loaded.profile, domain.profile);
        assert_eq!(loaded.roi, domain.roi);
        assert_eq!(loaded.answers, domain.answers);
    }

    #[test]
    fn corrupt_json_is_a_constraint_error() {
        let row = QuizResult {
            id: 1,
            lead_id: None,
            organization_size: "xs".to_string(),
            volunteer_count: 20,
            hours_per_month: 8.0,
            answers: "[".to_string(),
            dimension_scores: "[]".to_string(),
            overall_score: 0.0,
            profile: "starter".to_string(),
            roi: "{}".to_string(),
            created_at: Utc::now().naive_utc(),
        };
        assert!(matches!(
            DomainQuizResult::try_from(row),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }
}
