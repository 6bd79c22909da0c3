//! Readiness quiz: scoring, persistence and reloading of results.

use crate::domain::types::QuizResultId;
use crate::dto::quiz::{QuestionView, QuizEvaluation, question_catalog};
use crate::forms::quiz::{QuizForm, QuizSubmission};
use crate::repository::{QuizResultReader, QuizResultWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn questions() -> Vec<QuestionView> {
    question_catalog()
}

/// Scores the answers without storing anything.
pub fn score(form: QuizForm) -> ServiceResult<QuizEvaluation> {
    let result = form.score_only()?;
    Ok(result.into())
}

/// Scores and stores a submission. When the visitor left a name and email a
/// `quiz` lead is stored with the result and linked to it.
pub fn submit<R>(repo: &R, form: QuizForm) -> ServiceResult<QuizEvaluation>
where
    R: QuizResultWriter + ?Sized,
{
    let QuizSubmission { result, lead } = QuizSubmission::try_from(form)?;

    let stored = repo.create_quiz_result(&result, lead).map_err(|err| {
        log::error!("Failed to store quiz result: {err}");
        ServiceError::from(err)
    })?;

    log::info!(
        "Quiz result {} stored with profile {}",
        stored.id,
        stored.profile
    );
    Ok(stored.into())
}

pub fn get_result<R>(repo: &R, result_id: i32) -> ServiceResult<QuizEvaluation>
where
    R: QuizResultReader + ?Sized,
{
    let result_id = QuizResultId::new(result_id)?;
    repo.get_quiz_result(result_id)?
        .map(QuizEvaluation::from)
        .ok_or(ServiceError::NotFound)
}
