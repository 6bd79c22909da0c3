use diesel::prelude::*;

use crate::{
    domain::{
        lead::NewLead,
        quiz_result::{NewQuizResult, QuizResult},
        types::QuizResultId,
    },
    models::{
        lead::{Lead as DbLead, NewLead as DbNewLead},
        quiz_result::{NewQuizResult as DbNewQuizResult, QuizResult as DbQuizResult},
    },
    repository::{
        DieselRepository, QuizResultReader, QuizResultWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{leads, quiz_results},
};

impl QuizResultReader for DieselRepository {
    fn get_quiz_result(&self, id: QuizResultId) -> RepositoryResult<Option<QuizResult>> {
        let mut conn = self.conn()?;

        let result = quiz_results::table
            .find(id.get())
            .first::<DbQuizResult>(&mut conn)
            .optional()?;

        result
            .map(QuizResult::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl QuizResultWriter for DieselRepository {
    fn create_quiz_result(
        &self,
        result: &NewQuizResult,
        lead: Option<NewLead>,
    ) -> RepositoryResult<QuizResult> {
        let mut insertable = DbNewQuizResult::try_from(result)?;
        let new_lead = lead.as_ref().map(DbNewLead::from);

        let mut conn = self.conn()?;
        let row = conn.transaction::<DbQuizResult, diesel::result::Error, _>(|conn| {
            if let Some(new_lead) = &new_lead {
                let lead = diesel::insert_into(leads::table)
                    .values(new_lead)
                    .get_result::<DbLead>(conn)?;
                insertable.lead_id = Some(lead.id);
            }

            diesel::insert_into(quiz_results::table)
                .values(&insertable)
                .get_result::<DbQuizResult>(conn)
        })?;

        QuizResult::try_from(row).map_err(RepositoryError::from)
    }
}
