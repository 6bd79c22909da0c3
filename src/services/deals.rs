//! Deals and the sales pipeline board.

use chrono::Utc;

use crate::domain::deal::{Deal, StageMove};
use crate::domain::pipeline::{PipelineBoard, stage_update};
use crate::domain::types::{CustomerId, DealId};
use crate::dto::pipeline::PipelineOverview;
use crate::forms::deal::{DealForm, DealListParams, DealPayload, StageMoveForm};
use crate::repository::{CustomerReader, DealListQuery, DealReader, DealWriter};
use crate::services::{ServiceError, ServiceResult};

/// Attempts for a move without `from_stage` when other writers keep
/// changing the stage underneath.
const UNCHECKED_MOVE_ATTEMPTS: usize = 3;

pub fn list_deals<R>(repo: &R, params: DealListParams) -> ServiceResult<Vec<Deal>>
where
    R: DealReader + ?Sized,
{
    let mut query = DealListQuery::new();
    if let Some(stage) = params.stage {
        query = query.stage(stage);
    }
    if let Some(customer_id) = params.customer_id {
        query = query.customer(CustomerId::new(customer_id)?);
    }

    repo.list_deals(query).map_err(|err| {
        log::error!("Failed to list deals: {err}");
        ServiceError::from(err)
    })
}

pub fn get_deal<R>(repo: &R, deal_id: i32) -> ServiceResult<Deal>
where
    R: DealReader + ?Sized,
{
    let deal_id = DealId::new(deal_id)?;
    repo.get_deal_by_id(deal_id)?.ok_or(ServiceError::NotFound)
}

fn ensure_customer<R>(repo: &R, customer_id: CustomerId) -> ServiceResult<()>
where
    R: CustomerReader + ?Sized,
{
    match repo.get_customer_by_id(customer_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form(format!("onbekende klant {customer_id}"))),
    }
}

pub fn create_deal<R>(repo: &R, form: DealForm) -> ServiceResult<Deal>
where
    R: CustomerReader + DealWriter + ?Sized,
{
    let payload = DealPayload::try_from(form)?;
    ensure_customer(repo, payload.customer_id)?;

    repo.create_deal(&payload.into_new_deal()).map_err(|err| {
        log::error!("Failed to create deal: {err}");
        ServiceError::from(err)
    })
}

/// Updates the editable fields. The stage is left alone; see [`move_deal`].
pub fn update_deal<R>(repo: &R, deal_id: i32, form: DealForm) -> ServiceResult<Deal>
where
    R: CustomerReader + DealReader + DealWriter + ?Sized,
{
    let current = get_deal(repo, deal_id)?;
    let payload = DealPayload::try_from(form)?;
    if payload.customer_id != current.customer_id {
        ensure_customer(repo, payload.customer_id)?;
    }

    let updates = payload.into_update(current.probability);
    repo.update_deal(current.id, &updates).map_err(|err| {
        log::error!("Failed to update deal {}: {err}", current.id);
        ServiceError::from(err)
    })
}

pub fn delete_deal<R>(repo: &R, deal_id: i32) -> ServiceResult<()>
where
    R: DealWriter + ?Sized,
{
    let deal_id = DealId::new(deal_id)?;
    repo.delete_deal(deal_id).map_err(ServiceError::from)
}

/// Moves a deal to another stage.
///
/// With `from_stage` the move only succeeds while the stored stage still
/// matches it, otherwise the caller gets a conflict and should reload the
/// board. Without it the latest move wins.
pub fn move_deal<R>(repo: &R, deal_id: i32, form: StageMoveForm) -> ServiceResult<Deal>
where
    R: DealReader + DealWriter + ?Sized,
{
    let stage_move = StageMove::from(form);
    let deal_id = DealId::new(deal_id)?;

    for _ in 0..UNCHECKED_MOVE_ATTEMPTS {
        let current = repo
            .get_deal_by_id(deal_id)?
            .ok_or(ServiceError::NotFound)?;

        if let Some(expected) = stage_move.expected_from
            && expected != current.stage
        {
            return Err(ServiceError::Conflict(format!(
                "deal {deal_id} staat al in fase {}",
                current.stage.label()
            )));
        }

        let Some(update) = stage_update(current.stage, stage_move.to, Utc::now().naive_utc())
        else {
            return Ok(current);
        };

        match repo.update_deal_stage(deal_id, current.stage, update)? {
            Some(moved) => {
                log::info!(
                    "Deal {deal_id} moved from {} to {}",
                    current.stage,
                    moved.stage
                );
                return Ok(moved);
            }
            None if stage_move.expected_from.is_some() => {
                return Err(ServiceError::Conflict(format!(
                    "deal {deal_id} is tegelijk door iemand anders verplaatst"
                )));
            }
            None => {
                log::warn!("Deal {deal_id} changed stage during move, retrying");
            }
        }
    }

    Err(ServiceError::Conflict(format!(
        "deal {deal_id} kon niet worden verplaatst"
    )))
}

/// Board columns with the per-stage totals.
pub fn pipeline_overview<R>(repo: &R) -> ServiceResult<PipelineOverview>
where
    R: DealReader + ?Sized,
{
    let deals = repo
        .list_deals_with_customer(DealListQuery::new())
        .map_err(|err| {
            log::error!("Failed to load pipeline: {err}");
            err
        })?;

    let board = PipelineBoard::from_cards(
        deals
            .iter()
            .map(|(deal, customer_name)| (deal.stage, deal.card(customer_name.as_str()))),
    );
    let summary = board.summary();

    Ok(PipelineOverview {
        columns: board.into_columns(),
        summary,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::pipeline::DealStage;
    use crate::domain::types::{CustomerName, DealTitle, MoneyCents, Probability};
    use crate::repository::mock::MockRepository;

    fn deal(id: i32, stage: DealStage, value: i64) -> Deal {
        let now = Utc::now().naive_utc();
        Deal {
            id: DealId::new(id).unwrap(),
            customer_id: CustomerId::new(1).unwrap(),
            title: DealTitle::new(format!("Deal {id}")).unwrap(),
            value: MoneyCents::new(value).unwrap(),
            stage,
            probability: stage.default_probability(),
            expected_close: None,
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn move_form(stage: DealStage, from_stage: Option<DealStage>) -> StageMoveForm {
        StageMoveForm { stage, from_stage }
    }

    #[test]
    fn stale_from_stage_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_deal_by_id()
            .returning(|id| Ok(Some(deal(id.get(), DealStage::Negotiation, 10_000))));
        repo.expect_update_deal_stage().times(0);

        let result = move_deal(
            &repo,
            7,
            move_form(DealStage::Won, Some(DealStage::Proposal)),
        );

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn move_into_won_sets_closed_at_and_probability() {
        let mut repo = MockRepository::new();
        repo.expect_get_deal_by_id()
            .returning(|id| Ok(Some(deal(id.get(), DealStage::Negotiation, 10_000))));
        repo.expect_update_deal_stage()
            .withf(|_, expected, update| {
                *expected == DealStage::Negotiation
                    && update.stage == DealStage::Won
                    && update.probability == Probability::new(100).unwrap()
                    && update.closed_at.is_some()
            })
            .times(1)
            .returning(|id, _, update| {
                let mut moved = deal(id.get(), update.stage, 10_000);
                moved.probability = update.probability;
                moved.closed_at = update.closed_at;
                Ok(Some(moved))
            });

        let moved = move_deal(
            &repo,
            7,
            move_form(DealStage::Won, Some(DealStage::Negotiation)),
        )
        .unwrap();

        assert_eq!(moved.stage, DealStage::Won);
        assert!(moved.closed_at.is_some());
    }

    #[test]
    fn same_stage_is_a_no_op() {
        let mut repo = MockRepository::new();
        repo.expect_get_deal_by_id()
            .returning(|id| Ok(Some(deal(id.get(), DealStage::Proposal, 500))));
        repo.expect_update_deal_stage().times(0);

        let unchanged = move_deal(&repo, 2, move_form(DealStage::Proposal, None)).unwrap();

        assert_eq!(unchanged.stage, DealStage::Proposal);
    }

    #[test]
    fn concurrent_change_with_from_stage_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_deal_by_id()
            .returning(|id| Ok(Some(deal(id.get(), DealStage::Proposal, 500))));
        repo.expect_update_deal_stage()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let result = move_deal(
            &repo,
            2,
            move_form(DealStage::Lost, Some(DealStage::Proposal)),
        );

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn unchecked_move_retries_until_it_lands() {
        let mut repo = MockRepository::new();
        repo.expect_get_deal_by_id()
            .returning(|id| Ok(Some(deal(id.get(), DealStage::Proposal, 500))));
        let mut calls = 0;
        repo.expect_update_deal_stage()
            .times(2)
            .returning(move |id, _, update| {
                calls += 1;
                if calls == 1 {
                    Ok(None)
                } else {
                    Ok(Some(deal(id.get(), update.stage, 500)))
                }
            });

        let moved = move_deal(&repo, 2, move_form(DealStage::Negotiation, None)).unwrap();

        assert_eq!(moved.stage, DealStage::Negotiation);
    }

    #[test]
    fn missing_deal_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_deal_by_id().returning(|_| Ok(None));

        let result = move_deal(&repo, 3, move_form(DealStage::Won, None));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn overview_groups_cards_and_totals() {
        let mut repo = MockRepository::new();
        repo.expect_list_deals_with_customer().returning(|_| {
            Ok(vec![
                (
                    deal(1, DealStage::Proposal, 10_000),
                    CustomerName::new("Buurthuis").unwrap(),
                ),
                (
                    deal(2, DealStage::Proposal, 30_000),
                    CustomerName::new("Scouting").unwrap(),
                ),
                (
                    deal(3, DealStage::Won, 5_000),
                    CustomerName::new("Museum").unwrap(),
                ),
            ])
        });

        let overview = pipeline_overview(&repo).unwrap();

        let proposal = &overview.summary[DealStage::Proposal.position()];
        assert_eq!(proposal.deal_count, 2);
        assert_eq!(proposal.total_value.get(), 40_000);
        assert_eq!(proposal.weighted_value.get(), 20_000);
        assert_eq!(overview.columns[DealStage::Won.position()].cards.len(), 1);
        assert_eq!(
            overview.columns[DealStage::Proposal.position()].cards[1].customer_name,
            "Scouting"
        );
    }

    #[test]
    fn create_requires_existing_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));
        repo.expect_create_deal().times(0);

        let form = DealForm {
            customer_id: 9,
            title: "Licentie".into(),
            value_cents: 100,
            stage: None,
            probability: None,
            expected_close: None,
        };

        assert!(matches!(
            create_deal(&repo, form),
            Err(ServiceError::Form(_))
        ));
    }
}
