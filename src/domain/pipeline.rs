//! Deal pipeline: the ordered stage set and the drag-and-drop board state.
//!
//! [`PipelineBoard`] mirrors the board a dashboard user manipulates. A move
//! is applied optimistically with [`PipelineBoard::begin_move`] and must be
//! either confirmed or rolled back once persistence has answered;
//! [`PipelineBoard::move_and_persist`] wraps that protocol so a failed write
//! never leaves the board out of sync with the server.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{DealId, MoneyCents, Probability, TypeConstraintError};

/// Named stage a deal passes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Qualification,
    NeedsAnalysis,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl DealStage {
    pub const ALL: [DealStage; 6] = [
        DealStage::Qualification,
        DealStage::NeedsAnalysis,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::Won,
        DealStage::Lost,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DealStage::Qualification => "qualification",
            DealStage::NeedsAnalysis => "needs_analysis",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
            DealStage::Won => "won",
            DealStage::Lost => "lost",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DealStage::Qualification => "Kwalificatie",
            DealStage::NeedsAnalysis => "Behoefteanalyse",
            DealStage::Proposal => "Voorstel",
            DealStage::Negotiation => "Onderhandeling",
            DealStage::Won => "Gewonnen",
            DealStage::Lost => "Verloren",
        }
    }

    /// Column index on the board.
    pub const fn position(self) -> usize {
        self as usize
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, DealStage::Won | DealStage::Lost)
    }

    pub const fn default_probability(self) -> Probability {
        Probability::saturating(match self {
            DealStage::Qualification => 10,
            DealStage::NeedsAnalysis => 25,
            DealStage::Proposal => 50,
            DealStage::Negotiation => 75,
            DealStage::Won => 100,
            DealStage::Lost => 0,
        })
    }
}

impl Display for DealStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealStage {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

/// Column values a stage change writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageUpdate {
    pub stage: DealStage,
    pub probability: Probability,
    pub closed_at: Option<NaiveDateTime>,
}

/// Computes the update for moving a deal from `current` to `to`.
///
/// Returns `None` for a move onto the same stage. Entering a closed stage
/// stamps `closed_at`, leaving the closed stages clears it.
pub fn stage_update(current: DealStage, to: DealStage, now: NaiveDateTime) -> Option<StageUpdate> {
    if current == to {
        return None;
    }
    Some(StageUpdate {
        stage: to,
        probability: to.default_probability(),
        closed_at: to.is_closed().then_some(now),
    })
}

/// A deal as shown on the board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DealCard {
    pub id: DealId,
    pub title: String,
    pub customer_name: String,
    pub value: MoneyCents,
    pub probability: Probability,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineColumn {
    pub stage: DealStage,
    pub label: &'static str,
    pub cards: Vec<DealCard>,
}

/// Aggregates for one column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: DealStage,
    pub deal_count: usize,
    pub total_value: MoneyCents,
    pub weighted_value: MoneyCents,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("deal {0} is not on the board")]
    UnknownDeal(DealId),
    #[error("deal {0} already has a move in flight")]
    MovePending(DealId),
    #[error("no move in flight for deal {0}")]
    NotPending(DealId),
}

/// Failure of [`PipelineBoard::move_and_persist`].
#[derive(Debug, Error)]
pub enum MoveError<E> {
    #[error(transparent)]
    Board(#[from] PipelineError),
    #[error("persisting the stage change failed: {0}")]
    Persist(E),
}

/// Receipt for an optimistic move that still awaits persistence.
#[must_use = "a pending move must be confirmed or rolled back"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingMove {
    pub deal_id: DealId,
    pub from: DealStage,
    pub to: DealStage,
    from_index: usize,
    previous_probability: Probability,
}

/// Board state: one column per stage in [`DealStage::ALL`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineBoard {
    columns: Vec<PipelineColumn>,
    in_flight: HashSet<DealId>,
}

impl Default for PipelineBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBoard {
    pub fn new() -> Self {
        Self {
            columns: DealStage::ALL
                .into_iter()
                .map(|stage| PipelineColumn {
                    stage,
                    label: stage.label(),
                    cards: Vec::new(),
                })
                .collect(),
            in_flight: HashSet::new(),
        }
    }

    /// Builds a board from `(stage, card)` pairs, keeping their order.
    pub fn from_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = (DealStage, DealCard)>,
    {
        let mut board = Self::new();
        for (stage, card) in cards {
            board.columns[stage.position()].cards.push(card);
        }
        board
    }

    pub fn columns(&self) -> &[PipelineColumn] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<PipelineColumn> {
        self.columns
    }

    pub fn column(&self, stage: DealStage) -> &PipelineColumn {
        &self.columns[stage.position()]
    }

    /// Stage and index of a card.
    pub fn locate(&self, deal_id: DealId) -> Option<(DealStage, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .cards
                .iter()
                .position(|card| card.id == deal_id)
                .map(|index| (column.stage, index))
        })
    }

    pub fn is_pending(&self, deal_id: DealId) -> bool {
        self.in_flight.contains(&deal_id)
    }

    /// Moves the card to the end of the `to` column right away.
    ///
    /// Returns `Ok(None)` when the card already sits in `to`.
    pub fn begin_move(
        &mut self,
        deal_id: DealId,
        to: DealStage,
    ) -> Result<Option<PendingMove>, PipelineError> {
        if self.in_flight.contains(&deal_id) {
            return Err(PipelineError::MovePending(deal_id));
        }
        let (from, from_index) = self
            .locate(deal_id)
            .ok_or(PipelineError::UnknownDeal(deal_id))?;
        if from == to {
            return Ok(None);
        }

        let mut card = self.columns[from.position()].cards.remove(from_index);
        let previous_probability = card.probability;
        card.probability = to.default_probability();
        self.columns[to.position()].cards.push(card);
        self.in_flight.insert(deal_id);

        Ok(Some(PendingMove {
            deal_id,
            from,
            to,
            from_index,
            previous_probability,
        }))
    }

    /// Accepts a move the server has persisted.
    pub fn confirm(&mut self, pending: PendingMove) -> Result<(), PipelineError> {
        if self.in_flight.remove(&pending.deal_id) {
            Ok(())
        } else {
            Err(PipelineError::NotPending(pending.deal_id))
        }
    }

    /// Puts the card back where it was before the move.
    pub fn rollback(&mut self, pending: PendingMove) -> Result<(), PipelineError> {
        if !self.in_flight.remove(&pending.deal_id) {
            return Err(PipelineError::NotPending(pending.deal_id));
        }
        let to_cards = &mut self.columns[pending.to.position()].cards;
        let index = to_cards
            .iter()
            .position(|card| card.id == pending.deal_id)
            .ok_or(PipelineError::UnknownDeal(pending.deal_id))?;
        let mut card = to_cards.remove(index);
        card.probability = pending.previous_probability;

        let from_cards = &mut self.columns[pending.from.position()].cards;
        let index = pending.from_index.min(from_cards.len());
        from_cards.insert(index, card);
        Ok(())
    }

    /// Optimistically moves a card, persists the move and rolls back when
    /// `persist` fails. Returns whether the card changed column.
    pub fn move_and_persist<F, E>(
        &mut self,
        deal_id: DealId,
        to: DealStage,
        persist: F,
    ) -> Result<bool, MoveError<E>>
    where
        F: FnOnce(DealId, DealStage, DealStage) -> Result<(), E>,
    {
        let Some(pending) = self.begin_move(deal_id, to)? else {
            return Ok(false);
        };
        match persist(deal_id, pending.from, to) {
            Ok(()) => {
                self.confirm(pending)?;
                Ok(true)
            }
            Err(err) => {
                self.rollback(pending)?;
                Err(MoveError::Persist(err))
            }
        }
    }

    /// Replaces the board with authoritative state, dropping moves in flight.
    pub fn reconcile<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = (DealStage, DealCard)>,
    {
        *self = Self::from_cards(cards);
    }

    pub fn summary(&self) -> Vec<StageSummary> {
        self.columns
            .iter()
            .map(|column| {
                let (total, weighted) = column.cards.iter().fold(
                    (MoneyCents::ZERO, MoneyCents::ZERO),
                    |(total, weighted), card| {
                        (
                            total.saturating_add(card.value),
                            weighted.saturating_add(card.value.weighted(card.probability)),
                        )
                    },
                );
                StageSummary {
                    stage: column.stage,
                    deal_count: column.cards.len(),
                    total_value: total,
                    weighted_value: weighted,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn card(id: i32, value: i64, stage: DealStage) -> (DealStage, DealCard) {
        (
            stage,
            DealCard {
                id: DealId::new(id).unwrap(),
                title: format!("Deal {id}"),
                customer_name: "Stichting Voorbeeld".to_string(),
                value: MoneyCents::new(value).unwrap(),
                probability: stage.default_probability(),
            },
        )
    }

    fn board() -> PipelineBoard {
        PipelineBoard::from_cards(vec![
            card(1, 10_000, DealStage::Qualification),
            card(2, 20_000, DealStage::Qualification),
            card(3, 30_000, DealStage::Proposal),
        ])
    }

    fn id(value: i32) -> DealId {
        DealId::new(value).unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn stages_parse_and_order() {
        for stage in DealStage::ALL {
            assert_eq!(stage.as_str().parse::<DealStage>().unwrap(), stage);
        }
        assert!(DealStage::Qualification < DealStage::Won);
        assert!("closed".parse::<DealStage>().is_err());
    }

    #[test]
    fn stage_update_stamps_closed_deals() {
        let update = stage_update(DealStage::Negotiation, DealStage::Won, now()).unwrap();
        assert_eq!(update.probability.get(), 100);
        assert_eq!(update.closed_at, Some(now()));

        let reopened = stage_update(DealStage::Lost, DealStage::Proposal, now()).unwrap();
        assert_eq!(reopened.closed_at, None);
        assert_eq!(reopened.probability.get(), 50);

        assert!(stage_update(DealStage::Proposal, DealStage::Proposal, now()).is_none());
    }

    #[test]
    fn begin_move_is_applied_immediately() {
        let mut board = board();
        let pending = board.begin_move(id(1), DealStage::Proposal).unwrap().unwrap();
        assert_eq!(board.locate(id(1)), Some((DealStage::Proposal, 1)));
        assert_eq!(board.column(DealStage::Proposal).cards[1].probability.get(), 50);
        assert!(board.is_pending(id(1)));
        board.confirm(pending).unwrap();
        assert!(!board.is_pending(id(1)));
    }

    #[test]
    fn rollback_restores_origin_position() {
        let mut board = board();
        let before = board.clone();
        let pending = board.begin_move(id(1), DealStage::Won).unwrap().unwrap();
        board.rollback(pending).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn second_move_while_in_flight_is_rejected() {
        let mut board = board();
        let _pending = board.begin_move(id(2), DealStage::Lost).unwrap().unwrap();
        assert_eq!(
            board.begin_move(id(2), DealStage::Won),
            Err(PipelineError::MovePending(id(2)))
        );
    }

    #[test]
    fn unknown_deal_and_same_stage() {
        let mut board = board();
        assert_eq!(
            board.begin_move(id(42), DealStage::Won),
            Err(PipelineError::UnknownDeal(id(42)))
        );
        assert_eq!(board.begin_move(id(3), DealStage::Proposal), Ok(None));
    }

    #[test]
    fn failed_persistence_rolls_back() {
        let mut board = board();
        let before = board.clone();
        let result = board.move_and_persist(id(2), DealStage::Negotiation, |_, from, to| {
            assert_eq!(from, DealStage::Qualification);
            assert_eq!(to, DealStage::Negotiation);
            Err("netwerkfout")
        });
        assert!(matches!(result, Err(MoveError::Persist("netwerkfout"))));
        assert_eq!(board, before);
    }

    #[test]
    fn successful_persistence_keeps_the_move() {
        let mut board = board();
        let moved = board
            .move_and_persist(id(3), DealStage::Won, |_, _, _| Ok::<(), ()>(()))
            .unwrap();
        assert!(moved);
        assert_eq!(board.locate(id(3)), Some((DealStage::Won, 0)));
        assert!(!board.is_pending(id(3)));
    }

    #[test]
    fn reconcile_replaces_state() {
        let mut board = board();
        let _pending = board.begin_move(id(1), DealStage::Lost).unwrap().unwrap();
        board.reconcile(vec![card(1, 10_000, DealStage::Negotiation)]);
        assert_eq!(board.locate(id(1)), Some((DealStage::Negotiation, 0)));
        assert!(board.locate(id(2)).is_none());
        assert!(!board.is_pending(id(1)));
    }

    #[test]
    fn summary_weights_by_probability() {
        let summary = board().summary();
        let qualification = summary[DealStage::Qualification.position()];
        assert_eq!(qualification.deal_count, 2);
        assert_eq!(qualification.total_value.get(), 30_000);
        assert_eq!(qualification.weighted_value.get(), 3_000);
        let proposal = summary[DealStage::Proposal.position()];
        assert_eq!(proposal.weighted_value.get(), 15_000);
    }
}
