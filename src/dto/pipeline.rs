use serde::Serialize;

use crate::domain::pipeline::{PipelineColumn, StageSummary};

/// Board columns in stage order plus a totals row per stage.
#[derive(Debug, Serialize)]
pub struct PipelineOverview {
    pub columns: Vec<PipelineColumn>,
    pub summary: Vec<StageSummary>,
}
