pub mod json;
pub mod md;

use crate::error::RankError;
use crate::types::report::RankingReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &RankingReport, format: OutputFormat) -> Result<String, RankError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(RankError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
