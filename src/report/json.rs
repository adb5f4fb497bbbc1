use crate::types::report::RankingReport;

pub fn to_json(report: &RankingReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
