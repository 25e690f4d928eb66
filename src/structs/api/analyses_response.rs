use serde::Deserialize;
use crate::structs::analysis_summary::AnalysisSummary;

#[derive(Deserialize, Debug, Clone)]
pub struct AnalysesResponse {
    #[serde(default)]
    pub results: Vec<AnalysisSummary>,
}
