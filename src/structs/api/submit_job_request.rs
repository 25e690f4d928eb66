use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct SubmitJobRequest {
    pub repo_url: String,
    pub pr_number: u64,
    pub github_token: Option<String>,
}
