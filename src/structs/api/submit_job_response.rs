use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct SubmitJobResponse {
    pub task_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
