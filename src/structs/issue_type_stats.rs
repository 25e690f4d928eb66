use serde::{Deserialize, Serialize};
use crate::enums::issue_type::IssueType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeStats {
    pub issue_type: IssueType,
    pub count: usize,
    pub percentage: usize,
    pub relative_width: usize,
}
