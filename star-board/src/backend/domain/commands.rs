//! Result types returned by [`StarBoardService`](super::board_service::StarBoardService).

use serde::Serialize;
use shared::{NextRewardProgress, QuickAction, RedemptionLogEntry, Reward};

/// Result of any operation that added or removed stars
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarsChangedResult {
    /// Signed change that was requested
    pub delta: i64,
    pub balance: u32,
    pub progress: NextRewardProgress,
    pub success_message: String,
}

/// Result of redeeming a reward
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRewardResult {
    pub redemption: RedemptionLogEntry,
    pub balance: u32,
    pub progress: NextRewardProgress,
    pub success_message: String,
}

/// Result of adding, updating or removing a reward
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardResult {
    pub reward: Reward,
    pub success_message: String,
}

/// Result of adding, updating or removing a quick action
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickActionResult {
    pub quick_action: QuickAction,
    pub success_message: String,
}

/// Result of importing a backup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub child_name: String,
    pub reward_count: usize,
    pub quick_action_count: usize,
    pub action_count: usize,
    pub redemption_count: usize,
    pub success_message: String,
}
