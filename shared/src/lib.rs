use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name shown when the child's name is cleared
pub const DEFAULT_CHILD_NAME: &str = "Child";

/// PIN used for the parent gate until a parent sets their own
pub const DEFAULT_PARENT_PIN: &str = "1234";

/// Label reported by the progress calculator when the catalog is empty
pub const NO_REWARDS_LABEL: &str = "No rewards configured";

/// The child whose stars are being tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    /// Display name (never empty after an edit)
    pub name: String,
    /// Current star balance
    pub stars: u32,
}

/// A catalog item the child can exchange stars for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    /// Star price, always at least 1
    pub cost: u32,
}

/// A predefined behaviour that awards a fixed number of stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAction {
    pub id: String,
    pub emoji: String,
    pub name: String,
    /// Stars awarded when triggered, always at least 1
    pub stars: u32,
}

/// One entry in the action log, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub id: String,
    pub description: String,
    /// Stars awarded; negative for manual deductions
    pub stars: i64,
    pub timestamp: DateTime<Utc>,
}

/// Record of a completed reward exchange, newest first.
///
/// `reward_name` is a snapshot taken at redemption time, so the entry
/// survives later renames or deletion of the reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionLogEntry {
    pub id: String,
    pub reward_name: String,
    pub cost: u32,
    pub timestamp: DateTime<Utc>,
}

/// The whole persisted board. This is also the export/import file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    pub profile: ChildProfile,
    pub rewards: Vec<Reward>,
    pub quick_actions: Vec<QuickAction>,
    pub actions: Vec<ActionLogEntry>,
    pub redemptions: Vec<RedemptionLogEntry>,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    #[serde(default = "default_parent_pin")]
    pub parent_pin: String,
}

fn default_sound_enabled() -> bool {
    true
}

fn default_parent_pin() -> String {
    DEFAULT_PARENT_PIN.to_string()
}

/// Derived "next reward" progress for the current balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRewardProgress {
    /// Name of the target reward, or the empty-catalog sentinel
    pub label: String,
    /// Stars still needed to afford the target
    pub need: u32,
    /// Progress from the previous affordable tier towards the target, 0..=100
    pub pct: u8,
    /// Id of the target reward, if any
    pub target_id: Option<String>,
    /// True when the target is already affordable
    pub can_redeem: bool,
}

/// Lifetime totals computed from the logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTotals {
    /// Sum of all action-log stars (manual deductions included)
    pub earned: i64,
    /// Sum of all redemption costs
    pub spent: u64,
    /// Current star balance
    pub balance: u32,
}

/// Snapshot of the board for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStatus {
    pub profile: ChildProfile,
    pub progress: NextRewardProgress,
    pub totals: BoardTotals,
    pub sound_enabled: bool,
    pub reward_count: usize,
    pub quick_action_count: usize,
}
