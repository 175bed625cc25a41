//! Pure mutation operations on the board document.
//!
//! Every operation takes the current document by value and returns the new
//! one. Operations that can be refused return an [`OperationError`] instead,
//! and the caller keeps its previous document untouched. Persistence happens
//! in [`StarBoardService`](super::board_service::StarBoardService), never here.

use chrono::{DateTime, Utc};
use shared::{
    ActionLogEntry, BoardDocument, QuickAction, RedemptionLogEntry, Reward, DEFAULT_CHILD_NAME,
    DEFAULT_PARENT_PIN,
};

use super::defaults::{
    default_document, DEFAULT_QUICK_ACTION_EMOJI, DEFAULT_QUICK_ACTION_NAME, DEFAULT_REWARD_NAME,
};
use super::ids::{
    generate_unique_id, ACTION_PREFIX, QUICK_ACTION_PREFIX, REDEMPTION_PREFIX, REWARD_PREFIX,
};

/// Description logged by the plain "add a star" button
pub const ADD_STAR_DESCRIPTION: &str = "⭐ Add Star";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    #[error("Not enough stars: reward costs {cost} but the balance is {balance}")]
    InsufficientBalance { cost: u32, balance: u32 },
    #[error("Reward not found: {0}")]
    UnknownReward(String),
    #[error("Quick action not found: {0}")]
    UnknownQuickAction(String),
}

/// Fields a parent may change on an existing reward
#[derive(Debug, Clone, Default)]
pub struct RewardUpdate {
    pub name: Option<String>,
    pub cost: Option<i64>,
}

/// Fields a parent may change on an existing quick action
#[derive(Debug, Clone, Default)]
pub struct QuickActionUpdate {
    pub emoji: Option<String>,
    pub name: Option<String>,
    pub stars: Option<i64>,
}

/// Clamp a user-entered amount to `1..=u32::MAX`
pub fn clamp_positive(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}

fn trimmed_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `stars = max(0, stars + n)`
pub fn add_stars(mut doc: BoardDocument, n: i64) -> BoardDocument {
    let next = i64::from(doc.profile.stars).saturating_add(n);
    doc.profile.stars = next.clamp(0, i64::from(u32::MAX)) as u32;
    doc
}

/// Prepend an action log entry. The balance is not touched.
pub fn log_action(mut doc: BoardDocument, description: &str, stars: i64, at: DateTime<Utc>) -> BoardDocument {
    let id = generate_unique_id(ACTION_PREFIX, doc.actions.iter().map(|a| a.id.as_str()));
    doc.actions.insert(
        0,
        ActionLogEntry {
            id,
            description: description.to_string(),
            stars,
            timestamp: at,
        },
    );
    doc
}

/// Award one star and log it
pub fn add_star(doc: BoardDocument, at: DateTime<Utc>) -> BoardDocument {
    let doc = add_stars(doc, 1);
    log_action(doc, ADD_STAR_DESCRIPTION, 1, at)
}

/// Manual adjustment by a parent; `n` may be negative
pub fn adjust_stars(doc: BoardDocument, n: i64, reason: &str, at: DateTime<Utc>) -> BoardDocument {
    let description = if reason.trim().is_empty() {
        format!("Manual adjustment ({:+})", n)
    } else {
        reason.trim().to_string()
    };
    let doc = add_stars(doc, n);
    log_action(doc, &description, n, at)
}

/// Trigger a quick action: award its stars and log `"<emoji> <name>"`
pub fn award_quick_action(
    doc: BoardDocument,
    quick_action_id: &str,
    at: DateTime<Utc>,
) -> Result<(BoardDocument, QuickAction), OperationError> {
    let quick_action = doc
        .quick_actions
        .iter()
        .find(|q| q.id == quick_action_id)
        .cloned()
        .ok_or_else(|| OperationError::UnknownQuickAction(quick_action_id.to_string()))?;

    let stars = i64::from(quick_action.stars);
    let description = format!("{} {}", quick_action.emoji, quick_action.name);
    let doc = add_stars(doc, stars);
    let doc = log_action(doc, &description, stars, at);
    Ok((doc, quick_action))
}

/// Spend stars on a reward, snapshotting its name and cost in the redemption log
pub fn redeem_reward(
    mut doc: BoardDocument,
    reward_id: &str,
    at: DateTime<Utc>,
) -> Result<(BoardDocument, RedemptionLogEntry), OperationError> {
    let reward = doc
        .rewards
        .iter()
        .find(|r| r.id == reward_id)
        .ok_or_else(|| OperationError::UnknownReward(reward_id.to_string()))?;

    if doc.profile.stars < reward.cost {
        return Err(OperationError::InsufficientBalance {
            cost: reward.cost,
            balance: doc.profile.stars,
        });
    }

    let entry = RedemptionLogEntry {
        id: generate_unique_id(REDEMPTION_PREFIX, doc.redemptions.iter().map(|r| r.id.as_str())),
        reward_name: reward.name.clone(),
        cost: reward.cost,
        timestamp: at,
    };

    doc.profile.stars -= entry.cost;
    doc.redemptions.insert(0, entry.clone());
    Ok((doc, entry))
}

pub fn add_reward(mut doc: BoardDocument, name: &str, cost: i64) -> (BoardDocument, Reward) {
    let reward = Reward {
        id: generate_unique_id(REWARD_PREFIX, doc.rewards.iter().map(|r| r.id.as_str())),
        name: trimmed_or(name, DEFAULT_REWARD_NAME),
        cost: clamp_positive(cost),
    };
    doc.rewards.push(reward.clone());
    (doc, reward)
}

pub fn update_reward(
    mut doc: BoardDocument,
    reward_id: &str,
    update: RewardUpdate,
) -> Result<(BoardDocument, Reward), OperationError> {
    let reward = doc
        .rewards
        .iter_mut()
        .find(|r| r.id == reward_id)
        .ok_or_else(|| OperationError::UnknownReward(reward_id.to_string()))?;

    if let Some(name) = update.name {
        reward.name = trimmed_or(&name, DEFAULT_REWARD_NAME);
    }
    if let Some(cost) = update.cost {
        reward.cost = clamp_positive(cost);
    }

    let updated = reward.clone();
    Ok((doc, updated))
}

pub fn remove_reward(mut doc: BoardDocument, reward_id: &str) -> Result<(BoardDocument, Reward), OperationError> {
    let index = doc
        .rewards
        .iter()
        .position(|r| r.id == reward_id)
        .ok_or_else(|| OperationError::UnknownReward(reward_id.to_string()))?;
    let removed = doc.rewards.remove(index);
    Ok((doc, removed))
}

pub fn add_quick_action(mut doc: BoardDocument, emoji: &str, name: &str, stars: i64) -> (BoardDocument, QuickAction) {
    let quick_action = QuickAction {
        id: generate_unique_id(QUICK_ACTION_PREFIX, doc.quick_actions.iter().map(|q| q.id.as_str())),
        emoji: trimmed_or(emoji, DEFAULT_QUICK_ACTION_EMOJI),
        name: trimmed_or(name, DEFAULT_QUICK_ACTION_NAME),
        stars: clamp_positive(stars),
    };
    doc.quick_actions.push(quick_action.clone());
    (doc, quick_action)
}

pub fn update_quick_action(
    mut doc: BoardDocument,
    quick_action_id: &str,
    update: QuickActionUpdate,
) -> Result<(BoardDocument, QuickAction), OperationError> {
    let quick_action = doc
        .quick_actions
        .iter_mut()
        .find(|q| q.id == quick_action_id)
        .ok_or_else(|| OperationError::UnknownQuickAction(quick_action_id.to_string()))?;

    if let Some(emoji) = update.emoji {
        quick_action.emoji = trimmed_or(&emoji, DEFAULT_QUICK_ACTION_EMOJI);
    }
    if let Some(name) = update.name {
        quick_action.name = trimmed_or(&name, DEFAULT_QUICK_ACTION_NAME);
    }
    if let Some(stars) = update.stars {
        quick_action.stars = clamp_positive(stars);
    }

    let updated = quick_action.clone();
    Ok((doc, updated))
}

pub fn remove_quick_action(
    mut doc: BoardDocument,
    quick_action_id: &str,
) -> Result<(BoardDocument, QuickAction), OperationError> {
    let index = doc
        .quick_actions
        .iter()
        .position(|q| q.id == quick_action_id)
        .ok_or_else(|| OperationError::UnknownQuickAction(quick_action_id.to_string()))?;
    let removed = doc.quick_actions.remove(index);
    Ok((doc, removed))
}

pub fn rename_child(mut doc: BoardDocument, name: &str) -> BoardDocument {
    doc.profile.name = trimmed_or(name, DEFAULT_CHILD_NAME);
    doc
}

pub fn change_pin(mut doc: BoardDocument, pin: &str) -> BoardDocument {
    doc.parent_pin = trimmed_or(pin, DEFAULT_PARENT_PIN);
    doc
}

pub fn toggle_sound(mut doc: BoardDocument) -> BoardDocument {
    doc.sound_enabled = !doc.sound_enabled;
    doc
}

/// Throw the board away and start over from the seed document
pub fn reset_board(_doc: BoardDocument) -> BoardDocument {
    default_document()
}
