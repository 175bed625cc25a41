//! Seed document used on first run and whenever the stored board is unreadable.

use shared::{BoardDocument, ChildProfile, QuickAction, Reward, DEFAULT_CHILD_NAME, DEFAULT_PARENT_PIN};

use super::ids::{generate_unique_id, QUICK_ACTION_PREFIX, REWARD_PREFIX};

pub const DEFAULT_REWARD_NAME: &str = "New Reward";
pub const DEFAULT_QUICK_ACTION_NAME: &str = "New Action";
pub const DEFAULT_QUICK_ACTION_EMOJI: &str = "⭐";

const SEED_REWARDS: [(&str, u32); 4] = [
    ("Buy a Toy", 10),
    ("Snack Treat", 5),
    ("Watch TV", 8),
    ("Play Date", 12),
];

const SEED_QUICK_ACTIONS: [(&str, &str, u32); 6] = [
    ("📖", "Read a Book", 1),
    ("✏️", "Writing", 1),
    ("📚", "Memorize Lesson", 1),
    ("🧹", "Tidy Toys", 1),
    ("🌙", "Bed on Time", 2),
    ("🍚", "Eat a Full Meal", 2),
];

/// Build a fresh default document with newly generated ids
pub fn default_document() -> BoardDocument {
    let mut rewards: Vec<Reward> = Vec::with_capacity(SEED_REWARDS.len());
    for (name, cost) in SEED_REWARDS {
        let id = generate_unique_id(REWARD_PREFIX, rewards.iter().map(|r| r.id.as_str()));
        rewards.push(Reward {
            id,
            name: name.to_string(),
            cost,
        });
    }

    let mut quick_actions: Vec<QuickAction> = Vec::with_capacity(SEED_QUICK_ACTIONS.len());
    for (emoji, name, stars) in SEED_QUICK_ACTIONS {
        let id = generate_unique_id(QUICK_ACTION_PREFIX, quick_actions.iter().map(|q| q.id.as_str()));
        quick_actions.push(QuickAction {
            id,
            emoji: emoji.to_string(),
            name: name.to_string(),
            stars,
        });
    }

    BoardDocument {
        profile: ChildProfile {
            name: DEFAULT_CHILD_NAME.to_string(),
            stars: 0,
        },
        rewards,
        quick_actions,
        actions: Vec::new(),
        redemptions: Vec::new(),
        sound_enabled: true,
        parent_pin: DEFAULT_PARENT_PIN.to_string(),
    }
}
