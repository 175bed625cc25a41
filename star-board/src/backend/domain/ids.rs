//! Short random identifiers for rewards, quick actions and log entries.

use std::collections::HashSet;
use uuid::Uuid;

const SHORT_ID_LEN: usize = 10;

pub const REWARD_PREFIX: &str = "reward";
pub const QUICK_ACTION_PREFIX: &str = "quick";
pub const ACTION_PREFIX: &str = "action";
pub const REDEMPTION_PREFIX: &str = "redemption";

/// Generate an id of the form `<prefix>::<10 hex chars>`
pub fn generate_id(prefix: &str) -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(SHORT_ID_LEN);
    format!("{}::{}", prefix, suffix)
}

/// Generate an id that does not collide with any of `existing`
pub fn generate_unique_id<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    loop {
        let id = generate_id(prefix);
        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}
