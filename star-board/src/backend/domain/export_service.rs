//! Backup export and import.
//!
//! The export file is the board document itself, pretty-printed. Imports go
//! through [`validate_import`], which checks the required collections, merges
//! the file over a fresh default document and repairs catalog values, so a
//! partially-shaped file still yields a complete board.

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    ActionLogEntry, BoardDocument, ChildProfile, QuickAction, RedemptionLogEntry, Reward,
    DEFAULT_CHILD_NAME, DEFAULT_PARENT_PIN,
};
use std::collections::HashSet;

use super::defaults::default_document;
use super::ids::{generate_unique_id, ACTION_PREFIX, QUICK_ACTION_PREFIX, REDEMPTION_PREFIX, REWARD_PREFIX};

/// Top-level fields an import file must carry
pub const REQUIRED_IMPORT_FIELDS: [&str; 4] = ["profile", "rewards", "actions", "redemptions"];

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("File is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("File does not contain a JSON object")]
    NotAnObject,
    #[error("File is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("File does not match the board format: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// Shape accepted on import. Optional fields fall back to the default board.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedBoard {
    profile: ChildProfile,
    rewards: Vec<Reward>,
    #[serde(default)]
    quick_actions: Option<Vec<QuickAction>>,
    actions: Vec<ActionLogEntry>,
    redemptions: Vec<RedemptionLogEntry>,
    #[serde(default)]
    sound_enabled: Option<bool>,
    #[serde(default)]
    parent_pin: Option<String>,
}

/// Serialize the whole board as pretty-printed UTF-8 JSON
pub fn export_document(doc: &BoardDocument) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    info!(
        "Exported board: {} rewards, {} actions, {} redemptions ({} bytes)",
        doc.rewards.len(),
        doc.actions.len(),
        doc.redemptions.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Check an uploaded backup and turn it into a complete board document
pub fn validate_import(bytes: &[u8]) -> Result<BoardDocument, ImportError> {
    let value: Value = serde_json::from_slice(bytes).map_err(ImportError::Parse)?;
    let Value::Object(fields) = value else {
        return Err(ImportError::NotAnObject);
    };

    for field in REQUIRED_IMPORT_FIELDS {
        match fields.get(field) {
            None | Some(Value::Null) => return Err(ImportError::MissingField(field)),
            Some(_) => {}
        }
    }

    let imported: ImportedBoard =
        serde_json::from_value(Value::Object(fields)).map_err(ImportError::InvalidShape)?;

    let defaults = default_document();
    let doc = BoardDocument {
        profile: imported.profile,
        rewards: imported.rewards,
        quick_actions: imported.quick_actions.unwrap_or(defaults.quick_actions),
        actions: imported.actions,
        redemptions: imported.redemptions,
        sound_enabled: imported.sound_enabled.unwrap_or(defaults.sound_enabled),
        parent_pin: imported.parent_pin.unwrap_or(defaults.parent_pin),
    };

    Ok(repair(doc))
}

/// Re-establish document invariants on data that came from outside
fn repair(mut doc: BoardDocument) -> BoardDocument {
    if doc.profile.name.trim().is_empty() {
        doc.profile.name = DEFAULT_CHILD_NAME.to_string();
    }
    if doc.parent_pin.trim().is_empty() {
        doc.parent_pin = DEFAULT_PARENT_PIN.to_string();
    }

    for reward in &mut doc.rewards {
        reward.cost = reward.cost.max(1);
    }
    for quick_action in &mut doc.quick_actions {
        quick_action.stars = quick_action.stars.max(1);
    }

    reissue_duplicate_ids(&mut doc.rewards, REWARD_PREFIX, |r| &mut r.id);
    reissue_duplicate_ids(&mut doc.quick_actions, QUICK_ACTION_PREFIX, |q| &mut q.id);
    reissue_duplicate_ids(&mut doc.actions, ACTION_PREFIX, |a| &mut a.id);
    reissue_duplicate_ids(&mut doc.redemptions, REDEMPTION_PREFIX, |r| &mut r.id);

    doc
}

fn reissue_duplicate_ids<T>(items: &mut [T], prefix: &str, id_of: impl Fn(&mut T) -> &mut String) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut all: Vec<String> = items.iter_mut().map(|item| id_of(item).clone()).collect();

    for item in items.iter_mut() {
        let id = id_of(item);
        if seen.insert(id.clone()) {
            continue;
        }
        let fresh = generate_unique_id(prefix, all.iter().map(String::as_str));
        warn!("Duplicate id {} in imported board, reissued as {}", id, fresh);
        all.push(fresh.clone());
        seen.insert(fresh.clone());
        *id = fresh;
    }
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    kind: &'a str,
    timestamp: String,
    description: &'a str,
    stars: i64,
}

/// Export both logs as CSV, newest first. Redemptions show as negative stars.
pub fn export_history_csv(doc: &BoardDocument) -> Result<String> {
    let mut rows: Vec<(chrono::DateTime<chrono::Utc>, HistoryRow<'_>)> = Vec::new();

    for action in &doc.actions {
        rows.push((
            action.timestamp,
            HistoryRow {
                kind: "action",
                timestamp: action.timestamp.to_rfc3339(),
                description: &action.description,
                stars: action.stars,
            },
        ));
    }
    for redemption in &doc.redemptions {
        rows.push((
            redemption.timestamp,
            HistoryRow {
                kind: "redemption",
                timestamp: redemption.timestamp.to_rfc3339(),
                description: &redemption.reward_name,
                stars: -i64::from(redemption.cost),
            },
        ));
    }
    rows.sort_by(|a, b| b.0.cmp(&a.0));

    let mut writer = csv::Writer::from_writer(Vec::new());
    for (_, row) in &rows {
        writer.serialize(row)?;
    }
    if rows.is_empty() {
        writer.write_record(["kind", "timestamp", "description", "stars"])?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("Failed to finish CSV: {}", e))?;

    info!("Exported {} history rows as CSV", rows.len());
    Ok(String::from_utf8(bytes)?)
}
