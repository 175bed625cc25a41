//! Plain-text rendering of the board.
//!
//! Every function returns a `String` so the output can be checked in tests;
//! the caller decides where to print it.

use chrono::{DateTime, Local, Utc};
use shared::{BoardDocument, BoardStatus, NextRewardProgress, QuickAction, Reward};
use std::fmt::Write;

const GRID_MIN_CELLS: u32 = 10;
const GRID_MAX_CELLS: u32 = 30;
const GRID_ROW: u32 = 10;
const BAR_WIDTH: usize = 20;

/// Number of cells in the star grid for a balance
pub fn grid_cells(stars: u32) -> u32 {
    stars.clamp(GRID_MIN_CELLS, GRID_MAX_CELLS)
}

/// Star grid, ten cells per row. Balances above the grid size fill every cell.
pub fn star_grid(stars: u32) -> String {
    let cells = grid_cells(stars);
    let mut out = String::new();
    for i in 0..cells {
        out.push(if i < stars { '★' } else { '☆' });
        if (i + 1) % GRID_ROW == 0 && i + 1 < cells {
            out.push('\n');
        } else if i + 1 < cells {
            out.push(' ');
        }
    }
    out
}

pub fn progress_bar(pct: u8) -> String {
    let filled = (usize::from(pct.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}] {:>3}%", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled), pct)
}

pub fn progress_line(progress: &NextRewardProgress) -> String {
    if progress.target_id.is_none() {
        return progress.label.clone();
    }
    if progress.can_redeem {
        format!("{} is ready to redeem!", progress.label)
    } else {
        let plural = if progress.need == 1 { "" } else { "s" };
        format!("{} more star{} for {}", progress.need, plural, progress.label)
    }
}

pub fn render_status(status: &BoardStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}'s Star Board", status.profile.name);
    let _ = writeln!(out, "Stars: {}", status.profile.stars);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", star_grid(status.profile.stars));
    let _ = writeln!(out);
    let _ = writeln!(out, "Next reward: {}", progress_line(&status.progress));
    let _ = writeln!(out, "{}", progress_bar(status.progress.pct));
    let _ = writeln!(
        out,
        "Earned {} / Spent {} / Balance {}",
        status.totals.earned, status.totals.spent, status.totals.balance
    );
    let _ = write!(
        out,
        "{} rewards, {} quick actions, sound {}",
        status.reward_count,
        status.quick_action_count,
        if status.sound_enabled { "on" } else { "off" }
    );
    out
}

/// Reward list, cheapest first, marking what the balance can buy
pub fn render_rewards(rewards: &[Reward], stars: u32) -> String {
    if rewards.is_empty() {
        return "No rewards configured".to_string();
    }
    let mut sorted: Vec<&Reward> = rewards.iter().collect();
    sorted.sort_by_key(|r| r.cost);

    let mut lines = Vec::with_capacity(sorted.len());
    for reward in sorted {
        let mark = if reward.cost <= stars { "✓" } else { " " };
        lines.push(format!("{} {:>3} ★  {}  ({})", mark, reward.cost, reward.name, reward.id));
    }
    lines.join("\n")
}

pub fn render_quick_actions(quick_actions: &[QuickAction]) -> String {
    if quick_actions.is_empty() {
        return "No quick actions configured".to_string();
    }
    quick_actions
        .iter()
        .map(|q| format!("{} {}  +{}  ({})", q.emoji, q.name, q.stars, q.id))
        .collect::<Vec<_>>()
        .join("\n")
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Both logs, newest first, at most `limit` entries each
pub fn render_history(doc: &BoardDocument, limit: Option<usize>) -> String {
    let limit = limit.unwrap_or(usize::MAX);
    let mut out = String::new();

    let _ = writeln!(out, "Actions");
    if doc.actions.is_empty() {
        let _ = writeln!(out, "  (none yet)");
    }
    for action in doc.actions.iter().take(limit) {
        let _ = writeln!(out, "  {}  {:+}  {}", local_time(action.timestamp), action.stars, action.description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Redemptions");
    if doc.redemptions.is_empty() {
        let _ = write!(out, "  (none yet)");
    }
    let shown: Vec<String> = doc
        .redemptions
        .iter()
        .take(limit)
        .map(|r| format!("  {}  -{}  {}", local_time(r.timestamp), r.cost, r.reward_name))
        .collect();
    out.push_str(&shown.join("\n"));
    out
}
