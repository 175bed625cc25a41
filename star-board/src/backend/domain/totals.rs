//! Lifetime totals shown under the board.

use shared::{BoardDocument, BoardTotals};

/// Earned = sum of action-log stars, spent = sum of redemption costs
pub fn board_totals(doc: &BoardDocument) -> BoardTotals {
    BoardTotals {
        earned: doc.actions.iter().map(|a| a.stars).sum(),
        spent: doc.redemptions.iter().map(|r| u64::from(r.cost)).sum(),
        balance: doc.profile.stars,
    }
}
