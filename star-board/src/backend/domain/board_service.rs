//! Star board service.
//!
//! Owns the current board and applies every mutation in three steps: run the
//! pure operation on a copy, swap the copy in, persist the whole document.
//! A refused operation leaves both the in-memory and the stored board as they
//! were.
//!
//! Parent-only operations take the [`ParentGate`] and fail with
//! [`GateError::Locked`] unless it has been unlocked.

use anyhow::Result;
use chrono::Utc;
use log::info;
use shared::{BoardDocument, BoardStatus, NextRewardProgress, BoardTotals};

use super::commands::{
    ImportResult, QuickActionResult, RedeemRewardResult, RewardResult, StarsChangedResult,
};
use super::document_store::DocumentStore;
use super::export_service::{export_document, export_history_csv, validate_import};
use super::feedback::Feedback;
use super::operations::{self, OperationError, QuickActionUpdate, RewardUpdate};
use super::parental_control_service::{GateError, ParentGate};
use super::progress::compute_next;
use super::totals::board_totals;
use crate::backend::storage::DocumentStorage;

pub struct StarBoardService<S: DocumentStorage> {
    store: DocumentStore<S>,
    document: BoardDocument,
    feedback: Box<dyn Feedback>,
    last_save_ok: bool,
}

impl<S: DocumentStorage> StarBoardService<S> {
    /// Load the board from `storage` (or start from the default board)
    pub fn open(storage: S, feedback: Box<dyn Feedback>) -> Self {
        let store = DocumentStore::new(storage);
        let document = store.load();
        Self {
            store,
            document,
            feedback,
            last_save_ok: true,
        }
    }

    pub fn document(&self) -> &BoardDocument {
        &self.document
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// False if the most recent write to storage failed
    pub fn last_save_ok(&self) -> bool {
        self.last_save_ok
    }

    pub fn progress(&self) -> NextRewardProgress {
        compute_next(self.document.profile.stars, &self.document.rewards)
    }

    pub fn totals(&self) -> BoardTotals {
        board_totals(&self.document)
    }

    pub fn status(&self) -> BoardStatus {
        BoardStatus {
            profile: self.document.profile.clone(),
            progress: self.progress(),
            totals: self.totals(),
            sound_enabled: self.document.sound_enabled,
            reward_count: self.document.rewards.len(),
            quick_action_count: self.document.quick_actions.len(),
        }
    }

    fn commit(&mut self, document: BoardDocument) {
        self.document = document;
        self.last_save_ok = self.store.save(&self.document);
    }

    fn stars_changed(&self, delta: i64, success_message: String) -> StarsChangedResult {
        StarsChangedResult {
            delta,
            balance: self.document.profile.stars,
            progress: self.progress(),
            success_message,
        }
    }

    // ------------------------------------------------------------------
    // Child-facing operations
    // ------------------------------------------------------------------

    /// Add `n` stars (negative to deduct) without logging
    pub fn add_stars(&mut self, n: i64) -> StarsChangedResult {
        let next = operations::add_stars(self.document.clone(), n);
        self.commit(next);
        self.stars_changed(n, format!("Balance is now {} stars", self.document.profile.stars))
    }

    /// Append an action log entry without touching the balance
    pub fn log_action(&mut self, description: &str, stars: i64) {
        let next = operations::log_action(self.document.clone(), description, stars, Utc::now());
        self.commit(next);
    }

    /// The big "add a star" button
    pub fn add_star(&mut self) -> StarsChangedResult {
        info!("Adding one star for {}", self.document.profile.name);
        let next = operations::add_star(self.document.clone(), Utc::now());
        self.commit(next);
        self.feedback.stars_added(1, self.document.sound_enabled);
        self.stars_changed(1, "Added 1 star".to_string())
    }

    pub fn award_quick_action(&mut self, quick_action_id: &str) -> Result<StarsChangedResult> {
        let (next, quick_action) =
            operations::award_quick_action(self.document.clone(), quick_action_id, Utc::now())?;
        info!("Quick action '{}' awarded {} stars", quick_action.name, quick_action.stars);
        self.commit(next);
        self.feedback.stars_added(quick_action.stars, self.document.sound_enabled);
        Ok(self.stars_changed(
            i64::from(quick_action.stars),
            format!("{} {}: +{} stars", quick_action.emoji, quick_action.name, quick_action.stars),
        ))
    }

    /// Exchange stars for a reward. Refused with
    /// [`OperationError::InsufficientBalance`] when the balance is too low.
    pub fn redeem_reward(&mut self, reward_id: &str) -> Result<RedeemRewardResult> {
        let (next, redemption) = operations::redeem_reward(self.document.clone(), reward_id, Utc::now())?;
        info!("Redeemed '{}' for {} stars", redemption.reward_name, redemption.cost);
        self.commit(next);
        self.feedback
            .reward_redeemed(&redemption.reward_name, self.document.sound_enabled);

        let success_message = format!("Redeemed {} for {} stars", redemption.reward_name, redemption.cost);
        Ok(RedeemRewardResult {
            redemption,
            balance: self.document.profile.stars,
            progress: self.progress(),
            success_message,
        })
    }

    /// Flip sound on or off and return the new setting
    pub fn toggle_sound(&mut self) -> bool {
        let next = operations::toggle_sound(self.document.clone());
        self.commit(next);
        info!("Sound effects {}", if self.document.sound_enabled { "on" } else { "off" });
        self.document.sound_enabled
    }

    pub fn export_document(&self) -> Result<Vec<u8>> {
        export_document(&self.document)
    }

    pub fn export_history_csv(&self) -> Result<String> {
        export_history_csv(&self.document)
    }

    // ------------------------------------------------------------------
    // Parent-only operations
    // ------------------------------------------------------------------

    /// Unlock `gate` with a PIN attempt checked against this board's PIN
    pub fn unlock(&self, gate: &mut ParentGate, pin_attempt: &str) -> Result<(), GateError> {
        gate.submit_pin(pin_attempt, &self.document.parent_pin)
    }

    pub fn adjust_stars(&mut self, gate: &ParentGate, n: i64, reason: &str) -> Result<StarsChangedResult> {
        gate.ensure_unlocked()?;
        let next = operations::adjust_stars(self.document.clone(), n, reason, Utc::now());
        self.commit(next);
        info!("Manual adjustment of {:+} stars", n);
        if n > 0 {
            self.feedback.stars_added(n.min(i64::from(u32::MAX)) as u32, self.document.sound_enabled);
        }
        Ok(self.stars_changed(n, format!("Adjusted balance by {:+} stars", n)))
    }

    pub fn rename_child(&mut self, gate: &ParentGate, name: &str) -> Result<String> {
        gate.ensure_unlocked()?;
        let next = operations::rename_child(self.document.clone(), name);
        self.commit(next);
        info!("Child renamed to {}", self.document.profile.name);
        Ok(self.document.profile.name.clone())
    }

    pub fn change_pin(&mut self, gate: &ParentGate, pin: &str) -> Result<()> {
        gate.ensure_unlocked()?;
        let next = operations::change_pin(self.document.clone(), pin);
        self.commit(next);
        info!("Parent PIN changed");
        Ok(())
    }

    pub fn add_reward(&mut self, gate: &ParentGate, name: &str, cost: i64) -> Result<RewardResult> {
        gate.ensure_unlocked()?;
        let (next, reward) = operations::add_reward(self.document.clone(), name, cost);
        self.commit(next);
        info!("Added reward {} ({})", reward.name, reward.id);
        let success_message = format!("Added reward {} for {} stars", reward.name, reward.cost);
        Ok(RewardResult { reward, success_message })
    }

    pub fn update_reward(&mut self, gate: &ParentGate, reward_id: &str, update: RewardUpdate) -> Result<RewardResult> {
        gate.ensure_unlocked()?;
        let (next, reward) = operations::update_reward(self.document.clone(), reward_id, update)?;
        self.commit(next);
        info!("Updated reward {}", reward.id);
        let success_message = format!("Updated reward {}", reward.name);
        Ok(RewardResult { reward, success_message })
    }

    pub fn remove_reward(&mut self, gate: &ParentGate, reward_id: &str) -> Result<RewardResult> {
        gate.ensure_unlocked()?;
        let (next, reward) = operations::remove_reward(self.document.clone(), reward_id)?;
        self.commit(next);
        info!("Removed reward {}", reward.id);
        let success_message = format!("Removed reward {}", reward.name);
        Ok(RewardResult { reward, success_message })
    }

    pub fn add_quick_action(
        &mut self,
        gate: &ParentGate,
        emoji: &str,
        name: &str,
        stars: i64,
    ) -> Result<QuickActionResult> {
        gate.ensure_unlocked()?;
        let (next, quick_action) = operations::add_quick_action(self.document.clone(), emoji, name, stars);
        self.commit(next);
        info!("Added quick action {} ({})", quick_action.name, quick_action.id);
        let success_message = format!("Added quick action {} {}", quick_action.emoji, quick_action.name);
        Ok(QuickActionResult { quick_action, success_message })
    }

    pub fn update_quick_action(
        &mut self,
        gate: &ParentGate,
        quick_action_id: &str,
        update: QuickActionUpdate,
    ) -> Result<QuickActionResult> {
        gate.ensure_unlocked()?;
        let (next, quick_action) =
            operations::update_quick_action(self.document.clone(), quick_action_id, update)?;
        self.commit(next);
        info!("Updated quick action {}", quick_action.id);
        let success_message = format!("Updated quick action {}", quick_action.name);
        Ok(QuickActionResult { quick_action, success_message })
    }

    pub fn remove_quick_action(&mut self, gate: &ParentGate, quick_action_id: &str) -> Result<QuickActionResult> {
        gate.ensure_unlocked()?;
        let (next, quick_action) = operations::remove_quick_action(self.document.clone(), quick_action_id)?;
        self.commit(next);
        info!("Removed quick action {}", quick_action.id);
        let success_message = format!("Removed quick action {}", quick_action.name);
        Ok(QuickActionResult { quick_action, success_message })
    }

    /// Replace the whole board with a validated backup
    pub fn import_document(&mut self, gate: &ParentGate, bytes: &[u8]) -> Result<ImportResult> {
        gate.ensure_unlocked()?;
        let imported = validate_import(bytes)?;
        self.commit(imported);

        let doc = &self.document;
        info!("Imported board for {}", doc.profile.name);
        Ok(ImportResult {
            child_name: doc.profile.name.clone(),
            reward_count: doc.rewards.len(),
            quick_action_count: doc.quick_actions.len(),
            action_count: doc.actions.len(),
            redemption_count: doc.redemptions.len(),
            success_message: "Import successful!".to_string(),
        })
    }

    /// Start over from the default board
    pub fn reset_board(&mut self, gate: &ParentGate) -> Result<()> {
        gate.ensure_unlocked()?;
        let next = operations::reset_board(self.document.clone());
        self.commit(next);
        info!("Board reset to defaults");
        Ok(())
    }
}

/// Pull a domain error back out of an `anyhow::Error`, if it is one
pub fn operation_error(err: &anyhow::Error) -> Option<&OperationError> {
    err.downcast_ref::<OperationError>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::defaults::default_document;
    use crate::backend::domain::export_service::ImportError;
    use crate::backend::domain::feedback::SilentFeedback;
    use crate::backend::storage::json::test_utils::{MemoryStorage, TestEnvironment};
    use shared::Reward;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn service_with(stars: u32, costs: &[u32]) -> StarBoardService<MemoryStorage> {
        let mut doc = default_document();
        doc.profile.stars = stars;
        doc.rewards = costs
            .iter()
            .enumerate()
            .map(|(i, cost)| Reward {
                id: format!("reward::{}", i),
                name: format!("Reward {}", i),
                cost: *cost,
            })
            .collect();
        StarBoardService::open(MemoryStorage::with_document(doc), Box::new(SilentFeedback))
    }

    fn unlocked(service: &StarBoardService<MemoryStorage>) -> ParentGate {
        let mut gate = ParentGate::open();
        service.unlock(&mut gate, "1234").unwrap();
        gate
    }

    #[derive(Default, Clone)]
    struct RecordingFeedback {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Feedback for RecordingFeedback {
        fn stars_added(&self, amount: u32, sound_enabled: bool) {
            self.events.borrow_mut().push(format!("stars:{}:{}", amount, sound_enabled));
        }

        fn reward_redeemed(&self, reward_name: &str, sound_enabled: bool) {
            self.events.borrow_mut().push(format!("redeem:{}:{}", reward_name, sound_enabled));
        }
    }

    #[test]
    fn test_open_empty_storage_uses_default_board() {
        let service = StarBoardService::open(MemoryStorage::default(), Box::new(SilentFeedback));
        assert_eq!(service.document().profile.name, "Child");
        assert_eq!(service.storage().write_count(), 0);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut service = service_with(0, &[5]);

        service.add_star();
        service.add_stars(2);
        service.log_action("Note", 0);
        service.toggle_sound();

        assert_eq!(service.storage().write_count(), 4);
        assert_eq!(service.storage().stored().as_ref(), Some(service.document()));
    }

    #[test]
    fn test_add_star_reports_progress() {
        let mut service = service_with(5, &[5, 8, 10, 12]);

        let result = service.add_star();

        assert_eq!(result.balance, 6);
        assert_eq!(result.progress.need, 2);
        assert_eq!(result.progress.pct, 33);
        assert_eq!(service.document().actions.len(), 1);
    }

    #[test]
    fn test_redeem_exact_balance() {
        let mut service = service_with(10, &[10]);

        let result = service.redeem_reward("reward::0").unwrap();

        assert_eq!(result.balance, 0);
        assert_eq!(result.redemption.cost, 10);
        assert_eq!(service.document().redemptions.len(), 1);
        assert_eq!(service.storage().stored().unwrap().profile.stars, 0);
    }

    #[test]
    fn test_redeem_refused_leaves_board_untouched() {
        let mut service = service_with(3, &[10]);
        let before = service.document().clone();

        let err = service.redeem_reward("reward::0").unwrap_err();

        assert_eq!(
            operation_error(&err),
            Some(&OperationError::InsufficientBalance { cost: 10, balance: 3 })
        );
        assert_eq!(service.document(), &before);
        assert_eq!(service.storage().write_count(), 0);
    }

    #[test]
    fn test_feedback_fires_after_success_only() {
        let feedback = RecordingFeedback::default();
        let events = feedback.events.clone();
        let mut doc = default_document();
        doc.sound_enabled = false;
        let mut service = StarBoardService::open(MemoryStorage::with_document(doc), Box::new(feedback));
        let cheapest = service.document().rewards.iter().min_by_key(|r| r.cost).unwrap().id.clone();

        let _ = service.redeem_reward(&cheapest);
        for _ in 0..5 {
            service.add_star();
        }
        service.redeem_reward(&cheapest).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], "stars:1:false");
        assert!(events[5].starts_with("redeem:Snack Treat"));
    }

    #[test]
    fn test_parent_operations_require_unlocked_gate() {
        let mut service = service_with(0, &[5]);
        let gate = ParentGate::open();

        let err = service.add_reward(&gate, "Bike", 30).unwrap_err();
        assert_eq!(err.downcast_ref::<GateError>(), Some(&GateError::Locked));
        assert!(service.rename_child(&gate, "Emma").is_err());
        assert!(service.reset_board(&gate).is_err());
        assert_eq!(service.storage().write_count(), 0);
    }

    #[test]
    fn test_wrong_pin_keeps_gate_locked() {
        let service = service_with(0, &[]);
        let mut gate = ParentGate::open();

        assert_eq!(service.unlock(&mut gate, "0000"), Err(GateError::IncorrectPin));
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn test_catalog_and_profile_edits() {
        let mut service = service_with(0, &[]);
        let gate = unlocked(&service);

        let added = service.add_reward(&gate, "Bike", 0).unwrap();
        assert_eq!(added.reward.cost, 1);

        let update = RewardUpdate { name: None, cost: Some(30) };
        let updated = service.update_reward(&gate, &added.reward.id, update).unwrap();
        assert_eq!(updated.reward.cost, 30);

        let quick = service.add_quick_action(&gate, "🦷", "Brush Teeth", 2).unwrap();
        service.award_quick_action(&quick.quick_action.id).unwrap();
        assert_eq!(service.document().profile.stars, 2);

        service.remove_quick_action(&gate, &quick.quick_action.id).unwrap();
        service.remove_reward(&gate, &added.reward.id).unwrap();
        assert!(service.document().rewards.is_empty());

        assert_eq!(service.rename_child(&gate, "  ").unwrap(), "Child");
        service.change_pin(&gate, "2468").unwrap();
        assert_eq!(service.document().parent_pin, "2468");

        let mut fresh_gate = ParentGate::open();
        assert!(service.unlock(&mut fresh_gate, "1234").is_err());
        assert!(service.unlock(&mut fresh_gate, "2468").is_ok());
    }

    #[test]
    fn test_adjust_stars_clamps_and_logs() {
        let mut service = service_with(2, &[]);
        let gate = unlocked(&service);

        let result = service.adjust_stars(&gate, -5, "Oops").unwrap();

        assert_eq!(result.balance, 0);
        assert_eq!(service.document().actions[0].stars, -5);
    }

    #[test]
    fn test_import_replaces_board() {
        let mut source = service_with(0, &[]);
        let gate = unlocked(&source);
        source.rename_child(&gate, "Emma").unwrap();
        source.add_star();
        let backup = source.export_document().unwrap();

        let mut target = service_with(40, &[1, 2, 3]);
        let gate = unlocked(&target);
        let result = target.import_document(&gate, &backup).unwrap();

        assert_eq!(result.child_name, "Emma");
        assert_eq!(target.document(), source.document());
        assert_eq!(target.storage().stored().as_ref(), Some(source.document()));
    }

    #[test]
    fn test_invalid_import_changes_nothing() {
        let mut service = service_with(7, &[5]);
        let gate = unlocked(&service);
        let before = service.document().clone();

        let err = service
            .import_document(&gate, br#"{"profile": {"name": "X", "stars": 1}, "rewards": []}"#)
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<ImportError>(), Some(ImportError::MissingField("actions"))));
        assert_eq!(service.document(), &before);
        assert_eq!(service.storage().write_count(), 0);
    }

    #[test]
    fn test_failed_write_keeps_in_memory_board() {
        let mut service = StarBoardService::open(MemoryStorage::failing(), Box::new(SilentFeedback));

        let result = service.add_star();

        assert_eq!(result.balance, 1);
        assert!(!service.last_save_ok());
    }

    #[test]
    fn test_reload_from_disk() {
        let env = TestEnvironment::new().unwrap();
        {
            let mut service = StarBoardService::open(env.document_repository(), Box::new(SilentFeedback));
            service.add_star();
            service.add_star();
        }

        let service = StarBoardService::open(env.document_repository(), Box::new(SilentFeedback));
        assert_eq!(service.document().profile.stars, 2);
        assert_eq!(service.totals().earned, 2);
    }

    #[test]
    fn test_reset_board() {
        let mut service = service_with(9, &[1]);
        let gate = unlocked(&service);

        service.reset_board(&gate).unwrap();

        assert_eq!(service.document().profile.stars, 0);
        assert_eq!(service.document().rewards.len(), 4);
    }
}
