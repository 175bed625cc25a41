//! Cosmetic feedback collaborator.
//!
//! Celebrations and sounds are fired after a mutation succeeds and never feed
//! back into the board.

/// Receiver for fire-and-forget celebration hooks
pub trait Feedback {
    /// Stars were added to the balance
    fn stars_added(&self, amount: u32, sound_enabled: bool);

    /// A reward was redeemed
    fn reward_redeemed(&self, reward_name: &str, sound_enabled: bool);
}

/// Feedback that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn stars_added(&self, _amount: u32, _sound_enabled: bool) {}

    fn reward_redeemed(&self, _reward_name: &str, _sound_enabled: bool) {}
}
