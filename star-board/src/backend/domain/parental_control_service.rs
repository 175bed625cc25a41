//! Parent gate guarding catalog and profile edits.
//!
//! ```text
//! Locked --submit_pin(match)--> Unlocked --dismiss()--> Locked
//!    ^                                                    |
//!    +------- submit_pin(mismatch) stays Locked ----------+
//! ```
//!
//! The gate is advisory: the PIN is stored in plain text inside the board
//! document and there is no retry limit.

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("Incorrect PIN. Access denied.")]
    IncorrectPin,
    #[error("Parent mode is locked. Enter the PIN first.")]
    Locked,
}

/// Parent gate state machine
#[derive(Debug, Clone)]
pub struct ParentGate {
    state: GateState,
}

impl ParentGate {
    /// Open the parent panel. Always starts locked.
    pub fn open() -> Self {
        Self {
            state: GateState::Locked,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Check a PIN attempt against the stored PIN
    pub fn submit_pin(&mut self, attempt: &str, stored_pin: &str) -> Result<(), GateError> {
        let attempt = attempt.trim();
        info!("Validating parent PIN (length: {})", attempt.len());

        if attempt == stored_pin {
            info!("Parent gate unlocked");
            self.state = GateState::Unlocked;
            Ok(())
        } else {
            info!("Parent PIN rejected");
            self.state = GateState::Locked;
            Err(GateError::IncorrectPin)
        }
    }

    /// Close the parent panel
    pub fn dismiss(&mut self) {
        if self.is_unlocked() {
            info!("Parent gate locked");
        }
        self.state = GateState::Locked;
    }

    /// Fail with [`GateError::Locked`] unless the gate is open
    pub fn ensure_unlocked(&self) -> Result<(), GateError> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(GateError::Locked)
        }
    }
}

impl Default for ParentGate {
    fn default() -> Self {
        Self::open()
    }
}
