use serde::{Deserialize, Serialize};

/// Energy rules for when to head for a recharge station and when to leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyPolicy {
    pub board_size: usize,
    pub max_charge: u32,
}

impl EnergyPolicy {
    pub fn new(board_size: usize, max_charge: u32) -> Self {
        Self {
            board_size,
            max_charge,
        }
    }

    /// Reserve required before committing to a gather trip: `floor(board_size * 1.5)`.
    ///
    /// Recharge stations sit near the middle of the board, so the detour back
    /// grows with the board.
    pub fn recharge_threshold(&self) -> u32 {
        (self.board_size * 3 / 2) as u32
    }

    /// Charge to reach before leaving a station: `floor(max_charge * 0.9)`.
    pub fn leave_threshold(&self) -> u32 {
        self.max_charge * 9 / 10
    }
}
