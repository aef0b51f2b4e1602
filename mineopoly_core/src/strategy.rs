use serde::{Deserialize, Serialize};

use crate::{InventoryItem, Position, board::BoardView, economy::Economy};

/// Represents the single action a player takes in a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Mine,
    PickUp,
    /// Do nothing. On a recharge tile this charges the player.
    Wait,
}

impl TurnAction {
    pub const ALL: [TurnAction; 7] = [
        TurnAction::MoveUp,
        TurnAction::MoveDown,
        TurnAction::MoveLeft,
        TurnAction::MoveRight,
        TurnAction::Mine,
        TurnAction::PickUp,
        TurnAction::Wait,
    ];

    /// Maps a unit step to its move action. `None` for anything but the four unit steps.
    pub fn from_delta(dx: isize, dy: isize) -> Option<TurnAction> {
        match (dx, dy) {
            (1, 0) => Some(TurnAction::MoveRight),
            (-1, 0) => Some(TurnAction::MoveLeft),
            (0, 1) => Some(TurnAction::MoveUp),
            (0, -1) => Some(TurnAction::MoveDown),
            _ => None,
        }
    }

    /// The `(dx, dy)` a move action applies, `None` for non-moves.
    pub fn delta(&self) -> Option<(isize, isize)> {
        match self {
            TurnAction::MoveRight => Some((1, 0)),
            TurnAction::MoveLeft => Some((-1, 0)),
            TurnAction::MoveUp => Some((0, 1)),
            TurnAction::MoveDown => Some((0, -1)),
            TurnAction::Mine | TurnAction::PickUp | TurnAction::Wait => None,
        }
    }
}

/// Match-wide settings handed to every strategy at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    pub board_size: usize,
    pub max_inventory_size: usize,
    pub max_charge: u32,
    pub winning_score: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        MatchSettings {
            board_size: 26,
            max_inventory_size: 5,
            max_charge: 80,
            winning_score: 1000,
        }
    }
}

/// Contract violations a strategy reports instead of producing a wrong move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    #[error("Strategy asked for a turn action before initialize")]
    NotInitialized,
    #[error("Route step from {from:?} to {to:?} is not a single unit move")]
    InvalidStep { from: Position, to: Position },
}

/// Trait defining the behavior of a Mineopoly player.
///
/// The engine calls `initialize` once, then `turn_action` every turn, and the
/// callbacks whenever the matching event happens.
pub trait MinePlayerStrategy {
    fn initialize(
        &mut self,
        settings: &MatchSettings,
        starting_board: &BoardView,
        start_location: Position,
        is_red_player: bool,
        seed: u64,
    );

    /// Decides this turn's action. `&mut self` lets the strategy keep its own state.
    fn turn_action(
        &mut self,
        board: &BoardView,
        economy: &Economy,
        current_charge: u32,
        is_red_turn: bool,
    ) -> Result<TurnAction, StrategyError>;

    fn on_receive_item(&mut self, item: InventoryItem);

    fn on_sold_inventory(&mut self, total_sell_price: u32);

    fn name(&self) -> &str;

    fn end_round(&mut self, red_points: u32, blue_points: u32);
}
