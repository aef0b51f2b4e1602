use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    InventoryItem, Position,
    board::BoardView,
    economy::Economy,
    strategy::{MatchSettings, MinePlayerStrategy, StrategyError, TurnAction},
};

/// A baseline opponent that picks any action uniformly at random.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MinePlayerStrategy for RandomStrategy {
    fn initialize(
        &mut self,
        _settings: &MatchSettings,
        _starting_board: &BoardView,
        _start_location: Position,
        _is_red_player: bool,
        seed: u64,
    ) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn turn_action(
        &mut self,
        _board: &BoardView,
        _economy: &Economy,
        _current_charge: u32,
        _is_red_turn: bool,
    ) -> Result<TurnAction, StrategyError> {
        let index = self.rng.random_range(0..TurnAction::ALL.len());
        Ok(TurnAction::ALL[index])
    }

    fn on_receive_item(&mut self, _item: InventoryItem) {}

    fn on_sold_inventory(&mut self, _total_sell_price: u32) {}

    fn name(&self) -> &str {
        "RandomStrategy"
    }

    fn end_round(&mut self, _red_points: u32, _blue_points: u32) {}
}
