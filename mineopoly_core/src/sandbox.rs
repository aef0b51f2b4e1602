//! A small deterministic engine for driving strategies through a match.
//!
//! The real game engine is not part of this crate. The sandbox implements
//! just enough of the rules (movement, mining, pick-ups, charging, selling)
//! to run strategies end to end in tests and from the command line.

use std::collections::HashMap;

use crate::{
    InventoryItem, Position, ResourceKind, Team,
    board::{Board, TileType},
    economy::Economy,
    strategy::{MatchSettings, MinePlayerStrategy, StrategyError, TurnAction},
};

/// Errors that abort a sandbox match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SandboxError {
    #[error("{name} ({team:?}) failed in round {round}: {source}")]
    Strategy {
        name: String,
        team: Team,
        round: u32,
        #[source]
        source: StrategyError,
    },
}

/// Turns of mining needed before a resource tile yields its item.
pub fn mine_turns(kind: ResourceKind) -> u32 {
    match kind {
        ResourceKind::Diamond => 3,
        ResourceKind::Emerald => 2,
        ResourceKind::Ruby => 1,
    }
}

/// Engine-side state of one player.
pub struct Player {
    pub team: Team,
    pub strategy: Box<dyn MinePlayerStrategy>,
    pub location: Position,
    pub charge: u32,
    pub score: u32,
    pub inventory: Vec<InventoryItem>,
}

/// Outcome of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub rounds: u32,
    pub red_score: u32,
    pub blue_score: u32,
    /// The first player to reach the winning score, if any did.
    pub winner: Option<Team>,
}

/// Manages one match between two strategies.
pub struct Sandbox {
    pub board: Board,
    pub settings: MatchSettings,
    pub economy: Economy,
    /// Red at index 0, blue at index 1.
    pub players: [Player; 2],
    mining_progress: HashMap<Position, u32>,
    round: u32,
}

impl Sandbox {
    /// Creates the match and initializes both strategies.
    pub fn new(
        board: Board,
        settings: MatchSettings,
        economy: Economy,
        red: Box<dyn MinePlayerStrategy>,
        blue: Box<dyn MinePlayerStrategy>,
        seed: u64,
    ) -> Self {
        let make_player = |team: Team, strategy: Box<dyn MinePlayerStrategy>| Player {
            team,
            strategy,
            location: board.start_for(team),
            charge: settings.max_charge,
            score: 0,
            inventory: Vec::new(),
        };
        let mut players = [make_player(Team::Red, red), make_player(Team::Blue, blue)];

        for (index, player) in players.iter_mut().enumerate() {
            let other = board.start_for(player.team.opponent());
            let view = board.view(player.location, other, 0);
            player.strategy.initialize(
                &settings,
                &view,
                player.location,
                player.team == Team::Red,
                seed.wrapping_add(index as u64),
            );
        }

        Sandbox {
            board,
            settings,
            economy,
            players,
            mining_progress: HashMap::new(),
            round: 0,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn player(&self, team: Team) -> &Player {
        &self.players[Self::index_of(team)]
    }

    fn index_of(team: Team) -> usize {
        match team {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }

    /// Plays one round: red acts, then blue. Returns the winner, if any.
    pub fn play_round(&mut self) -> Result<Option<Team>, SandboxError> {
        self.round += 1;
        for team in [Team::Red, Team::Blue] {
            self.take_turn(team)?;
            if self.player(team).score >= self.settings.winning_score {
                return Ok(Some(team));
            }
        }
        Ok(None)
    }

    /// Runs until someone wins or `max_rounds` is reached.
    pub fn run(&mut self, max_rounds: u32) -> Result<MatchResult, SandboxError> {
        let mut winner = None;
        while self.round < max_rounds && winner.is_none() {
            winner = self.play_round()?;
        }

        let red_score = self.player(Team::Red).score;
        let blue_score = self.player(Team::Blue).score;
        for player in self.players.iter_mut() {
            player.strategy.end_round(red_score, blue_score);
        }
        tracing::info!(
            rounds = self.round,
            red_score,
            blue_score,
            ?winner,
            "Match finished"
        );

        Ok(MatchResult {
            rounds: self.round,
            red_score,
            blue_score,
            winner,
        })
    }

    fn take_turn(&mut self, team: Team) -> Result<(), SandboxError> {
        let index = Self::index_of(team);
        let other = &self.players[1 - index];
        let (other_location, other_score) = (other.location, other.score);

        let player = &mut self.players[index];
        let view = self.board.view(player.location, other_location, other_score);
        let action = player
            .strategy
            .turn_action(&view, &self.economy, player.charge, team == Team::Red)
            .map_err(|source| SandboxError::Strategy {
                name: player.strategy.name().to_string(),
                team,
                round: self.round,
                source,
            })?;
        tracing::trace!(?team, round = self.round, ?action, "Turn action");

        self.apply_action(index, action);
        self.sell_if_on_market(index);
        Ok(())
    }

    fn apply_action(&mut self, index: usize, action: TurnAction) {
        let max_charge = self.settings.max_charge;
        let max_inventory = self.settings.max_inventory_size;
        let player = &mut self.players[index];
        let location = player.location;

        match action {
            TurnAction::MoveUp | TurnAction::MoveDown | TurnAction::MoveLeft | TurnAction::MoveRight => {
                let Some((dx, dy)) = action.delta() else {
                    return;
                };
                let target = location
                    .x
                    .checked_add_signed(dx)
                    .zip(location.y.checked_add_signed(dy))
                    .map(|(x, y)| Position { x, y });
                match target {
                    Some(target) if player.charge > 0 && self.board.tiles.contains(target) => {
                        player.location = target;
                        player.charge -= 1;
                    }
                    _ => {}
                }
            }
            TurnAction::Mine => {
                let TileType::Resource(kind) = self.board.tiles[location] else {
                    return;
                };
                if player.charge == 0 {
                    return;
                }
                player.charge -= 1;
                let progress = self.mining_progress.entry(location).or_insert(0);
                *progress += 1;
                if *progress >= mine_turns(kind) {
                    self.mining_progress.remove(&location);
                    self.board.tiles[location] = TileType::Empty;
                    self.board
                        .items_on_ground
                        .entry(location)
                        .or_insert_with(|| InventoryItem::new(kind));
                }
            }
            TurnAction::PickUp => {
                if player.inventory.len() >= max_inventory {
                    return;
                }
                if let Some(item) = self.board.items_on_ground.remove(&location) {
                    player.inventory.push(item.clone());
                    player.strategy.on_receive_item(item);
                }
            }
            TurnAction::Wait => {
                if self.board.tiles[location] == TileType::Recharge {
                    let gain = (max_charge / 10).max(1);
                    player.charge = (player.charge + gain).min(max_charge);
                }
            }
        }
    }

    fn sell_if_on_market(&mut self, index: usize) {
        let player = &mut self.players[index];
        if self.board.tiles[player.location] != TileType::Market(player.team)
            || player.inventory.is_empty()
        {
            return;
        }
        let price = self.economy.sell_price(&player.inventory);
        player.score += price;
        player.inventory.clear();
        player.strategy.on_sold_inventory(price);
        tracing::debug!(team = ?player.team, price, score = player.score, "Sold inventory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::load_board_from_string, random::RandomStrategy};

    /// Replays a fixed list of actions, then waits.
    struct Scripted {
        actions: Vec<TurnAction>,
    }

    impl Scripted {
        fn new(actions: Vec<TurnAction>) -> Self {
            Self {
                actions: actions.into_iter().rev().collect(),
            }
        }
    }

    impl MinePlayerStrategy for Scripted {
        fn initialize(&mut self, _: &MatchSettings, _: &crate::board::BoardView, _: Position, _: bool, _: u64) {}

        fn turn_action(
            &mut self,
            _: &crate::board::BoardView,
            _: &Economy,
            _: u32,
            _: bool,
        ) -> Result<TurnAction, StrategyError> {
            Ok(self.actions.pop().unwrap_or(TurnAction::Wait))
        }

        fn on_receive_item(&mut self, _: InventoryItem) {}

        fn on_sold_inventory(&mut self, _: u32) {}

        fn name(&self) -> &str {
            "Scripted"
        }

        fn end_round(&mut self, _: u32, _: u32) {}
    }

    const BOARD: &str = "
        .. .. SB
        MR CH ..
        SR RR ..
    ";

    fn settings() -> MatchSettings {
        MatchSettings {
            board_size: 3,
            max_inventory_size: 5,
            max_charge: 20,
            winning_score: 10_000,
        }
    }

    fn sandbox(red: Vec<TurnAction>) -> Sandbox {
        Sandbox::new(
            load_board_from_string(BOARD).unwrap(),
            settings(),
            Economy::default(),
            Box::new(Scripted::new(red)),
            Box::new(Scripted::new(vec![])),
            1,
        )
    }

    #[test]
    fn mine_pick_up_and_sell() {
        use TurnAction::*;
        let mut sandbox = sandbox(vec![MoveRight, Mine, PickUp, MoveLeft, MoveUp]);
        for _ in 0..5 {
            sandbox.play_round().unwrap();
        }
        let red = sandbox.player(Team::Red);
        assert_eq!(red.location, Position::new(0, 1));
        assert!(red.inventory.is_empty());
        assert_eq!(red.score, Economy::default().price_of(ResourceKind::Ruby));
        assert_eq!(red.charge, 20 - 4);
        assert_eq!(sandbox.board.tiles[Position::new(1, 0)], TileType::Empty);
        assert!(sandbox.board.items_on_ground.is_empty());
    }

    #[test]
    fn moves_off_the_board_are_ignored() {
        let mut sandbox = sandbox(vec![TurnAction::MoveLeft, TurnAction::MoveDown]);
        sandbox.play_round().unwrap();
        sandbox.play_round().unwrap();
        let red = sandbox.player(Team::Red);
        assert_eq!(red.location, Position::new(0, 0));
        assert_eq!(red.charge, 20);
    }

    #[test]
    fn waiting_on_recharge_restores_charge() {
        use TurnAction::*;
        let mut sandbox = sandbox(vec![MoveUp, MoveRight, Wait, Wait]);
        for _ in 0..4 {
            sandbox.play_round().unwrap();
        }
        // Two moves cost 2, two waits give back 2 each, clamped at max.
        assert_eq!(sandbox.player(Team::Red).charge, 20);
        assert_eq!(sandbox.player(Team::Red).location, Position::new(1, 1));
    }

    #[test]
    fn run_stops_at_round_limit() {
        let mut sandbox = Sandbox::new(
            load_board_from_string(BOARD).unwrap(),
            settings(),
            Economy::default(),
            Box::new(RandomStrategy::new(3)),
            Box::new(RandomStrategy::new(4)),
            9,
        );
        let result = sandbox.run(25).unwrap();
        assert_eq!(result.rounds, 25);
        assert_eq!(result.winner, None);
    }
}
