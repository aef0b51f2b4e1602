use crate::{
    InventoryItem, Position, Team,
    board::{BoardSnapshot, BoardView, TileType},
    economy::Economy,
    energy::EnergyPolicy,
    planner::TaskPlanner,
    selector::select_action,
    state::{AgentState, Landmarks, Task},
    strategy::{MatchSettings, MinePlayerStrategy, StrategyError, TurnAction},
};

/// Task-driven strategy: gather until full or tired, sell at the own market,
/// recharge when energy runs low.
#[derive(Debug, Clone)]
pub struct SmartStrategy {
    team: Team,
    policy: EnergyPolicy,
    landmarks: Landmarks,
    state: Option<AgentState>,
}

impl Default for SmartStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SmartStrategy {
    pub fn new() -> Self {
        let settings = MatchSettings::default();
        SmartStrategy {
            team: Team::Red,
            policy: EnergyPolicy::new(settings.board_size, settings.max_charge),
            landmarks: Landmarks::default(),
            state: None,
        }
    }

    /// The agent state, once initialized.
    pub fn state(&self) -> Option<&AgentState> {
        self.state.as_ref()
    }

    pub fn policy(&self) -> EnergyPolicy {
        self.policy
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }
}

impl MinePlayerStrategy for SmartStrategy {
    fn initialize(
        &mut self,
        settings: &MatchSettings,
        starting_board: &BoardView,
        start_location: Position,
        is_red_player: bool,
        _seed: u64,
    ) {
        self.team = Team::from_is_red(is_red_player);
        self.policy = EnergyPolicy::new(settings.board_size, settings.max_charge);

        let own_market = TileType::Market(self.team);
        self.landmarks = Landmarks {
            markets: starting_board.find_tiles(|tile| *tile == own_market),
            recharge_stations: starting_board.find_tiles(|tile| *tile == TileType::Recharge),
        };

        let capacity = settings.max_inventory_size.saturating_sub(2);
        if capacity == 0 {
            tracing::warn!(
                max_inventory_size = settings.max_inventory_size,
                "Inventory capacity is zero, the agent will never gather"
            );
        }

        let snapshot = BoardSnapshot::refresh(starting_board);
        let planner = TaskPlanner::new(&snapshot, &self.landmarks, self.policy);
        let route = planner.route_for(Task::Gather, start_location);
        tracing::debug!(
            team = ?self.team,
            ?start_location,
            destination = ?route.destination(),
            markets = self.landmarks.markets.len(),
            recharge_stations = self.landmarks.recharge_stations.len(),
            "SmartStrategy initialized"
        );

        self.state = Some(AgentState::new(
            start_location,
            settings.max_charge,
            capacity,
            Task::Gather,
            route,
        ));
    }

    fn turn_action(
        &mut self,
        board: &BoardView,
        _economy: &Economy,
        current_charge: u32,
        _is_red_turn: bool,
    ) -> Result<TurnAction, StrategyError> {
        let state = self.state.as_mut().ok_or(StrategyError::NotInitialized)?;

        let snapshot = BoardSnapshot::refresh(board);
        state.location = snapshot.location;
        state.energy = current_charge;

        let planner = TaskPlanner::new(&snapshot, &self.landmarks, self.policy);
        if planner.is_task_complete(state) {
            planner.advance(state);
        }

        let action = select_action(&planner, state)?;
        state.last_action = Some(action);
        Ok(action)
    }

    fn on_receive_item(&mut self, item: InventoryItem) {
        match self.state.as_mut() {
            Some(state) => state.receive_item(item),
            None => tracing::warn!(?item, "Item received before initialize, ignoring"),
        }
    }

    fn on_sold_inventory(&mut self, total_sell_price: u32) {
        match self.state.as_mut() {
            Some(state) => state.sold_inventory(total_sell_price),
            None => tracing::warn!(total_sell_price, "Sale reported before initialize, ignoring"),
        }
    }

    fn name(&self) -> &str {
        "SmartStrategy"
    }

    fn end_round(&mut self, red_points: u32, blue_points: u32) {
        tracing::debug!(red_points, blue_points, "Round ended");
    }
}
