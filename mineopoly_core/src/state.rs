use serde::{Deserialize, Serialize};

use crate::{InventoryItem, Position, path, strategy::TurnAction};

/// The agent's current high-level goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    Gather,
    Sell,
    Recharge,
}

/// Where the agent stands relative to its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Step(Position),
    /// Already at the destination.
    Arrived,
    /// The position is not on the route at all.
    OffRoute,
}

/// A planned route. Starts at the position it was planned from and ends at the
/// destination, so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    destination: Position,
    waypoints: Vec<Position>,
}

impl Route {
    pub fn new(origin: Position, destination: Position) -> Self {
        let mut waypoints = Vec::with_capacity(origin.manhattan_distance(&destination) + 1);
        waypoints.push(origin);
        waypoints.extend(path::plan(origin, destination));
        Route {
            destination,
            waypoints,
        }
    }

    /// A route that goes nowhere.
    pub fn stay(at: Position) -> Self {
        Route::new(at, at)
    }

    pub fn destination(&self) -> Position {
        self.destination
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    pub fn next_step(&self, from: Position) -> NextStep {
        match self.waypoints.iter().position(|p| *p == from) {
            None => NextStep::OffRoute,
            Some(i) => self
                .waypoints
                .get(i + 1)
                .copied()
                .map_or(NextStep::Arrived, NextStep::Step),
        }
    }
}

/// Fixed installations, scanned once when the match starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Landmarks {
    /// Markets this agent can sell at.
    pub markets: Vec<Position>,
    pub recharge_stations: Vec<Position>,
}

/// Everything one strategy instance knows about itself across turns.
#[derive(Debug, Clone)]
pub struct AgentState {
    pub location: Position,
    pub energy: u32,
    pub inventory: Vec<InventoryItem>,
    pub capacity: usize,
    pub score: u32,
    pub task: Task,
    pub route: Route,
    pub last_action: Option<TurnAction>,
}

impl AgentState {
    pub fn new(location: Position, energy: u32, capacity: usize, task: Task, route: Route) -> Self {
        AgentState {
            location,
            energy,
            inventory: Vec::with_capacity(capacity),
            capacity,
            score: 0,
            task,
            route,
            last_action: None,
        }
    }

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= self.capacity
    }

    pub fn at_destination(&self) -> bool {
        self.location == self.route.destination()
    }

    /// Replaces the task and route together. Clears `last_action` so a pick-up
    /// from the previous task cannot complete the new one.
    pub fn set_task(&mut self, task: Task, route: Route) {
        self.task = task;
        self.route = route;
        self.last_action = None;
    }

    /// Adds an item, dropping it if the inventory is already at capacity.
    pub fn receive_item(&mut self, item: InventoryItem) {
        if self.inventory_full() {
            tracing::warn!(
                capacity = self.capacity,
                ?item,
                "Received item with a full inventory, dropping it"
            );
            return;
        }
        self.inventory.push(item);
    }

    pub fn sold_inventory(&mut self, total_price: u32) {
        self.score += total_price;
        self.inventory.clear();
    }
}
