use crate::{
    Position,
    board::TileType,
    planner::TaskPlanner,
    state::{AgentState, NextStep, Route, Task},
    strategy::{StrategyError, TurnAction},
};

/// Picks this turn's action from the tile under the agent and its task.
pub fn select_action(
    planner: &TaskPlanner,
    state: &mut AgentState,
) -> Result<TurnAction, StrategyError> {
    match planner.snapshot.tile {
        TileType::Empty => {
            // A full inventory would only drop the item, so walk over it.
            if planner.snapshot.item_at(state.location).is_some() && !state.inventory_full() {
                Ok(TurnAction::PickUp)
            } else {
                move_along_route(planner, state)
            }
        }
        TileType::Recharge => match state.task {
            Task::Recharge => Ok(TurnAction::Wait),
            Task::Gather | Task::Sell => move_along_route(planner, state),
        },
        TileType::Market(_) => move_along_route(planner, state),
        TileType::Resource(_) => match state.task {
            Task::Gather => Ok(TurnAction::Mine),
            Task::Sell | Task::Recharge => move_along_route(planner, state),
        },
    }
}

/// Converts a single step into its move action.
pub fn step_toward(from: Position, to: Position) -> Result<TurnAction, StrategyError> {
    let (dx, dy) = from.delta_to(&to);
    TurnAction::from_delta(dx, dy).ok_or(StrategyError::InvalidStep { from, to })
}

fn move_along_route(
    planner: &TaskPlanner,
    state: &mut AgentState,
) -> Result<TurnAction, StrategyError> {
    let target = match state.route.next_step(state.location) {
        NextStep::Step(target) => Some(target),
        NextStep::OffRoute => {
            tracing::warn!(
                location = ?state.location,
                destination = ?state.route.destination(),
                "Agent is off its route, replanning"
            );
            let route = Route::new(state.location, state.route.destination());
            state.set_task(state.task, route);
            first_step(state)
        }
        // Movement requested with nowhere left to go: reassess the target.
        NextStep::Arrived => {
            if planner.retarget(state) {
                first_step(state)
            } else {
                None
            }
        }
    };

    match target {
        Some(target) => step_toward(state.location, target),
        None => Ok(TurnAction::Wait),
    }
}

fn first_step(state: &AgentState) -> Option<Position> {
    match state.route.next_step(state.location) {
        NextStep::Step(target) => Some(target),
        NextStep::Arrived | NextStep::OffRoute => None,
    }
}
