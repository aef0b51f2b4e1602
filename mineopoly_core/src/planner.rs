use crate::{
    Position,
    board::BoardSnapshot,
    energy::EnergyPolicy,
    state::{AgentState, Landmarks, Route, Task},
    strategy::TurnAction,
};

/// Finds the point closest to `start` by manhattan distance.
///
/// `start` itself is never returned. Ties go to the first point in `points`.
pub fn nearest_point(start: Position, points: &[Position]) -> Option<Position> {
    let mut best: Option<(usize, Position)> = None;
    for point in points.iter().filter(|p| **p != start) {
        let distance = start.manhattan_distance(point);
        if best.is_none_or(|(min, _)| distance < min) {
            best = Some((distance, *point));
        }
    }
    best.map(|(_, point)| point)
}

/// Decides which task comes next and where it leads.
///
/// Built fresh every turn from that turn's snapshot; the agent state is passed
/// in explicitly and is the only thing it mutates.
#[derive(Debug, Clone, Copy)]
pub struct TaskPlanner<'s, 'a> {
    pub snapshot: &'s BoardSnapshot<'a>,
    pub landmarks: &'s Landmarks,
    pub policy: EnergyPolicy,
}

impl<'s, 'a> TaskPlanner<'s, 'a> {
    pub fn new(
        snapshot: &'s BoardSnapshot<'a>,
        landmarks: &'s Landmarks,
        policy: EnergyPolicy,
    ) -> Self {
        Self {
            snapshot,
            landmarks,
            policy,
        }
    }

    fn candidates(&self, task: Task) -> &[Position] {
        match task {
            Task::Gather => &self.snapshot.resource_locations,
            Task::Sell => &self.landmarks.markets,
            Task::Recharge => &self.landmarks.recharge_stations,
        }
    }

    /// Nearest point serving `task`, seen from `from`.
    pub fn destination_for(&self, task: Task, from: Position) -> Option<Position> {
        nearest_point(from, self.candidates(task))
    }

    /// Whether a gather trip is worth starting: there is a resource, room to
    /// carry it, and enough energy to get there and still reach a station.
    pub fn should_gather(&self, state: &AgentState) -> bool {
        let Some(nearest) = self.destination_for(Task::Gather, state.location) else {
            return false;
        };
        if state.inventory_full() {
            return false;
        }
        let distance = state.location.manhattan_distance(&nearest) as u32;
        state.energy >= distance.max(self.policy.recharge_threshold())
    }

    pub fn is_task_complete(&self, state: &AgentState) -> bool {
        if !state.at_destination() {
            return false;
        }
        match state.task {
            Task::Recharge => state.energy >= self.policy.leave_threshold(),
            Task::Gather => {
                state.inventory_full() || state.last_action == Some(TurnAction::PickUp)
            }
            Task::Sell => true,
        }
    }

    /// Picks the task that follows the current one.
    pub fn next_task(&self, state: &AgentState) -> Task {
        let gather = self.should_gather(state);
        match state.task {
            Task::Recharge if gather => Task::Gather,
            Task::Recharge => Task::Sell,
            Task::Gather if gather => Task::Gather,
            Task::Gather if state.inventory_full() => Task::Sell,
            Task::Gather => Task::Recharge,
            Task::Sell if gather => Task::Gather,
            Task::Sell => Task::Recharge,
        }
    }

    /// Route from the agent's location to the nearest point serving `task`.
    /// Stays in place when no such point exists.
    pub fn route_for(&self, task: Task, from: Position) -> Route {
        match self.destination_for(task, from) {
            Some(destination) => Route::new(from, destination),
            None => {
                tracing::warn!(?task, ?from, "No destination for task, holding position");
                Route::stay(from)
            }
        }
    }

    /// Moves the agent on to its next task and replaces the route wholesale.
    pub fn advance(&self, state: &mut AgentState) {
        let previous = state.task;
        let task = self.next_task(state);
        let route = self.route_for(task, state.location);
        tracing::debug!(
            ?previous,
            ?task,
            destination = ?route.destination(),
            energy = state.energy,
            inventory = state.inventory.len(),
            "Task transition"
        );
        state.set_task(task, route);
    }

    /// Points the agent somewhere new once its destination stopped being
    /// useful. A gather trip is only re-aimed while `should_gather` holds;
    /// otherwise the task advances through the transition table.
    /// Returns `false` when the agent is left with nowhere to go.
    pub fn retarget(&self, state: &mut AgentState) -> bool {
        if state.task == Task::Gather && !self.should_gather(state) {
            self.advance(state);
            return !state.at_destination();
        }
        match self.destination_for(state.task, state.location) {
            Some(destination) => {
                tracing::debug!(task = ?state.task, ?destination, "Retargeting task");
                let route = Route::new(state.location, destination);
                state.set_task(state.task, route);
                true
            }
            None => false,
        }
    }
}
