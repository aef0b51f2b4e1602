use mineopoly_core::{
    InventoryItem, Position, ResourceKind,
    board::{Board, load_board_from_string},
    economy::Economy,
    path::plan,
    smart::SmartStrategy,
    state::Task,
    strategy::{MatchSettings, MinePlayerStrategy, TurnAction},
};

// 10x10: red start (0,0), diamond (3,0), red market (0,9), recharge (5,5).
const BOARD: &str = "
    MR .. .. .. .. .. .. .. .. MB
    .. .. .. .. .. .. .. .. .. ..
    .. .. .. .. .. .. .. .. .. ..
    .. .. .. .. .. .. .. .. .. ..
    .. .. .. .. .. CH .. .. .. ..
    .. .. .. .. .. .. .. .. .. ..
    .. .. .. .. .. .. .. .. .. ..
    .. .. .. .. .. .. .. .. .. ..
    .. .. .. .. .. .. .. .. .. SB
    SR .. .. RD .. .. .. .. .. ..
";

const DIAMOND: Position = Position::new(3, 0);
const MARKET: Position = Position::new(0, 9);
const STATION: Position = Position::new(5, 5);

fn settings() -> MatchSettings {
    MatchSettings {
        board_size: 10,
        max_inventory_size: 5,
        max_charge: 100,
        winning_score: 1000,
    }
}

fn setup() -> (Board, SmartStrategy) {
    let board = load_board_from_string(BOARD).unwrap();
    let mut strategy = SmartStrategy::new();
    let view = board.view(board.red_start, board.blue_start, 0);
    strategy.initialize(&settings(), &view, board.red_start, true, 0);
    (board, strategy)
}

fn turn(board: &Board, strategy: &mut SmartStrategy, at: Position, energy: u32) -> TurnAction {
    let view = board.view(at, board.blue_start, 0);
    strategy
        .turn_action(&view, &Economy::default(), energy, true)
        .expect("strategy should not fail")
}

fn step(at: Position, action: TurnAction) -> Position {
    let (dx, dy) = action.delta().expect("expected a move");
    Position::new(
        at.x.checked_add_signed(dx).unwrap(),
        at.y.checked_add_signed(dy).unwrap(),
    )
}

fn fill_inventory(strategy: &mut SmartStrategy) {
    for _ in 0..3 {
        strategy.on_receive_item(InventoryItem::new(ResourceKind::Diamond));
    }
}

#[test]
fn walks_right_to_nearest_resource_then_mines() {
    let (board, mut strategy) = setup();
    assert_eq!(
        plan(Position::new(0, 0), DIAMOND),
        vec![Position::new(1, 0), Position::new(2, 0), DIAMOND]
    );

    let mut at = board.red_start;
    for _ in 0..3 {
        let action = turn(&board, &mut strategy, at, 100);
        assert_eq!(action, TurnAction::MoveRight);
        at = step(at, action);
    }
    assert_eq!(at, DIAMOND);
    assert_eq!(turn(&board, &mut strategy, at, 100), TurnAction::Mine);
    assert_eq!(strategy.state().unwrap().task, Task::Gather);
}

#[test]
fn picking_up_completes_the_gather_task() {
    let (mut board, mut strategy) = setup();
    board.tiles[DIAMOND] = mineopoly_core::board::TileType::Empty;
    board
        .items_on_ground
        .insert(DIAMOND, InventoryItem::new(ResourceKind::Diamond));
    board.tiles[Position::new(3, 4)] =
        mineopoly_core::board::TileType::Resource(ResourceKind::Ruby);

    let mut at = board.red_start;
    while at != DIAMOND {
        at = step(at, turn(&board, &mut strategy, at, 100));
    }
    assert_eq!(turn(&board, &mut strategy, at, 100), TurnAction::PickUp);
    board.items_on_ground.remove(&DIAMOND);
    strategy.on_receive_item(InventoryItem::new(ResourceKind::Diamond));

    // Next turn re-plans toward the other resource instead of lingering.
    assert_eq!(turn(&board, &mut strategy, at, 100), TurnAction::MoveUp);
    let state = strategy.state().unwrap();
    assert_eq!(state.task, Task::Gather);
    assert_eq!(state.route.destination(), Position::new(3, 4));
    assert_eq!(state.inventory.len(), 1);
}

#[test]
fn full_inventory_heads_to_market_then_back_to_gathering() {
    let (board, mut strategy) = setup();
    fill_inventory(&mut strategy);

    let mut at = DIAMOND;
    let mut action = turn(&board, &mut strategy, at, 100);
    assert_eq!(strategy.state().unwrap().task, Task::Sell);
    assert_eq!(strategy.state().unwrap().route.destination(), MARKET);

    let mut steps = 0;
    while at != MARKET {
        at = step(at, action);
        steps += 1;
        if at != MARKET {
            action = turn(&board, &mut strategy, at, 100);
        }
    }
    assert_eq!(steps, DIAMOND.manhattan_distance(&MARKET));

    strategy.on_sold_inventory(900);
    let state = strategy.state().unwrap();
    assert!(state.inventory.is_empty());
    assert_eq!(state.score, 900);

    assert_eq!(turn(&board, &mut strategy, at, 100), TurnAction::MoveRight);
    let state = strategy.state().unwrap();
    assert_eq!(state.task, Task::Gather);
    assert_eq!(state.route.destination(), DIAMOND);
}

#[test]
fn low_energy_after_selling_goes_to_recharge() {
    let (board, mut strategy) = setup();
    fill_inventory(&mut strategy);

    let mut at = DIAMOND;
    let mut action = turn(&board, &mut strategy, at, 100);
    while at != MARKET {
        at = step(at, action);
        if at != MARKET {
            action = turn(&board, &mut strategy, at, 100);
        }
    }
    strategy.on_sold_inventory(900);

    // 14 is below the reserve of floor(10 * 1.5) = 15.
    assert_eq!(turn(&board, &mut strategy, at, 14), TurnAction::MoveRight);
    let state = strategy.state().unwrap();
    assert_eq!(state.task, Task::Recharge);
    assert_eq!(state.route.destination(), STATION);
}

#[test]
fn recharge_waits_until_leave_threshold() {
    let (board, mut strategy) = setup();

    // Low energy at the diamond after a pick-up sends the agent to recharge.
    let mut at = board.red_start;
    while at != DIAMOND {
        at = step(at, turn(&board, &mut strategy, at, 100));
    }
    let mut board = board;
    board.tiles[DIAMOND] = mineopoly_core::board::TileType::Empty;
    board
        .items_on_ground
        .insert(DIAMOND, InventoryItem::new(ResourceKind::Diamond));
    assert_eq!(turn(&board, &mut strategy, at, 10), TurnAction::PickUp);
    board.items_on_ground.remove(&DIAMOND);
    strategy.on_receive_item(InventoryItem::new(ResourceKind::Diamond));

    let mut action = turn(&board, &mut strategy, at, 10);
    assert_eq!(strategy.state().unwrap().task, Task::Recharge);
    while at != STATION {
        at = step(at, action);
        action = turn(&board, &mut strategy, at, 10);
    }

    // Arrived early: still waiting while below 90.
    assert_eq!(action, TurnAction::Wait);
    for energy in [50, 70, 89] {
        assert_eq!(turn(&board, &mut strategy, at, energy), TurnAction::Wait);
        assert_eq!(strategy.state().unwrap().task, Task::Recharge);
    }

    // At 90 the task completes; no resources left, so it heads to sell.
    let action = turn(&board, &mut strategy, at, 90);
    assert_ne!(action, TurnAction::Wait);
    assert_eq!(strategy.state().unwrap().task, Task::Sell);
    assert_eq!(strategy.state().unwrap().route.destination(), MARKET);
}
