use crate::Position;

/// Plans an L-shaped route from `start` to `end`.
///
/// The result excludes `start` and includes `end`. It walks the x axis first
/// (holding `start.y`), then the y axis (holding `end.x`). Tiles are not
/// inspected; this is geometry, not obstacle avoidance. `plan(a, a)` is empty.
pub fn plan(start: Position, end: Position) -> Vec<Position> {
    let mut path = Vec::with_capacity(start.manhattan_distance(&end));

    let mut x = start.x;
    while x != end.x {
        x = if x < end.x { x + 1 } else { x - 1 };
        path.push(Position { x, y: start.y });
    }

    let mut y = start.y;
    while y != end.y {
        y = if y < end.y { y + 1 } else { y - 1 };
        path.push(Position { x: end.x, y });
    }

    path
}
