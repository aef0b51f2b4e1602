use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    InventoryItem, Position, ResourceKind, Team,
    map::{Grid, GridError},
};

/// Represents the type of a tile on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    Resource(ResourceKind),
    /// A market where the given team can sell its inventory.
    Market(Team),
    Recharge,
}

/// Kinds in the order their tiles are listed for gathering.
const GATHER_ORDER: [ResourceKind; 3] = [
    ResourceKind::Diamond,
    ResourceKind::Emerald,
    ResourceKind::Ruby,
];

/// Errors raised while parsing a board description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Board description is empty")]
    Empty,
    #[error("Board is not square: row {row} has {found} tiles, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown board code '{code}' at ({x}, {y})")]
    UnknownCode { code: String, x: usize, y: usize },
    #[error("Start position for {0:?} appears more than once")]
    DuplicateStart(Team),
    #[error("No start position for {0:?}")]
    MissingStart(Team),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Full board state as the engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub tiles: Grid<TileType>,
    pub items_on_ground: HashMap<Position, InventoryItem>,
    pub red_start: Position,
    pub blue_start: Position,
}

impl Board {
    pub fn size(&self) -> usize {
        self.tiles.size()
    }

    pub fn start_for(&self, team: Team) -> Position {
        match team {
            Team::Red => self.red_start,
            Team::Blue => self.blue_start,
        }
    }

    /// Builds the read-only view handed to one player.
    pub fn view(
        &self,
        location: Position,
        other_player_location: Position,
        other_player_score: u32,
    ) -> BoardView<'_> {
        BoardView {
            tiles: &self.tiles,
            items_on_ground: &self.items_on_ground,
            location,
            other_player_location,
            other_player_score,
        }
    }
}

/// Provides a read-only view of the board relevant to one player.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub tiles: &'a Grid<TileType>,
    pub items_on_ground: &'a HashMap<Position, InventoryItem>,
    pub location: Position,
    pub other_player_location: Position,
    pub other_player_score: u32,
}

impl<'a> BoardView<'a> {
    pub fn board_size(&self) -> usize {
        self.tiles.size()
    }

    pub fn tile_at(&self, position: Position) -> Option<TileType> {
        self.tiles.get(position).copied()
    }

    /// Finds every tile matching `predicate`, in scan order.
    pub fn find_tiles(&self, predicate: impl Fn(&TileType) -> bool) -> Vec<Position> {
        self.tiles
            .scan()
            .filter(|(_, tile)| predicate(*tile))
            .map(|(position, _)| position)
            .collect()
    }
}

/// Agent-relevant facts derived from a [`BoardView`], rebuilt every turn.
#[derive(Debug, Clone)]
pub struct BoardSnapshot<'a> {
    pub items_on_ground: &'a HashMap<Position, InventoryItem>,
    pub location: Position,
    pub tile: TileType,
    pub other_player_location: Position,
    pub other_player_score: u32,
    /// Resource tiles grouped by kind (diamonds, emeralds, rubies), each
    /// group in scan order. Nearest-point ties therefore favour diamonds.
    pub resource_locations: Vec<Position>,
}

impl<'a> BoardSnapshot<'a> {
    /// Rescans the whole board. O(size²), which is fine for the board sizes played.
    pub fn refresh(view: &BoardView<'a>) -> Self {
        BoardSnapshot {
            items_on_ground: view.items_on_ground,
            location: view.location,
            tile: view.tile_at(view.location).unwrap_or_default(),
            other_player_location: view.other_player_location,
            other_player_score: view.other_player_score,
            resource_locations: GATHER_ORDER
                .iter()
                .flat_map(|kind| view.find_tiles(|tile| *tile == TileType::Resource(*kind)))
                .collect(),
        }
    }

    pub fn item_at(&self, position: Position) -> Option<&InventoryItem> {
        self.items_on_ground.get(&position)
    }
}

/// Loads a board from its text representation.
///
/// One line per row, first line is the top row (highest `y`). Tiles are
/// whitespace separated two-letter codes:
/// `..` empty, `RD`/`RE`/`RR` diamond/emerald/ruby, `MR`/`MB` red/blue market,
/// `CH` recharge, `SR`/`SB` red/blue start.
pub fn load_board_from_string(board_string: &str) -> Result<Board, BoardError> {
    let rows: Vec<Vec<&str>> = board_string
        .trim()
        .lines()
        .map(|line| line.split_whitespace().collect())
        .collect();
    if rows.is_empty() || rows[0].is_empty() {
        return Err(BoardError::Empty);
    }

    let size = rows.len();
    for (row, tokens) in rows.iter().enumerate() {
        if tokens.len() != size {
            return Err(BoardError::NotSquare {
                row,
                expected: size,
                found: tokens.len(),
            });
        }
    }

    let mut tiles: Grid<TileType> = Grid::new(size);
    let mut red_start = None;
    let mut blue_start = None;

    for (row, tokens) in rows.iter().enumerate() {
        let y = size - 1 - row;
        for (x, token) in tokens.iter().enumerate() {
            let position = Position { x, y };
            let tile = match *token {
                ".." => TileType::Empty,
                "RD" => TileType::Resource(ResourceKind::Diamond),
                "RE" => TileType::Resource(ResourceKind::Emerald),
                "RR" => TileType::Resource(ResourceKind::Ruby),
                "MR" => TileType::Market(Team::Red),
                "MB" => TileType::Market(Team::Blue),
                "CH" => TileType::Recharge,
                "SR" => {
                    if red_start.replace(position).is_some() {
                        return Err(BoardError::DuplicateStart(Team::Red));
                    }
                    TileType::Empty
                }
                "SB" => {
                    if blue_start.replace(position).is_some() {
                        return Err(BoardError::DuplicateStart(Team::Blue));
                    }
                    TileType::Empty
                }
                unknown => {
                    return Err(BoardError::UnknownCode {
                        code: unknown.to_string(),
                        x,
                        y,
                    });
                }
            };
            tiles.set(position, tile)?;
        }
    }

    Ok(Board {
        tiles,
        items_on_ground: HashMap::new(),
        red_start: red_start.ok_or(BoardError::MissingStart(Team::Red))?,
        blue_start: blue_start.ok_or(BoardError::MissingStart(Team::Blue))?,
    })
}
