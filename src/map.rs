use crate::math::to_grid;
use glam::{IVec2, Vec2};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;

// '+' is wall, ' ' is open
const BUILTIN: [&str; 20] = [
    "+++++++++++++++++++++",
    "+                   +",
    "+              ++++ +",
    "+      +++++     ++ +",
    "+      +++++     +  +",
    "+      +++++   +++ ++",
    "+      +++++   +    +",
    "+      +++++   + ++++",
    "+              + ++++",
    "+                   +",
    "+                   +",
    "+++++ ++++++ ++++++ +",
    "+++++ ++++++ ++++++ +",
    "+                   +",
    "+               +   +",
    "+     +             +",
    "+  +           +    +",
    "+      +   +        +",
    "+                +  +",
    "+++++++++++++++++++++",
];

const WALL_CHAR: char = '+';
const OPEN_CHAR: char = ' ';

#[derive(Debug, Error)]
pub(crate) enum MapError {
    #[error("could not read map {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map has no rows")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid tile {tile:?} at ({x}, {y})")]
    InvalidTile { tile: char, x: usize, y: usize },
    #[error("border tile at ({x}, {y}) is not a wall")]
    OpenBorder { x: usize, y: usize },
    #[error("more than one spawn tile (second at ({x}, {y}))")]
    DuplicateSpawn { x: usize, y: usize },
}

/// Anything the caster can walk through: dimensions plus a cell predicate.
pub(crate) trait GridMap {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// true iff `cell` is a wall. Cells outside the grid count as wall.
    fn is_wall_cell(&self, cell: IVec2) -> bool;

    fn is_wall(&self, position: Vec2) -> bool {
        self.is_wall_cell(to_grid(position))
    }

    /// one row rendered as text, used by the map overlay
    fn row_text(&self, y: usize) -> String {
        (0..self.width())
            .map(|x| {
                if self.is_wall_cell(IVec2::new(x as i32, y as i32)) {
                    WALL_CHAR
                } else {
                    OPEN_CHAR
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Tile {
    Open,
    Wall,
}

#[derive(Clone, PartialEq, Debug)]
pub(crate) struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    spawn: Option<IVec2>,
}

impl Map {
    /// the maze that ships with the binary
    pub fn builtin() -> Self {
        Self::parse(&BUILTIN.join("\n")).expect("builtin maze is a valid closed map")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        log::info!("loading map at {}", path.display());
        let text = read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse a text map, one row per line. `+`/`#` are walls, ` `/`.` are
    /// open and `*` marks an open spawn cell. The border must be all wall.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let width = rows.first().ok_or(MapError::Empty)?.chars().count();
        let height = rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut spawn = None;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, tile) in row.chars().enumerate() {
                tiles.push(match tile {
                    '+' | '#' => Tile::Wall,
                    ' ' | '.' => Tile::Open,
                    '*' => {
                        if spawn.is_some() {
                            return Err(MapError::DuplicateSpawn { x, y });
                        }
                        spawn = Some(IVec2::new(x as i32, y as i32));
                        Tile::Open
                    }
                    other => return Err(MapError::InvalidTile { tile: other, x, y }),
                });
            }
        }

        let this = Self {
            width,
            height,
            tiles,
            spawn,
        };
        this.check_closed()?;

        Ok(this)
    }

    // every ray cast from the interior must end on a wall
    fn check_closed(&self) -> Result<(), MapError> {
        let border = (0..self.width)
            .flat_map(|x| [(x, 0), (x, self.height - 1)])
            .chain((0..self.height).flat_map(|y| [(0, y), (self.width - 1, y)]));
        for (x, y) in border {
            if self.tiles[self.idx(x, y)] != Tile::Wall {
                return Err(MapError::OpenBorder { x, y });
            }
        }

        Ok(())
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// centre of the spawn cell, if the map marked one
    pub fn spawn(&self) -> Option<Vec2> {
        self.spawn.map(|cell| cell.as_vec2() + Vec2::splat(0.5))
    }
}

impl GridMap for Map {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_wall_cell(&self, cell: IVec2) -> bool {
        if cell.x < 0 || cell.y < 0 {
            return true;
        }

        let (x, y) = (cell.x as usize, cell.y as usize);
        if x >= self.width || y >= self.height {
            return true;
        }

        self.tiles[self.idx(x, y)] == Tile::Wall
    }
}

#[cfg(test)]
pub(crate) fn bordered(width: usize, height: usize) -> Map {
    let rows = (0..height)
        .map(|y| {
            if y == 0 || y == height - 1 {
                "+".repeat(width)
            } else {
                format!("+{}+", " ".repeat(width - 2))
            }
        })
        .collect::<Vec<_>>();
    Map::parse(&rows.join("\n")).unwrap()
}
