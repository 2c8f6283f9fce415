use crate::ray::WallHit;
use std::ops::Range;

pub(crate) const BLANK: &str = " ";
pub(crate) const FLOOR: &str = ".";
/// drawn inverted, so it shows as a solid block
pub(crate) const SOLID: &str = " ";
pub(crate) const EDGE: &str = "\u{2502}";

/// how close to a cell corner a hit must be to get the edge glyph
pub(crate) const EDGE_THRESHOLD: f32 = 0.1;
/// keeps a fraction of exactly 1.0 inside the block table
pub(crate) const BLOCK_EPSILON: f32 = 1e-6;

const BLOCKS: [&str; 8] = [
    " ", "\u{2581}", "\u{2582}", "\u{2583}", "\u{2584}", "\u{2585}", "\u{2586}", "\u{2587}",
];

/// One character cell to put on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct CellWrite {
    pub column: u16,
    pub row: u16,
    pub glyph: &'static str,
    pub inverted: bool,
}

/// lower-block glyph whose fill best matches `fraction` of a cell
pub(crate) fn fractional_block(fraction: f32) -> &'static str {
    let index = (fraction * (BLOCKS.len() as f32 - BLOCK_EPSILON)) as usize;
    BLOCKS[index.min(BLOCKS.len() - 1)]
}

fn is_edge(surface_offset: f32) -> bool {
    surface_offset < EDGE_THRESHOLD || surface_offset > 1. - EDGE_THRESHOLD
}

// rows in [min, max) clamped to the screen, empty if inverted
fn rows_between(min: i32, max: i32, height: i32) -> Range<i32> {
    let min = min.max(0);
    let max = max.min(height);
    min.min(max)..max
}

/// Render one screen column for `hit`.
///
/// Ceiling rows are blank, wall rows are inverted (solid) and floor rows are
/// dotted. With `smoothing` the wall keeps an even number of whole cells and
/// the leftover height is split into partial blocks on the rows above and
/// below it. Later writes in the returned list overwrite earlier ones.
pub(crate) fn draw_column(
    column: u16,
    height: u16,
    hit: WallHit,
    smoothing: bool,
) -> Vec<CellWrite> {
    let screen_height = height as i32;
    let exact = height as f32 / hit.distance;

    let truncated = exact as i32;
    let whole = if smoothing {
        truncated - truncated % 2
    } else {
        truncated
    };

    // rows reserved for the partial blocks
    let top = (screen_height - whole) / 2 - 1;
    let bottom = top + whole + 2;

    let pad = smoothing as i32;
    let wall_glyph = if is_edge(hit.surface_offset) {
        EDGE
    } else {
        SOLID
    };

    let cell = |row: i32, glyph, inverted| CellWrite {
        column,
        row: row as u16,
        glyph,
        inverted,
    };

    let ceiling = rows_between(0, top, screen_height);
    let wall = rows_between(top + pad, bottom, screen_height);
    let floor = rows_between(bottom + pad, screen_height, screen_height);

    let mut cells = Vec::with_capacity(height as usize);
    cells.extend(ceiling.map(|row| cell(row, BLANK, false)));
    cells.extend(wall.map(|row| cell(row, wall_glyph, true)));
    cells.extend(floor.map(|row| cell(row, FLOOR, false)));

    if smoothing && top >= 0 {
        let fraction = 0.5 * (exact - whole as f32);
        cells.push(cell(top, fractional_block(fraction), false));

        // the bottom cap is drawn inverted: its blank part is the wall
        let lower = if fraction == 0. {
            SOLID
        } else {
            fractional_block(1. - fraction)
        };
        if bottom < screen_height {
            cells.push(cell(bottom, lower, true));
        }
    }

    cells
}
