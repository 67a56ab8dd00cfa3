use super::state::{Board, Cell, Direction, Score, Tile};

/// Slide/merge tiles in the given direction on a copy. No randomness.
pub fn shift(board: &Board, direction: Direction) -> Board {
    let mut next = board.clone();
    push(&mut next, direction);
    next
}

/// Slide/merge tiles in the given direction in place.
pub fn push(board: &mut Board, direction: Direction) {
    match direction {
        Direction::Left => push_left(board),
        Direction::Right => push_right(board),
        // push_up is the `s` key and moves tiles toward row N-1; push_down is `w`.
        Direction::Up => push_down(board),
        Direction::Down => push_up(board),
    }
}

/// One "slide left" step of 2048 rules on a single row.
///
/// Each tile merges at most once and the leftmost pair wins, so `[2, 2, 2, 0]`
/// becomes `[4, 2, 0, 0]`. A pair whose doubled value would overflow `Tile`
/// is left unmerged.
pub fn merge_row_left(row: &mut [Tile]) {
    let mut left_index: Option<usize> = None;

    for i in 0..row.len() {
        let v = row[i];
        if v == 0 {
            continue;
        }
        match left_index {
            Some(l) if row[l] == v => match v.checked_mul(2) {
                Some(doubled) => {
                    row[l] = doubled;
                    row[i] = 0;
                    left_index = None;
                }
                None => left_index = Some(i),
            },
            _ => left_index = Some(i),
        }
    }

    // compact non-zero tiles to the left
    let mut next_free = 0;
    for i in 0..row.len() {
        let v = row[i];
        if v == 0 {
            continue;
        }
        if next_free != i {
            row[next_free] = v;
            row[i] = 0;
        }
        next_free += 1;
    }
}

pub fn reverse_row(row: &mut [Tile]) {
    row.reverse();
}

/// Swap across the main diagonal in place.
pub fn transpose(board: &mut Board) {
    let n = board.size();
    let cells = board.cells_mut();
    for i in 0..n {
        for j in (i + 1)..n {
            cells.swap(i * n + j, j * n + i);
        }
    }
}

/// Rotate a quarter turn clockwise: transpose, then reverse every row.
pub fn rotate_cw(board: &mut Board) {
    transpose(board);
    for i in 0..board.size() {
        reverse_row(board.row_mut(i));
    }
}

/// Rotate a quarter turn counter-clockwise: transpose, then mirror rows top-to-bottom.
pub fn rotate_ccw(board: &mut Board) {
    transpose(board);
    let n = board.size();
    let cells = board.cells_mut();
    for i in 0..n / 2 {
        let r = n - i - 1;
        for j in 0..n {
            cells.swap(i * n + j, r * n + j);
        }
    }
}

pub fn push_left(board: &mut Board) {
    for i in 0..board.size() {
        merge_row_left(board.row_mut(i));
    }
}

pub fn push_right(board: &mut Board) {
    for i in 0..board.size() {
        let row = board.row_mut(i);
        reverse_row(row);
        merge_row_left(row);
        reverse_row(row);
    }
}

/// Rotate clockwise, push left, rotate back. After `rotate_cw` the bottom
/// edge sits on the left, so tiles travel toward row N-1.
pub fn push_up(board: &mut Board) {
    rotate_cw(board);
    push_left(board);
    rotate_ccw(board);
}

/// Rotate counter-clockwise, push left, rotate back. Tiles travel toward row 0.
pub fn push_down(board: &mut Board) {
    rotate_ccw(board);
    push_left(board);
    rotate_cw(board);
}

pub fn is_board_full(board: &Board) -> bool {
    board.rows().all(|row| row.iter().all(|&v| v != 0))
}

pub fn count_empty(board: &Board) -> usize {
    board.rows().flatten().filter(|&&v| v == 0).count()
}

pub fn empty_cells(board: &Board) -> Vec<Cell> {
    let n = board.size();
    board
        .rows()
        .flatten()
        .enumerate()
        .filter(|(_, v)| **v == 0)
        .map(|(idx, _)| (idx / n, idx % n))
        .collect()
}

/// True if the board is full and no push in any direction changes it.
///
/// Every direction is probed on its own scratch copy; `board` is never touched.
pub fn is_game_over(board: &Board) -> bool {
    if !is_board_full(board) {
        return false;
    }
    Direction::ALL
        .iter()
        .all(|&direction| shift(board, direction) == *board)
}

/// Directions whose push changes the board, in `Direction::ALL` order.
pub fn legal_moves(board: &Board) -> Vec<Direction> {
    Direction::ALL
        .iter()
        .copied()
        .filter(|&direction| shift(board, direction) != *board)
        .collect()
}

pub fn get_score(board: &Board) -> Score {
    board.rows().flatten().map(|&v| Score::from(v)).sum()
}

pub fn get_highest_tile_val(board: &Board) -> Tile {
    board.rows().flatten().copied().max().unwrap_or(0)
}

/// Number of significant bits: `floor(log2 v) + 1`, or 0 for an empty cell.
///
/// Renderers bucket tile colours by this value.
pub fn bit_length(value: Tile) -> u32 {
    if value <= 0 {
        0
    } else {
        Tile::BITS - value.leading_zeros()
    }
}

/// Colour slot for `value` in a palette of `palette_len` entries.
///
/// Slot 0 is the empty colour. Tiles past the end of the palette reuse the
/// last slot instead of indexing out of bounds.
pub fn palette_index(value: Tile, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    (bit_length(value) as usize).min(palette_len - 1)
}

/// Narrowest cell the grid renderer uses.
pub(crate) const CELL_WIDTH: usize = 7;

/// Cell width that fits every label on `board`.
pub(crate) fn cell_width(board: &Board) -> usize {
    let widest = get_highest_tile_val(board).to_string().len();
    widest.max(CELL_WIDTH)
}

/// Centre `val` in a cell `width` wide; empty cells render blank.
pub(crate) fn format_val(val: Tile, width: usize) -> String {
    match val {
        0 => " ".repeat(width),
        x => {
            let mut x = x.to_string();
            while x.len() < width {
                match width - x.len() {
                    1 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
