use std::collections::BTreeSet;

use itertools::iproduct;

use crate::Cell;

/// The 8-neighbourhood of `cell`, clipped to `[0, height) x [0, width)`,
/// excluding `cell` itself. Yielded in row-major order.
pub(crate) fn neighbourhood(
    cell: Cell,
    height: usize,
    width: usize,
) -> impl Iterator<Item = Cell> {
    let rows = cell.row.saturating_sub(1)..(cell.row + 2).min(height);
    let cols = cell.col.saturating_sub(1)..(cell.col + 2).min(width);
    iproduct!(rows, cols)
        .map(Cell::from)
        .filter(move |&neighbour| neighbour != cell)
}

/// Every cell of a `height` x `width` board, row-major.
pub(crate) fn all_cells(height: usize, width: usize) -> impl Iterator<Item = Cell> {
    iproduct!(0..height, 0..width).map(Cell::from)
}

/// Cells of `candidates` that are not already in `known`
pub(crate) fn unseen<'a>(
    candidates: &'a BTreeSet<Cell>,
    known: &'a BTreeSet<Cell>,
) -> impl Iterator<Item = Cell> + 'a {
    candidates.difference(known).copied()
}
