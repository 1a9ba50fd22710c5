use crate::dashboard::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};

/// Width and height of a widget in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: usize,
    pub height: usize,
}

impl Footprint {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Top-left cell of a placed widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Largest row or column edge a layout may reach. Keeps every coordinate
/// representable in the signed snapshot form.
pub const MAX_EXTENT: usize = i64::MAX as usize;

/// Widest grid a layout accepts.
pub const MAX_COLUMNS: usize = 64;

fn overlaps(a: GridPos, a_size: Footprint, b: GridPos, b_size: Footprint) -> bool {
    a.x < b.x.saturating_add(b_size.width)
        && b.x < a.x.saturating_add(a_size.width)
        && a.y < b.y.saturating_add(b_size.height)
        && b.y < a.y.saturating_add(a_size.height)
}

/// Rectangles claimed on a grid with a fixed number of columns. Rows are
/// unbounded and cost nothing until a rectangle covers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    cols: usize,
    rects: Vec<(GridPos, Footprint)>,
}

impl Occupancy {
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            rects: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    /// One past the lowest claimed row.
    pub fn rows(&self) -> usize {
        self.rects
            .iter()
            .map(|(pos, size)| pos.y.saturating_add(size.height))
            .max()
            .unwrap_or(0)
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rects
            .iter()
            .any(|&(pos, size)| overlaps(pos, size, GridPos::new(x, y), Footprint::new(1, 1)))
    }

    /// True when the rectangle lies inside the columns, stays below
    /// [`MAX_EXTENT`] and touches no claimed rectangle.
    pub fn fits(&self, pos: GridPos, footprint: Footprint) -> bool {
        if footprint.is_empty() {
            return false;
        }
        match (
            pos.x.checked_add(footprint.width),
            pos.y.checked_add(footprint.height),
        ) {
            (Some(right), Some(bottom)) if right <= self.cols && bottom <= MAX_EXTENT => {}
            _ => return false,
        }
        !self
            .rects
            .iter()
            .any(|&(other, size)| overlaps(pos, footprint, other, size))
    }

    /// Record the rectangle as taken. Callers check [`Occupancy::fits`] first.
    pub fn claim(&mut self, pos: GridPos, footprint: Footprint) {
        self.rects.push((pos, footprint));
    }
}

/// Find the first free top-left cell for `footprint`, in row-major reading
/// order.
///
/// The first fit always sits on row 0 or directly under a claimed rectangle,
/// and on column 0 or directly right of one, so only those candidates are
/// tried. Rows are unbounded; the scan fails only for a footprint wider than
/// the grid or one that would reach past [`MAX_EXTENT`].
pub fn plan(occupied: &Occupancy, footprint: Footprint) -> Result<GridPos> {
    let cols = occupied.columns();
    if footprint.is_empty() {
        return Err(DashboardError::Placement(format!(
            "footprint {}x{} is empty",
            footprint.width, footprint.height
        )));
    }
    if footprint.width > cols {
        return Err(DashboardError::Placement(format!(
            "footprint exceeds grid width ({} > {cols})",
            footprint.width
        )));
    }

    let mut rows: Vec<usize> = std::iter::once(0)
        .chain(
            occupied
                .rects
                .iter()
                .map(|(pos, size)| pos.y.saturating_add(size.height)),
        )
        .collect();
    rows.sort_unstable();
    rows.dedup();
    let mut columns: Vec<usize> = std::iter::once(0)
        .chain(
            occupied
                .rects
                .iter()
                .map(|(pos, size)| pos.x.saturating_add(size.width)),
        )
        .filter(|x| x.checked_add(footprint.width).is_some_and(|right| right <= cols))
        .collect();
    columns.sort_unstable();
    columns.dedup();

    for &y in &rows {
        for &x in &columns {
            let pos = GridPos::new(x, y);
            if occupied.fits(pos, footprint) {
                return Ok(pos);
            }
        }
    }
    Err(DashboardError::Placement(format!(
        "no room for a widget {} rows tall",
        footprint.height
    )))
}
