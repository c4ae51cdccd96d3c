//! Dense battlefield grid tracking path cells and tower occupancy.

use zombie_defence_core::{GridCellSnapshot, GridPosition, TowerId};

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    is_path: bool,
    tower: Option<TowerId>,
}

/// Square grid whose path cells are fixed at construction.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a `size`×`size` grid and marks every in-bounds path point.
    pub(crate) fn new(size: u32, path: &[GridPosition]) -> Self {
        let capacity_u64 = u64::from(size) * u64::from(size);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut grid = Self {
            size,
            cells: vec![Cell::default(); capacity],
        };

        for point in path {
            if let Some(index) = grid.index(*point) {
                grid.cells[index].is_path = true;
            }
        }

        grid
    }

    pub(crate) const fn size(&self) -> u32 {
        self.size
    }

    pub(crate) fn contains(&self, position: GridPosition) -> bool {
        self.index(position).is_some()
    }

    pub(crate) fn is_path(&self, position: GridPosition) -> bool {
        self.cell(position).is_some_and(|cell| cell.is_path)
    }

    pub(crate) fn tower_at(&self, position: GridPosition) -> Option<TowerId> {
        self.cell(position).and_then(|cell| cell.tower)
    }

    /// Records `tower` on the cell. Path cells never accept a tower.
    pub(crate) fn occupy(&mut self, position: GridPosition, tower: TowerId) -> bool {
        let Some(index) = self.index(position) else {
            return false;
        };
        let cell = &mut self.cells[index];
        if cell.is_path || cell.tower.is_some() {
            return false;
        }
        cell.tower = Some(tower);
        true
    }

    pub(crate) fn vacate(&mut self, position: GridPosition) {
        if let Some(index) = self.index(position) {
            self.cells[index].tower = None;
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<GridCellSnapshot> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                GridCellSnapshot {
                    position: GridPosition::new(index % self.size, index / self.size),
                    is_path: cell.is_path,
                    tower: cell.tower,
                }
            })
            .collect()
    }

    fn cell(&self, position: GridPosition) -> Option<&Cell> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    fn index(&self, position: GridPosition) -> Option<usize> {
        if position.x() < self.size && position.y() < self.size {
            let row = usize::try_from(position.y()).ok()?;
            let column = usize::try_from(position.x()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Vec<GridPosition> {
        vec![
            GridPosition::new(0, 1),
            GridPosition::new(1, 1),
            GridPosition::new(2, 1),
        ]
    }

    #[test]
    fn path_cells_are_marked() {
        let grid = Grid::new(3, &path());
        assert!(grid.is_path(GridPosition::new(1, 1)));
        assert!(!grid.is_path(GridPosition::new(1, 0)));
        assert!(!grid.is_path(GridPosition::new(7, 7)));
    }

    #[test]
    fn path_cells_reject_towers() {
        let mut grid = Grid::new(3, &path());
        assert!(!grid.occupy(GridPosition::new(0, 1), TowerId::new(1)));
        assert_eq!(grid.tower_at(GridPosition::new(0, 1)), None);
    }

    #[test]
    fn cells_host_at_most_one_tower() {
        let mut grid = Grid::new(3, &path());
        let cell = GridPosition::new(2, 2);
        assert!(grid.occupy(cell, TowerId::new(1)));
        assert!(!grid.occupy(cell, TowerId::new(2)));
        assert_eq!(grid.tower_at(cell), Some(TowerId::new(1)));

        grid.vacate(cell);
        assert_eq!(grid.tower_at(cell), None);
        assert!(grid.occupy(cell, TowerId::new(2)));
    }

    #[test]
    fn snapshot_is_row_major() {
        let grid = Grid::new(3, &path());
        let cells = grid.snapshot();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[4].position, GridPosition::new(1, 1));
        assert!(cells[4].is_path);
        assert_eq!(cells[5].position, GridPosition::new(2, 1));
    }
}
