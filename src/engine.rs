use crate::color::ColorTable;
use crate::edge_grid::{Direction, EdgeGrid};
use crate::error::PercolationError;
use log::debug;
use rand::prelude::*;

/// Labels every cell of an [`EdgeGrid`] with its group under the current
/// threshold probability.
///
/// A connection is active when its weight is strictly below the threshold;
/// a group is a maximal set of cells mutually reachable through active
/// connections. The whole labeling is recomputed from scratch on every
/// [`set_probability`](ConnectivityEngine::set_probability) call, in
/// O(cells + active edges), which is cheap enough to drive from an
/// interactive slider even at ~500k cells. Traversal scratch buffers are
/// kept between calls so repeated recomputation does not reallocate.
pub struct ConnectivityEngine {
    grid: EdgeGrid,
    colors: ColorTable,
    probability: f64,
    /// Group id per flattened cell index. The id is the lowest cell index in
    /// the group; the only contract is equal-within, distinct-across.
    groups: Vec<u32>,
    // Scratch state for the traversal, reused across recomputations.
    visited: Vec<bool>,
    stack: Vec<u32>,
}

impl ConnectivityEngine {
    /// Consumes the grid, draws the per-cell color table from `rng`, and
    /// computes the initial labeling at `initial_probability`.
    pub fn new(
        grid: EdgeGrid,
        initial_probability: f64,
        rng: &mut StdRng,
    ) -> Result<Self, PercolationError> {
        let cells = grid.cell_count();
        let colors = ColorTable::generate(cells, rng);
        let mut engine = Self {
            grid,
            colors,
            probability: 0.0,
            groups: vec![0; cells],
            visited: vec![false; cells],
            stack: Vec::new(),
        };
        engine.set_probability(initial_probability)?;
        Ok(engine)
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn grid(&self) -> &EdgeGrid {
        &self.grid
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.colors
    }

    /// The full group assignment, indexed by flattened cell index. Read-only
    /// view for the rendering collaborator; valid until the next
    /// `set_probability` call.
    pub fn groups(&self) -> &[u32] {
        &self.groups
    }

    /// Sets the threshold and relabels every cell.
    ///
    /// Rejects values outside `[0, 1]` (NaN included) with
    /// `InvalidProbability`, leaving the previous probability and assignment
    /// fully intact. On success every cell is visited exactly once.
    pub fn set_probability(&mut self, probability: f64) -> Result<(), PercolationError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(PercolationError::InvalidProbability(probability));
        }
        self.probability = probability;

        self.visited.fill(false);
        debug_assert!(self.stack.is_empty());

        // One traversal per group, seeded from the lowest-indexed cell still
        // unvisited. The work list lives on the heap: a fully connected
        // 500k-cell grid reaches traversal depths equal to the cell count,
        // which would overflow the call stack if this recursed.
        for start in 0..self.groups.len() {
            if self.visited[start] {
                continue;
            }
            self.stack.push(start as u32);
            while let Some(cell) = self.stack.pop() {
                let cell = cell as usize;
                if self.visited[cell] {
                    continue;
                }
                self.visited[cell] = true;
                self.groups[cell] = start as u32;
                for dir in Direction::ALL {
                    if let Some(next) = self.grid.neighbor(cell, dir) {
                        if !self.visited[next] && self.grid.weight(cell, dir) < probability {
                            self.stack.push(next as u32);
                        }
                    }
                }
            }
        }

        debug!(
            "relabeled {} cells at p = {:.4}",
            self.groups.len(),
            probability
        );
        Ok(())
    }

    /// Group id of the cell at `(x, y)`. No side effects.
    pub fn group_of(&self, x: u32, y: u32) -> Result<u32, PercolationError> {
        let idx = self.index_of(x, y)?;
        Ok(self.groups[idx])
    }

    /// Color of the group containing `(x, y)`, keyed off the group's
    /// representative cell index.
    pub fn color_of(&self, x: u32, y: u32) -> Result<u32, PercolationError> {
        let idx = self.index_of(x, y)?;
        Ok(self.colors.color(self.groups[idx]))
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize, PercolationError> {
        if x >= self.grid.width() || y >= self.grid.height() {
            return Err(PercolationError::OutOfRange {
                x,
                y,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }
        Ok(x as usize + y as usize * self.grid.width() as usize)
    }
}
