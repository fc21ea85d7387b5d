use crate::engine::ConnectivityEngine;
use serde::{Deserialize, Serialize};

/// Observables of the group structure at one threshold, recorded during a
/// sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// The threshold probability this snapshot was taken at.
    pub probability: f64,
    /// Number of distinct groups.
    pub group_count: u32,
    /// Cell count of the largest group.
    pub largest_group: u32,
    /// Mean cells per group.
    pub mean_group_size: f64,
    /// Whether some group touches both the left and right border.
    pub spans_horizontal: bool,
    /// Whether some group touches both the top and bottom border.
    pub spans_vertical: bool,
}

impl Snapshot {
    /// Measures the engine's current assignment. Read-only.
    pub fn measure(engine: &ConnectivityEngine) -> Self {
        let groups = engine.groups();
        let w = engine.width() as usize;
        let h = engine.height() as usize;

        let mut sizes = vec![0u32; groups.len()];
        for &g in groups {
            sizes[g as usize] += 1;
        }
        let group_count = sizes.iter().filter(|&&s| s > 0).count() as u32;
        let largest_group = sizes.iter().copied().max().unwrap_or(0);

        // Spanning check: a group id seen on one border and again on the
        // opposite one.
        let mut on_left = vec![false; groups.len()];
        let mut on_top = vec![false; groups.len()];
        for y in 0..h {
            on_left[groups[y * w] as usize] = true;
        }
        for x in 0..w {
            on_top[groups[x] as usize] = true;
        }
        let spans_horizontal = (0..h).any(|y| on_left[groups[y * w + (w - 1)] as usize]);
        let spans_vertical = (0..w).any(|x| on_top[groups[(h - 1) * w + x] as usize]);

        Snapshot {
            probability: engine.probability(),
            group_count,
            largest_group,
            mean_group_size: groups.len() as f64 / group_count as f64,
            spans_horizontal,
            spans_vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_grid::EdgeGrid;
    use rand::prelude::*;

    fn engine(width: u32, height: u32, seed: u64, p: f64) -> ConnectivityEngine {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = EdgeGrid::new(width, height, &mut rng).unwrap();
        ConnectivityEngine::new(grid, p, &mut rng).unwrap()
    }

    #[test]
    fn fully_connected_grid_spans_both_ways() {
        let snapshot = Snapshot::measure(&engine(16, 9, 4, 1.0));
        assert_eq!(snapshot.group_count, 1);
        assert_eq!(snapshot.largest_group, 16 * 9);
        assert_eq!(snapshot.mean_group_size, (16 * 9) as f64);
        assert!(snapshot.spans_horizontal);
        assert!(snapshot.spans_vertical);
    }

    #[test]
    fn isolated_grid_spans_only_degenerate_axes() {
        let snapshot = Snapshot::measure(&engine(16, 9, 4, 0.0));
        assert_eq!(snapshot.group_count, 16 * 9);
        assert_eq!(snapshot.largest_group, 1);
        assert!(!snapshot.spans_horizontal);
        assert!(!snapshot.spans_vertical);

        // On a single-column grid every cell sits on both the left and the
        // right border, so singleton groups still span horizontally.
        let line = Snapshot::measure(&engine(1, 12, 4, 0.0));
        assert_eq!(line.group_count, 12);
        assert!(line.spans_horizontal);
        assert!(!line.spans_vertical);
    }
}
