use rand::prelude::*;

/// A fixed palette with one `0xRRGGBB` color per cell index.
///
/// Generated once at engine construction, after the edge draws, so repeated
/// threshold changes reuse the same palette: a cell index that ends up as a
/// group's representative always maps to the same color.
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: Vec<u32>,
}

impl ColorTable {
    pub fn generate(cell_count: usize, rng: &mut StdRng) -> Self {
        let colors = (0..cell_count)
            .map(|_| rng.random_range(0..0x0100_0000u32))
            .collect();
        Self { colors }
    }

    /// Color assigned to the given group id (a cell index).
    pub fn color(&self, group_id: u32) -> u32 {
        self.colors[group_id as usize]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.colors
    }
}
