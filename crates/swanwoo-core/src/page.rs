//! Page grid layout and the shared reset toggle

use crate::config::GridConfig;

/// Upper bound on grid cells; larger grids are rejected by validation
pub const MAX_GRID_CELLS: usize = 36;

/// One cell of the product grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Viewer { index: usize, product: String },
    Reserved { index: usize },
}

impl GridCell {
    pub fn index(&self) -> usize {
        match self {
            GridCell::Viewer { index, .. } | GridCell::Reserved { index } => *index,
        }
    }
}

/// Fixed-size grid; products fill cells in order, the rest stay reserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<GridCell>,
}

impl PageLayout {
    pub fn from_config(grid: &GridConfig) -> Self {
        let total = grid.columns.checked_mul(grid.rows).unwrap_or(MAX_GRID_CELLS).min(MAX_GRID_CELLS);
        let cells = (0..total)
            .map(|index| match grid.products.get(index) {
                Some(product) => GridCell::Viewer {
                    index,
                    product: product.clone(),
                },
                None => GridCell::Reserved { index },
            })
            .collect();
        Self {
            columns: grid.columns,
            rows: grid.rows,
            cells,
        }
    }

    /// (cell index, product) for every populated cell
    pub fn viewers(&self) -> impl Iterator<Item = (usize, &str)> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Viewer { index, product } => Some((*index, product.as_str())),
            GridCell::Reserved { .. } => None,
        })
    }
}

/// DOM id of a product's canvas
pub fn canvas_id(product: &str) -> String {
    format!("viewer-{}", dom_slug(product))
}

/// DOM id prefix for a product's caption and status elements
pub fn panel_id(product: &str, part: &str) -> String {
    format!("viewer-{}-{}", dom_slug(product), part)
}

/// Lowercase ASCII alphanumerics, everything else becomes '-'
fn dom_slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Reset signal broadcast from the page to every viewer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetToggle {
    generation: u64,
}

impl ResetToggle {
    /// Request a reset; returns the new generation
    pub fn trigger(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = PageLayout::from_config(&GridConfig::default());
        assert_eq!((layout.columns, layout.rows), (3, 3));
        assert_eq!(layout.cells.len(), 9);
        assert_eq!(layout.cells[0], GridCell::Viewer { index: 0, product: "BigMuff".to_string() });
        assert_eq!(layout.cells[1], GridCell::Viewer { index: 1, product: "FuzzFactory".to_string() });
        assert!(layout.cells[2..].iter().all(|c| matches!(c, GridCell::Reserved { .. })));
        let viewers: Vec<_> = layout.viewers().collect();
        assert_eq!(viewers, vec![(0, "BigMuff"), (1, "FuzzFactory")]);
    }

    #[test]
    fn test_larger_grid_reserves_cells() {
        let layout = PageLayout::from_config(&GridConfig {
            columns: 3,
            rows: 3,
            products: vec!["A".to_string()],
        });
        assert_eq!(layout.cells.len(), 9);
        assert_eq!(layout.viewers().count(), 1);
        assert!(layout.cells[1..].iter().all(|c| matches!(c, GridCell::Reserved { .. })));
        assert_eq!(layout.cells[8].index(), 8);
    }

    #[test]
    fn test_oversized_grid_is_capped() {
        let layout = PageLayout::from_config(&GridConfig {
            columns: usize::MAX,
            rows: 3,
            products: vec!["A".to_string()],
        });
        assert_eq!(layout.cells.len(), MAX_GRID_CELLS);

        let layout = PageLayout::from_config(&GridConfig {
            columns: 1000,
            rows: 1000,
            products: Vec::new(),
        });
        assert_eq!(layout.cells.len(), MAX_GRID_CELLS);
    }

    #[test]
    fn test_dom_ids() {
        assert_eq!(canvas_id("BigMuff"), "viewer-bigmuff");
        assert_eq!(canvas_id("Fuzz Factory 7"), "viewer-fuzz-factory-7");
        assert_eq!(panel_id("BigMuff", "status"), "viewer-bigmuff-status");
    }

    #[test]
    fn test_reset_toggle() {
        let mut toggle = ResetToggle::default();
        assert_eq!(toggle.generation(), 0);
        assert_eq!(toggle.trigger(), 1);
        assert_eq!(toggle.trigger(), 2);
        assert_eq!(toggle.generation(), 2);
    }
}
