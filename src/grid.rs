//! Responsive grid sizing: keep tiles at a fixed size and fit as many
//! columns / rows as the viewport allows, within bounds.

use crate::config::GridConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDims {
    pub columns: u32,
    pub rows: u32,
    pub width_px: f64,
    pub height_px: f64,
}

impl GridDims {
    pub fn tile_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }
}

/// `bar_px` is the height of the timer bar above the grid, if laid out.
pub fn fit_grid(cfg: &GridConfig, viewport_w: f64, viewport_h: f64, bar_px: Option<f64>) -> GridDims {
    let bar = bar_px.unwrap_or(cfg.fallback_bar_px);
    let avail_h = viewport_h - bar;
    let pitch = cfg.tile_px + cfg.gap_px;
    let fit = |avail: f64| ((avail + cfg.gap_px) / pitch).floor().max(0.0) as u32;
    let columns = fit(viewport_w).clamp(cfg.min_columns, cfg.max_columns);
    let rows = fit(avail_h).clamp(cfg.min_rows, cfg.max_rows);
    GridDims {
        columns,
        rows,
        width_px: cfg.tile_px * columns as f64 + cfg.gap_px * (columns as f64 - 1.0),
        height_px: cfg.tile_px * rows as f64 + cfg.gap_px * (rows as f64 - 1.0),
    }
}
