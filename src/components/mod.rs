pub mod app;
pub mod reward_overlay;
pub mod speedup_flash;
pub mod status_bar;
pub mod tile_grid;
