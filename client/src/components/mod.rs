//! Grid components and cell renderers.
//!
//! ARCHITECTURE
//! ============
//! `data_table` owns the framework pieces of the grid (sortable headers,
//! pagination footer, payload states); the remaining modules are the
//! domain-specific cells the column registry dispatches to.

pub mod bulk_action_bar;
pub mod column_menu;
pub mod data_table;
pub mod filter_builder;
pub mod io_cell;
pub mod level_badge;
pub mod star_toggle;
pub mod tag_popover;
