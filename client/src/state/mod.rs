//! Client-side state modules.
//!
//! DESIGN
//! ======
//! Filter/sort/pagination/search state lives in the URL (see `table`), not in
//! signals, so views survive navigation and reloads. Only selection and the
//! delete capability are held in memory.

pub mod capability;
pub mod table;
