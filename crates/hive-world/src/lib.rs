//! `hive-world`: perceived grid, terrain costs, and bounded grid search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`grid`]   | `WorldModel`, `TileRecord`                                   |
//! | [`cost`]   | `CostTable`, `BASE_STEP_COST`, `CLASS_BLOCKED_COST`          |
//! | [`search`] | `PathPlanner` trait, `SearchEngine`, `Path`, `SearchOutcome` |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `TileRecord`.           |

pub mod cost;
pub mod error;
pub mod grid;
pub mod search;


pub use cost::{BASE_STEP_COST, CLASS_BLOCKED_COST, CostTable};
pub use error::{WorldError, WorldResult};
pub use grid::{TileRecord, WorldModel};
pub use search::{Path, PathPlanner, SearchEngine, SearchMode, SearchOutcome};
