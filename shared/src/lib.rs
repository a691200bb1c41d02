pub mod catalog;
pub mod colors;
pub mod distance;
pub mod fuzzy;
pub mod game;
pub mod neighbors;
pub mod prefs;
pub mod rng;
pub mod storage;

pub use catalog::{Catalog, CatalogError, ColorFilter, ColorRecord};
pub use colors::{Format, Hsl};
pub use distance::{Axis, AxisDistance, axis_distance};
pub use neighbors::{NUM_NEIGHBORS, NeighborReport, Neighbors, build_neighbor_report};
pub use storage::{KeyValueStore, MemoryStore, StoreError};
