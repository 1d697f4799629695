//! Read-only spatial data the economy consults
//!
//! The map layer itself (terrain, meshes, import) lives elsewhere; the
//! economy only needs to know which county a cell belongs to.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CellId, CountyId};

/// Spatial lookups the tick systems depend on
pub trait MapData {
    /// County owning a cell, `None` for water, wilderness, or unknown cells
    fn county_of(&self, cell: CellId) -> Option<CountyId>;
}

/// Plain cell → county table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellCountyMap {
    cells: AHashMap<CellId, CountyId>,
}

impl CellCountyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, cell: CellId, county: CountyId) {
        self.cells.insert(cell, county);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl MapData for CellCountyMap {
    fn county_of(&self, cell: CellId) -> Option<CountyId> {
        self.cells.get(&cell).copied()
    }
}
