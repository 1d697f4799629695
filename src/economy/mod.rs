//! Economy data model: goods, facilities, counties, and the state root

pub mod county;
pub mod facility;
pub mod goods;
pub mod labor;
pub mod loader;
pub mod state;
pub mod stockpile;

pub use county::CountyEconomy;
pub use facility::{Facility, FacilityDef, FacilityRegistry};
pub use goods::{GoodCategory, GoodDef, GoodsCatalog, RecipeInput};
pub use labor::LaborPool;
pub use loader::EconomyDefs;
pub use state::{DailyLedger, EconomyParts, EconomyState};
pub use stockpile::Stockpile;
