//! Loading and validation of the summary lookup tables.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
