pub mod error;
pub mod invariants;
pub mod io;
pub mod odb;
pub mod synthesize;
pub mod walker;
