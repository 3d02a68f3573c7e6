pub mod archive;
pub mod field;

pub use archive::{Archive, Frame, Step};
pub use field::{FieldBlock, FieldOutput, FieldType, Invariant, OutputPosition, SectionPoint};
