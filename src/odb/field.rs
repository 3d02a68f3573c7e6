use crate::error::{SignedMisesError, Result};
use crate::invariants::{von_mises, TENSOR_WIDTH};
use log::trace;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Where on the element a block's values are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputPosition {
    IntegrationPoint,
    Nodal,
    Centroid,
    ElementNodal,
}

/// Numeric kind of a field output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Scalar,
    /// Symmetric 3D tensor, 6 components per row (S11, S22, S33, S12, S13, S23).
    Tensor3dFull,
}

/// Derived scalar invariants a tensor field can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    Mises,
}

impl Invariant {
    pub fn name(&self) -> &'static str {
        match self {
            Invariant::Mises => "MISES",
        }
    }
}

/// Sample location through the thickness of layered/shell elements.
/// `number == 0` is the sentinel the storage layer writes for solid
/// elements which have no section points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPoint {
    pub number: i32,
    pub description: String,
}

impl SectionPoint {
    pub fn is_absent(&self) -> bool {
        self.number == 0 && self.description.is_empty()
    }
}

/// One bulk data block of a field output, grouped by position, instance
/// and section point. `data` is N x 6 for tensor fields, N x 1 for scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBlock {
    pub position: OutputPosition,
    pub instance: String,
    pub element_labels: Vec<u32>,
    pub data: DMatrix<f64>,
    pub section_point: Option<SectionPoint>,
}

impl FieldBlock {
    /// Section point to carry over into a derived block, or `None` when
    /// the stored value is the solid-element sentinel.
    pub fn effective_section_point(&self) -> Option<&SectionPoint> {
        self.section_point.as_ref().filter(|sp| !sp.is_absent())
    }
}

/// A named, typed field for one frame: a collection of bulk data blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOutput {
    pub name: String,
    pub description: String,
    pub field_type: FieldType,
    pub blocks: Vec<FieldBlock>,
}

impl FieldOutput {
    pub fn new(name: &str, description: &str, field_type: FieldType) -> Self {
        FieldOutput {
            name: name.to_string(),
            description: description.to_string(),
            field_type,
            blocks: Vec::new(),
        }
    }

    pub fn add_block(&mut self, block: FieldBlock) {
        self.blocks.push(block);
    }

    /// Derives a scalar field from this tensor field, one output value per
    /// tensor row, preserving the block structure (position, instance,
    /// labels, section point). Blocks come out in the same order they are
    /// stored in, which keeps derived fields positionally pairable with
    /// their source.
    pub fn get_scalar_field(&self, invariant: Invariant) -> Result<FieldOutput> {
        if self.field_type != FieldType::Tensor3dFull {
            return Err(SignedMisesError::InvariantSource {
                name: self.name.clone(),
                found: self.field_type,
                invariant: invariant.name(),
            });
        }
        let mut scalar = FieldOutput::new(
            &format!("{}_{}", self.name, invariant.name()),
            &format!("{} invariant of {}", invariant.name(), self.name),
            FieldType::Scalar,
        );
        for block in &self.blocks {
            if block.data.ncols() != TENSOR_WIDTH {
                return Err(crate::error::ShapeError {
                    found: block.data.ncols(),
                }
                .into());
            }
            trace!(
                "deriving {} for {} rows on instance {}",
                invariant.name(),
                block.data.nrows(),
                block.instance
            );
            let values: Vec<f64> = block
                .data
                .row_iter()
                .map(|row| match invariant {
                    Invariant::Mises => von_mises(&row.iter().copied().collect::<Vec<f64>>()),
                })
                .collect();
            scalar.add_block(FieldBlock {
                position: block.position,
                instance: block.instance.clone(),
                element_labels: block.element_labels.clone(),
                data: DMatrix::from_vec(values.len(), 1, values),
                section_point: block.section_point.clone(),
            });
        }
        Ok(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tensor_field(rows: &[[f64; 6]]) -> FieldOutput {
        let mut field = FieldOutput::new("S", "Stress components", FieldType::Tensor3dFull);
        field.add_block(FieldBlock {
            position: OutputPosition::IntegrationPoint,
            instance: "PART-1-1".to_string(),
            element_labels: (1..=rows.len() as u32).collect(),
            data: DMatrix::from_row_iterator(rows.len(), 6, rows.iter().flatten().copied()),
            section_point: None,
        });
        field
    }

    #[test]
    fn mises_scalar_field_from_tensor() {
        let field = tensor_field(&[
            [200.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 50.0, 0.0, 0.0],
        ]);
        let mises = field.get_scalar_field(Invariant::Mises).unwrap();
        assert_eq!(mises.field_type, FieldType::Scalar);
        assert_eq!(mises.blocks.len(), 1);
        let data = &mises.blocks[0].data;
        assert_eq!((data.nrows(), data.ncols()), (2, 1));
        assert!((data[(0, 0)] - 200.0).abs() < 1e-12);
        assert!((data[(1, 0)] - 3.0_f64.sqrt() * 50.0).abs() < 1e-12);
    }

    #[test]
    fn scalar_field_keeps_block_metadata() {
        let mut field = tensor_field(&[[1.0, 2.0, 3.0, 0.0, 0.0, 0.0]]);
        field.blocks[0].section_point = Some(SectionPoint {
            number: 3,
            description: "SPOS".to_string(),
        });
        let mises = field.get_scalar_field(Invariant::Mises).unwrap();
        let block = &mises.blocks[0];
        assert_eq!(block.position, OutputPosition::IntegrationPoint);
        assert_eq!(block.instance, "PART-1-1");
        assert_eq!(block.element_labels, vec![1]);
        assert_eq!(block.section_point.as_ref().unwrap().number, 3);
    }

    #[test]
    fn invariant_of_scalar_field_is_rejected() {
        let field = FieldOutput::new("U", "Displacement magnitude", FieldType::Scalar);
        let err = field.get_scalar_field(Invariant::Mises).unwrap_err();
        assert!(matches!(err, SignedMisesError::InvariantSource { .. }));
    }

    #[test]
    fn absent_section_point_sentinel() {
        let sp = SectionPoint {
            number: 0,
            description: String::new(),
        };
        assert!(sp.is_absent());
        let sp = SectionPoint {
            number: 1,
            description: String::new(),
        };
        assert!(!sp.is_absent());
    }
}
