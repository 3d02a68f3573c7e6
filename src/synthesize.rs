//! Builds the signed Mises field for one frame.

use crate::error::{Result, SignedMisesError};
use crate::invariants::sign_of_trace;
use crate::odb::{FieldBlock, FieldOutput, Frame, Invariant};
use crate::walker::WalkerConfig;
use log::debug;

/// Calculates the signed Mises field output and attaches it to `frame`.
///
/// The raw tensor field (`config.source_name`) and its derived Mises
/// scalar field are walked block by block; blocks pair positionally since
/// the scalar derivation preserves block order. Each emitted block carries
/// the scalar block's metadata with element labels collapsed to their
/// unique set, and keeps the section point only when one is actually
/// present.
///
/// The caller is responsible for checking that the output field does not
/// already exist; re-invoking on the same frame is an error.
pub fn signed_mises_field(frame: &mut Frame, config: &WalkerConfig) -> Result<()> {
    let stress = frame
        .field(&config.source_name)
        .ok_or_else(|| SignedMisesError::MissingField(config.source_name.clone()))?;
    let mises = stress.get_scalar_field(Invariant::Mises)?;

    let mut signed = FieldOutput::new(&config.output_name, &config.description, mises.field_type);
    for (stress_block, mises_block) in stress.blocks.iter().zip(mises.blocks.iter()) {
        let signs = sign_of_trace(&stress_block.data)?;
        let mut data = mises_block.data.clone();
        for (i, mut row) in data.row_iter_mut().enumerate() {
            row *= signs[i];
        }
        let mut labels = mises_block.element_labels.clone();
        labels.sort_unstable();
        labels.dedup();
        debug!(
            "synthesized {} values for instance {}",
            data.nrows(),
            mises_block.instance
        );
        signed.add_block(FieldBlock {
            position: mises_block.position,
            instance: mises_block.instance.clone(),
            element_labels: labels,
            data,
            section_point: mises_block.effective_section_point().cloned(),
        });
    }
    frame.add_field(signed)
}
