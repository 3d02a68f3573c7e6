use nalgebra::DMatrix;
use signed_mises::odb::{
    Archive, FieldBlock, FieldOutput, FieldType, Frame, OutputPosition, SectionPoint, Step,
};

pub fn stress_block(rows: &[[f64; 6]], labels: &[u32]) -> FieldBlock {
    FieldBlock {
        position: OutputPosition::IntegrationPoint,
        instance: "PART-1-1".to_string(),
        element_labels: labels.to_vec(),
        data: DMatrix::from_row_iterator(rows.len(), 6, rows.iter().flatten().copied()),
        section_point: None,
    }
}

pub fn stress_frame(description: &str, rows: &[[f64; 6]], labels: &[u32]) -> Frame {
    let mut field = FieldOutput::new("S", "Stress components", FieldType::Tensor3dFull);
    field.add_block(stress_block(rows, labels));
    let mut frame = Frame::new(description);
    frame.add_field(field).unwrap();
    frame
}

/// Two steps: the first holds a stressless initial frame plus a frame with
/// stress on shell elements (section point, duplicated labels), the second
/// a single frame with solid-element stress.
pub fn sample_archive() -> Archive {
    let mut step1 = Step::new("Step-1");

    let mut initial = Frame::new("Increment 0: Base State");
    let mut disp = FieldOutput::new("U", "Displacement magnitude", FieldType::Scalar);
    disp.add_block(FieldBlock {
        position: OutputPosition::Nodal,
        instance: "PART-1-1".to_string(),
        element_labels: vec![1, 2],
        data: DMatrix::from_vec(2, 1, vec![0.0, 0.0]),
        section_point: None,
    });
    initial.add_field(disp).unwrap();
    step1.add_frame(initial);

    let mut shell = FieldOutput::new("S", "Stress components", FieldType::Tensor3dFull);
    let mut block = stress_block(
        &[
            [100.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [-100.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ],
        &[4, 4],
    );
    block.section_point = Some(SectionPoint {
        number: 1,
        description: "SNEG, (fraction = -1.0)".to_string(),
    });
    shell.add_block(block);
    let mut shell_frame = Frame::new("Increment 5: Step Time = 1.0");
    shell_frame.add_field(shell).unwrap();
    step1.add_frame(shell_frame);

    let mut step2 = Step::new("Step-2");
    step2.add_frame(stress_frame(
        "Increment 12: Step Time = 2.0",
        &[
            [0.1, 0.2, -0.4, 0.4, 0.5, 0.6],
            [0.2, 0.0, -0.2, 0.3, -0.5, 0.0],
            [0.2, 0.0, 0.0, 0.3, -0.5, 0.0],
        ],
        &[1, 2, 3],
    ));

    let mut archive = Archive::new();
    archive.add_step(step1);
    archive.add_step(step2);
    archive
}
