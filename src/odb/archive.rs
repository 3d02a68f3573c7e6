use crate::error::{Result, SignedMisesError};
use crate::io::file::{serialized_read, serialized_write};
use crate::odb::field::FieldOutput;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One output frame of a step. Holds the frame's field outputs keyed by
/// name; names are unique within a frame and insertion order is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub description: String,
    field_outputs: Vec<FieldOutput>,
}

impl Frame {
    pub fn new(description: &str) -> Self {
        Frame {
            description: description.to_string(),
            field_outputs: Vec::new(),
        }
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.field_outputs.iter().any(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldOutput> {
        self.field_outputs.iter().find(|f| f.name == name)
    }

    pub fn field_outputs(&self) -> &[FieldOutput] {
        &self.field_outputs
    }

    /// Attaches a new field output to the frame. Field names are unique
    /// per frame; attaching under an existing name is an error rather
    /// than a replace, frames are only ever extended.
    pub fn add_field(&mut self, field: FieldOutput) -> Result<()> {
        if self.contains_field(&field.name) {
            return Err(SignedMisesError::DuplicateField(field.name));
        }
        self.field_outputs.push(field);
        Ok(())
    }
}

/// An ordered container of frames, read-only for this tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub frames: Vec<Frame>,
}

impl Step {
    pub fn new(name: &str) -> Self {
        Step {
            name: name.to_string(),
            frames: Vec::new(),
        }
    }

    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}

/// The root result container: steps in stored order.
///
/// An archive is opened by deserializing the whole file and closed by
/// writing it back to the same path. The OS file handle only lives inside
/// [`Archive::open`] and [`Archive::close`], so an error anywhere in
/// between cannot leak a handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archive {
    pub steps: Vec<Step>,
    #[serde(skip)]
    path: PathBuf,
}

impl Archive {
    pub fn new() -> Self {
        Archive {
            steps: Vec::new(),
            path: PathBuf::new(),
        }
    }

    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Opens the archive at `path` by reading and deserializing it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Archive> {
        let path = path.as_ref();
        info!("Opening result archive: {}", path.display());
        let mut archive: Archive = serialized_read(path)?;
        archive.path = path.to_path_buf();
        debug!("Archive holds {} steps", archive.steps.len());
        Ok(archive)
    }

    /// Closes the archive, persisting any in-memory mutation back to the
    /// path it was opened from. Consumes the archive so nothing can be
    /// mutated after close.
    pub fn close(self) -> Result<()> {
        info!("Closing result archive: {}", self.path.display());
        serialized_write(&self.path, &self)
    }

    /// Writes the archive to a new path without consuming it. Used when
    /// building archives rather than post-processing them.
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.path = path.as_ref().to_path_buf();
        serialized_write(&self.path, self)
    }
}

impl Default for Archive {
    fn default() -> Self {
        Archive::new()
    }
}
