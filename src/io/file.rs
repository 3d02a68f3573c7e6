//! Serialized read and write of result archives.
//!
//! Supports JSON (`.json`) and Bincode (`.bin`) payloads, optionally
//! wrapped in XZ (`.xz`) or Zstandard (`.zst`) compression. The codec is
//! picked from the inner extension, the compression from the outer one,
//! so `archive.bin.xz` is a compressed binary archive.

use crate::error::{Result, SignedMisesError};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

fn get_writer(path: &Path) -> Result<Box<dyn Write>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| SignedMisesError::UnsupportedExtension(path_str(path)))?;
    let file = File::create(path).map_err(|source| SignedMisesError::Save {
        path: path_str(path),
        source,
    })?;
    match extension {
        "json" | "bin" => Ok(Box::new(BufWriter::new(file))),
        // level 1 trades ratio for speed, archives compress well either way
        "xz" => Ok(Box::new(xz2::write::XzEncoder::new(file, 1))),
        // auto_finish flushes the encoder's internal buffer on drop
        "zst" => {
            let encoder = zstd::Encoder::new(file, 1).map_err(|source| SignedMisesError::Save {
                path: path_str(path),
                source,
            })?;
            Ok(Box::new(encoder.auto_finish()))
        }
        _ => Err(SignedMisesError::UnsupportedExtension(path_str(path))),
    }
}

fn get_reader(path: &Path) -> Result<Box<dyn Read>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| SignedMisesError::UnsupportedExtension(path_str(path)))?;
    let file = File::open(path).map_err(|source| SignedMisesError::Open {
        path: path_str(path),
        source,
    })?;
    match extension {
        "json" | "bin" => Ok(Box::new(BufReader::new(file))),
        "xz" => Ok(Box::new(xz2::read::XzDecoder::new(file))),
        "zst" => {
            let decoder = zstd::Decoder::new(file).map_err(|source| SignedMisesError::Open {
                path: path_str(path),
                source,
            })?;
            Ok(Box::new(decoder))
        }
        _ => Err(SignedMisesError::UnsupportedExtension(path_str(path))),
    }
}

/// Reads and deserializes data from a `.json`/`.bin` file, possibly
/// compressed (`.xz`/`.zst`).
pub fn serialized_read<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    debug!("Reading serialized data from file: {}", path.display());
    let mut reader = get_reader(path)?;
    let name = path_str(path);
    if name.contains(".json") {
        Ok(serde_json::from_reader(&mut reader)?)
    } else if name.contains(".bin") {
        Ok(bincode::deserialize_from(&mut reader)?)
    } else {
        Err(SignedMisesError::UnsupportedExtension(name))
    }
}

/// Serializes and writes data to a `.json`/`.bin` file, possibly
/// compressed (`.xz`/`.zst`).
pub fn serialized_write<T: Serialize, P: AsRef<Path>>(path: P, data: &T) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing serialized data to file: {}", path.display());
    let start_time = Instant::now();
    let mut writer = get_writer(path)?;
    let name = path_str(path);
    if name.contains(".json") {
        serde_json::to_writer(&mut writer, data)?;
    } else if name.contains(".bin") {
        bincode::serialize_into(&mut writer, data)?;
    } else {
        return Err(SignedMisesError::UnsupportedExtension(name));
    }
    writer.flush().map_err(|source| SignedMisesError::Save {
        path: path_str(path),
        source,
    })?;
    debug!(
        "Serialization time: {:.6} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
