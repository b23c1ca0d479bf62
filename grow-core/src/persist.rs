//! Version 1 plant record: the four-field JSON file written by "Save Plant".
//!
//! The record is deliberately lossy. Only `strain`, `age`, `wasSTS` and
//! `sativaRatio` survive a save/load cycle; every other genome trait and
//! all plant state come back at their defaults. Absent keys fall back to
//! [`Genome::default`] (and age 0), unknown keys are ignored, and a key
//! holding an unusable value falls back to its default on its own, without
//! discarding the other keys. Only text that is not JSON at all is an error.

use std::{fs, path::Path};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    error::{GrowError, Result},
    genome::Genome,
    plant::Plant,
    types::Days,
};

/// Schema version of [`PlantRecord`]. Not written to disk, to keep the
/// key set identical to existing files.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlantRecord {
    pub strain: String,
    pub age: Days,
    #[serde(rename = "wasSTS")]
    pub was_sts: bool,
    #[serde(rename = "sativaRatio")]
    pub sativa_ratio: f32,
}

impl Default for PlantRecord {
    fn default() -> Self {
        Self::from_plant(&Plant::default())
    }
}

impl PlantRecord {
    pub fn from_plant(plant: &Plant) -> Self {
        Self {
            strain: plant.genome.strain.clone(),
            age: plant.age,
            was_sts: plant.genome.was_sts_converted,
            sativa_ratio: plant.genome.sativa_ratio,
        }
    }

    /// Rebuilds a fresh plant carrying the four persisted fields.
    pub fn into_plant(self) -> Plant {
        let genome = Genome {
            strain: self.strain,
            was_sts_converted: self.was_sts,
            sativa_ratio: self.sativa_ratio,
            ..Genome::default()
        };
        let mut plant = Plant::new(genome);
        plant.age = self.age;
        plant
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record, degrading each unusable key to its default.
    ///
    /// ### Returns
    /// - `Ok` for any syntactically valid JSON document; a non-object
    ///   document yields the default record.
    /// - `Err(GrowError::Json)` if `text` is not JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            log::warn!("Plant record is not a JSON object, using defaults");
            return defaults;
        };

        Self {
            strain: read_key(obj, "strain", |v| v.as_str().map(str::to_string))
                .unwrap_or(defaults.strain),
            age: read_key(obj, "age", json_days).unwrap_or(defaults.age),
            was_sts: read_key(obj, "wasSTS", Value::as_bool).unwrap_or(defaults.was_sts),
            sativa_ratio: read_key(obj, "sativaRatio", |v| v.as_f64().map(|f| f as f32))
                .unwrap_or(defaults.sativa_ratio),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| GrowError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved plant {} to {}", self.strain, path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GrowError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record = Self::from_json(&text)?;
        log::info!("Loaded plant {} from {}", record.strain, path.display());
        Ok(record)
    }
}

/// Reads `key` from `obj`, warning when it is present but unusable.
fn read_key<T>(
    obj: &Map<String, Value>,
    key: &str,
    read: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = obj.get(key)?;
    let parsed = read(value);
    if parsed.is_none() {
        log::warn!("Plant record key '{key}' has unusable value {value}, using default");
    }
    parsed
}

/// Integral JSON numbers as days; negative ages clamp to 0, fractional
/// ones are unusable.
fn json_days(value: &Value) -> Option<Days> {
    if let Some(n) = value.as_u64() {
        return Some(n.min(u64::from(Days::MAX)) as Days);
    }
    if value.as_i64().is_some() {
        return Some(0);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 {
        Some(f.clamp(0.0, f64::from(Days::MAX)) as Days)
    } else {
        None
    }
}

/// Writes `plant` as a v1 record.
pub fn save_plant(plant: &Plant, path: impl AsRef<Path>) -> Result<()> {
    PlantRecord::from_plant(plant).save(path)
}

/// Reads a v1 record and rebuilds the plant from it.
pub fn load_plant(path: impl AsRef<Path>) -> Result<Plant> {
    Ok(PlantRecord::load(path)?.into_plant())
}
