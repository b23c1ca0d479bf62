//! Procedural plant growth and branch geometry.
//!
//! Main components:
//! - [`genome`] — heritable trait bundle and crossover.
//! - [`plant`] — per-specimen state, day advance and stochastic trait flips.
//! - [`growth`] — stem height, colour over age, side-branch layout.
//! - [`branch`] — lazy pre-order branch primitive generator.
//! - [`render`] — whole-plant primitive stream for a [`draw::DrawSink`].
//! - [`draw`] — drawing primitives and the sink trait.
//! - [`persist`] — the v1 four-field plant record.
//! - [`config`] — tunable constants, loadable from YAML.
//! - [`error`] — failure type for file and parse errors.
//! - [`types`] — colours and shared aliases.
//!
//! Every stochastic operation takes its random source as a parameter, so
//! a seeded generator reproduces a plant exactly.

pub mod branch;
pub mod config;
pub mod draw;
pub mod error;
pub mod genome;
pub mod growth;
pub mod persist;
pub mod plant;
pub mod render;
pub mod types;

pub use config::GrowthConfig;
pub use error::{GrowError, Result};
pub use genome::Genome;
pub use plant::Plant;
