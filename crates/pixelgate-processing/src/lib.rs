//! Pixelgate Processing Library
//!
//! This crate turns a named operation plus request options into a transformed
//! image. The flow for every call is:
//!
//! 1. `registry` resolves the operation and `operations` validates its
//!    required options,
//! 2. `builder` produces a `TransformDescriptor`,
//! 3. `executor` runs the `Engine` behind a panic and deadline guard and
//!    optionally uploads the output through `pixelgate_storage`.

pub mod builder;
pub mod descriptor;
pub mod engine;
pub mod executor;
pub mod format;
pub mod operation;
pub mod operations;
pub mod output;
pub mod persistence;
pub mod registry;

// Re-export commonly used types
pub use builder::build_descriptor;
pub use descriptor::{Angle, Rgb, TransformDescriptor, WatermarkDescriptor};
pub use engine::{Engine, EngineError, ImageInfo, PixelEngine};
pub use executor::Executor;
pub use format::{content_type, ImageType};
pub use operation::Operation;
pub use output::ImageOutput;
pub use persistence::PersistenceDirective;
pub use registry::{OperationFn, OperationRegistry};
