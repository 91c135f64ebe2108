//! Versioned Model Registry
//!
//! Append-only catalog of model versions with lifecycle stage labels.
//! Versions flow: None -> Staging -> Production -> Archived.
//!
//! Each logical model is an ordered sequence of versions; version numbers
//! are assigned by the registry, strictly increasing, and never reused.
//! The stage label is the only mutable field and can only be changed
//! through [`ModelRegistry::set_stage`], which records every change as a
//! [`StageTransition`] for audit.
//!
//! # Example
//!
//! ```
//! use servir::registry::{InMemoryRegistry, ModelRegistry, ModelStage};
//!
//! # fn main() -> servir::registry::Result<()> {
//! let mut registry = InMemoryRegistry::new();
//! let v1 = registry.create_version("house-price", "run-8027")?;
//! assert_eq!(v1.version, 1);
//! registry.set_stage("house-price", 1, ModelStage::Staging, false)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;
mod shared;
mod stage;
mod traits;
mod transition;
mod version;

pub use error::{RegistryError, Result};
pub use file::JsonFileRegistry;
pub use memory::InMemoryRegistry;
pub use shared::SharedRegistry;
pub use stage::ModelStage;
pub use traits::ModelRegistry;
pub use transition::StageTransition;
pub use version::ModelVersion;
