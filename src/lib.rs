//! # Servir
//!
//! Model registry with staged promotion workflows and a prediction
//! serving pipeline.
//!
//! A trained model enters the [`registry`] as a numbered version tied to
//! the training run that produced it. The [`promote`] engine moves the
//! newest Staging version into Production while archiving its
//! predecessor, keeping at most one Production version per model. The
//! [`pipeline`] binds the version's fitted scaler to its model artifact
//! and serves deterministic predictions; [`serve`] is the thin
//! request/response boundary an HTTP adapter calls into.
//!
//! # Example
//!
//! ```
//! use servir::promote::promote_to_production;
//! use servir::registry::{InMemoryRegistry, ModelRegistry, ModelStage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = InMemoryRegistry::new();
//!
//! // Training registers a version and stages it
//! registry.create_version("house-price", "run-8027")?;
//! registry.set_stage("house-price", 1, ModelStage::Staging, false)?;
//!
//! // Promotion makes it the single Production version
//! let outcome = promote_to_production(&mut registry, "house-price")?;
//! assert_eq!(outcome.promoted, 1);
//!
//! let production = registry.latest_versions("house-price", ModelStage::Production)?;
//! assert_eq!(production.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod promote;
pub mod registry;
pub mod serve;
