//! Prediction Pipeline
//!
//! Binds a fitted feature scaler to a registered model version and turns
//! raw named features into a scalar prediction.
//!
//! A pipeline run is stateless: resolve a version (explicitly pinned or
//! the current Production), load the `(scaler, column mapping, model)`
//! artifact triple for the version's run id, validate the incoming
//! feature schema, scale, rename columns, and run the model's
//! deterministic inference. Every failure crosses the boundary as a
//! typed [`PredictError`]; the serving layer always receives a number or
//! an error, never an unhandled failure.
//!
//! # Example
//!
//! ```
//! use servir::pipeline::{ColumnMapping, LinearModel, PredictivePair, StandardScaler};
//!
//! # fn main() -> servir::pipeline::Result<()> {
//! let scaler = StandardScaler::new(
//!     vec!["MedInc".into(), "HouseAge".into()],
//!     vec![3.87, 28.6],
//!     vec![1.9, 12.6],
//! )?;
//! let mapping = ColumnMapping::identity(&["MedInc", "HouseAge"]);
//! let model = LinearModel::new(
//!     vec!["MedInc".into(), "HouseAge".into()],
//!     vec![0.5, -0.1],
//!     2.0,
//! )?;
//! let pair = PredictivePair::from_parts("demo", 1, "run-1", scaler, mapping, model);
//!
//! let y = pair.predict(&[("MedInc".into(), 8.3), ("HouseAge".into(), 41.0)])?;
//! assert!(y.is_finite());
//! # Ok(())
//! # }
//! ```

mod error;
mod mapping;
mod model;
mod pair;
mod scaler;
mod selector;

pub use error::{PredictError, Result};
pub use mapping::ColumnMapping;
pub use model::LinearModel;
pub use pair::{PairCache, PredictivePair};
pub use scaler::StandardScaler;
pub use selector::{ModelUri, VersionSelector};
