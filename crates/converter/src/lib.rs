//! # Payshift Converter
//!
//! Rewrites Stripe and Square SDK usage onto the FlowGlad API with ordered
//! regex substitution rules.
//!
//! ## Architecture
//!
//! ```text
//! code + provider + SourceKind
//!     │
//!     ├──> Python: provider rules ─> keyword renames ─> import preamble
//!     │
//!     ├──> JS/TS:  provider JavaScript table (ends with env-var renames)
//!     │
//!     └──> Java / other: provider rules only
//!             │
//!             └──> CodeTransformation
//! ```
//!
//! Each rule runs over the output of the previous one, so the order of a
//! catalog is part of its meaning.
//!
//! Converted code can be checked with [`validate_transformation`] before it
//! is written, or bundled into a standalone Python script with
//! [`ConversionEngine::migration_script`].
//!
//! ## Example
//!
//! ```rust
//! use payshift_analyzer::{PaymentProvider, SourceKind};
//! use payshift_converter::ConversionEngine;
//!
//! let engine = ConversionEngine::with_defaults();
//! let result = engine.convert(
//!     "import stripe\nstripe.Customer.create(email='a@b.com')",
//!     PaymentProvider::Stripe,
//!     SourceKind::PythonLike,
//! );
//! assert!(result.transformed_code.contains("flowglad.customers.create"));
//! ```

mod catalog;
mod engine;
mod error;
mod imports;
mod rule;
mod script;
mod types;
mod validate;

pub use catalog::RuleCatalog;
pub use engine::ConversionEngine;
pub use error::{ConverterError, Result};
pub use imports::ImportPreamble;
pub use rule::{ConversionRule, KeywordRename};
pub use script::ENV_RENAMES;
pub use types::{CodeTransformation, TransformationType};
pub use validate::{validate_code, validate_transformation, ChangeValidation};
