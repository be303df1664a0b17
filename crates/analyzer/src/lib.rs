//! # Payshift Analyzer
//!
//! Detects payment SDK usage (Stripe, Square) in source files and folds the
//! detections into a cross-file architecture summary.
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     │
//!     ├──> Kind Detection (from extension)
//!     │
//!     ├──> Python: Tree-sitter parse → construct scan
//!     │      ├─> imports naming a provider module
//!     │      ├─> calls matching the pattern catalog
//!     │      └─> payment-named functions (one flow per body)
//!     │
//!     ├──> JS / Java, or Python that fails to parse: line scan
//!     │
//!     └──> PaymentFlow[] ──> aggregate() ──> PaymentArchitecture
//! ```
//!
//! ## Example
//!
//! ```rust
//! use payshift_analyzer::{aggregate, PaymentProvider, SourceAnalyzer};
//!
//! let analyzer = SourceAnalyzer::with_defaults();
//! let code = "import stripe\nstripe.Customer.create(email='a@b.com')\n";
//!
//! let flows = analyzer.analyze_file("billing.py", code);
//! assert_eq!(flows.len(), 2);
//!
//! let arch = aggregate(&flows);
//! assert_eq!(arch.dominant_provider(), Some(PaymentProvider::Stripe));
//! ```

mod analyzer;
mod architecture;
mod catalog;
mod config;
mod error;
mod language;
mod line_scan;
mod provider;
mod python;
mod types;

pub use analyzer::SourceAnalyzer;
pub use architecture::{aggregate, PaymentArchitecture, ProviderSummary};
pub use catalog::{FlowMatcher, LinePattern, PatternCatalog, PaymentPattern};
pub use config::{AnalyzerConfig, ProviderToken};
pub use error::{AnalyzerError, Result};
pub use language::SourceKind;
pub use line_scan::LineScan;
pub use provider::PaymentProvider;
pub use types::PaymentFlow;
