//! # Payshift Mapper
//!
//! Turns detected payment code into a business-level flow description with
//! the help of a pluggable text generator, then compares the result with
//! the FlowGlad API.
//!
//! ## Architecture
//!
//! ```text
//! code + provider + flow_type
//!     │
//!     ├──> build_prompt()
//!     │
//!     ├──> TextGenerator::generate()      (async, injected)
//!     │
//!     ├──> parse_flow_response()          ```json fence > any fence > raw
//!     │        └─> degraded map on any failure
//!     │
//!     └──> PaymentFlowMap
//!              ├─> compare_with_target()  ─> TargetComparison
//!              └─> render_documentation() ─> markdown
//! ```

mod compare;
mod docs;
mod mapper;
mod prompt;
mod types;

pub use compare::{compare_with_target, target_equivalents};
pub use docs::render_documentation;
pub use mapper::{FlowMapper, TextGenerator};
pub use prompt::{build_prompt, parse_flow_response};
pub use types::{
    Complexity, Equivalent, FlowStep, PaymentFlowMap, TargetComparison, DEGRADED_PREFIX,
};
