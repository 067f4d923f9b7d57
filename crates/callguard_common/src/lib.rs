//! CallGuard Common - shared models and the deterministic assistant core.
//!
//! Everything in this crate is pure and synchronous: the case normalizer,
//! the offline fallback rule engine, the backend-reply formatter, and the
//! in-memory case repository. Network I/O lives in `callguard_client`.

pub mod case_aware;
pub mod case_view;
pub mod context;
pub mod fallback;
pub mod formatter;
pub mod normalize;
pub mod response;
pub mod stats;
pub mod store;

pub use case_view::*;
pub use context::*;
pub use normalize::normalize;
pub use response::*;
pub use stats::*;
pub use store::*;
