//! Scaffold and suggestion block injection for GML strategy files.
//!
//! Both kinds of block are non-executable: every inserted line is commented
//! out, so injecting never changes the behavior of the script.
//!
//! ## Scaffold blocks (`scaffold`)
//!
//! Placed right before the body brace of the first `build_strategy`
//! function and delimited by configurable banners:
//!
//! ```text
//! build_strategy = function(agent) /* ANIMUS SUGGESTION */
//! // return Animus_StrategyTemplates.timed(...);
//! /* END */
//! {
//! ```
//!
//! ## Suggestion blocks (`suggestion`)
//!
//! Placed at an explicit character offset and wrapped in a block comment
//! carrying the time of insertion:
//!
//! ```text
//! /* ===== ANIMUS TEMPLATE (from suggestions 2026-10-18 14:03:07) =====
//! // code
//! ===== END ANIMUS TEMPLATE ===== */
//! ```

pub mod anchor;
pub mod error;
pub mod scaffold;
pub mod suggestion;

pub use anchor::find_strategy_anchor;
pub use error::{Error, Result};
pub use scaffold::{Banner, Injection, comment_out, has_banner, inject_scaffold};
pub use suggestion::{SUGGESTION_MARKER, has_suggestion, insert_suggestion};
