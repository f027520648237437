//! Test harness for swivel widgets.
//!
//! ```
//! use swivel_test::Selector;
//!
//! let sel = Selector::parse("[data-testid='wifi']").unwrap();
//! assert_eq!(sel, Selector::TestId("wifi".to_string()));
//! ```

mod harness;
mod selector;

pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
