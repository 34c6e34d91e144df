//! Value Canonicalization
//!
//! The emulated store only ever holds strings. Whatever a caller passes to a
//! write command is reduced to its canonical string before storage, and read
//! commands hand that string back unchanged.
//!
//! ## Modules
//!
//! - `types`: the `Value` enum and its conversions
//! - `repr`: the str/repr formatting rules
//!
//! ## Example
//!
//! ```
//! use mockkv::value::{canonicalize, Value};
//!
//! let value = Value::seq([Value::from(1), Value::from("2")]);
//! assert_eq!(canonicalize(&value), "[1, '2']");
//! ```

pub mod repr;
pub mod types;

pub use repr::canonicalize;
pub use types::Value;
