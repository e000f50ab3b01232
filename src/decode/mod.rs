//! Response shapes and the generic decode step
//!
//! Endpoints declare a lightweight shape descriptor for their payload in
//! the catalog; one generic checker validates responses against it
//! instead of a bespoke type per call site. Provider responses are
//! dynamic and most fields optional, so the check is deliberately
//! lenient: declared fields are type-checked only when present, and
//! undeclared fields pass through untouched.

mod shape;

pub use shape::{check_shape, FieldShape};

#[cfg(test)]
mod tests;
