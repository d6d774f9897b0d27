//! Method + path route table with named routes.
//!
//! Routes are declared once through [`RouteTableBuilder`], frozen into an
//! immutable [`RouteTable`] and shared behind an `Arc`. Lookup walks the
//! entries in specificity order (literal segments before parameters) and the
//! first match wins. Named routes support reverse lookup via
//! [`RouteTable::url_for`].

pub mod error;
pub mod pattern;
pub mod table;

pub use error::RouterError;
pub use table::{PathParams, RouteTable, RouteTableBuilder};
