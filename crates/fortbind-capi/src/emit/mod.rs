//! C fragment emission.
//!
//! Everything here produces plain text for the external rule assembler:
//! - `structdef`: struct declarations and dict-to-struct converters
//! - `fragments`: `Py_BuildValue` return fragments and
//!   `PyArg_ParseTuple` argument fragments
//!
//! Emission is stateless; each call builds fresh strings from a
//! [`ResolvedType`](crate::resolve::ResolvedType) or classified argument
//! list and leaves its inputs untouched.

mod config;
mod fragments;
mod structdef;


pub use config::EmitConfig;
pub use fragments::{argument_fragment, classify_args, return_fragment, ArgClass, ArgFragment};
pub use structdef::emit_struct_and_converter;
