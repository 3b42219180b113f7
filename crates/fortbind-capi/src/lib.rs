//! C API generation for Fortran derived types.
//!
//! Walks a parsed module tree ([`fortbind_pymod::ModuleTree`]) and emits
//! the C fragments a Python extension wrapper needs to pass user-defined
//! aggregate types across the boundary:
//! - `convmap` - kind registry (C storage type, parse code, converter)
//! - `extract` - derived-type block discovery
//! - `resolve` - field resolution against the registry
//! - `emit` - struct declarations, converters, marshalling fragments
//! - `rules` - per-routine return/argument rule computation
//! - `hooks` - fragment-map assembly for the external rule assembler

pub mod convmap;
pub mod emit;
pub mod extract;
pub mod hooks;
pub mod resolve;
pub mod rules;

#[cfg(test)]
pub mod test_utils;


/// Errors surfaced to the wrapper assembler.
///
/// Every variant carries enough context (type, field, routine names) for a
/// precise diagnostic. Generation is all-or-nothing per type and per
/// routine: a struct with silently dropped fields mismatches the Fortran
/// layout, so nothing partial is ever emitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A field or parameter kind has no conversion-table entry
    /// (arrays, nested derived types, unsigned or unrecognized kinds).
    #[error("unsupported kind `{kind}` for `{name}` in `{scope}`")]
    UnsupportedKind {
        scope: String,
        name: String,
        kind: String,
    },

    /// No out/inout derived-type argument to build a return value from.
    #[error("routine `{routine}` has no out/inout derived-type argument")]
    NoMatchingReturnType { routine: String },

    /// Two type definitions share a name; struct names must be unique in
    /// the generated source, so this is a front-end defect.
    #[error("derived type `{type_name}` is defined more than once in scope `{scope}`")]
    AmbiguousTypeBlock { type_name: String, scope: String },

    /// A referenced derived type has no definition in the enclosing scope.
    #[error("routine `{routine}`: derived type `{type_name}` is not defined in the enclosing scope")]
    UnknownType { routine: String, type_name: String },
}

/// Result type for generation passes.
pub type Result<T> = std::result::Result<T, Error>;
