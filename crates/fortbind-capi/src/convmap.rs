//! Kind conversion registry.
//!
//! Maps a portable iso_c_binding kind tag to the C storage type, the
//! one-character `PyArg_ParseTuple` format code, and the `*_from_pyobj`
//! helper that converts a single Python value into that storage. The
//! table is process-lifetime, read-only state; binding a row to a field
//! name produces a fresh [`BoundField`] and never touches the template.

/// Template conversion row, unbound to any field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvSpec {
    /// Portable kind tag from the declaration (`c_int`, `c_double`, ...).
    pub kind: &'static str,
    /// C storage type used in emitted struct fields.
    pub ctype: &'static str,
    /// `PyArg_ParseTuple` / `Py_BuildValue` format code.
    pub pycode: char,
    /// Converter with signature `int f(T *dst, PyObject *src, const char *errmess)`.
    pub from_pyobj: &'static str,
}

/// Conversion row bound to a named struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    pub name: String,
    pub spec: ConvSpec,
}

/// The fixed scalar conversion set: four integer widths, two float widths.
///
/// Unsigned integer kinds are deliberately absent; the Python C API has no
/// parse codes that round-trip them. A missed lookup must fail resolution,
/// never coerce.
const CONV_TABLE: &[ConvSpec] = &[
    ConvSpec {
        kind: "c_short",
        ctype: "short",
        pycode: 'h',
        from_pyobj: "short_from_pyobj",
    },
    ConvSpec {
        kind: "c_int",
        ctype: "int",
        pycode: 'i',
        from_pyobj: "int_from_pyobj",
    },
    ConvSpec {
        kind: "c_long",
        ctype: "long",
        pycode: 'l',
        from_pyobj: "long_from_pyobj",
    },
    ConvSpec {
        kind: "c_long_long",
        ctype: "long_long",
        pycode: 'L',
        from_pyobj: "long_long_from_pyobj",
    },
    ConvSpec {
        kind: "c_float",
        ctype: "float",
        pycode: 'f',
        from_pyobj: "float_from_pyobj",
    },
    ConvSpec {
        kind: "c_double",
        ctype: "double",
        pycode: 'd',
        from_pyobj: "double_from_pyobj",
    },
];

/// Look up the conversion row for a kind tag.
pub fn lookup(kind: &str) -> Option<&'static ConvSpec> {
    CONV_TABLE.iter().find(|spec| spec.kind == kind)
}

/// All registered rows, in table order.
pub fn rows() -> &'static [ConvSpec] {
    CONV_TABLE
}

impl ConvSpec {
    /// Bind this row to a struct field name.
    pub fn bind(&self, field: &str) -> BoundField {
        BoundField {
            name: field.to_string(),
            spec: *self,
        }
    }
}
