//! Struct declaration and converter emission.

use crate::resolve::ResolvedType;

use super::EmitConfig;

/// Emit the C struct declaration and the dict-to-struct converter for a
/// resolved type.
///
/// The declaration lists one field per line in declaration order; the
/// converter performs one `*_from_pyobj` call per field in the same
/// order, short-circuiting on the first failure. Callers rely on the
/// struct's binary layout matching that sequence positionally.
pub fn emit_struct_and_converter(ty: &ResolvedType, config: &EmitConfig) -> (String, String) {
    (emit_struct(ty), emit_converter(ty, config))
}

fn emit_struct(ty: &ResolvedType) -> String {
    let mut out = String::from("typedef struct {\n");
    for field in &ty.fields {
        out.push_str(&format!("    {} {};\n", field.spec.ctype, field.name));
    }
    out.push_str(&format!("}} {};\n", ty.name));
    out
}

fn emit_converter(ty: &ResolvedType, config: &EmitConfig) -> String {
    let linkage = if config.static_linkage { "static " } else { "" };
    let mut out = format!(
        "{}int {}({} *v, PyObject *obj, const char *errmess) {{\n",
        linkage,
        ty.converter(),
        ty.name,
    );
    for field in &ty.fields {
        out.push_str(&format!(
            "    if (!{}(&(v->{}), PyDict_GetItemString(obj, \"{}\"), errmess)) {{\n",
            field.spec.from_pyobj, field.name, field.name,
        ));
        out.push_str("        return 0;\n    }\n");
    }
    out.push_str("    return 1;\n}\n");
    out
}
