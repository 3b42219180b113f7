//! Return-value and argument marshalling fragments.

use fortbind_pymod::{ModuleTree, Routine};

use crate::convmap::{self, ConvSpec};
use crate::resolve::{resolve_in_scope, ResolvedType};
use crate::{Error, Result};

use super::EmitConfig;

/// Parameter classification for marshalling.
///
/// Resolved once per parameter; emission code matches on the variant
/// instead of re-inspecting kind strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgClass {
    /// Scalar parsed directly by the positional format string.
    Plain { name: String, spec: ConvSpec },
    /// Derived-type argument parsed as a dict (`O` code) and converted
    /// after the parse call.
    Derived { name: String, ty: ResolvedType },
}

impl ArgClass {
    pub fn name(&self) -> &str {
        match self {
            Self::Plain { name, .. } | Self::Derived { name, .. } => name,
        }
    }
}

/// Combined parse and conversion fragments for one routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgFragment {
    /// `PyArg_ParseTuple` format string, one code per parameter.
    pub format: String,
    /// Destination pointers for the parse call, in positional order.
    pub pointers: Vec<String>,
    /// Combined source block: `PyObject *` slots for derived-type
    /// parameters, the positional parse call, then one converter
    /// invocation per derived-type parameter in parameter order.
    pub frompyobj: String,
}

/// Classify a routine's parameters in positional order.
///
/// Derived-type parameters are resolved against the routine's enclosing
/// scope; scalar parameters against the conversion table. Any parameter
/// that fits neither class fails the whole routine.
pub fn classify_args(tree: &ModuleTree, routine: &Routine<'_>) -> Result<Vec<ArgClass>> {
    let mut out = Vec::with_capacity(routine.args().len());
    for arg in routine.args() {
        let unsupported = |kind: String| Error::UnsupportedKind {
            scope: routine.name().to_string(),
            name: arg.clone(),
            kind,
        };
        let Some(var) = routine.var(arg) else {
            return Err(unsupported("undeclared".to_string()));
        };
        if let Some(typename) = var.typespec.derived_name() {
            let ty = resolve_in_scope(tree, routine.parent(), routine.name(), typename)?;
            out.push(ArgClass::Derived {
                name: arg.clone(),
                ty,
            });
            continue;
        }
        if var.is_array() {
            return Err(unsupported(format!("{} array", var.typespec.describe())));
        }
        let spec = var
            .typespec
            .kind()
            .and_then(convmap::lookup)
            .ok_or_else(|| unsupported(var.typespec.describe()))?;
        out.push(ArgClass::Plain {
            name: arg.clone(),
            spec: *spec,
        });
    }
    Ok(out)
}

/// Build the `Py_BuildValue` fragments returning a struct as a Python
/// dict.
///
/// Returns the format string (`{s:f,s:f}` for two float fields) and the
/// matching value list (`"x", r.x,"y", r.y` for instance `r`), with no
/// leading or trailing comma artifacts.
pub fn return_fragment(ty: &ResolvedType, instance: &str) -> (String, String) {
    let mut format = String::from("{");
    let mut values = String::new();
    for (i, field) in ty.fields.iter().enumerate() {
        if i > 0 {
            format.push(',');
            values.push(',');
        }
        format.push_str("s:");
        format.push(field.spec.pycode);
        values.push_str(&format!("\"{}\", {}.{}", field.name, instance, field.name));
    }
    format.push('}');
    (format, values)
}

/// Build the argument-parsing fragment from classified parameters.
///
/// Plain parameters contribute their parse code and `&name` to the
/// positional parse call; derived parameters contribute `O` and a
/// `PyObject *` slot, converted afterwards through the type's converter.
pub fn argument_fragment(
    classes: &[ArgClass],
    routine: &str,
    config: &EmitConfig,
) -> ArgFragment {
    let mut format = String::new();
    let mut pointers = Vec::with_capacity(classes.len());
    let mut conversions = String::new();

    for class in classes {
        match class {
            ArgClass::Plain { name, spec } => {
                format.push(spec.pycode);
                pointers.push(format!("&{name}"));
            }
            ArgClass::Derived { name, ty } => {
                format.push('O');
                pointers.push(format!("&py_{name}"));
                let errmess = match &config.errmess_prefix {
                    Some(prefix) => format!(
                        "{prefix}.{routine}() could not convert argument {name} to {}",
                        ty.name,
                    ),
                    None => format!(
                        "{routine}() could not convert argument {name} to {}",
                        ty.name,
                    ),
                };
                conversions.push_str(&format!(
                    "    if (!{}(&{name}, py_{name}, \"{errmess}\")) {{\n",
                    ty.converter(),
                ));
                conversions.push_str("        return NULL;\n    }\n");
            }
        }
    }

    let mut frompyobj = String::new();
    for class in classes {
        if let ArgClass::Derived { name, .. } = class {
            frompyobj.push_str(&format!("    PyObject *py_{name} = NULL;\n"));
        }
    }
    let parse_args = if pointers.is_empty() {
        String::new()
    } else {
        format!(", {}", pointers.join(", "))
    };
    frompyobj.push_str(&format!(
        "    if (!PyArg_ParseTuple(args, \"{format}\"{parse_args})) {{\n",
    ));
    frompyobj.push_str("        return NULL;\n    }\n");
    frompyobj.push_str(&conversions);

    ArgFragment {
        format,
        pointers,
        frompyobj,
    }
}
