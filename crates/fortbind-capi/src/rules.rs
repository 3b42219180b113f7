//! Per-routine wrapping rules for derived-type returns.

use fortbind_pymod::{ModuleTree, Routine};

use crate::emit::{argument_fragment, classify_args, return_fragment, ArgClass, EmitConfig};
use crate::resolve::resolve_in_scope;
use crate::{Error, Result};

/// Fragments and bookkeeping the assembler consumes for one routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineRules {
    /// `Py_BuildValue` format for the returned struct.
    pub return_format: String,
    /// `Py_BuildValue` value list for the returned struct.
    pub return_value: String,
    /// `PyArg_ParseTuple` format for the parameter list.
    pub arg_format: String,
    /// Destination pointers for the parse call.
    pub arg_pointers: Vec<String>,
    /// Converter invocations run after the parse call.
    pub frompyobj: String,
    /// Derived-type argument addresses for the Fortran call, with a
    /// trailing comma only when plain arguments follow.
    pub callfortran: String,
    /// Conversion helper required by each argument, in positional order.
    pub need: Vec<String>,
}

/// Compute the wrapping rules for one routine.
///
/// The first out/inout derived-type argument, in declaration order,
/// determines the returned type and names the instance the return
/// fragment reads from. `NoMatchingReturnType` signals a routine this
/// path cannot wrap; the assembler falls back to scalar handling or
/// rejects the routine. Routines with several returnable derived-type
/// arguments wrap only the first.
pub fn routine_rules(
    tree: &ModuleTree,
    routine: &Routine<'_>,
    config: &EmitConfig,
) -> Result<RoutineRules> {
    let (ret_name, ret_typename) = first_returnable_derived(routine)?;
    let ret_ty = resolve_in_scope(tree, routine.parent(), routine.name(), &ret_typename)?;
    let (return_format, return_value) = return_fragment(&ret_ty, &ret_name);

    let classes = classify_args(tree, routine)?;
    let frag = argument_fragment(&classes, routine.name(), config);

    let derived_addrs: Vec<String> = classes
        .iter()
        .filter_map(|class| match class {
            ArgClass::Derived { name, .. } => Some(format!("&{name}")),
            ArgClass::Plain { .. } => None,
        })
        .collect();
    let has_plain = classes
        .iter()
        .any(|class| matches!(class, ArgClass::Plain { .. }));
    let mut callfortran = derived_addrs.join(",");
    if !callfortran.is_empty() && has_plain {
        callfortran.push(',');
    }

    let need = classes
        .iter()
        .map(|class| match class {
            ArgClass::Plain { spec, .. } => spec.from_pyobj.to_string(),
            ArgClass::Derived { ty, .. } => ty.converter(),
        })
        .collect();

    Ok(RoutineRules {
        return_format,
        return_value,
        arg_format: frag.format,
        arg_pointers: frag.pointers,
        frompyobj: frag.frompyobj,
        callfortran,
        need,
    })
}

/// First out/inout derived-type argument, in declaration order.
fn first_returnable_derived(routine: &Routine<'_>) -> Result<(String, String)> {
    for arg in routine.args() {
        let Some(var) = routine.var(arg) else {
            continue;
        };
        if !var.intent.is_returnable() {
            continue;
        }
        if let Some(typename) = var.typespec.derived_name() {
            return Ok((arg.clone(), typename.to_string()));
        }
    }
    Err(Error::NoMatchingReturnType {
        routine: routine.name().to_string(),
    })
}
