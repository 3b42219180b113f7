//! Fragment-map assembly for the external rule assembler.
//!
//! The assembler consumes named text fragments and splices them into the
//! generated wrapper source. `buildhooks` runs once per compiled module
//! (struct declarations, converters, needs); `routine_fragment_map`
//! exposes one routine's rules under the assembler's key names.

use indexmap::IndexMap;

use fortbind_pymod::ModuleTree;

use crate::emit::{emit_struct_and_converter, EmitConfig};
use crate::extract::find_typeblocks;
use crate::resolve::resolve;
use crate::rules::RoutineRules;
use crate::{Error, Result};

/// One assembler fragment value: a single text or a list of texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    List(Vec<String>),
}

/// Per-module fragments, one entry per derived type in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleHooks {
    /// Struct declarations.
    pub typedefs: Vec<String>,
    /// Dict-to-struct converter functions.
    pub typefuncs: Vec<String>,
    /// Per-type `*_from_pyobj` helpers the converters call.
    pub need: Vec<Vec<String>>,
}

impl ModuleHooks {
    /// Key/value view under the assembler's fragment names.
    ///
    /// `need` is flattened to the distinct helper names in first-use
    /// order; the assembler only uses it to pull helper definitions into
    /// the output once.
    pub fn fragment_map(&self) -> IndexMap<&'static str, Fragment> {
        let mut flat_need: Vec<String> = Vec::new();
        for per_type in &self.need {
            for name in per_type {
                if !flat_need.contains(name) {
                    flat_need.push(name.clone());
                }
            }
        }

        let mut map = IndexMap::new();
        map.insert(
            "typedefs_derivedtypedefs",
            Fragment::List(self.typedefs.clone()),
        );
        map.insert(
            "typedefs_derivedtypefuncs",
            Fragment::List(self.typefuncs.clone()),
        );
        map.insert("need", Fragment::List(flat_need));
        map
    }
}

/// Build all per-module fragments.
///
/// Extracts every derived-type block, resolves it, and emits its struct
/// and converter. Duplicate type names anywhere in the dump violate the
/// struct-name uniqueness the generated source depends on and surface as
/// `AmbiguousTypeBlock`.
pub fn buildhooks(tree: &ModuleTree, config: &EmitConfig) -> Result<ModuleHooks> {
    let ids = find_typeblocks(tree);

    for (i, &id) in ids.iter().enumerate() {
        let name = &tree.get(id).name;
        if ids[..i].iter().any(|&prev| &tree.get(prev).name == name) {
            let scope = tree
                .parent(id)
                .map(|p| tree.get(p).name.clone())
                .unwrap_or_default();
            return Err(Error::AmbiguousTypeBlock {
                type_name: name.clone(),
                scope,
            });
        }
    }

    let mut hooks = ModuleHooks::default();
    for &id in &ids {
        let ty = resolve(tree, id)?;
        let (decl, func) = emit_struct_and_converter(&ty, config);
        hooks.typedefs.push(decl);
        hooks.typefuncs.push(func);
        hooks
            .need
            .push(ty.needs().iter().map(|s| s.to_string()).collect());
    }
    Ok(hooks)
}

/// Key/value view of one routine's rules under the assembler's names.
pub fn routine_fragment_map(rules: &RoutineRules) -> IndexMap<&'static str, Fragment> {
    let mut map = IndexMap::new();
    map.insert(
        "derived_returnformat",
        Fragment::Text(rules.return_format.clone()),
    );
    map.insert("derived_return", Fragment::Text(rules.return_value.clone()));
    map.insert(
        "derived_argformat",
        Fragment::Text(rules.arg_format.clone()),
    );
    map.insert(
        "derived_callfortran",
        Fragment::Text(rules.callfortran.clone()),
    );
    map.insert("frompyobj", Fragment::Text(rules.frompyobj.clone()));
    map
}
