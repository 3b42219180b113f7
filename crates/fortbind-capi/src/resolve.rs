//! Field resolution for derived-type blocks.

use fortbind_pymod::{Block, BlockId, ModuleTree};

use crate::convmap::{self, BoundField};
use crate::{Error, Result};

/// A derived type with every field resolved against the conversion table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub name: String,
    /// Bound rows in declaration order; definitive for struct layout.
    pub fields: Vec<BoundField>,
}

impl ResolvedType {
    /// Name of the dict-to-struct converter emitted for this type.
    pub fn converter(&self) -> String {
        format!("{}_from_object", self.name)
    }

    /// Distinct `*_from_pyobj` helpers the converter depends on, in
    /// first-use order.
    pub fn needs(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        for field in &self.fields {
            if !out.contains(&field.spec.from_pyobj) {
                out.push(field.spec.from_pyobj);
            }
        }
        out
    }
}

/// Resolve every field of a type-definition block.
///
/// Fields are visited in declaration order, never mapping-iteration
/// order. Any field the conversion table cannot place (array, nested
/// derived type, unknown or missing kind) aborts resolution for the
/// whole type.
pub fn resolve(tree: &ModuleTree, id: BlockId) -> Result<ResolvedType> {
    resolve_block(tree.get(id))
}

fn resolve_block(block: &Block) -> Result<ResolvedType> {
    let mut fields = Vec::with_capacity(block.vars.len());
    for (name, var) in &block.vars {
        let unsupported = |kind: String| Error::UnsupportedKind {
            scope: block.name.clone(),
            name: name.clone(),
            kind,
        };
        if var.is_array() {
            return Err(unsupported(format!("{} array", var.typespec.describe())));
        }
        let Some(kind) = var.typespec.kind() else {
            return Err(unsupported(var.typespec.describe()));
        };
        let Some(spec) = convmap::lookup(kind) else {
            return Err(unsupported(kind.to_string()));
        };
        fields.push(spec.bind(name));
    }
    Ok(ResolvedType {
        name: block.name.clone(),
        fields,
    })
}

/// Locate a derived type by name among a scope's direct children and
/// resolve it.
///
/// The scan is linear over the child blocks of the enclosing scope only;
/// the wrapper generator does not inherit type definitions across nested
/// scopes, so no recursive search happens here. `scope` of `None` means
/// the routine sits at the top level and its siblings are the dump roots.
pub fn resolve_in_scope(
    tree: &ModuleTree,
    scope: Option<BlockId>,
    routine: &str,
    typename: &str,
) -> Result<ResolvedType> {
    let (scope_name, children) = match scope {
        Some(id) => {
            let block = tree.get(id);
            (block.name.as_str(), block.body.as_slice())
        }
        None => ("", tree.roots()),
    };

    let mut found: Option<BlockId> = None;
    for &child in children {
        let block = tree.get(child);
        if block.kind.is_type_def() && block.name == typename {
            if found.is_some() {
                return Err(Error::AmbiguousTypeBlock {
                    type_name: typename.to_string(),
                    scope: scope_name.to_string(),
                });
            }
            found = Some(child);
        }
    }

    match found {
        Some(id) => resolve(tree, id),
        None => Err(Error::UnknownType {
            routine: routine.to_string(),
            type_name: typename.to_string(),
        }),
    }
}
