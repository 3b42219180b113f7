//! Derived-type block discovery.

use fortbind_pymod::{BlockId, ModuleTree};

/// Collect every derived-type definition block, in pre-order.
///
/// Walks the block tree to arbitrary depth (module, routine, nested
/// blocks) without mutating it. A dump with no derived types yields an
/// empty list; that is not an error.
pub fn find_typeblocks(tree: &ModuleTree) -> Vec<BlockId> {
    let mut out = Vec::new();
    let mut stack: Vec<BlockId> = tree.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let block = tree.get(id);
        if block.kind.is_type_def() {
            out.push(id);
        }
        stack.extend(block.body.iter().rev().copied());
    }
    out
}
