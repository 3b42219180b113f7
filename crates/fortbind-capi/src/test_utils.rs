//! Shared fixtures for generation tests.

use fortbind_pymod::{BlockId, ModuleTree, Routine};

/// Parse a fixture JSON dump into a tree.
pub fn tree(json: &str) -> ModuleTree {
    ModuleTree::from_json(json).expect("fixture JSON parses")
}

/// First block with the given name.
pub fn block_named(tree: &ModuleTree, name: &str) -> BlockId {
    tree.iter()
        .find(|(_, block)| block.name == name)
        .map(|(id, _)| id)
        .expect("fixture block exists")
}

/// Routine view for the block with the given name.
pub fn routine_named<'a>(tree: &'a ModuleTree, name: &str) -> Routine<'a> {
    tree.routine(block_named(tree, name))
        .expect("fixture block is a routine")
}

/// A module with one two-field derived type and a routine returning it.
pub const POINT_MODULE: &str = r#"[
    {
        "block": "module",
        "name": "vectors",
        "body": [
            {
                "block": "type",
                "name": "point",
                "vars": {
                    "x": {"typespec": "real", "kindselector": {"kind": "c_float"}},
                    "y": {"typespec": "real", "kindselector": {"kind": "c_float"}}
                }
            },
            {
                "block": "subroutine",
                "name": "make_point",
                "args": ["r"],
                "vars": {
                    "r": {"typespec": "type", "typename": "point", "intent": ["out"]}
                }
            }
        ]
    }
]"#;

/// A module mixing derived-type and scalar arguments.
pub const PARTICLE_MODULE: &str = r#"[
    {
        "block": "module",
        "name": "dynamics",
        "body": [
            {
                "block": "type",
                "name": "particle",
                "vars": {
                    "id": {"typespec": "integer", "kindselector": {"kind": "c_int"}},
                    "mass": {"typespec": "real", "kindselector": {"kind": "c_double"}}
                }
            },
            {
                "block": "subroutine",
                "name": "rescale",
                "args": ["p", "n", "scale"],
                "vars": {
                    "p": {"typespec": "type", "typename": "particle", "intent": ["inout"]},
                    "n": {"typespec": "integer", "kindselector": {"kind": "c_int"}, "intent": ["in"]},
                    "scale": {"typespec": "real", "kindselector": {"kind": "c_double"}, "intent": ["in"]}
                }
            }
        ]
    }
]"#;
