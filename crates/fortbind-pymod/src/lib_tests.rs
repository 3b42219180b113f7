use crate::{parse_pymod, BlockId, BlockKind, Intent, ModuleTree, TypeSpec};

const SAMPLE_JSON: &str = r#"[
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
                    "r": {
                        "typespec": "type",
                        "typename": "point",
                        "intent": ["out"]
                    }
                }
            }
        ]
    }
]"#;

#[test]
fn parse_raw_blocks() {
    let raw = parse_pymod(SAMPLE_JSON).unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].block, "module");
    assert_eq!(raw[0].body.len(), 2);

    let typedef = &raw[0].body[0];
    assert_eq!(typedef.block, "type");
    assert_eq!(typedef.vars.len(), 2);
    assert_eq!(
        typedef.vars["x"].kindselector.as_ref().unwrap().kind,
        "c_float"
    );
}

#[test]
fn flatten_to_arena() {
    let tree = ModuleTree::from_json(SAMPLE_JSON).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.roots(), &[BlockId(0)]);

    let module = tree.get(BlockId(0));
    assert_eq!(module.kind, BlockKind::Module);
    assert_eq!(module.body, vec![BlockId(1), BlockId(2)]);
    assert_eq!(module.parent, None);

    let typedef = tree.get(BlockId(1));
    assert_eq!(typedef.kind, BlockKind::Type);
    assert_eq!(typedef.name, "point");
    assert_eq!(typedef.parent, Some(BlockId(0)));
}

#[test]
fn vars_preserve_declaration_order() {
    let tree = ModuleTree::from_json(SAMPLE_JSON).unwrap();
    let typedef = tree.get(BlockId(1));
    let names: Vec<&str> = typedef.field_names().collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn typespec_mapping() {
    let tree = ModuleTree::from_json(SAMPLE_JSON).unwrap();
    let typedef = tree.get(BlockId(1));
    assert_eq!(
        typedef.var("x").unwrap().typespec,
        TypeSpec::Real {
            kind: Some("c_float".to_string())
        }
    );

    let routine = tree.get(BlockId(2));
    let r = routine.var("r").unwrap();
    assert_eq!(r.typespec.derived_name(), Some("point"));
    assert_eq!(r.intent, Intent::Out);
}

#[test]
fn routine_view() {
    let tree = ModuleTree::from_json(SAMPLE_JSON).unwrap();
    let routine = tree.routine(BlockId(2)).unwrap();
    assert_eq!(routine.name(), "make_point");
    assert_eq!(routine.args(), &["r".to_string()]);
    assert_eq!(routine.parent(), Some(BlockId(0)));

    assert!(tree.routine(BlockId(1)).is_none());
}

#[test]
fn intent_from_attrs() {
    let attrs = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    assert_eq!(Intent::from_attrs(&attrs(&["in"])), Intent::In);
    assert_eq!(Intent::from_attrs(&attrs(&["out"])), Intent::Out);
    assert_eq!(Intent::from_attrs(&attrs(&["inout"])), Intent::InOut);
    assert_eq!(Intent::from_attrs(&attrs(&["in", "out"])), Intent::InOut);
    assert_eq!(Intent::from_attrs(&attrs(&[])), Intent::Unspecified);

    assert!(Intent::Out.is_returnable());
    assert!(Intent::InOut.is_returnable());
    assert!(!Intent::In.is_returnable());
}

#[test]
fn unknown_constructs_do_not_fail() {
    let json = r#"[
        {
            "block": "weird",
            "name": "w",
            "vars": {
                "c": {"typespec": "complex", "kindselector": {"kind": "c_float_complex"}}
            }
        }
    ]"#;
    let tree = ModuleTree::from_json(json).unwrap();
    let block = tree.get(BlockId(0));
    assert_eq!(block.kind, BlockKind::Unknown);
    assert_eq!(
        block.var("c").unwrap().typespec,
        TypeSpec::Unknown {
            typespec: "complex".to_string()
        }
    );
}

#[test]
fn traversal_is_idempotent() {
    let raw = parse_pymod(SAMPLE_JSON).unwrap();
    let first = ModuleTree::from_raw(&raw);
    let second = ModuleTree::from_raw(&raw);
    assert_eq!(first, second);

    let ids_a: Vec<BlockId> = first.iter().map(|(id, _)| id).collect();
    let ids_b: Vec<BlockId> = second.iter().map(|(id, _)| id).collect();
    assert_eq!(ids_a, ids_b);
}
