//! Declaration check integration tests
//!
//! Exercises the whole pass (load -> observe -> resolve -> match)
//! through the public API.

use std::path::PathBuf;

use declcheck::{CheckOptions, DeclCheck, DeclConfig, FuncSig, Shape, SourceLocation};

/// Helper to build a check context from a JSON catalog
fn check_from(json: &str) -> DeclCheck {
    let config = DeclConfig::from_json(json).unwrap();
    DeclCheck::new(config, &CheckOptions::default()).unwrap()
}

fn shape(entries: &[(&str, u32)]) -> Shape {
    entries.iter().map(|&(n, c)| (n, c)).collect()
}

fn sig(params: &[(&str, u32)], ret: &str) -> FuncSig {
    FuncSig::new(shape(params), ret)
}

fn loc(check: &mut DeclCheck, line: u32) -> SourceLocation {
    check.location(PathBuf::from("unit.c"), line, 1)
}

#[test]
fn test_exact_named_function_match() {
    let mut check = check_from(
        r#"{ "functions": { "foo": { "params": { "int": 1 }, "return": "int" } } }"#,
    );
    let l = loc(&mut check, 1);
    check.observe_function("foo", sig(&[("int", 1)], "int"), l);

    let report = check.run();
    assert!(report.is_clean());
}

#[test]
fn test_named_mismatch_reports_both_signatures() {
    let mut check = check_from(
        r#"{ "functions": { "foo": { "params": { "int": 1 }, "return": "int" } } }"#,
    );
    let l = loc(&mut check, 4);
    check.observe_function("foo", sig(&[("int", 1), ("char", 1)], "int"), l);

    let report = check.run();
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].message.contains("(int: 1) -> int"));
    assert!(report.diagnostics[0].message.contains("(char: 1, int: 1) -> int"));
    // name was found, so it must not be reported missing
    assert!(report.missing_functions.is_empty());
}

#[test]
fn test_missing_named_declarations() {
    let mut check = check_from(
        r#"{
            "functions": { "foo": { "params": {}, "return": "void" } },
            "structs": { "Point": { "int": 2 } }
        }"#,
    );
    let l = loc(&mut check, 1);
    check.observe_function("unrelated", sig(&[], "void"), l);

    let report = check.run();
    assert_eq!(report.missing_functions, vec!["foo".to_string()]);
    assert_eq!(report.missing_structs, vec!["Point".to_string()]);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_unnamed_match_consumes_at_most_one() {
    let mut check = check_from(r#"{ "structs*": [ { "char": 1 }, { "char": 1 } ] }"#);
    let l = loc(&mut check, 2);
    check.observe_record("Whatever", shape(&[("char", 1)]), l);

    let report = check.run();
    assert_eq!(report.missing_unnamed_structs.len(), 1);
    assert_eq!(report.missing_unnamed_structs[0], shape(&[("char", 1)]));
}

#[test]
fn test_unnamed_non_match_is_silent() {
    let mut check = check_from(
        r#"{ "functions*": [ { "params": { "int": 2 }, "return": "int" } ] }"#,
    );
    let l = loc(&mut check, 2);
    check.observe_function("anything", sig(&[("char", 1)], "void"), l);

    let report = check.run();
    // leftover observations are never reported; only the unnamed expectation remains
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.missing_unnamed_functions.len(), 1);
}

#[test]
fn test_placeholder_binds_and_substitutes() {
    let mut check = check_from(
        r#"{
            "functions": { "f": { "params": { "%T": 1 }, "return": "void" } },
            "%structs": { "%T": { "int": 1 } }
        }"#,
    );
    let l1 = loc(&mut check, 1);
    check.observe_record("Point", shape(&[("int", 1)]), l1);
    let l2 = loc(&mut check, 5);
    check.observe_function("f", sig(&[("Point", 1)], "void"), l2);

    let report = check.run();
    assert!(report.is_clean());
}

#[test]
fn test_placeholder_pointer_depth_preserved() {
    let mut check = check_from(
        r#"{
            "functions": { "f": { "params": { "%T *": 2 }, "return": "%T" } },
            "%structs": { "%T": { "int": 1 } }
        }"#,
    );
    let l1 = loc(&mut check, 1);
    check.observe_record("Point", shape(&[("int", 1)]), l1);
    let l2 = loc(&mut check, 5);
    check.observe_function("f", sig(&[("Point *", 2)], "Point"), l2);

    let report = check.run();
    assert!(report.is_clean());
}

#[test]
fn test_unbound_placeholder_drops_only_referencing_entry() {
    let mut check = check_from(
        r#"{
            "functions": {
                "uses_u": { "params": { "%U": 1 }, "return": "void" },
                "plain": { "params": { "int": 1 }, "return": "int" }
            }
        }"#,
    );
    let l = loc(&mut check, 3);
    check.observe_function("plain", sig(&[("int", 1)], "int"), l);

    let report = check.run();
    // uses_u is dropped from checking: absent from diagnostics and missing sets
    assert!(report.diagnostics.is_empty());
    assert!(report.missing_functions.is_empty());
}

#[test]
fn test_unmatched_var_struct_is_dropped_not_missing() {
    // with no observed record of matching shape the template itself stays
    // unbound and is dropped with a warning
    let mut check = check_from(r#"{ "%structs": { "%T": { "double": 3 } } }"#);
    let l = loc(&mut check, 1);
    check.observe_record("Point", shape(&[("int", 2)]), l);

    let report = check.run();
    assert!(report.missing_var_structs.is_empty());
}

#[test]
fn test_matched_var_struct_consumed_by_shape() {
    let mut check = check_from(r#"{ "%structs": { "%T": { "int": 2 } } }"#);
    let l = loc(&mut check, 1);
    check.observe_record("Point", shape(&[("int", 2)]), l);

    let report = check.run();
    assert!(report.is_clean());
}

#[test]
fn test_main_is_never_checked() {
    let mut check = check_from(
        r#"{ "functions": { "main": { "params": {}, "return": "int" } } }"#,
    );
    let l = loc(&mut check, 1);
    // the observed main is ignored, so the expected main stays missing
    check.observe_function("main", sig(&[], "int"), l);

    let report = check.run();
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.missing_functions, vec!["main".to_string()]);
}

#[test]
fn test_pointer_types_survive_resolution() {
    let mut check = check_from(
        r#"{ "functions": { "dup": { "params": { "char *": 1 }, "return": "char *" } } }"#,
    );
    let l = loc(&mut check, 1);
    check.observe_function("dup", sig(&[("char *", 1)], "char *"), l);

    let report = check.run();
    assert!(report.is_clean());
}

#[test]
fn test_malformed_type_token_skips_entry() {
    let mut check = check_from(
        r#"{
            "functions": {
                "bad": { "params": { "1abc": 1 }, "return": "void" },
                "good": { "params": {}, "return": "void" }
            }
        }"#,
    );
    let l = loc(&mut check, 1);
    check.observe_function("good", sig(&[], "void"), l);

    let report = check.run();
    // bad is skipped on the type syntax error, good is checked normally
    assert!(report.is_clean());
}

#[test]
fn test_missing_sets_independent_of_observation_order() {
    let run = |names: &[&str]| {
        let mut check = check_from(
            r#"{
                "functions": {
                    "a": { "params": { "int": 1 }, "return": "int" },
                    "b": { "params": { "char": 1 }, "return": "void" },
                    "c": { "params": {}, "return": "void" }
                }
            }"#,
        );
        for (i, name) in names.iter().enumerate() {
            let l = loc(&mut check, i as u32 + 1);
            check.observe_function(name, sig(&[("int", 1)], "int"), l);
        }
        check.run()
    };

    let r1 = run(&["a", "c"]);
    let r2 = run(&["c", "a"]);
    assert_eq!(r1.missing_functions, r2.missing_functions);
    assert_eq!(r1.missing_functions, vec!["b".to_string()]);
}
