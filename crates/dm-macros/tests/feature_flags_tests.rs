use dm_macros::{MacroError, Macros, NormalizedOptions, TransformError, transform_source};
use dm_parser::parse_program;

fn options(features: &str) -> NormalizedOptions {
    let json = format!(
        r#"{{
            "envFlags": {{ "flags": {{ "DEBUG": true }} }},
            "debugTools": {{ "source": "@ember/debug-tools" }},
            "features": {features}
        }}"#
    );
    NormalizedOptions::from_json(&json).expect("options")
}

fn transform(source: &str, options: &NormalizedOptions) -> String {
    transform_source(source, options).expect("transform")
}

#[test]
fn test_feature_import_becomes_constant() {
    let options = options(r#"{ "featuresImport": "my-app/flags", "flags": { "FOO": true } }"#);
    let output = transform(r#"import { FOO } from "my-app/flags";"#, &options);
    assert_eq!(output, "const FOO = true;\n");
}

#[test]
fn test_renamed_and_default_specifiers() {
    let options = options(
        r#"[{ "source": "my-app/flags", "flags": { "FOO": true, "BAR": "b", "LEVEL": 3, "NONE": null } }]"#,
    );
    let output = transform(
        r#"
import LEVEL, { FOO as isFoo, BAR, NONE } from "my-app/flags";
if (isFoo) {
  bar(BAR, LEVEL, NONE);
}
"#,
        &options,
    );
    assert_eq!(
        output,
        "const LEVEL = 3;\nconst isFoo = true;\nconst BAR = \"b\";\nconst NONE = null;\nif (isFoo) {\n  bar(BAR, LEVEL, NONE);\n}\n"
    );
}

#[test]
fn test_unsupported_feature_flag_fails() {
    let options = options(r#"{ "featuresImport": "my-app/flags", "flags": { "FOO": true } }"#);
    let err = match transform_source(r#"import { FOO, BAZ } from "my-app/flags";"#, &options) {
        Err(TransformError::Macro(err)) => err,
        other => panic!("expected a macro error, got {other:?}"),
    };
    assert_eq!(
        err,
        MacroError::UnsupportedFlag {
            flag: "BAZ".to_string(),
            module: "my-app/flags".to_string(),
        }
    );
}

#[test]
fn test_first_matching_spec_wins() {
    let options = options(
        r#"[
            { "source": "my-app/flags", "flags": { "FOO": true } },
            { "source": "my-app/flags", "flags": { "FOO": false } }
        ]"#,
    );
    let output = transform(r#"import { FOO } from "my-app/flags";"#, &options);
    assert_eq!(output, "const FOO = true;\n");
}

#[test]
fn test_each_spec_applies_to_its_own_source() {
    let options = options(
        r#"[
            { "source": "app/a", "flags": { "A": true } },
            { "source": "app/b", "flags": { "B": false } }
        ]"#,
    );
    let output = transform(
        r#"
import { B } from "app/b";
import { A } from "app/a";
import { C } from "app/c";
"#,
        &options,
    );
    assert_eq!(
        output,
        "const B = false;\nconst A = true;\nimport { C } from \"app/c\";\n"
    );
}

#[test]
fn test_side_effect_feature_import_is_dropped() {
    let options = options(r#"{ "source": "my-app/flags", "flags": { "FOO": true } }"#);
    let output = transform("import \"my-app/flags\";\nstart();", &options);
    assert_eq!(output, "start();\n");
}

#[test]
fn test_features_combine_with_debug_helpers() {
    let options = options(r#"{ "source": "my-app/flags", "flags": { "FOO": false } }"#);
    let output = transform(
        r#"
import { FOO } from "my-app/flags";
import { assert } from "@ember/debug-tools";
if (FOO) {
  assert("foo enabled", ready);
}
"#,
        &options,
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\nconst FOO = false;\nif (FOO) {\n  (_DEBUG && console.assert(\"foo enabled\", ready));\n}\n"
    );
}

#[test]
fn test_inline_feature_flags_reports_match() {
    let options = options(r#"{ "source": "my-app/flags", "flags": { "FOO": true } }"#);
    let (mut arena, program) = parse_program(
        r#"
import { FOO } from "my-app/flags";
import { other } from "elsewhere";
"#,
    )
    .expect("parse");
    let statements = arena.statements(program).expect("program").to_vec();

    let mut macros = Macros::new(&options);
    assert!(macros.inline_feature_flags(&mut arena, statements[0]).expect("inline"));
    assert!(!macros.inline_feature_flags(&mut arena, statements[1]).expect("inline"));
    assert_eq!(arena.statements(program).map(<[_]>::len), Some(2));
    assert!(!arena.is_import_declaration(arena.statements(program).expect("program")[0]));
}
