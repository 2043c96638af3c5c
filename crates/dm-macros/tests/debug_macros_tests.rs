use dm_macros::{
    MacroError, Macros, NormalizedOptions, TransformError, transform_source,
};
use dm_parser::parse_program;

fn options(externalize: &str) -> NormalizedOptions {
    let json = format!(
        r#"{{
            "envFlags": {{ "flags": {{ "DEBUG": true, "CI": false }} }},
            "debugTools": {{ "source": "@ember/debug-tools" }}
            {externalize}
        }}"#
    );
    NormalizedOptions::from_json(&json).expect("options")
}

fn transform(source: &str, options: &NormalizedOptions) -> String {
    transform_source(source, options).expect("transform")
}

fn transform_err(source: &str, options: &NormalizedOptions) -> MacroError {
    match transform_source(source, options) {
        Err(TransformError::Macro(err)) => err,
        other => panic!("expected macro error, got {other:?}"),
    }
}

// =============================================================================
// Env flags
// =============================================================================

#[test]
fn test_env_flags_import_is_inlined() {
    let options = NormalizedOptions::from_json(
        r#"{
            "envFlags": { "flags": { "DEBUG": false } },
            "debugTools": { "source": "@ember/debug-tools" }
        }"#,
    )
    .expect("options");
    let output = transform(
        r#"
import DEBUG from "@ember/env-flags";
if (DEBUG) {
  console.log("debugging");
}
"#,
        &options,
    );
    assert_eq!(
        output,
        "const DEBUG = false;\nif (DEBUG) {\n  console.log(\"debugging\");\n}\n"
    );
}

#[test]
fn test_env_flags_import_with_several_flags() {
    let output = transform(
        r#"import { DEBUG, CI } from "@ember/env-flags";
if (CI) { report(DEBUG); }"#,
        &options(""),
    );
    assert_eq!(
        output,
        "const DEBUG = true;\nconst CI = false;\nif (CI) {\n  report(DEBUG);\n}\n"
    );
}

#[test]
fn test_env_flags_import_with_unknown_flag_fails() {
    let err = transform_err(r#"import { DEBUG, PROFILE } from "@ember/env-flags";"#, &options(""));
    assert_eq!(
        err.to_string(),
        "Imported PROFILE from @ember/env-flags which is not a supported flag."
    );
}

#[test]
fn test_env_flags_import_without_debug_is_left_alone() {
    let output = transform(r#"import { CI } from "@ember/env-flags";"#, &options(""));
    assert_eq!(output, "import { CI } from \"@ember/env-flags\";\n");
}

#[test]
fn test_helpers_expand_against_env_flags_binding() {
    let output = transform(
        r#"
import { DEBUG } from "@ember/env-flags";
import { warn as emberWarn } from "@ember/debug-tools";
emberWarn("careful");
"#,
        &options(""),
    );
    assert_eq!(
        output,
        "const DEBUG = true;\n(DEBUG && console.warn(\"careful\"));\n"
    );
}

// =============================================================================
// Debug flag injection
// =============================================================================

#[test]
fn test_debug_flag_is_injected_when_helpers_are_used() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
assert("Must be true", value);
"#,
        &options(""),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\n(_DEBUG && console.assert(\"Must be true\", value));\n"
    );
}

#[test]
fn test_injected_identifier_avoids_existing_names() {
    let output = transform(
        r#"
import { log } from "@ember/debug-tools";
const _DEBUG = "taken";
log(_DEBUG);
"#,
        &options(""),
    );
    assert_eq!(
        output,
        "const _DEBUG2 = true;\nconst _DEBUG = \"taken\";\n(_DEBUG2 && console.log(_DEBUG));\n"
    );
}

#[test]
fn test_nothing_is_injected_without_helper_calls() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
render();
"#,
        &options(""),
    );
    assert_eq!(output, "render();\n");
}

#[test]
fn test_nested_helpers_in_run_in_debug() {
    let output = transform(
        r#"
import { runInDebug, log } from "@ember/debug-tools";
runInDebug(() => {
  log("inside");
});
"#,
        &options(""),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\n(_DEBUG && (() => {\n  (_DEBUG && console.log(\"inside\"));\n})());\n"
    );
}

#[test]
fn test_nested_helpers_in_run_in_debug_with_global_helpers() {
    let output = transform(
        r#"
import { runInDebug, log, assert } from "@ember/debug-tools";
runInDebug(() => {
  log("inside");
  runInDebug(function () {
    assert("deep", ok);
  });
});
"#,
        &options(r#", "externalizeHelpers": { "global": "Ember" }"#),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\n\
(_DEBUG && Ember.runInDebug(() => {\n  \
(_DEBUG && Ember.log(\"inside\"));\n  \
(_DEBUG && Ember.runInDebug(function () {\n    \
(_DEBUG && Ember.assert(\"deep\", ok));\n  \
}));\n\
}));\n"
    );
}

#[test]
fn test_var_in_block_shadows_helper_for_whole_function() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
function check(c) {
  if (c) {
    var assert = noop;
  }
  assert(c);
}
"#,
        &options(r#", "externalizeHelpers": { "debug": { "global": false } }"#),
    );
    assert_eq!(
        output,
        "import { assert } from \"@ember/debug-tools\";\n\
function check(c) {\n  if (c) {\n    var assert = noop;\n  }\n  assert(c);\n}\n"
    );
}

#[test]
fn test_shadowed_helper_name_is_untouched() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
function check(assert) {
  assert(true);
}
assert(false);
"#,
        &options(""),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\nfunction check(assert) {\n  assert(true);\n}\n(_DEBUG && console.assert(false));\n"
    );
}

#[test]
fn test_unknown_helper_fails() {
    let err = transform_err(
        r#"
import { inspect } from "@ember/debug-tools";
inspect(value);
"#,
        &options(""),
    );
    assert_eq!(
        err,
        MacroError::UnknownHelper {
            name: "inspect".to_string()
        }
    );
}

#[test]
fn test_deprecate_with_global_helpers() {
    let output = transform(
        r#"
import { deprecate } from "@ember/debug-tools";
deprecate("Old", false, { id: "old", until: "2.0.0" });
"#,
        &options(r#", "externalizeHelpers": { "global": "Ember" }"#),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\n(_DEBUG && !(false) && Ember.deprecate(\"Old\", false, { id: \"old\", until: \"2.0.0\" }));\n"
    );
}

#[test]
fn test_deprecate_with_invalid_meta_fails() {
    let err = transform_err(
        r#"
import { deprecate } from "@ember/debug-tools";
deprecate("Old", false, { until: "2.0.0" });
"#,
        &options(""),
    );
    assert!(matches!(err, MacroError::InvalidDeprecation(_)));
}

// =============================================================================
// Import cleanup
// =============================================================================

#[test]
fn test_debug_tools_import_kept_when_helpers_are_not_globals() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
assert("x", y);
"#,
        &options(r#", "externalizeHelpers": { "global": "Ember", "debug": { "global": false } }"#),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\nimport { assert } from \"@ember/debug-tools\";\n(_DEBUG && Ember.assert(\"x\", y));\n"
    );
}

#[test]
fn test_debug_tools_import_removed_when_helpers_are_globals() {
    let output = transform(
        r#"
import { assert, warn } from "@ember/debug-tools";
import { helper } from "app/helpers";
warn("w");
"#,
        &options(r#", "externalizeHelpers": { "global": "Ember", "debug": { "global": true } }"#),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\nimport { helper } from \"app/helpers\";\n(_DEBUG && Ember.warn(\"w\"));\n"
    );
}

#[test]
fn test_module_helpers_keep_calls_and_import() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
assert("x", y);
"#,
        &options(r#", "externalizeHelpers": { "module": true, "debug": { "global": false } }"#),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\nimport { assert } from \"@ember/debug-tools\";\n(_DEBUG && assert(\"x\", y));\n"
    );
}

#[test]
fn test_module_helpers_keep_import_without_debug_setting() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
assert(x);
"#,
        &options(r#", "externalizeHelpers": { "module": true }"#),
    );
    assert_eq!(
        output,
        "const _DEBUG = true;\nimport { assert } from \"@ember/debug-tools\";\n(_DEBUG && assert(x));\n"
    );
}

#[test]
fn test_debug_setting_overrides_module_default() {
    let output = transform(
        r#"
import { assert } from "@ember/debug-tools";
assert(x);
"#,
        &options(r#", "externalizeHelpers": { "module": true, "debug": { "global": true } }"#),
    );
    assert_eq!(output, "const _DEBUG = true;\n(_DEBUG && assert(x));\n");
}

#[test]
fn test_expander_state_tracks_debug_tools_bindings() {
    let options = options(r#", "externalizeHelpers": { "debug": { "global": false } }"#);
    let (mut arena, program) = parse_program(
        r#"
import { assert as a, warn } from "@ember/debug-tools";
a(true);
"#,
    )
    .expect("parse");
    let statements = arena.statements(program).expect("program").to_vec();
    let specifiers = arena.import_specifiers(statements[0]).to_vec();

    let mut macros = Macros::new(&options);
    assert!(!macros.imported_debug_tools());
    macros.collect_debug_tools_specifiers(&arena, &specifiers);
    assert!(macros.imported_debug_tools());
    assert_eq!(macros.local_debug_bindings(), ["a", "warn"]);

    assert!(macros.build(&mut arena, statements[1]).expect("build"));
    assert_eq!(macros.pending_expansions(), 1);
    assert!(macros.is_globals());

    macros.expand(&mut arena, program).expect("expand");
    assert_eq!(macros.pending_expansions(), 0);
    assert!(!macros.is_globals());
}

#[test]
fn test_parse_errors_are_reported() {
    let result = transform_source("import { from", &options(""));
    assert!(matches!(result, Err(TransformError::Parse(_))));
}
