use super::*;
use crate::reporter::{Reporter, line_and_column};
use clap::Parser;
use tempfile::TempDir;

const OPTIONS: &str = r#"{
  "envFlags": { "flags": { "DEBUG": false } },
  "debugTools": { "source": "@ember/debug-tools" },
  "features": { "featuresImport": "my-app/flags", "flags": { "FOO": true } }
}"#;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn parse_args(dir: &Path, extra: &[&str]) -> CliArgs {
    let config = write_file(dir, "options.json", OPTIONS);
    let mut argv = vec![
        "debug-macros".to_string(),
        "-c".to_string(),
        config.display().to_string(),
    ];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn test_load_options_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_options(&temp_dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read options file"));
}

#[test]
fn test_load_options_reports_invalid_options() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "options.json",
        r#"{ "envFlags": { "flags": { "DEBUG": true } } }"#,
    );
    let err = load_options(&path).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("invalid options file"), "{chain}");
    assert!(chain.contains("You must specify `debugTools.source`"), "{chain}");
}

#[test]
fn test_show_config_is_camel_case_json() {
    let temp_dir = TempDir::new().unwrap();
    let args = parse_args(temp_dir.path(), &["--show-config"]);
    assert!(args.show_config);
    assert!(args.files.is_empty());

    let options = load_options(&args.config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&show_config(&options).unwrap()).unwrap();
    assert_eq!(json["debugToolsSource"], "@ember/debug-tools");
    assert_eq!(json["features"][0]["source"], "my-app/flags");
}

#[test]
fn test_files_are_required_without_show_config() {
    let result = CliArgs::try_parse_from(["debug-macros", "-c", "options.json"]);
    assert!(result.is_err());
}

#[test]
fn test_run_writes_to_stdout_in_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_file(
        temp_dir.path(),
        "first.js",
        "import { FOO } from \"my-app/flags\";\n",
    );
    let second = write_file(
        temp_dir.path(),
        "second.js",
        "import DEBUG from \"@ember/env-flags\";\nif (DEBUG) { trace(); }\n",
    );
    let args = parse_args(
        temp_dir.path(),
        &[first.to_str().unwrap(), second.to_str().unwrap()],
    );
    let options = load_options(&args.config).unwrap();

    let mut stdout = Vec::new();
    let result = run(&args, &options, &mut stdout).unwrap();
    assert_eq!(result.transformed, 2);
    assert!(result.failures.is_empty());
    assert!(result.written.is_empty());
    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        "const FOO = true;\nconst DEBUG = false;\nif (DEBUG) {\n  trace();\n}\n"
    );
}

#[test]
fn test_run_writes_into_out_dir() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(
        temp_dir.path(),
        "app.js",
        "import { assert } from \"@ember/debug-tools\";\nassert(\"ok\", ready);\n",
    );
    let out_dir = temp_dir.path().join("dist");
    let args = parse_args(
        temp_dir.path(),
        &[
            "--out-dir",
            out_dir.to_str().unwrap(),
            input.to_str().unwrap(),
        ],
    );
    let options = load_options(&args.config).unwrap();

    let mut stdout = Vec::new();
    let result = run(&args, &options, &mut stdout).unwrap();
    assert!(stdout.is_empty());
    assert_eq!(result.written, [out_dir.join("app.js")]);
    assert_eq!(
        std::fs::read_to_string(out_dir.join("app.js")).unwrap(),
        "const _DEBUG = false;\n(_DEBUG && console.assert(\"ok\", ready));\n"
    );
}

#[test]
fn test_run_collects_failures_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    let bad = write_file(temp_dir.path(), "bad.js", "const a = 1;\nconst = 2;\n");
    let unknown_flag = write_file(
        temp_dir.path(),
        "flags.js",
        "import { BAR } from \"my-app/flags\";\n",
    );
    let missing = temp_dir.path().join("missing.js");
    let good = write_file(temp_dir.path(), "good.js", "start();\n");
    let args = parse_args(
        temp_dir.path(),
        &[
            bad.to_str().unwrap(),
            unknown_flag.to_str().unwrap(),
            missing.to_str().unwrap(),
            good.to_str().unwrap(),
        ],
    );
    let options = load_options(&args.config).unwrap();

    let mut stdout = Vec::new();
    let result = run(&args, &options, &mut stdout).unwrap();
    assert_eq!(result.transformed, 1);
    assert_eq!(String::from_utf8(stdout).unwrap(), "start();\n");

    let failed: Vec<&Path> = result.failures.iter().map(|f| f.path.as_path()).collect();
    assert_eq!(failed, [bad.as_path(), unknown_flag.as_path(), missing.as_path()]);
    assert!(result.failures[2].source.is_none());

    let reporter = Reporter::new(false);
    let parse_failure = &result.failures[0];
    let rendered = reporter.format_failure(
        &parse_failure.path,
        parse_failure.source.as_deref(),
        &parse_failure.error,
    );
    assert!(rendered.contains("bad.js:2:"), "{rendered}");
    assert!(rendered.contains(" - error: "), "{rendered}");

    let flag_failure = &result.failures[1];
    let rendered = reporter.format_failure(
        &flag_failure.path,
        flag_failure.source.as_deref(),
        &flag_failure.error,
    );
    assert!(
        rendered.ends_with(
            "flags.js - error: Imported BAR from my-app/flags which is not a supported flag."
        ),
        "{rendered}"
    );
}

#[test]
fn test_line_and_column_are_one_based() {
    assert_eq!(line_and_column("abc", 0), (1, 1));
    assert_eq!(line_and_column("ab\ncd", 4), (2, 2));
    assert_eq!(line_and_column("ab\ncd", 99), (2, 3));
}
