use std::fs;
use std::path::Path;

use go_web_starter::{
    config::{Config, Feature},
    error::Error,
    generator::generate,
    selector::default_rules,
    validate::is_valid_go_version,
};
use tempfile::TempDir;
use walkdir::WalkDir;

fn config(module: &str, name: &str, mysql: bool, mongodb: bool) -> Config {
    Config::new(module, name, name)
        .with_feature(Feature::Mysql, mysql)
        .with_feature(Feature::Mongodb, mongodb)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn relative_paths(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

fn gated_paths(feature: Feature) -> Vec<String> {
    default_rules()
        .into_iter()
        .filter(|rule| rule.feature == feature)
        .map(|rule| rule.pattern.trim_end_matches(".tmpl").to_string())
        .collect()
}

fn is_under(path: &str, prefix: &str) -> bool {
    path == prefix || path.starts_with(&format!("{prefix}/"))
}

#[test_log::test]
fn test_generate_full_project() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("my-new-web");

    let report = generate(
        &output_dir,
        config("github.com/test/my-new-web", "my-new-web", true, true),
    )
    .unwrap();
    assert_eq!(report.output_dir, output_dir);
    assert!(!report.files.is_empty());

    let go_mod = read(&output_dir.join("go.mod"));
    assert!(go_mod.contains("module github.com/test/my-new-web"));
    let go_version = go_mod
        .lines()
        .find_map(|line| line.strip_prefix("go "))
        .expect("go directive");
    assert!(is_valid_go_version(go_version), "{go_version}");

    for rel_path in [
        "app/main.go",
        "app/cmd/root.go",
        "app/cmd/http.go",
        "internal/http/server.go",
        "internal/lib/gorm/gorm.go",
        "internal/lib/mongodb/mongodb.go",
        "vars/vars.go",
        "README.md",
    ] {
        assert!(output_dir.join(rel_path).is_file(), "missing {rel_path}");
    }
}

#[test]
fn test_mysql_only_scenario() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("demo");

    generate(&output_dir, config("github.com/acme/demo", "demo", true, false)).unwrap();

    let go_mod = read(&output_dir.join("go.mod"));
    assert!(go_mod.contains("github.com/acme/demo"));
    assert!(go_mod.contains("gorm.io/gorm"));
    assert!(!go_mod.contains("github.com/qiniu/qmgo"));
    assert!(!go_mod.contains("go.mongodb.org/mongo-driver"));

    let paths = relative_paths(&output_dir);
    for prefix in gated_paths(Feature::Mongodb) {
        assert!(
            !paths.iter().any(|p| is_under(p, &prefix)),
            "{prefix} leaked into a mysql-only project"
        );
    }
    for prefix in gated_paths(Feature::Mysql) {
        assert!(paths.iter().any(|p| is_under(p, &prefix)), "{prefix} missing");
    }
}

#[test]
fn test_mongodb_only_scenario() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("mongodb-only-web");

    generate(
        &output_dir,
        config("github.com/test/mongodb-only-web", "mongodb-only-web", false, true),
    )
    .unwrap();

    let go_mod = read(&output_dir.join("go.mod"));
    assert!(!go_mod.contains("gorm.io/gorm"));
    assert!(!go_mod.contains("gorm.io/driver/mysql"));
    assert!(!go_mod.contains("github.com/go-sql-driver/mysql"));
    assert!(go_mod.contains("github.com/qiniu/qmgo"));

    let paths = relative_paths(&output_dir);
    for prefix in gated_paths(Feature::Mysql) {
        assert!(
            !paths.iter().any(|p| is_under(p, &prefix)),
            "{prefix} leaked into a mongodb-only project"
        );
    }
    for prefix in gated_paths(Feature::Mongodb) {
        assert!(paths.iter().any(|p| is_under(p, &prefix)), "{prefix} missing");
    }
    // Shared locations stay.
    for rel_path in [
        "app/main.go",
        "config/config.go",
        "internal/service/module.go",
        "internal/repository/module.go",
        "internal/controller/module.go",
        "internal/lib/log/log.go",
    ] {
        assert!(output_dir.join(rel_path).is_file(), "missing {rel_path}");
    }
    assert!(!output_dir.join("internal/lib/log/silent.go").exists());
}

#[test]
fn test_both_databases_yield_the_union() {
    let base_dir = TempDir::new().unwrap();
    let mysql_dir = base_dir.path().join("mysql");
    let mongo_dir = base_dir.path().join("mongo");
    let full_dir = base_dir.path().join("full");

    generate(&mysql_dir, config("example.com/mysql", "mysql", true, false)).unwrap();
    generate(&mongo_dir, config("example.com/mongo", "mongo", false, true)).unwrap();
    generate(&full_dir, config("example.com/full", "full", true, true)).unwrap();

    let mut union = relative_paths(&mysql_dir);
    union.extend(relative_paths(&mongo_dir));
    union.sort();
    union.dedup();
    let mut full = relative_paths(&full_dir);
    full.sort();
    assert_eq!(full, union);
}

#[test]
fn test_rendered_output_is_clean() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("clean");

    let report = generate(&output_dir, config("example.com/clean", "clean", true, true)).unwrap();

    for rel_path in relative_paths(&output_dir) {
        assert!(!rel_path.ends_with(".tmpl"), "{rel_path}");
        let path = output_dir.join(&rel_path);
        if path.is_file() {
            let content = read(&path);
            assert!(!content.contains("{{"), "{rel_path} has unresolved output tags");
            assert!(!content.contains("{%"), "{rel_path} has unresolved block tags");
        }
    }
    for file in &report.files {
        assert!(!file.to_string_lossy().ends_with(".tmpl"));
        assert!(output_dir.join(file).is_file());
    }
}

#[test]
fn test_generation_is_reproducible() {
    let base_dir = TempDir::new().unwrap();
    let first = base_dir.path().join("first").join("same");
    let second = base_dir.path().join("second").join("same");
    let cfg = config("example.com/same", "same", true, false).with_go_version("1.22.3");

    let first_report = generate(&first, cfg.clone()).unwrap();
    let second_report = generate(&second, cfg).unwrap();

    assert_eq!(first_report.files, second_report.files);
    assert_eq!(first_report.directories, second_report.directories);
    assert!(!dir_diff::is_different(&first, &second).unwrap());
}

#[test]
fn test_config_yml_is_valid_yaml() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("my-new-web");

    generate(&output_dir, config("example.com/my-new-web", "my-new-web", true, true)).unwrap();

    let raw = read(&output_dir.join("config").join("config.yml"));
    let yaml: serde_yaml::Value = serde_yaml::from_str(&raw).unwrap();
    assert_eq!(yaml["app"]["name"].as_str(), Some("my-new-web"));
    assert_eq!(yaml["mongodb"]["database"].as_str(), Some("my_new_web"));
    assert!(yaml["mysql"]["dsn"].as_str().unwrap().contains("/my_new_web?"));
}

#[test]
fn test_explicit_go_version_is_written() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("pinned");

    generate(
        &output_dir,
        config("example.com/pinned", "pinned", true, false).with_go_version("1.21"),
    )
    .unwrap();

    assert!(read(&output_dir.join("go.mod")).contains("\ngo 1.21\n"));
}

#[test]
fn test_surrounding_whitespace_is_not_rendered() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("padded");

    generate(
        &output_dir,
        Config::new(" github.com/acme/demo\n", "demo\t", " demo")
            .with_go_version("1.22 ")
            .with_feature(Feature::Mysql, true),
    )
    .unwrap();

    assert!(read(&output_dir.join("go.mod")).starts_with("module github.com/acme/demo\n\ngo 1.22\n"));
    assert!(read(&output_dir.join("Makefile")).starts_with("BINARY := demo\n"));
}

#[test]
fn test_generate_allows_git_only_dir() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("existing");
    fs::create_dir_all(output_dir.join(".git")).unwrap();

    generate(&output_dir, config("github.com/test/sample", "sample", true, false)).unwrap();
    assert!(output_dir.join("go.mod").is_file());
}

#[test]
fn test_generate_rejects_hidden_entries_except_git() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("existing");
    fs::create_dir_all(&output_dir).unwrap();
    fs::write(output_dir.join(".gitignore"), "").unwrap();

    let err = generate(&output_dir, config("github.com/test/sample", "sample", true, true))
        .unwrap_err();
    assert!(err.to_string().contains("not empty"), "{err}");
}

#[test]
fn test_generate_twice_into_non_empty_dir() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("existing");
    fs::create_dir_all(&output_dir).unwrap();
    fs::write(output_dir.join("placeholder.txt"), "x").unwrap();

    for _ in 0..2 {
        let err = generate(&output_dir, config("github.com/test/sample", "sample", true, true))
            .unwrap_err();
        assert!(matches!(err, Error::OutputDirNotEmpty { .. }));
        assert!(err.to_string().contains("not empty"));
        assert_eq!(relative_paths(&output_dir), vec!["placeholder.txt"]);
    }
}

#[test]
fn test_generate_rejects_file_output() {
    let base_dir = TempDir::new().unwrap();
    let output_file = base_dir.path().join("file");
    fs::write(&output_file, "x").unwrap();

    let err = generate(&output_file, config("github.com/test/sample", "sample", true, true))
        .unwrap_err();
    assert!(err.to_string().contains("not a directory"), "{err}");
}

#[test]
fn test_invalid_config_touches_nothing() {
    let base_dir = TempDir::new().unwrap();
    let output_dir = base_dir.path().join("out");

    let err = generate(&output_dir, config("bad module", "my-web", true, true)).unwrap_err();
    assert!(err.to_string().contains("invalid template data"), "{err}");
    assert!(!output_dir.exists());

    let err = generate(&output_dir, config("example.com/x", "x", false, false)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid template data: at least one database must be enabled"
    );
    assert!(!output_dir.exists());
}
