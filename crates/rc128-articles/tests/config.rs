use std::fs;
use std::path::PathBuf;

use rc128_articles::NavigatorConfig;
use rc128_model::{Locale, OrderPolicy};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "rc128-config-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn relative_records_path_resolves_against_config_dir() {
    let dir = unique_temp_dir("relative");
    let path = dir.join("rc128.toml");
    fs::write(
        &path,
        "default_locale = \"ar\"\nrecords = \"data/articles.csv\"\n\n[outline]\norder = \"sorted\"\n",
    )
    .unwrap();

    let config = NavigatorConfig::load_from(&path).expect("load config");
    assert_eq!(config.default_locale, Locale::Ar);
    assert_eq!(config.outline.order, OrderPolicy::Sorted);
    assert_eq!(config.records, Some(dir.join("data/articles.csv")));
}

#[test]
fn absolute_records_path_is_kept() {
    let dir = unique_temp_dir("absolute");
    let records = dir.join("elsewhere.json");
    let path = dir.join("rc128.toml");
    fs::write(&path, format!("records = {:?}\n", records.display().to_string())).unwrap();

    let config = NavigatorConfig::load_from(&path).expect("load config");
    assert_eq!(config.records, Some(records));
}

#[test]
fn explicit_path_wins_in_resolve() {
    let dir = unique_temp_dir("resolve");
    let path = dir.join("rc128.toml");
    fs::write(&path, "default_locale = \"ar\"\n").unwrap();

    let config = NavigatorConfig::resolve(Some(&path)).expect("resolve");
    assert_eq!(config.default_locale, Locale::Ar);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = unique_temp_dir("missing");
    let err = NavigatorConfig::load_from(&dir.join("absent.toml")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read file"));
}
