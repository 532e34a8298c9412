//! Integration tests for the command layer.

use std::fs;
use std::path::{Path, PathBuf};

use rc128_articles::NavigatorConfig;
use rc128_cli::cli::{ArticlesArgs, CheckArgs, LangArg, LookupArgs, LookupTableArg, TocArgs};
use rc128_cli::commands::{run_articles, run_check, run_lookup, run_toc};
use rc128_cli::summary::{check_table, event_lines, lookup_table};
use rc128_model::Locale;
use rc128_navigator::{NavigationPhase, Selection, Toggle};

const ARTICLES_CSV: &str = "id,part_number,part_title,chapter_number,chapter_title,article_number,article_title,article_body,language,effective_date
en-1,Part One,General Provisions,Chapter 1,Scope,Article 1,Definitions,In these conditions the following words have the meanings stated.,en,2023-07-01
en-5,Part One,General Provisions,Chapter 3,Claims,Article 5,Notice of Claim,The contractor shall give notice within 28 days.,en,
en-5b,Part One,General Provisions,Chapter 3,Claims,Article 5,Notice of Claim,Duplicate export row.,en,
en-x,Part One,General Provisions,,,Article 7,Orphan,,en,
ar-1,الباب الأول,أحكام عامة,الفصل 1,النطاق,المادة 1,التعريفات,,ar,
de-1,Teil 1,,Kapitel 1,,Artikel 1,,,de,
";

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "rc128-cli-{}-{}-{}",
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

fn write_articles(name: &str) -> PathBuf {
    let path = unique_temp_dir(name).join("articles.csv");
    fs::write(&path, ARTICLES_CSV).unwrap();
    path
}

fn toc_args(file: &Path) -> TocArgs {
    TocArgs {
        file: Some(file.to_path_buf()),
        lang: None,
        deep_link: None,
        expand_all: false,
        select: None,
        toggle: Vec::new(),
        show_ids: false,
    }
}

#[test]
fn toc_select_then_toggle() {
    let file = write_articles("toc");
    let args = TocArgs {
        select: Some("article-article-5".to_string()),
        toggle: vec![
            "chapter-part-one-chapter-1".to_string(),
            "article-article-1".to_string(),
        ],
        ..toc_args(&file)
    };

    let result = run_toc(&args, &NavigatorConfig::default()).expect("run toc");
    insta::assert_snapshot!(result.rendered, @r"
    - Part One: General Provisions
      - Chapter 1: Scope
        · Article 1: Definitions
      - Chapter 3: Claims *
        · Article 5: Notice of Claim *
    ");
    assert_eq!(result.toggles[0].1, Toggle::Expanded);
    assert_eq!(result.toggles[1].1, Toggle::Ignored);
    assert_eq!(result.phase, NavigationPhase::Focused);
    assert_eq!(result.report.duplicate_count(), 1);
    assert_eq!(result.report.skipped_count(), 1);
}

#[test]
fn toc_reports_deferred_selection() {
    let file = write_articles("deferred");
    let args = TocArgs {
        select: Some("article-article-99".to_string()),
        ..toc_args(&file)
    };

    let result = run_toc(&args, &NavigatorConfig::default()).expect("run toc");
    assert_eq!(
        result.selection,
        Some(("article-article-99".to_string(), Selection::Deferred))
    );
    assert_eq!(
        event_lines(&result),
        vec![
            "select article-article-99: deferred until the next data load".to_string(),
            "phase: transitioning".to_string(),
        ]
    );
}

#[test]
fn toc_deep_link_resolves_in_arabic() {
    let file = write_articles("deep-link");
    let args = TocArgs {
        lang: Some(LangArg::Ar),
        deep_link: Some("article-المادة-1".to_string()),
        ..toc_args(&file)
    };

    let result = run_toc(&args, &NavigatorConfig::default()).expect("run toc");
    assert_eq!(result.language, Locale::Ar);
    assert_eq!(result.phase, NavigationPhase::Focused);
    assert!(result.rendered.contains("· المادة 1: التعريفات *"));
}

#[test]
fn file_falls_back_to_config_records() {
    let file = write_articles("config-records");
    let config = NavigatorConfig {
        default_locale: Locale::Ar,
        records: Some(file),
        ..NavigatorConfig::default()
    };
    let args = ArticlesArgs {
        file: None,
        lang: None,
        search: None,
    };

    let result = run_articles(&args, &config).expect("run articles");
    assert_eq!(result.language, Locale::Ar);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].id, "ar-1");
}

#[test]
fn missing_file_and_config_is_an_error() {
    let args = CheckArgs { file: None };
    let err = run_check(&args, &NavigatorConfig::default()).unwrap_err();
    assert!(err.to_string().contains("RC128_CONFIG"));
}

#[test]
fn articles_search_filters_bodies() {
    let file = write_articles("search");
    let args = ArticlesArgs {
        file: Some(file),
        lang: Some(LangArg::En),
        search: Some("28 DAYS".to_string()),
    };

    let result = run_articles(&args, &NavigatorConfig::default()).expect("run articles");
    let ids: Vec<&str> = result.rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["en-5"]);
}

#[test]
fn check_flags_dropped_and_skipped_rows() {
    let file = write_articles("check");
    let result = run_check(&CheckArgs { file: Some(file) }, &NavigatorConfig::default())
        .expect("run check");

    assert!(result.has_errors);
    assert_eq!(result.record_count, 5);
    assert_eq!(result.issues.len(), 1);
    assert!(result.issues[0].dropped());

    let english = &result.reports[0];
    assert_eq!(english.language, Locale::En);
    assert_eq!(english.articles, 2);
    assert_eq!(english.duplicate_count(), 1);
    assert_eq!(english.skipped_count(), 1);

    let arabic = &result.reports[1];
    assert_eq!(arabic.articles, 1);
    assert!(arabic.is_clean());

    let table = check_table(&result).to_string();
    assert!(table.contains("English"));
    assert!(table.contains("Arabic"));
}

#[test]
fn lookup_single_code_and_unknown_code() {
    let result = run_lookup(&LookupArgs {
        table: LookupTableArg::Responses,
        code: Some("determination".to_string()),
    })
    .expect("lookup");
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].statutory_article, "Article 47");
    assert!(lookup_table(&result).to_string().contains("Article 47"));

    let err = run_lookup(&LookupArgs {
        table: LookupTableArg::Claims,
        code: Some("bribery".to_string()),
    })
    .unwrap_err();
    assert!(err.to_string().contains("bribery"));
}

#[test]
fn lookup_whole_table() {
    let result = run_lookup(&LookupArgs {
        table: LookupTableArg::Records,
        code: None,
    })
    .expect("lookup");
    assert_eq!(result.entries.len(), 6);
}

#[test]
fn blank_toggle_id_is_an_error() {
    let file = write_articles("blank-id");
    let args = TocArgs {
        toggle: vec!["part-part-one".to_string(), "   ".to_string()],
        ..toc_args(&file)
    };

    let err = run_toc(&args, &NavigatorConfig::default()).unwrap_err();
    assert_eq!(format!("{err:#}"), "parse navigation event: invalid node id: \"   \"");
}

#[test]
fn select_ids_are_trimmed() {
    let file = write_articles("trimmed-id");
    let args = TocArgs {
        select: Some(" article-article-1 ".to_string()),
        ..toc_args(&file)
    };

    let result = run_toc(&args, &NavigatorConfig::default()).expect("run toc");
    let (id, selection) = result.selection.expect("selection applied");
    assert_eq!(id, "article-article-1");
    assert!(selection.is_focused());
}
