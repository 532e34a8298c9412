use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use rc128_articles::{CONFIG_ENV_VAR, LoadedRecords, NavigatorConfig, load_records};
use rc128_model::{
    ClaimType, Locale, LookupEntry, LookupTable, NodeId, RecordType, ResponseType,
};
use rc128_navigator::{Navigator, RenderOptions, build_outline, render_outline_with};

use crate::cli::{ArticlesArgs, CheckArgs, LangArg, LookupArgs, LookupTableArg, TocArgs};
use crate::types::{ArticleRow, ArticlesResult, CheckResult, LookupResult, TocResult};

pub fn load_config(explicit: Option<&Path>) -> Result<NavigatorConfig> {
    NavigatorConfig::resolve(explicit).context("load navigator config")
}

pub fn run_toc(args: &TocArgs, config: &NavigatorConfig) -> Result<TocResult> {
    let loaded = load(args.file.as_deref(), config)?;
    let language = pick_language(args.lang, config);
    let span = info_span!("toc", source = %loaded.source.display(), language = %language);
    let _guard = span.enter();

    let deep_link = args.deep_link.as_deref().map(parse_node_id).transpose()?;
    let select = args.select.as_deref().map(parse_node_id).transpose()?;
    let toggle = args
        .toggle
        .iter()
        .map(String::as_str)
        .map(parse_node_id)
        .collect::<Result<Vec<_>>>()?;

    let navigator = match deep_link {
        Some(id) => Navigator::with_deep_link(config.outline, id.as_str()),
        None => Navigator::new(config.outline),
    };
    let mut navigator = navigator.with_language(language);
    navigator.replace_records(loaded.records);

    if args.expand_all {
        navigator.expand_all();
    }
    let selection = select.map(|id| {
        let outcome = navigator.select_article(id.as_str());
        (id.to_string(), outcome)
    });
    let toggles = toggle
        .into_iter()
        .map(|id| {
            let outcome = navigator.toggle_section(id.as_str());
            (id.to_string(), outcome)
        })
        .collect();

    let rendered = render_outline_with(
        navigator.outline(),
        navigator.state(),
        &RenderOptions {
            show_ids: args.show_ids,
        },
    );
    info!(
        nodes = navigator.outline().len(),
        phase = ?navigator.phase(),
        "outline rendered"
    );
    Ok(TocResult {
        source: loaded.source,
        language,
        rendered,
        selection,
        toggles,
        phase: navigator.phase(),
        report: navigator.report().clone(),
    })
}

pub fn run_articles(args: &ArticlesArgs, config: &NavigatorConfig) -> Result<ArticlesResult> {
    let loaded = load(args.file.as_deref(), config)?;
    let language = pick_language(args.lang, config);
    let mut navigator = Navigator::new(config.outline).with_language(language);
    navigator.replace_records(loaded.records);
    if let Some(term) = &args.search {
        navigator.set_search_term(term.as_str());
    }
    let rows = navigator
        .visible_articles()
        .into_iter()
        .map(|record| ArticleRow {
            id: record.id.clone(),
            part: record.part_number.clone(),
            chapter: record.chapter_number.clone(),
            article: record.article_number.clone(),
            title: record.article_title.clone(),
            effective_date: record.effective_date.map(|date| date.to_string()),
        })
        .collect();
    Ok(ArticlesResult {
        source: loaded.source,
        language,
        search: args.search.clone(),
        rows,
    })
}

pub fn run_check(args: &CheckArgs, config: &NavigatorConfig) -> Result<CheckResult> {
    let loaded = load(args.file.as_deref(), config)?;
    let span = info_span!("check", source = %loaded.source.display());
    let _guard = span.enter();

    let reports: Vec<_> = Locale::all()
        .iter()
        .map(|language| build_outline(&loaded.records, *language, &config.outline).report)
        .collect();
    let has_errors =
        loaded.dropped_count() > 0 || reports.iter().any(|report| report.skipped_count() > 0);
    info!(
        records = loaded.records.len(),
        issues = loaded.issues.len(),
        has_errors,
        "check complete"
    );
    Ok(CheckResult {
        source: loaded.source,
        record_count: loaded.records.len(),
        reports,
        issues: loaded.issues,
        has_errors,
    })
}

pub fn run_lookup(args: &LookupArgs) -> Result<LookupResult> {
    match args.table {
        LookupTableArg::Claims => lookup::<ClaimType>(args.code.as_deref()),
        LookupTableArg::Responses => lookup::<ResponseType>(args.code.as_deref()),
        LookupTableArg::Records => lookup::<RecordType>(args.code.as_deref()),
    }
}

fn lookup<T: LookupTable>(code: Option<&str>) -> Result<LookupResult> {
    let entries: Vec<&'static LookupEntry> = match code {
        Some(code) => vec![T::parse_code(code)?.entry()],
        None => T::all().iter().map(T::entry).collect(),
    };
    Ok(LookupResult {
        table: T::TABLE,
        entries,
    })
}

fn load(file: Option<&Path>, config: &NavigatorConfig) -> Result<LoadedRecords> {
    let path = records_path(file, config)?;
    load_records(&path).with_context(|| format!("load articles from {}", path.display()))
}

fn records_path(file: Option<&Path>, config: &NavigatorConfig) -> Result<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| config.records.clone())
        .ok_or_else(|| {
            anyhow!("no article file given; pass FILE or set `records` via --config or {CONFIG_ENV_VAR}")
        })
}

fn parse_node_id(raw: &str) -> Result<NodeId> {
    NodeId::new(raw).context("parse navigation event")
}

fn pick_language(lang: Option<LangArg>, config: &NavigatorConfig) -> Locale {
    lang.map_or(config.default_locale, Locale::from)
}
