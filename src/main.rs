//! rollcall - terminal customer directory
//!
//! Generates the synthetic dataset, applies any query given on the command line, and either
//! prints the first rows of the resulting view or starts the interactive list.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rollcall::render::ui::format::format_count;
use rollcall::config::ThemeKind;
use rollcall::render::ui::{ColorTheme, TerminalUI};
use rollcall::{Application, RecordStore, Session, SortState, ViewerConfig};
use std::io::{self, BufWriter, Write};
use std::time::Instant;

fn build_cli() -> Command {
    let command = Command::new("rollcall")
        .version(rollcall::VERSION)
        .about("Browse a million customer records in the terminal")
        .long_about(
            "rollcall generates a synthetic customer directory and lets you search, filter, \
             sort and select across it. Only the rows on screen are ever materialized.",
        )
        .arg(
            Arg::new("records")
                .long("records")
                .short('n')
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .help("Number of customers to generate"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .help("Seed for generated scores"),
        )
        .arg(
            Arg::new("row-height")
                .long("row-height")
                .value_name("PX")
                .value_parser(value_parser!(u64))
                .help("Logical row height used for windowing"),
        )
        .arg(
            Arg::new("buffer-rows")
                .long("buffer-rows")
                .value_name("ROWS")
                .value_parser(value_parser!(usize))
                .help("Rows materialized beyond each edge of the viewport"),
        )
        .arg(
            Arg::new("debounce-ms")
                .long("debounce-ms")
                .value_name("MS")
                .value_parser(value_parser!(u64))
                .help("Quiet period before typed search text is applied (at least 250)"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .value_name("TEXT")
                .help("Initial search text (name, email or phone)"),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .short('f')
                .value_name("FILTER")
                .action(ArgAction::Append)
                .help("Filter such as score:26-50, added:Admin or active:30d (repeatable)"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_name("FIELD[:asc|desc]")
                .help("Sort by name, email, phone, score or last_activity"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .value_parser(value_parser!(ThemeKind))
                .help("Color theme: default, monochrome or high-contrast"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .value_name("ROWS")
                .value_parser(value_parser!(usize))
                .help("Print the first ROWS of the view as TSV instead of starting the UI"),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .value_name("FILE")
            .value_parser(value_parser!(std::path::PathBuf))
            .help("Configuration file (default: <config dir>/rollcall/config.toml)"),
    );

    command
}

fn resolve_config(matches: &ArgMatches) -> Result<ViewerConfig> {
    #[cfg(feature = "config")]
    let mut config = match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => ViewerConfig::load_from_file(path)?,
        None => ViewerConfig::load_default()?,
    };
    #[cfg(not(feature = "config"))]
    let mut config = ViewerConfig::default();

    if let Some(records) = matches.get_one::<usize>("records") {
        config.dataset_size = *records;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = *seed;
    }
    if let Some(row_height) = matches.get_one::<u64>("row-height") {
        config.row_height = *row_height;
    }
    if let Some(buffer_rows) = matches.get_one::<usize>("buffer-rows") {
        config.buffer_rows = *buffer_rows;
    }
    if let Some(debounce_ms) = matches.get_one::<u64>("debounce-ms") {
        config.debounce_ms = *debounce_ms;
    }
    if let Some(theme) = matches.get_one::<ThemeKind>("theme") {
        config.theme = *theme;
    }

    config.validate()?;
    Ok(config)
}

fn apply_startup_query(
    session: &mut Session,
    matches: &ArgMatches,
    sort: Option<SortState>,
) -> Result<()> {
    for filter in matches.get_many::<String>("filter").into_iter().flatten() {
        session
            .add_filter_text(filter)
            .with_context(|| format!("Invalid --filter value: {filter}"))?;
    }
    if let Some(sort) = sort {
        session.set_sort(sort);
    }
    if let Some(text) = matches.get_one::<String>("search") {
        session.set_search_text(text.as_str(), Instant::now());
        session.commit_search();
    }
    Ok(())
}

fn dump_rows(session: &Session, limit: usize) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "id\tname\temail\tphone\tscore\tlast_activity\tadded_by")?;
    for record in session.view().iter().take(limit) {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.id,
            record.name,
            record.email,
            record.phone,
            record.score,
            record.last_activity_iso(),
            record.added_by
        )?;
    }
    writeln!(
        out,
        "# {} of {} customers",
        format_count(session.filtered_count()),
        format_count(session.total_count())
    )?;
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = build_cli().get_matches();
    let config = resolve_config(&matches)?;

    // Reject a bad sort before paying for generation
    let sort = matches
        .get_one::<String>("sort")
        .map(|text| text.parse::<SortState>())
        .transpose()
        .context("Invalid --sort value")?;

    let store = RecordStore::shared_with(|| RecordStore::from_config(&config, Utc::now()));
    let mut session = Session::new(store, &config);
    apply_startup_query(&mut session, &matches, sort)?;

    if let Some(limit) = matches.get_one::<usize>("dump") {
        return dump_rows(&session, *limit);
    }

    let ui_renderer = Box::new(TerminalUI::with_theme(ColorTheme::for_kind(config.theme))?);
    let mut app = Application::new(session, ui_renderer);
    app.run().await?;

    Ok(())
}
