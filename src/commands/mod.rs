//! Command handlers
//!
//! Each handler wires the parsed CLI arguments to the API boundary and the
//! browse session, and prints through the `output` module. The interactive
//! browse loop lives here too: a line-driven shell over one
//! [`BrowseSession`].

use crate::CitrError;
use crate::api::RosterApi;
use crate::browse::{BrowseSession, PageWindow, SearchOutcome};
use crate::cli::{ConfigCommands, OutputFormat, SearchArgs};
use crate::config::CitrConfig;
use crate::filters::{FilterCriteria, SearchField};
use crate::output;
use colored::Colorize;
use dialoguer::Input;

type Result<T> = std::result::Result<T, CitrError>;

/// Print one page of the roster
///
/// # Errors
///
/// Returns `CitrError::DataUnavailable` if the fetch failed, or an export
/// error for the JSON/CSV formats.
pub fn list(
    api: &dyn RosterApi,
    config: &CitrConfig,
    page: usize,
    rows: Option<usize>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let window = PageWindow::at(page, rows.unwrap_or(config.rows_per_page));
    let mut session = BrowseSession::with_window(api, window);
    session.load();

    if let Some(message) = session.error() {
        return Err(CitrError::DataUnavailable(message.to_string()));
    }
    print_page(&session, format, quiet)
}

/// Run an advanced search and print the full match set
///
/// # Errors
///
/// Returns `CitrError::DataUnavailable` if the search failed, or an export
/// error for the JSON/CSV formats.
pub fn search(
    api: &dyn RosterApi,
    config: &CitrConfig,
    args: &SearchArgs,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match search_session(api, config, args)? {
        Some(session) => print_page(&session, format, quiet),
        None => {
            eprintln!("No search criteria specified. Search not performed.");
            Ok(())
        }
    }
}

/// Run the one-shot search and widen the window over the whole match set
///
/// Search results arrive complete, so after the fetch the window is resized
/// to cover every matched row. Returns `None` when no criterion was active.
fn search_session<'a>(
    api: &'a dyn RosterApi,
    config: &CitrConfig,
    args: &SearchArgs,
) -> Result<Option<BrowseSession<'a>>> {
    let criteria = FilterCriteria::from(args);
    let window = PageWindow::at(0, config.rows_per_page);
    let mut session = BrowseSession::with_window(api, window);

    if session.on_search(criteria) == SearchOutcome::NoCriteria {
        return Ok(None);
    }
    if let Some(message) = session.error() {
        return Err(CitrError::DataUnavailable(message.to_string()));
    }

    let matched = session.results().rows.len();
    if matched > 0 {
        session.on_rows_per_page_change(matched);
    }
    Ok(Some(session))
}

/// Show the full record for one citizen
///
/// # Errors
///
/// Returns `CitrError::ApiError` if the fetch fails.
pub fn show(api: &dyn RosterApi, id: i64) -> Result<()> {
    let citizen = api.fetch_citizen(id)?;
    print!("{}", output::citizen_details(&citizen));
    Ok(())
}

/// Update fields of a record in place (read-modify-write)
///
/// The record is fetched, the assignments are applied, and the full edited
/// record is written back with PUT so unmodelled fields survive.
///
/// # Errors
///
/// Returns `CitrError::InvalidInput` for malformed assignments and
/// `CitrError::ApiError` if a request fails.
pub fn update(api: &dyn RosterApi, id: i64, assignments: &[String], quiet: bool) -> Result<()> {
    let citizen = api.fetch_citizen(id)?;
    let edited = apply_assignments(&citizen, assignments)?;
    let updated = api.update_citizen(&edited)?;

    if !quiet {
        println!("Updated record {} ({})", updated.id, updated.full_name());
    }
    Ok(())
}

/// Apply `field=value` assignments to a record
///
/// Values that parse as JSON scalars keep their type; everything else is a
/// string. Unknown field names land in the record's preserved extras. The
/// `id` field is not assignable.
fn apply_assignments(
    citizen: &crate::roster::Citizen,
    assignments: &[String],
) -> Result<crate::roster::Citizen> {
    let mut value = serde_json::to_value(citizen)?;
    let Some(object) = value.as_object_mut() else {
        return Err(CitrError::InvalidInput("record is not an object".to_string()));
    };

    for assignment in assignments {
        let Some((field, raw)) = assignment.split_once('=') else {
            return Err(CitrError::InvalidInput(format!(
                "expected FIELD=VALUE, got '{assignment}'"
            )));
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(CitrError::InvalidInput(format!(
                "empty field name in '{assignment}'"
            )));
        }
        if field == "id" {
            return Err(CitrError::InvalidInput("the id field cannot be changed".to_string()));
        }

        let parsed = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        object.insert(field.to_string(), parsed);
    }

    serde_json::from_value(value).map_err(|e| {
        CitrError::InvalidInput(format!("assignment produced an invalid record: {e}"))
    })
}

/// Print the aggregate roster statistics
///
/// # Errors
///
/// Returns `CitrError::ApiError` if the fetch fails.
pub fn stats(api: &dyn RosterApi) -> Result<()> {
    let statistics = api.fetch_statistics()?;
    print!("{}", output::statistics_report(&statistics));
    Ok(())
}

/// Handle the config subcommands
///
/// # Errors
///
/// Returns `CitrError::ConfigError` if saving fails, or
/// `CitrError::InvalidInput` for an invalid page size.
pub fn config_cmd(config: &mut CitrConfig, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let path = CitrConfig::config_path()?;
            println!("# {}", path.display());
            print!(
                "{}",
                toml::to_string_pretty(config)
                    .map_err(|e| CitrError::InvalidInput(e.to_string()))?
            );
        }
        ConfigCommands::SetUrl { url } => {
            config.api_url = url.trim_end_matches('/').to_string();
            config.save()?;
            println!("API URL set to {}", config.api_url);
        }
        ConfigCommands::SetRows { rows } => {
            if *rows == 0 {
                return Err(CitrError::InvalidInput(
                    "rows per page must be positive".to_string(),
                ));
            }
            config.rows_per_page = *rows;
            config.save()?;
            println!("Default page size set to {rows}");
        }
    }
    Ok(())
}

/// Run the interactive roster browser
///
/// A line-driven shell over one browse session. Single-letter commands:
/// n/p page, g jump, r page size, s search form, f local filter, x reset,
/// o open record, t state token, h help, q quit.
///
/// # Errors
///
/// Returns `CitrError::PromptError` if reading input fails. Fetch failures
/// are shown as banners and never abort the loop.
pub fn browse(
    api: &dyn RosterApi,
    config: &CitrConfig,
    state: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let window = state.map_or_else(
        || PageWindow::at(0, config.rows_per_page),
        PageWindow::from_query,
    );
    let mut session = BrowseSession::with_window(api, window);
    session.load();

    if !quiet {
        println!("Type 'h' for help, 'q' to quit.");
    }

    loop {
        render(&session, quiet);

        let line: String = Input::new()
            .with_prompt("citr")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        match command {
            "" => {}
            "n" => session.on_page_change(session.window().page() + 1),
            "p" => session.on_page_change(session.window().page().saturating_sub(1)),
            "g" => match rest.parse() {
                Ok(page) => session.on_page_change(page),
                Err(_) => println!("usage: g <page>"),
            },
            "r" => match rest.parse::<usize>() {
                Ok(rows) if rows > 0 => session.on_rows_per_page_change(rows),
                _ => println!("usage: r <rows-per-page>"),
            },
            "s" => run_search_form(&mut session)?,
            "f" => {
                if !session.set_local_query(rest) {
                    println!("The local filter is available only while a search is active.");
                }
            }
            "x" => session.on_reset_search(),
            "o" => match rest.parse() {
                Ok(id) => match api.fetch_citizen(id) {
                    Ok(citizen) => print!("{}", output::citizen_details(&citizen)),
                    Err(_) => println!("{}", output::error_banner("failed to load record")),
                },
                Err(_) => println!("usage: o <id>"),
            },
            "t" => println!("{}", session.state_token()),
            "h" | "?" => print_help(),
            "q" => break,
            _ => println!("Unknown command '{command}'. Type 'h' for help."),
        }
    }

    Ok(())
}

/// Prompt for every searchable field and submit the criteria
fn run_search_form(session: &mut BrowseSession<'_>) -> Result<()> {
    let mut criteria = FilterCriteria::new();
    for field in SearchField::ALL {
        let current = session.criteria().get(field).unwrap_or("").to_string();
        let value: String = Input::new()
            .with_prompt(field.label())
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        criteria.set(field, value);
    }

    if session.on_search(criteria) == SearchOutcome::NoCriteria {
        println!("No search criteria specified. Search not performed.");
    }
    Ok(())
}

fn render(session: &BrowseSession<'_>, quiet: bool) {
    if let Some(message) = session.error() {
        println!("{}", output::error_banner(message));
    }

    print!("{}", output::roster_table(&session.visible_rows()));

    let (first, last, total) = session.page_span();
    println!("  {}", output::pager_line(first, last, total).bold());

    if !quiet && session.search_active() {
        println!(
            "  {}",
            output::search_status(session.criteria(), session.local_query())
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  n / p         next / previous page");
    println!("  g <page>      jump to page (zero-based)");
    println!("  r <rows>      set rows per page");
    println!("  s             advanced search form");
    println!("  f <text>      local filter over search results (f alone clears)");
    println!("  x             reset search");
    println!("  o <id>        open record details");
    println!("  t             print resumable state token");
    println!("  q             quit");
}

/// Print one page in the requested format
fn print_page(session: &BrowseSession<'_>, format: OutputFormat, quiet: bool) -> Result<()> {
    let rows = session.visible_rows();
    match format {
        OutputFormat::Table => {
            print!("{}", output::roster_table(&rows));
            if !quiet {
                let (first, last, total) = session.page_span();
                println!("  {}", output::pager_line(first, last, total));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record([
                "id",
                "last_name",
                "first_name",
                "middle_name",
                "birth_date",
                "city",
                "address",
            ])?;
            for row in &rows {
                writer.write_record([
                    row.id.to_string(),
                    row.last_name.clone().unwrap_or_default(),
                    row.first_name.clone().unwrap_or_default(),
                    row.middle_name.clone().unwrap_or_default(),
                    row.birth_date.map(|d| d.to_string()).unwrap_or_default(),
                    row.city.clone().unwrap_or_default(),
                    row.address.clone().unwrap_or_default(),
                ])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{ApiCall, MockRosterApi};
    use crate::roster::{Citizen, ResultSet};

    fn roster(n: i64) -> Vec<Citizen> {
        (1..=n).map(Citizen::with_id).collect()
    }

    #[test]
    fn test_apply_assignments_typed_and_string_values() {
        let citizen = Citizen {
            city: Some("Kazan".to_string()),
            ..Citizen::with_id(7)
        };

        let edited = apply_assignments(
            &citizen,
            &[
                "city=Moscow".to_string(),
                "children_count=3".to_string(),
                "blood_donor=true".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(edited.id, 7);
        assert_eq!(edited.city.as_deref(), Some("Moscow"));
        assert_eq!(edited.children_count, Some(3));
        assert_eq!(edited.blood_donor, Some(true));
    }

    #[test]
    fn test_apply_assignments_unknown_field_goes_to_extras() {
        let citizen = Citizen::with_id(7);
        let edited =
            apply_assignments(&citizen, &["favorite_color=green".to_string()]).unwrap();

        assert_eq!(
            edited.extra.get("favorite_color"),
            Some(&serde_json::json!("green"))
        );
    }

    #[test]
    fn test_apply_assignments_rejects_id_and_malformed() {
        let citizen = Citizen::with_id(7);

        assert!(matches!(
            apply_assignments(&citizen, &["id=9".to_string()]),
            Err(CitrError::InvalidInput(_))
        ));
        assert!(matches!(
            apply_assignments(&citizen, &["no-equals-sign".to_string()]),
            Err(CitrError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_update_round_trips_through_api() {
        let mock = MockRosterApi::new(roster(3));

        update(&mock, 2, &["city=Moscow".to_string()], true).unwrap();

        assert_eq!(mock.calls(), vec![ApiCall::Fetch(2), ApiCall::Update(2)]);
    }

    #[test]
    fn test_list_surfaces_fetch_failure() {
        let mock = MockRosterApi::new(roster(3));
        mock.fail_next();
        let config = CitrConfig::default();

        let result = list(&mock, &config, 0, None, OutputFormat::Table, true);
        assert!(matches!(result, Err(CitrError::DataUnavailable(_))));
    }

    #[test]
    fn test_search_window_covers_match_sets_beyond_one_page() {
        let mock = MockRosterApi::new(Vec::new()).with_search_result(ResultSet {
            rows: roster(1500),
            total_count: 1500,
        });
        let config = CitrConfig::default();
        let args = SearchArgs {
            last_name: Some("Ivanov".to_string()),
            ..SearchArgs::default()
        };

        let session = search_session(&mock, &config, &args).unwrap().unwrap();

        assert_eq!(session.visible_rows().len(), 1500);
        assert_eq!(session.page_span(), (1, 1500, 1500));
        // Still a single fetch; the resize is client-side
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_search_with_blank_args_issues_no_request() {
        let mock = MockRosterApi::new(roster(3));
        let config = CitrConfig::default();
        let args = SearchArgs {
            last_name: Some("   ".to_string()),
            ..SearchArgs::default()
        };

        search(&mock, &config, &args, OutputFormat::Table, true).unwrap();
        assert_eq!(mock.call_count(), 0);
    }
}
