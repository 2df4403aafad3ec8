//! Text front-end helpers: command parsing and plain-text page rendering for
//! the `cli` binary.

use crate::notice::Level;
use crate::pages::add::AddForm;
use crate::router::{Action, Screen, View};
use crate::state::{Filters, Page, SessionState};
use std::fmt::Write;

/// Filter names accepted by `filter <field> <value>`.
pub const FILTER_FIELDS: [&str; 6] = ["name", "program", "student_id", "job_title", "company", "salary"];

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch an action to the current page.
    Run(Action),
    /// Change one field of the add-form draft.
    Edit { field: String, value: String },
    Help,
    Quit,
}

pub const HELP: &str = "Commands:
  q: Quit
  help: Show this list
  start: Open the search page
  go <page>: Follow a navigation link (welcome, search, statistics, add)
  filter <field> <value>: Set a search filter (name, program, student_id, job_title, company, salary)
  clear: Clear all search filters
  select <name>: Show the detail page of a search result
  set <field> <value>: Fill an add-form field
  save: Submit the add form";

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

/// Parse one input line against the current session.
///
/// The returned error is a short status text for the prompt.
///
/// # Examples
/// ```
/// use alumni::router::Action;
/// use alumni::state::{Page, SessionState};
/// use alumni::terminal::{Command, parse_command};
///
/// let state = SessionState::default();
/// assert_eq!(
///     parse_command("go search", &state),
///     Ok(Command::Run(Action::Navigate(Page::Search)))
/// );
/// assert!(parse_command("jump", &state).is_err());
/// ```
pub fn parse_command(line: &str, state: &SessionState) -> Result<Command, String> {
    let (word, rest) = split_word(line.trim());

    match word {
        "q" | "quit" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        "start" => Ok(Command::Run(Action::Navigate(Page::Search))),
        "go" => rest.parse().map(|page| Command::Run(Action::Navigate(page))),
        "clear" => Ok(Command::Run(Action::ClearFilters)),
        "select" => Ok(Command::Run(Action::Select(rest.to_string()))),
        "save" => Ok(Command::Run(Action::Submit(state.draft.clone()))),
        "filter" => {
            let (field, value) = split_word(rest);
            let mut filters = state.filters.clone();
            set_filter(&mut filters, field, value)?;
            Ok(Command::Run(Action::SetFilters(filters)))
        }
        "set" => {
            let (field, value) = split_word(rest);
            if !AddForm::FIELDS.contains(&field) {
                return Err(format!("unknown field '{}'", field));
            }
            Ok(Command::Edit {
                field: field.to_string(),
                value: value.to_string(),
            })
        }
        "" => Err("invalid command".to_string()),
        _ => Err(format!("invalid command '{}'", word)),
    }
}

fn set_filter(filters: &mut Filters, field: &str, value: &str) -> Result<(), String> {
    let value = value.to_string();
    match field {
        "name" => filters.name = value,
        "student_id" => filters.student_id = value,
        "job_title" => filters.job_title = value,
        "company" => filters.company = value,
        "salary" => filters.salary = value,
        "program" if value.is_empty() => filters.program = None,
        "program" => {
            filters.program = Some(value.parse().map_err(|e| format!("unknown program '{}'", e))?)
        }
        _ => {
            return Err(format!(
                "unknown filter '{}', expected one of {}",
                field,
                FILTER_FIELDS.join(", ")
            ));
        }
    }
    Ok(())
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Success => "OK",
        Level::Info => "INFO",
        Level::Warning => "WARN",
        Level::Error => "ERROR",
    }
}

/// Render a screen as plain text.
pub fn render_text(screen: &Screen) -> String {
    let mut out = String::new();

    for notice in &screen.notices {
        let _ = writeln!(out, "[{}] {}", level_tag(notice.level), notice.message);
    }

    match &screen.view {
        View::Welcome(view) => {
            let _ = writeln!(out, "{}\n{}\n", view.title, view.tagline);
            for card in &view.cards {
                let _ = writeln!(out, "{} {}: {}", card.icon, card.title, card.text);
            }
            let _ = writeln!(out, "\n{} (start)", view.start_label);
        }
        View::Search(view) => {
            let _ = writeln!(out, "Hasil Pencarian ({} alumni)", view.count);
            match view.message {
                Some(message) => {
                    let _ = writeln!(out, "{}", message);
                }
                None => {
                    let _ = writeln!(out, "{}", view.columns.join(" | "));
                    for row in &view.rows {
                        let _ = writeln!(out, "{}", row.join(" | "));
                    }
                }
            }
        }
        View::Detail(view) => match (&view.name, view.warning) {
            (_, Some(warning)) => {
                let _ = writeln!(out, "{}", warning);
            }
            (name, None) => {
                let _ = writeln!(out, "Detail Alumni - {}", name.as_deref().unwrap_or_default());
                for section in &view.sections {
                    let _ = writeln!(out, "\n{}", section.title);
                    for field in &section.fields {
                        let _ = writeln!(out, "  {}: {}", field.label, field.value);
                    }
                }
            }
        },
        View::Statistics(stats) => {
            let _ = writeln!(out, "Total Alumni: {}", stats.total);
            let _ = writeln!(out, "Program Studi Unik: {}", stats.distinct_programs);
            let _ = writeln!(out, "Perusahaan Unik: {}", stats.distinct_companies);
            let _ = writeln!(out, "\nTop 3 Perusahaan Paling Populer");
            if let Some(message) = stats.message {
                let _ = writeln!(out, "{}", message);
            }
            for share in &stats.top_companies {
                let _ = writeln!(
                    out,
                    "{} {} - {} alumni ({})",
                    share.medal, share.company, share.count, share.percentage_label
                );
            }
        }
        View::Add(view) => {
            let _ = writeln!(out, "Tambah Data Alumni Baru");
            let form = &view.form;
            let values = [
                &form.name,
                &form.student_id,
                &form.program,
                &form.cohort,
                &form.specialization,
                &form.thesis_title,
                &form.graduation_year,
                &form.job_title,
                &form.employee_id,
                &form.company_name,
                &form.company_address,
                &form.average_salary,
            ];
            for (field, value) in AddForm::FIELDS.iter().zip(values) {
                let _ = writeln!(out, "  {}: {}", field, value);
            }
        }
    }

    if !screen.links.is_empty() {
        let links: Vec<&str> = screen.links.iter().map(|page| page.as_str()).collect();
        let _ = writeln!(out, "\n-> {}", links.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::sample_records;
    use crate::record::Program;
    use crate::router::{dispatch, render};

    #[test]
    fn filter_command_keeps_other_filters() {
        let mut state = SessionState::default();
        state.filters.name = "sari".to_string();
        let command = parse_command("filter program Statistika", &state).unwrap();
        let Command::Run(Action::SetFilters(filters)) = command else {
            panic!("expected a filter action");
        };
        assert_eq!(filters.name, "sari");
        assert_eq!(filters.program, Some(Program::Statistics));

        assert!(parse_command("filter program Fisika", &state).is_err());
        assert!(parse_command("filter age 3", &state).is_err());
    }

    #[test]
    fn values_keep_inner_spaces() {
        let state = SessionState::default();
        assert_eq!(
            parse_command("select Sari Gita Fitri", &state),
            Ok(Command::Run(Action::Select("Sari Gita Fitri".to_string())))
        );
        assert_eq!(
            parse_command("set company_name PT Maju Jaya", &state),
            Ok(Command::Edit {
                field: "company_name".to_string(),
                value: "PT Maju Jaya".to_string()
            })
        );
        assert!(parse_command("set nickname x", &state).is_err());
    }

    #[test]
    fn renders_search_table() {
        let mut state = SessionState::new(sample_records());
        dispatch(&mut state, Action::Navigate(Page::Search));
        let text = render_text(&render(&mut state));
        assert!(text.starts_with("Hasil Pencarian (3 alumni)"));
        assert!(text.contains("Natasha Rosaline"));
        assert!(text.contains("-> welcome, statistics, add"));
    }
}
