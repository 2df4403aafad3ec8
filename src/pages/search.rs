use super::{ProgramOption, program_options};
use crate::record::{AlumniRecord, RecordSet, TABLE_COLUMNS};
use crate::router::Action;
use crate::state::{Filters, Page, SessionState, Transition};
use log::debug;
use serde::Serialize;

/// Shown instead of the table when no record passes the filters.
pub const NO_MATCH: &str = "Tidak ada data alumni yang cocok dengan filter.";

#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    pub filters: Filters,
    pub programs: Vec<ProgramOption>,
    pub columns: [&'static str; 6],
    pub rows: Vec<[String; 6]>,
    /// Names offered by the detail selector, in table order.
    pub names: Vec<String>,
    pub count: usize,
    pub message: Option<&'static str>,
}

/// Records passing every active filter, in record-set order.
///
/// Each non-empty filter is a case-insensitive substring test on its field.
/// The salary filter looks at the formatted display string, so `8000000`
/// does not match `Rp8.000.000,00` while `8.000.000` does.
pub fn filter_records<'a>(records: &'a RecordSet, filters: &Filters) -> Vec<&'a AlumniRecord> {
    let program = filters.program.map(|p| p.label()).unwrap_or_default();

    records
        .iter()
        .filter(|r| {
            contains(&r.name, &filters.name)
                && contains(&r.program, program)
                && contains(&r.student_id, &filters.student_id)
                && contains(&r.job_title, &filters.job_title)
                && contains(&r.company_name, &filters.company)
                && contains(&r.average_salary, &filters.salary)
        })
        .collect()
}

// An empty needle is an inactive filter.
fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// First record in `results` whose name equals `name` exactly.
pub fn find_by_name<'a>(results: &[&'a AlumniRecord], name: &str) -> Option<&'a AlumniRecord> {
    results.iter().copied().find(|record| record.name == name)
}

pub fn view(state: &SessionState) -> SearchView {
    let results = filter_records(&state.records, &state.filters);

    SearchView {
        filters: state.filters.clone(),
        programs: program_options(state.filters.program),
        columns: TABLE_COLUMNS,
        rows: results
            .iter()
            .map(|record| record.table_row().map(str::to_string))
            .collect(),
        names: results.iter().map(|record| record.name.clone()).collect(),
        count: results.len(),
        message: results.is_empty().then_some(NO_MATCH),
    }
}

pub fn handle(state: &mut SessionState, action: Action) -> Transition {
    match action {
        Action::Navigate(target) => super::navigate(Page::Search, target),
        Action::SetFilters(filters) => {
            state.filters = filters;
            Transition::Stay
        }
        Action::ClearFilters => {
            state.filters = Filters::default();
            Transition::Stay
        }
        Action::Select(name) => {
            if name.is_empty() {
                return Transition::Stay;
            }
            let results = filter_records(&state.records, &state.filters);
            match find_by_name(&results, &name) {
                Some(record) => {
                    state.selected = Some(record.clone());
                    Transition::GoTo(Page::Detail)
                }
                None => {
                    debug!("'{}' is not among the current results", name);
                    Transition::Stay
                }
            }
        }
        Action::Submit(_) => Transition::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::sample_records;
    use crate::record::Program;

    fn names(records: &[&AlumniRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn no_filters_returns_everything_in_order() {
        let records = sample_records();
        let all = filter_records(&records, &Filters::default());
        assert_eq!(
            names(&all),
            ["Sari Gita Fitri", "Natasha Rosaline", "Fadel Muhammad"]
        );
    }

    #[test]
    fn filters_are_case_insensitive_and_conjunctive() {
        let records = sample_records();
        let filters = Filters {
            company: "bank".to_string(),
            job_title: "ENGINEER".to_string(),
            ..Filters::default()
        };
        assert_eq!(names(&filter_records(&records, &filters)), ["Fadel Muhammad"]);

        let filters = Filters {
            program: Some(Program::Statistics),
            ..Filters::default()
        };
        assert!(filter_records(&records, &filters).is_empty());
    }

    #[test]
    fn salary_filter_matches_display_text_only() {
        let records = sample_records();
        let raw = Filters {
            salary: "8000000".to_string(),
            ..Filters::default()
        };
        assert!(filter_records(&records, &raw).is_empty());

        let grouped = Filters {
            salary: "8.000.000".to_string(),
            ..Filters::default()
        };
        assert_eq!(names(&filter_records(&records, &grouped)), ["Sari Gita Fitri"]);
    }

    #[test]
    fn selecting_moves_to_detail() {
        let mut state = SessionState::new(sample_records());
        state.page = Page::Search;
        let transition = handle(&mut state, Action::Select("Natasha Rosaline".to_string()));
        assert_eq!(transition, Transition::GoTo(Page::Detail));
        assert_eq!(state.selected.as_ref().map(|r| r.number), Some(2));
    }

    #[test]
    fn duplicate_names_select_the_first_in_order() {
        let twin = |number: usize, student_id: &str| AlumniRecord {
            number,
            name: "Budi".to_string(),
            student_id: student_id.to_string(),
            ..AlumniRecord::default()
        };
        let mut state = SessionState::new(RecordSet::new(vec![
            twin(1, "111"),
            twin(2, "222"),
        ]));
        state.page = Page::Search;

        let transition = handle(&mut state, Action::Select("Budi".to_string()));
        assert_eq!(transition, Transition::GoTo(Page::Detail));
        let selected = state.selected.as_ref().unwrap();
        assert_eq!(selected.number, 1);
        assert_eq!(selected.student_id, "111");

        // The narrowed result decides which one comes first.
        state.filters.student_id = "222".to_string();
        handle(&mut state, Action::Select("Budi".to_string()));
        assert_eq!(state.selected.as_ref().map(|r| r.number), Some(2));
    }

    #[test]
    fn selecting_outside_results_stays() {
        let mut state = SessionState::new(sample_records());
        state.filters.name = "sari".to_string();
        let transition = handle(&mut state, Action::Select("Fadel Muhammad".to_string()));
        assert_eq!(transition, Transition::Stay);
        assert!(state.selected.is_none());
    }

    #[test]
    fn empty_result_shows_message_and_no_selector() {
        let mut state = SessionState::new(sample_records());
        state.filters.name = "nobody".to_string();
        let view = view(&state);
        assert_eq!(view.message, Some(NO_MATCH));
        assert!(view.rows.is_empty());
        assert!(view.names.is_empty());
    }
}
