use super::{ProgramOption, program_options};
use crate::currency::{Amount, PREFIX, format_currency};
use crate::error::FormError;
use crate::notice::Notice;
use crate::record::{AlumniRecord, Program};
use crate::router::Action;
use crate::state::{Page, SessionState, Transition};
use log::info;
use serde::{Deserialize, Serialize};

pub const SAVED: &str = "Data alumni berhasil ditambahkan!";

/// Raw add-record form input. Every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddForm {
    pub name: String,
    pub student_id: String,
    pub program: String,
    pub cohort: String,
    pub specialization: String,
    pub thesis_title: String,
    pub graduation_year: String,
    pub job_title: String,
    pub employee_id: String,
    pub company_name: String,
    pub company_address: String,
    pub average_salary: String,
}

impl AddForm {
    /// Field names accepted by [`set`](Self::set), in form order.
    pub const FIELDS: [&'static str; 12] = [
        "name",
        "student_id",
        "program",
        "cohort",
        "specialization",
        "thesis_title",
        "graduation_year",
        "job_title",
        "employee_id",
        "company_name",
        "company_address",
        "average_salary",
    ];

    /// Set one field by name. Returns false for an unknown field.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "student_id" => &mut self.student_id,
            "program" => &mut self.program,
            "cohort" => &mut self.cohort,
            "specialization" => &mut self.specialization,
            "thesis_title" => &mut self.thesis_title,
            "graduation_year" => &mut self.graduation_year,
            "job_title" => &mut self.job_title,
            "employee_id" => &mut self.employee_id,
            "company_name" => &mut self.company_name,
            "company_address" => &mut self.company_address,
            "average_salary" => &mut self.average_salary,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Check the form and build the record it describes.
    ///
    /// Required fields are checked in the order Nama, NPM, Program Studi and
    /// the first blank one is reported. The returned record's number is left
    /// for [`RecordSet::append`](crate::record::RecordSet::append) to assign.
    pub fn validate(&self) -> Result<AlumniRecord, FormError> {
        let required = [
            ("Nama", &self.name),
            ("NPM", &self.student_id),
            ("Program Studi", &self.program),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(label));
            }
        }

        let program: Program = self
            .program
            .parse()
            .map_err(FormError::InvalidProgram)?;

        Ok(AlumniRecord {
            number: 0,
            name: self.name.clone(),
            student_id: self.student_id.clone(),
            program: program.label().to_string(),
            cohort: self.cohort.clone(),
            specialization: self.specialization.clone(),
            thesis_title: self.thesis_title.clone(),
            graduation_year: self.graduation_year.clone(),
            job_title: self.job_title.clone(),
            employee_id: self.employee_id.clone(),
            company_name: self.company_name.clone(),
            company_address: self.company_address.clone(),
            average_salary: normalize_salary(&self.average_salary)?,
        })
    }
}

/// Turn salary form input into its display string.
///
/// Grouping punctuation is dropped before parsing, so `8.000.000` and
/// `8000000` both give `Rp8.000.000,00`. Input that does not parse is kept
/// only when it already starts with `Rp`. Blank input is the sentinel.
pub fn normalize_salary(input: &str) -> Result<String, FormError> {
    if input.is_empty() {
        return Ok(format_currency(&Amount::Missing));
    }

    let digits = input.replace(&['.', ','][..], "");
    match digits.trim().parse::<i128>() {
        Ok(n) => Ok(format_currency(&Amount::Int(n))),
        Err(_) if input.starts_with(PREFIX) => Ok(input.to_string()),
        Err(_) => Err(FormError::InvalidSalary),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddView {
    pub form: AddForm,
    pub programs: Vec<ProgramOption>,
}

pub fn view(state: &SessionState) -> AddView {
    let selected = state.draft.program.parse().ok().or(Some(Program::Mathematics));
    AddView {
        form: state.draft.clone(),
        programs: program_options(selected),
    }
}

pub fn handle(state: &mut SessionState, action: Action) -> Transition {
    match action {
        Action::Navigate(target) => super::navigate(Page::Add, target),
        Action::Submit(form) => match form.validate() {
            Ok(record) => {
                let added = state.records.append(record);
                info!("added record {} ({})", added.number, added.name);
                state.draft = AddForm::default();
                state.notify(Notice::success(SAVED));
                Transition::GoTo(Page::Search)
            }
            Err(e) => {
                state.notify(Notice::error(e.to_string()));
                state.draft = form;
                Transition::Stay
            }
        },
        _ => Transition::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, student_id: &str, program: &str) -> AddForm {
        AddForm {
            name: name.to_string(),
            student_id: student_id.to_string(),
            program: program.to_string(),
            ..AddForm::default()
        }
    }

    #[test]
    fn reports_first_missing_field_only() {
        assert_eq!(
            form("", "", "").validate(),
            Err(FormError::MissingField("Nama"))
        );
        assert_eq!(
            form("Budi", "  ", "").validate(),
            Err(FormError::MissingField("NPM"))
        );
        assert_eq!(
            form("Budi", "123", "").validate(),
            Err(FormError::MissingField("Program Studi"))
        );
    }

    #[test]
    fn rejects_unknown_program() {
        assert_eq!(
            form("Budi", "123", "Fisika").validate(),
            Err(FormError::InvalidProgram("Fisika".to_string()))
        );
    }

    #[test]
    fn normalizes_salary_input() {
        assert_eq!(normalize_salary("5000000").unwrap(), "Rp5.000.000,00");
        assert_eq!(normalize_salary("5.000.000").unwrap(), "Rp5.000.000,00");
        assert_eq!(normalize_salary("Rp 5 juta").unwrap(), "Rp 5 juta");
        assert_eq!(normalize_salary("").unwrap(), "Tidak tersedia");
        assert_eq!(normalize_salary("lima juta"), Err(FormError::InvalidSalary));
        assert_eq!(
            normalize_salary("99999999999999999999").unwrap(),
            "Rp99.999.999.999.999.999.999,00"
        );
    }

    #[test]
    fn rejected_submission_keeps_input_and_state() {
        let mut state = SessionState::default();
        state.page = Page::Add;
        let mut bad = form("Budi", "123", "Statistika");
        bad.average_salary = "banyak".to_string();

        let transition = handle(&mut state, Action::Submit(bad.clone()));
        assert_eq!(transition, Transition::Stay);
        assert!(state.records.is_empty());
        assert_eq!(state.draft, bad);
        assert_eq!(state.take_notices()[0].message, FormError::InvalidSalary.to_string());
    }

    #[test]
    fn field_setter_covers_every_field() {
        let mut draft = AddForm::default();
        for field in AddForm::FIELDS {
            assert!(draft.set(field, "x"));
        }
        assert!(!draft.set("salary", "x"));
        assert_eq!(draft.average_salary, "x");
    }
}
