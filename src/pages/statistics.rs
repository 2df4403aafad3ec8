use crate::record::RecordSet;
use crate::router::Action;
use crate::state::{Page, SessionState, Transition};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const NO_DATA: &str = "Tidak ada data alumni untuk menampilkan statistik perusahaan.";

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyShare {
    pub medal: &'static str,
    pub company: String,
    pub count: usize,
    /// `count / total * 100`, unrounded.
    pub percentage: f64,
    /// `percentage` with one decimal place.
    pub percentage_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub distinct_programs: usize,
    pub distinct_companies: usize,
    pub top_companies: Vec<CompanyShare>,
    pub message: Option<&'static str>,
}

/// Summary figures over the whole record set.
///
/// Blank programme or company values are not counted as distinct values and
/// do not compete for the top three. Companies with equal counts keep the
/// order in which they were first seen.
pub fn compute(records: &RecordSet) -> Statistics {
    let distinct_programs = records
        .iter()
        .map(|r| r.program.as_str())
        .filter(|p| !p.trim().is_empty())
        .collect::<HashSet<_>>()
        .len();

    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for company in records.iter().map(|r| r.company_name.as_str()) {
        if company.trim().is_empty() {
            continue;
        }
        match positions.get(company) {
            Some(&i) => order[i].1 += 1,
            None => {
                positions.insert(company, order.len());
                order.push((company, 1));
            }
        }
    }
    let distinct_companies = order.len();

    // Stable sort keeps first-seen order among ties.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let total = records.len();
    let top_companies = order
        .into_iter()
        .take(3)
        .zip(MEDALS)
        .map(|((company, count), medal)| {
            let percentage = count as f64 / total as f64 * 100.0;
            CompanyShare {
                medal,
                company: company.to_string(),
                count,
                percentage,
                percentage_label: format!("{:.1}%", percentage),
            }
        })
        .collect();

    Statistics {
        total,
        distinct_programs,
        distinct_companies,
        top_companies,
        message: records.is_empty().then_some(NO_DATA),
    }
}

pub fn view(state: &SessionState) -> Statistics {
    compute(&state.records)
}

pub fn handle(_state: &mut SessionState, action: Action) -> Transition {
    match action {
        Action::Navigate(target) => super::navigate(Page::Statistics, target),
        _ => Transition::Stay,
    }
}
