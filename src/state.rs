use crate::loader::LoadOutcome;
use crate::notice::Notice;
use crate::pages::add::AddForm;
use crate::record::{AlumniRecord, Program, RecordSet, deserialize_optional_program};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five pages of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Welcome,
    Search,
    Detail,
    Statistics,
    Add,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Welcome,
        Page::Search,
        Page::Detail,
        Page::Statistics,
        Page::Add,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Welcome => "welcome",
            Page::Search => "search",
            Page::Detail => "detail",
            Page::Statistics => "statistics",
            Page::Add => "add",
        }
    }

    /// Pages reachable from this one through its navigation controls.
    pub fn links(self) -> &'static [Page] {
        match self {
            Page::Welcome => &[Page::Search],
            Page::Search => &[Page::Welcome, Page::Statistics, Page::Add],
            Page::Detail | Page::Statistics | Page::Add => &[Page::Search],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Welcome => "Beranda",
            Page::Search => "Pencarian",
            Page::Detail => "Detail Alumni",
            Page::Statistics => "Statistik",
            Page::Add => "Tambah Data",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown page '{}'", s))
    }
}

/// What a handler asks the outer loop to do after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    GoTo(Page),
}

/// The six search filters. An empty value is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub name: String,
    #[serde(deserialize_with = "deserialize_optional_program")]
    pub program: Option<Program>,
    pub student_id: String,
    pub job_title: String,
    pub company: String,
    pub salary: String,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        *self == Filters::default()
    }
}

/// Everything one user session owns.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub records: RecordSet,
    pub selected: Option<AlumniRecord>,
    pub page: Page,
    pub filters: Filters,
    /// Add-form input kept across a rejected submission.
    pub draft: AddForm,
    notices: Vec<Notice>,
}

impl SessionState {
    pub fn new(records: RecordSet) -> Self {
        SessionState {
            records,
            ..Self::default()
        }
    }

    /// Start a session from a loader result, queueing its notice.
    pub fn from_outcome(outcome: &LoadOutcome) -> Self {
        let mut state = SessionState::new(outcome.records.clone());
        state.notices.extend(outcome.notice.clone());
        state
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Notices queued since the last render, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn apply(&mut self, transition: Transition) {
        if let Transition::GoTo(page) = transition {
            debug!("page {} -> {}", self.page, page);
            self.page = page;
        }
    }
}
