use crate::record::Section;
use crate::router::Action;
use crate::state::{Page, SessionState, Transition};
use serde::Serialize;

pub const NOTHING_SELECTED: &str =
    "Tidak ada alumni yang dipilih. Silakan kembali ke halaman pencarian.";

#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub name: Option<String>,
    pub sections: Vec<Section>,
    pub warning: Option<&'static str>,
}

pub fn view(state: &SessionState) -> DetailView {
    match &state.selected {
        Some(record) => DetailView {
            name: Some(record.name.clone()),
            sections: record.sections().into(),
            warning: None,
        },
        None => DetailView {
            name: None,
            sections: Vec::new(),
            warning: Some(NOTHING_SELECTED),
        },
    }
}

pub fn handle(_state: &mut SessionState, action: Action) -> Transition {
    match action {
        Action::Navigate(target) => super::navigate(Page::Detail, target),
        _ => Transition::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::sample_records;

    #[test]
    fn groups_fields_into_three_sections() {
        let mut state = SessionState::new(sample_records());
        state.selected = state.records.iter().next().cloned();
        let view = view(&state);
        assert_eq!(view.name.as_deref(), Some("Sari Gita Fitri"));
        let titles: Vec<_> = view.sections.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            ["Informasi Alumni", "Riwayat Pendidikan", "Informasi Karir"]
        );
        let career = &view.sections[2];
        assert!(career.fields.iter().any(|f| f.value == "Rp8.000.000,00"));
    }

    #[test]
    fn warns_without_selection_and_offers_way_back() {
        let mut state = SessionState::new(sample_records());
        state.page = Page::Detail;
        assert_eq!(view(&state).warning, Some(NOTHING_SELECTED));
        assert_eq!(
            handle(&mut state, Action::Navigate(Page::Search)),
            Transition::GoTo(Page::Search)
        );
    }
}
