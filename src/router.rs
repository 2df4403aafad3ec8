//! Page routing.
//!
//! One interaction is one call to [`dispatch`] followed by one call to
//! [`render`]. `dispatch` hands the action to the handler of the current page
//! and applies the transition it returns; `render` builds the view of
//! whichever page is current afterwards and drains the queued notices.

use crate::notice::Notice;
use crate::pages::add::{self, AddForm, AddView};
use crate::pages::detail::{self, DetailView};
use crate::pages::search::{self, SearchView};
use crate::pages::statistics::{self, Statistics};
use crate::pages::welcome::{self, WelcomeView};
use crate::state::{Filters, Page, SessionState, Transition};

/// Every user interaction the pages understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A navigation button.
    Navigate(Page),
    SetFilters(Filters),
    ClearFilters,
    /// Pick a search result by name.
    Select(String),
    Submit(AddForm),
}

#[derive(Debug, Clone)]
pub enum View {
    Welcome(WelcomeView),
    Search(SearchView),
    Detail(DetailView),
    Statistics(Statistics),
    Add(AddView),
}

/// Everything a front-end needs to draw one page.
#[derive(Debug, Clone)]
pub struct Screen {
    pub page: Page,
    pub links: &'static [Page],
    pub notices: Vec<Notice>,
    pub view: View,
}

/// Route `action` to the current page's handler and apply its transition.
pub fn dispatch(state: &mut SessionState, action: Action) -> Transition {
    let transition = match state.page {
        Page::Welcome => welcome::handle(state, action),
        Page::Search => search::handle(state, action),
        Page::Detail => detail::handle(state, action),
        Page::Statistics => statistics::handle(state, action),
        Page::Add => add::handle(state, action),
    };
    state.apply(transition);
    transition
}

/// Build the current page.
pub fn render(state: &mut SessionState) -> Screen {
    let view = match state.page {
        Page::Welcome => View::Welcome(welcome::view()),
        Page::Search => View::Search(search::view(state)),
        Page::Detail => View::Detail(detail::view(state)),
        Page::Statistics => View::Statistics(statistics::view(state)),
        Page::Add => View::Add(add::view(state)),
    };

    Screen {
        page: state.page,
        links: state.page.links(),
        notices: state.take_notices(),
        view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::sample_records;

    #[test]
    fn unrelated_actions_leave_page_unchanged() {
        let mut state = SessionState::new(sample_records());
        assert_eq!(dispatch(&mut state, Action::ClearFilters), Transition::Stay);
        assert_eq!(
            dispatch(&mut state, Action::Navigate(Page::Statistics)),
            Transition::Stay
        );
        assert_eq!(state.page, Page::Welcome);
    }

    #[test]
    fn render_matches_current_page() {
        let mut state = SessionState::new(sample_records());
        for (target, expected) in [
            (Page::Search, Page::Search),
            (Page::Statistics, Page::Statistics),
            (Page::Search, Page::Search),
            (Page::Add, Page::Add),
        ] {
            dispatch(&mut state, Action::Navigate(target));
            let screen = render(&mut state);
            assert_eq!(screen.page, expected);
            let matches = matches!(
                (screen.page, &screen.view),
                (Page::Search, View::Search(_))
                    | (Page::Statistics, View::Statistics(_))
                    | (Page::Add, View::Add(_))
            );
            assert!(matches);
        }
    }
}
