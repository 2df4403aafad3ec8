use crate::router::Action;
use crate::state::{Page, SessionState, Transition};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FeatureCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WelcomeView {
    pub title: &'static str,
    pub tagline: &'static str,
    pub cards: [FeatureCard; 3],
    pub start_label: &'static str,
}

pub fn view() -> WelcomeView {
    WelcomeView {
        title: "DATABASE ALUMNI S1 DEPARTEMEN MATEMATIKA FMIPA UI",
        tagline: "Sistem informasi terintegrasi untuk mengelola data alumni S1 Matematika, Statistika, dan Ilmu Aktuaria FMIPA UI",
        cards: [
            FeatureCard {
                icon: "📊",
                title: "Data Alumni",
                text: "Pencarian dan pengelolaan data lengkap alumni",
            },
            FeatureCard {
                icon: "🏢",
                title: "Perusahaan",
                text: "Analisis distribusi alumni di berbagai perusahaan",
            },
            FeatureCard {
                icon: "📈",
                title: "Statistik",
                text: "Laporan dan analisis data karir alumni",
            },
        ],
        start_label: "Mulai Eksplorasi Data",
    }
}

pub fn handle(_state: &mut SessionState, action: Action) -> Transition {
    match action {
        Action::Navigate(target) => super::navigate(Page::Welcome, target),
        _ => Transition::Stay,
    }
}
