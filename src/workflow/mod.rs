pub mod quiz_session;
pub mod view_state;

pub use quiz_session::QuizSession;
pub use view_state::{
    derive_view, CongratsOverlay, Emphasis, NavButtons, Overlays, Panel, PanelKind, QuestionView,
    ViewState,
};
