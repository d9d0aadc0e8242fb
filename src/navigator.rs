// File: src/navigator.rs
//! The interactive selection funnel.
//!
//! Navigation is an immutable stack of screens plus the pure [`transition`]
//! function. [`NavigationSession`] owns the data shown on each screen and
//! feeds user decisions through `transition` one at a time.

use std::fmt;

use tracing::{debug, info};

use crate::core::taxonomy::Category;
use crate::core::types::{CategoryGrid, NamingOption, Selection, TranslationCandidate};
use crate::errors::{NamingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The short recommendation list.
    Initial,
    /// The list of categories in the full grid.
    CategoryMenu,
    /// Every option of one category.
    CategoryOptions(Category),
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Initial => f.write_str("initial"),
            Screen::CategoryMenu => f.write_str("category menu"),
            Screen::CategoryOptions(category) => write!(f, "category options ({})", category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Select(NamingOption),
    More,
    OpenCategory(Category),
    Back,
    Dismiss,
}

impl NavEvent {
    fn name(&self) -> String {
        match self {
            NavEvent::Select(option) => format!("select {}", option.result),
            NavEvent::More => "more".to_string(),
            NavEvent::OpenCategory(category) => format!("open {}", category),
            NavEvent::Back => "back".to_string(),
            NavEvent::Dismiss => "dismiss".to_string(),
        }
    }
}

/// Screens visited so far; the last one is current. Never empty, and the
/// bottom is always [`Screen::Initial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavStack {
    screens: Vec<Screen>,
}

impl NavStack {
    pub fn root() -> Self {
        Self {
            screens: vec![Screen::Initial],
        }
    }

    pub fn current(&self) -> Screen {
        self.screens.last().copied().unwrap_or(Screen::Initial)
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn pushed(&self, screen: Screen) -> Self {
        let mut screens = self.screens.clone();
        screens.push(screen);
        Self { screens }
    }

    fn popped(&self) -> Option<Self> {
        if self.screens.len() <= 1 {
            return None;
        }
        let mut screens = self.screens.clone();
        screens.pop();
        Some(Self { screens })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Browsing(NavStack),
    Selected(NamingOption),
    Cancelled,
}

impl NavState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NavState::Browsing(_))
    }
}

/// Computes the state that follows `event`. Never mutates its input.
pub fn transition(state: &NavState, event: NavEvent) -> Result<NavState> {
    let stack = match state {
        NavState::Browsing(stack) => stack,
        NavState::Selected(_) | NavState::Cancelled => return Err(NamingError::SessionClosed),
    };
    let screen = stack.current();

    let next = match (screen, event) {
        (_, NavEvent::Dismiss) => NavState::Cancelled,
        (Screen::Initial, NavEvent::Select(option))
        | (Screen::CategoryOptions(_), NavEvent::Select(option))
            if !option.is_valid() =>
        {
            return Err(NamingError::InvalidOption {
                name: option.result,
            })
        }
        (Screen::Initial, NavEvent::Select(option))
        | (Screen::CategoryOptions(_), NavEvent::Select(option)) => NavState::Selected(option),
        (Screen::Initial, NavEvent::More) => NavState::Browsing(stack.pushed(Screen::CategoryMenu)),
        (Screen::CategoryMenu, NavEvent::OpenCategory(category)) => {
            NavState::Browsing(stack.pushed(Screen::CategoryOptions(category)))
        }
        (Screen::CategoryMenu, NavEvent::Back) | (Screen::CategoryOptions(_), NavEvent::Back) => {
            match stack.popped() {
                Some(parent) => NavState::Browsing(parent),
                None => return Err(invalid(screen, &NavEvent::Back)),
            }
        }
        (screen, event) => return Err(invalid(screen, &event)),
    };
    Ok(next)
}

fn invalid(screen: Screen, event: &NavEvent) -> NamingError {
    NamingError::InvalidTransition {
        screen: screen.to_string(),
        event: event.name(),
    }
}

/// One run of the selection funnel. Dropped once it is closed; nothing in it
/// is persisted.
#[derive(Debug, Clone)]
pub struct NavigationSession {
    original_input: String,
    translations: Vec<TranslationCandidate>,
    recommendations: Vec<NamingOption>,
    grid: CategoryGrid,
    state: NavState,
}

impl NavigationSession {
    pub fn new(
        original_input: impl Into<String>,
        translations: Vec<TranslationCandidate>,
        recommendations: Vec<NamingOption>,
        grid: CategoryGrid,
    ) -> Self {
        Self {
            original_input: original_input.into(),
            translations,
            recommendations,
            grid,
            state: NavState::Browsing(NavStack::root()),
        }
    }

    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    pub fn translations(&self) -> &[TranslationCandidate] {
        &self.translations
    }

    pub fn recommendations(&self) -> &[NamingOption] {
        &self.recommendations
    }

    pub fn grid(&self) -> &CategoryGrid {
        &self.grid
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_terminal()
    }

    /// `None` once the session is closed.
    pub fn current_screen(&self) -> Option<Screen> {
        match &self.state {
            NavState::Browsing(stack) => Some(stack.current()),
            _ => None,
        }
    }

    /// Options that can be picked by index on the current screen.
    pub fn visible_options(&self) -> &[NamingOption] {
        match self.current_screen() {
            Some(Screen::Initial) => &self.recommendations,
            Some(Screen::CategoryOptions(category)) => self.grid.options(category),
            _ => &[],
        }
    }

    /// Categories listed by the category menu.
    pub fn categories(&self) -> Vec<Category> {
        self.grid.category_names()
    }

    /// Picks the `index`-th visible option and closes the session.
    pub fn select(&mut self, index: usize) -> Result<Selection> {
        let option = self.visible_options().get(index).cloned().ok_or_else(|| {
            let screen = self.current_screen();
            match screen {
                Some(screen) => NamingError::InvalidTransition {
                    screen: screen.to_string(),
                    event: format!("select #{}", index + 1),
                },
                None => NamingError::SessionClosed,
            }
        })?;
        self.apply(NavEvent::Select(option.clone()))?;
        info!("Selected '{}' ({} / {})", option.result, option.style, option.var_type);
        Ok(Selection {
            name: option.result.clone(),
            option,
        })
    }

    /// Opens the category menu of the full grid.
    pub fn more(&mut self) -> Result<()> {
        self.apply(NavEvent::More)
    }

    /// Opens the `index`-th category of the menu.
    pub fn open_category(&mut self, index: usize) -> Result<()> {
        let category = self.categories().get(index).copied();
        match category {
            Some(category) => self.apply(NavEvent::OpenCategory(category)),
            None => Err(NamingError::InvalidTransition {
                screen: self
                    .current_screen()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "closed".to_string()),
                event: format!("open category #{}", index + 1),
            }),
        }
    }

    pub fn back(&mut self) -> Result<()> {
        self.apply(NavEvent::Back)
    }

    /// Abandons the selection. Nothing is persisted.
    pub fn dismiss(&mut self) -> Result<()> {
        self.apply(NavEvent::Dismiss)?;
        info!("Selection for '{}' dismissed", self.original_input);
        Ok(())
    }

    fn apply(&mut self, event: NavEvent) -> Result<()> {
        let next = transition(&self.state, event)?;
        debug!("Navigation {:?} -> {:?}", self.current_screen(), next);
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::CandidateGenerator;
    use crate::core::taxonomy::VariableType;

    fn sample_option() -> NamingOption {
        let generator = CandidateGenerator::default();
        generator
            .specific("user name", crate::core::style::NamingStyle::Camel, VariableType::Normal)
            .unwrap()
    }

    fn browsing(screens: &[Screen]) -> NavState {
        let mut stack = NavStack::root();
        for &screen in screens {
            stack = stack.pushed(screen);
        }
        NavState::Browsing(stack)
    }

    fn session() -> NavigationSession {
        let generator = CandidateGenerator::default();
        let grid = generator.generate_all_options("user name").unwrap();
        NavigationSession::new(
            "user name",
            vec![TranslationCandidate::new("user name", 1.0, "test")],
            vec![sample_option()],
            grid,
        )
    }

    #[test]
    fn test_initial_select_is_terminal() {
        let option = sample_option();
        let next = transition(&browsing(&[]), NavEvent::Select(option.clone())).unwrap();
        assert_eq!(next, NavState::Selected(option));
    }

    #[test]
    fn test_drill_down_and_back() {
        let menu = transition(&browsing(&[]), NavEvent::More).unwrap();
        assert_eq!(menu, browsing(&[Screen::CategoryMenu]));

        let options = transition(&menu, NavEvent::OpenCategory(Category::Scope)).unwrap();
        assert_eq!(options, browsing(&[Screen::CategoryMenu, Screen::CategoryOptions(Category::Scope)]));

        let back = transition(&options, NavEvent::Back).unwrap();
        assert_eq!(back, menu);
        assert_eq!(transition(&back, NavEvent::Back).unwrap(), browsing(&[]));
    }

    #[test]
    fn test_transition_does_not_mutate_input() {
        let state = browsing(&[]);
        let _ = transition(&state, NavEvent::More).unwrap();
        assert_eq!(state, browsing(&[]));
    }

    #[test]
    fn test_dismiss_from_any_screen() {
        for state in [
            browsing(&[]),
            browsing(&[Screen::CategoryMenu]),
            browsing(&[Screen::CategoryMenu, Screen::CategoryOptions(Category::Basic)]),
        ] {
            assert_eq!(transition(&state, NavEvent::Dismiss).unwrap(), NavState::Cancelled);
        }
    }

    #[test]
    fn test_rejected_events() {
        assert!(matches!(
            transition(&browsing(&[]), NavEvent::Back),
            Err(NamingError::InvalidTransition { .. })
        ));
        assert!(matches!(
            transition(&browsing(&[]), NavEvent::OpenCategory(Category::Scope)),
            Err(NamingError::InvalidTransition { .. })
        ));
        assert!(matches!(
            transition(&browsing(&[Screen::CategoryMenu]), NavEvent::Select(sample_option())),
            Err(NamingError::InvalidTransition { .. })
        ));
        assert!(matches!(
            transition(&NavState::Cancelled, NavEvent::More),
            Err(NamingError::SessionClosed)
        ));
    }

    #[test]
    fn test_session_select_from_category() {
        let mut session = session();
        session.more().unwrap();
        assert!(session.visible_options().is_empty());
        assert_eq!(session.categories()[1], Category::Scope);

        session.open_category(1).unwrap();
        assert_eq!(session.current_screen(), Some(Screen::CategoryOptions(Category::Scope)));
        let selection = session.select(0).unwrap();
        assert_eq!(selection.name, "g_userName");
        assert!(session.is_closed());
        assert!(matches!(session.back(), Err(NamingError::SessionClosed)));
    }

    #[test]
    fn test_session_out_of_range_select() {
        let mut session = session();
        assert!(matches!(session.select(9), Err(NamingError::InvalidTransition { .. })));
        assert!(!session.is_closed());
    }

    #[test]
    fn test_invalid_option_cannot_be_selected() {
        let option = NamingOption {
            score: None,
            ..sample_option()
        };
        assert!(matches!(
            transition(&browsing(&[]), NavEvent::Select(option)),
            Err(NamingError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_session_rejects_greyed_out_grid_entry() {
        let generator = CandidateGenerator::default();
        // nothing built from a non-Latin phrase passes validation
        let grid = generator.generate_all_options("用户").unwrap();
        let mut session = NavigationSession::new("用户", Vec::new(), Vec::new(), grid);
        session.more().unwrap();
        session.open_category(0).unwrap();
        assert!(session.visible_options().iter().all(|o| !o.is_valid()));

        match session.select(0) {
            Err(NamingError::InvalidOption { name }) => assert!(!name.is_empty()),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!session.is_closed());
    }

    #[test]
    fn test_session_dismiss() {
        let mut session = session();
        session.more().unwrap();
        session.dismiss().unwrap();
        assert_eq!(session.state(), &NavState::Cancelled);
        assert!(session.visible_options().is_empty());
    }
}
