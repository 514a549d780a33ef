//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. The transition function
//! (`update`) and the rendering layer (`view`) both program against them.
//!
//! Screen variants carry only per-screen transient state (cursor, mode,
//! setup progress). Shared data (the settings record and the viewport)
//! lives in [`App`].

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use crate::config::{AiModel, Config};

use super::input::TextInput;

/// Longest API key the input accepts.
pub const API_KEY_MAX_LEN: usize = 100;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop feeds the navigation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key press.
    Key(KeyEvent),
    /// The terminal changed size.
    Resize { width: u16, height: u16 },
}

/// Terminal dimensions, read only by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
///
/// Owns the settings record and the current screen. The effects layer
/// reads this to know what to render.
#[derive(Debug)]
pub struct App {
    /// Current screen. Carries per-screen navigation state.
    pub screen: Screen,

    /// Settings shared by every screen. Mutated only through
    /// [`Effect::SaveConfig`].
    pub config: Config,

    /// Last known terminal size.
    pub viewport: Viewport,

    /// Message from the last failed save, cleared by the next good one.
    pub save_error: Option<String>,

    /// Where settings are persisted, shown on the developer screen.
    pub config_path: Option<PathBuf>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// ROUTES
// ============================================================================

/// Names a screen kind. Transitions request a route; the controller
/// builds a fresh screen for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Settings,
    Developer,
    LocalModelSetup,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::Settings,
        Route::Developer,
        Route::LocalModelSetup,
    ];

    /// Where Esc leads. Home is the root.
    pub fn parent(self) -> Option<Route> {
        match self {
            Route::Home => None,
            Route::Settings => Some(Route::Home),
            Route::Developer | Route::LocalModelSetup => Some(Route::Settings),
        }
    }
}

// ============================================================================
// MENU ENTRIES
// ============================================================================

/// Home menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeItem {
    StartLesson,
    SandboxMode,
    Challenges,
    Settings,
    Exit,
}

impl HomeItem {
    pub const ALL: [HomeItem; 5] = [
        HomeItem::StartLesson,
        HomeItem::SandboxMode,
        HomeItem::Challenges,
        HomeItem::Settings,
        HomeItem::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeItem::StartLesson => "Start Lesson",
            HomeItem::SandboxMode => "Sandbox Mode",
            HomeItem::Challenges => "Challenges",
            HomeItem::Settings => "Settings",
            HomeItem::Exit => "Exit",
        }
    }
}

/// Settings menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    AiModel,
    ModelConfiguration,
    DeveloperOptions,
    BackToMainMenu,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 4] = [
        SettingsItem::AiModel,
        SettingsItem::ModelConfiguration,
        SettingsItem::DeveloperOptions,
        SettingsItem::BackToMainMenu,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsItem::AiModel => "AI Model",
            SettingsItem::ModelConfiguration => "Model Configuration",
            SettingsItem::DeveloperOptions => "Developer Options",
            SettingsItem::BackToMainMenu => "Back to Main Menu",
        }
    }
}

/// Developer menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeveloperItem {
    DebugMode,
    LogOutput,
    ExperimentalFeatures,
    PerformanceMetrics,
    NetworkDiagnostics,
    BackToSettings,
}

impl DeveloperItem {
    pub const ALL: [DeveloperItem; 6] = [
        DeveloperItem::DebugMode,
        DeveloperItem::LogOutput,
        DeveloperItem::ExperimentalFeatures,
        DeveloperItem::PerformanceMetrics,
        DeveloperItem::NetworkDiagnostics,
        DeveloperItem::BackToSettings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeveloperItem::DebugMode => "Debug Mode",
            DeveloperItem::LogOutput => "Log Output",
            DeveloperItem::ExperimentalFeatures => "Experimental Features",
            DeveloperItem::PerformanceMetrics => "Performance Metrics",
            DeveloperItem::NetworkDiagnostics => "Network Diagnostics",
            DeveloperItem::BackToSettings => "Back to Settings",
        }
    }

    /// Reserved entries: listed, never active.
    pub fn is_available(self) -> bool {
        !matches!(
            self,
            DeveloperItem::PerformanceMetrics | DeveloperItem::NetworkDiagnostics
        )
    }

    /// Current value of the flag this entry toggles, if it toggles one.
    pub fn flag(self, config: &Config) -> Option<bool> {
        match self {
            DeveloperItem::DebugMode => Some(config.debug),
            DeveloperItem::LogOutput => Some(config.logs),
            DeveloperItem::ExperimentalFeatures => Some(config.experimental),
            _ => None,
        }
    }
}

/// Local model setup menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupItem {
    DownloadModel,
    ConfigureModelPath,
    TestModel,
    BackToSettings,
}

impl SetupItem {
    pub const ALL: [SetupItem; 4] = [
        SetupItem::DownloadModel,
        SetupItem::ConfigureModelPath,
        SetupItem::TestModel,
        SetupItem::BackToSettings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SetupItem::DownloadModel => "1. Download Model",
            SetupItem::ConfigureModelPath => "2. Configure Model Path",
            SetupItem::TestModel => "3. Test Model",
            SetupItem::BackToSettings => "Back to Settings",
        }
    }

    /// The setup step this entry performs. Back has none.
    pub fn step(self) -> Option<SetupStep> {
        match self {
            SetupItem::DownloadModel => Some(SetupStep::Download),
            SetupItem::ConfigureModelPath => Some(SetupStep::ConfigurePath),
            SetupItem::TestModel => Some(SetupStep::Test),
            SetupItem::BackToSettings => None,
        }
    }
}

/// Local model setup progress. Ordered: later steps compare greater.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetupStep {
    #[default]
    Download = 1,
    ConfigurePath = 2,
    Test = 3,
}

impl SetupStep {
    /// 1-based step number.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Fraction of setup completed, 0.0 before the first step.
    pub fn progress(self) -> f64 {
        f64::from(self.number() - 1) / 3.0
    }
}

// ============================================================================
// MODES
// ============================================================================

/// Sub-mode of a screen. One enum, so at most one modal is ever open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// List navigation.
    #[default]
    Browse,
    /// Help overlay; only `?` has an effect.
    Help,
    /// Text capture; owns the keyboard.
    Input(TextInput),
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
///
/// Each variant is a state in the navigation state machine. Cursors are
/// indices into the variant's `*Item::ALL` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Main menu.
    Home { cursor: usize, mode: Mode },

    /// Model choice, API key, entry to developer options.
    Settings {
        cursor: usize,
        mode: Mode,
        /// Read from the settings at construction, kept in step on toggle.
        model_choice: AiModel,
    },

    /// Debug/log/experimental toggles.
    Developer { cursor: usize, mode: Mode },

    /// Three-step local model setup.
    LocalModelSetup {
        cursor: usize,
        mode: Mode,
        step: SetupStep,
        error: Option<String>,
        /// Last submitted path. Shown, not persisted.
        model_path: Option<String>,
    },
}

/// Default screen is Home (used as placeholder during transitions).
impl Default for Screen {
    fn default() -> Self {
        Screen::home()
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic list-navigation action, decoupled from raw key events.
///
/// Only meaningful in [`Mode::Browse`] and [`Mode::Help`]; text capture
/// reads raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Enter / Space on the highlighted entry.
    Activate,
    ToggleHelp,
    /// Esc: go to the parent screen.
    Back,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// The update function returns this. The navigation controller inspects
/// it to decide which screen is active and which side effects to run.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Keep rendering this screen (possibly with new cursor or mode).
    Screen(Screen),
    /// Replace the screen with a fresh instance of `Route`.
    Navigate(Route),
    /// Stay on `screen` and execute `effect` before the event completes.
    Effect { screen: Screen, effect: Effect },
    /// Quit the application.
    Quit,
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Install this settings record and persist it.
    SaveConfig(Config),
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Start on the Home screen with loaded settings.
    pub fn new(config: Config) -> Self {
        App {
            screen: Screen::home(),
            config,
            viewport: Viewport::default(),
            save_error: None,
            config_path: None,
            should_quit: false,
        }
    }
}

impl Screen {
    pub fn home() -> Self {
        Screen::Home {
            cursor: 0,
            mode: Mode::Browse,
        }
    }

    /// Settings, with the model choice read from `config`.
    pub fn settings(config: &Config) -> Self {
        Screen::Settings {
            cursor: 0,
            mode: Mode::Browse,
            model_choice: config.ai_model,
        }
    }

    pub fn developer() -> Self {
        Screen::Developer {
            cursor: 0,
            mode: Mode::Browse,
        }
    }

    /// Local model setup at step 1.
    pub fn local_model_setup() -> Self {
        Screen::LocalModelSetup {
            cursor: 0,
            mode: Mode::Browse,
            step: SetupStep::Download,
            error: None,
            model_path: None,
        }
    }

    /// Fresh instance for a route, cursor at the top.
    pub fn enter(route: Route, config: &Config) -> Self {
        match route {
            Route::Home => Screen::home(),
            Route::Settings => Screen::settings(config),
            Route::Developer => Screen::developer(),
            Route::LocalModelSetup => Screen::local_model_setup(),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Screen::Home { .. } => Route::Home,
            Screen::Settings { .. } => Route::Settings,
            Screen::Developer { .. } => Route::Developer,
            Screen::LocalModelSetup { .. } => Route::LocalModelSetup,
        }
    }

    /// Number of menu entries.
    pub fn len(&self) -> usize {
        match self {
            Screen::Home { .. } => HomeItem::ALL.len(),
            Screen::Settings { .. } => SettingsItem::ALL.len(),
            Screen::Developer { .. } => DeveloperItem::ALL.len(),
            Screen::LocalModelSetup { .. } => SetupItem::ALL.len(),
        }
    }

    pub fn cursor(&self) -> usize {
        match self {
            Screen::Home { cursor, .. }
            | Screen::Settings { cursor, .. }
            | Screen::Developer { cursor, .. }
            | Screen::LocalModelSetup { cursor, .. } => *cursor,
        }
    }

    pub fn cursor_mut(&mut self) -> &mut usize {
        match self {
            Screen::Home { cursor, .. }
            | Screen::Settings { cursor, .. }
            | Screen::Developer { cursor, .. }
            | Screen::LocalModelSetup { cursor, .. } => cursor,
        }
    }

    pub fn mode(&self) -> &Mode {
        match self {
            Screen::Home { mode, .. }
            | Screen::Settings { mode, .. }
            | Screen::Developer { mode, .. }
            | Screen::LocalModelSetup { mode, .. } => mode,
        }
    }

    pub fn mode_mut(&mut self) -> &mut Mode {
        match self {
            Screen::Home { mode, .. }
            | Screen::Settings { mode, .. }
            | Screen::Developer { mode, .. }
            | Screen::LocalModelSetup { mode, .. } => mode,
        }
    }

    /// Labels in display order.
    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            Screen::Home { .. } => HomeItem::ALL.iter().map(|i| i.label()).collect(),
            Screen::Settings { .. } => SettingsItem::ALL.iter().map(|i| i.label()).collect(),
            Screen::Developer { .. } => DeveloperItem::ALL.iter().map(|i| i.label()).collect(),
            Screen::LocalModelSetup { .. } => SetupItem::ALL.iter().map(|i| i.label()).collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_starts_on_home() {
        let app = App::new(Config::default());
        assert_eq!(app.screen, Screen::home());
        assert!(!app.should_quit);
        assert!(app.save_error.is_none());
    }

    #[test]
    fn screen_default_is_home() {
        assert_eq!(Screen::default(), Screen::home());
    }

    #[test]
    fn settings_reads_model_choice_from_config() {
        let config = Config {
            ai_model: AiModel::Gpt,
            ..Config::default()
        };
        match Screen::settings(&config) {
            Screen::Settings { model_choice, .. } => assert_eq!(model_choice, AiModel::Gpt),
            other => panic!("Expected Settings, got {:?}", other),
        }
    }

    #[test]
    fn enter_builds_matching_route() {
        let config = Config::default();
        for route in Route::ALL {
            let screen = Screen::enter(route, &config);
            assert_eq!(screen.route(), route);
            assert_eq!(screen.cursor(), 0);
            assert_eq!(screen.mode(), &Mode::Browse);
        }
    }

    #[test]
    fn every_route_but_home_has_a_parent() {
        assert_eq!(Route::Home.parent(), None);
        assert_eq!(Route::Settings.parent(), Some(Route::Home));
        assert_eq!(Route::Developer.parent(), Some(Route::Settings));
        assert_eq!(Route::LocalModelSetup.parent(), Some(Route::Settings));
    }

    #[test]
    fn labels_match_entry_counts() {
        let config = Config::default();
        for route in Route::ALL {
            let screen = Screen::enter(route, &config);
            assert_eq!(screen.labels().len(), screen.len());
        }
    }

    #[test]
    fn setup_step_ordering_and_progress() {
        assert!(SetupStep::Download < SetupStep::ConfigurePath);
        assert!(SetupStep::ConfigurePath < SetupStep::Test);
        assert_eq!(SetupStep::Test.number(), 3);
        assert_eq!(SetupStep::Download.progress(), 0.0);
    }

    #[test]
    fn only_metrics_and_diagnostics_are_unavailable() {
        let unavailable: Vec<_> = DeveloperItem::ALL
            .into_iter()
            .filter(|i| !i.is_available())
            .collect();
        assert_eq!(
            unavailable,
            vec![
                DeveloperItem::PerformanceMetrics,
                DeveloperItem::NetworkDiagnostics
            ]
        );
    }
}
