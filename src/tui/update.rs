//! Pure state transitions: (Screen, key, &Config) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each screen defines what activating its entries means. Unhandled
//! keys return the current screen unchanged (no-op).
//!
//! [`handle_event`] is the navigation controller: it feeds events to
//! `update` and applies the resulting transition to the [`App`].

use crossterm::event::KeyEvent;

use crate::config::{AiModel, Config, ConfigSink};

use super::input::{InputEvent, TextInput};
use super::keymap::map_key;
use super::state::{
    API_KEY_MAX_LEN, Action, App, AppEvent, DeveloperItem, Effect, HomeItem, Mode, Route, Screen,
    SettingsItem, SetupItem, SetupStep, Transition, Viewport,
};

/// Shortest API key accepted.
pub const API_KEY_MIN_LEN: usize = 32;

/// Required API key prefix.
pub const API_KEY_PREFIX: &str = "sk-";

/// Shown when Test Model is chosen before the path is configured.
pub const STEPS_INCOMPLETE: &str = "Please complete previous steps first";

/// Why an API key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiKeyError {
    #[error("API key must be at least 32 characters")]
    TooShort,
    #[error("Invalid API key format")]
    BadPrefix,
}

/// Check an API key's shape. Says nothing about whether it works.
pub fn validate_api_key(key: &str) -> Result<(), ApiKeyError> {
    if key.chars().count() < API_KEY_MIN_LEN {
        return Err(ApiKeyError::TooShort);
    }
    if !key.starts_with(API_KEY_PREFIX) {
        return Err(ApiKeyError::BadPrefix);
    }
    Ok(())
}

// ============================================================================
// NAVIGATION CONTROLLER
// ============================================================================

/// Process one event to completion.
///
/// Settings changes are persisted through `sink` before this returns.
pub fn handle_event(app: &mut App, event: AppEvent, sink: &mut impl ConfigSink) {
    match event {
        AppEvent::Resize { width, height } => {
            app.viewport = Viewport { width, height };
        }
        AppEvent::Key(key) => {
            let screen = std::mem::take(&mut app.screen);
            let transition = update(screen, key, &app.config);
            apply(app, transition, sink);
        }
    }
}

fn apply(app: &mut App, transition: Transition, sink: &mut impl ConfigSink) {
    match transition {
        Transition::Screen(screen) => app.screen = screen,
        Transition::Navigate(route) => {
            tracing::debug!(?route, "navigate");
            app.screen = Screen::enter(route, &app.config);
        }
        Transition::Effect { screen, effect } => {
            app.screen = screen;
            run_effect(app, effect, sink);
        }
        Transition::Quit => app.should_quit = true,
    }
}

fn run_effect(app: &mut App, effect: Effect, sink: &mut impl ConfigSink) {
    match effect {
        Effect::SaveConfig(config) => {
            app.config = config;
            match sink.save(&app.config) {
                Ok(()) => {
                    tracing::debug!("settings saved");
                    app.save_error = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "settings not saved, keeping in-memory values");
                    app.save_error = Some(e.to_string());
                }
            }
        }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Pure state transition function.
///
/// Routes the key by mode: an open text input gets the raw key, the help
/// overlay only reacts to `?`, and browsing maps the key to an [`Action`].
pub fn update(mut screen: Screen, key: KeyEvent, config: &Config) -> Transition {
    let input_event = match screen.mode_mut() {
        Mode::Input(input) => Some(input.handle_key(key)),
        Mode::Browse | Mode::Help => None,
    };

    if let Some(event) = input_event {
        return match event {
            InputEvent::Submit => submit_input(screen, config),
            InputEvent::Cancel => {
                *screen.mode_mut() = Mode::Browse;
                Transition::Screen(screen)
            }
            InputEvent::Edited | InputEvent::Ignored => Transition::Screen(screen),
        };
    }

    let Some(action) = map_key(key) else {
        return Transition::Screen(screen);
    };

    if *screen.mode() == Mode::Help {
        return update_help(screen, action);
    }

    update_browse(screen, action, config)
}

/// Help overlay: `?` closes it, everything else is swallowed.
fn update_help(mut screen: Screen, action: Action) -> Transition {
    if action == Action::ToggleHelp {
        *screen.mode_mut() = Mode::Browse;
    }
    Transition::Screen(screen)
}

/// Key table shared by every screen while browsing.
fn update_browse(mut screen: Screen, action: Action, config: &Config) -> Transition {
    match action {
        Action::MoveUp => {
            let cursor = screen.cursor_mut();
            *cursor = cursor.saturating_sub(1);
            Transition::Screen(screen)
        }
        Action::MoveDown => {
            let last = screen.len().saturating_sub(1);
            let cursor = screen.cursor_mut();
            *cursor = (*cursor + 1).min(last);
            Transition::Screen(screen)
        }
        Action::ToggleHelp => {
            *screen.mode_mut() = Mode::Help;
            Transition::Screen(screen)
        }
        Action::Back => match screen.route().parent() {
            Some(route) => Transition::Navigate(route),
            None => Transition::Screen(screen),
        },
        Action::Quit => Transition::Quit,
        Action::Activate => activate(screen, config),
    }
}

fn activate(screen: Screen, config: &Config) -> Transition {
    match screen {
        Screen::Home { cursor, mode } => activate_home(cursor, mode),
        Screen::Settings {
            cursor,
            mode,
            model_choice,
        } => activate_settings(cursor, mode, model_choice, config),
        Screen::Developer { cursor, mode } => activate_developer(cursor, mode, config),
        Screen::LocalModelSetup {
            cursor,
            mode,
            step,
            error,
            model_path,
        } => activate_setup(cursor, mode, step, error, model_path),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Home: Settings and Exit are wired; the learning modes are placeholders.
fn activate_home(cursor: usize, mode: Mode) -> Transition {
    let stay = Screen::Home { cursor, mode };
    let Some(item) = HomeItem::ALL.get(cursor).copied() else {
        return Transition::Screen(stay);
    };

    match item {
        HomeItem::StartLesson | HomeItem::SandboxMode | HomeItem::Challenges => {
            tracing::debug!(entry = item.label(), "placeholder entry selected");
            Transition::Screen(stay)
        }
        HomeItem::Settings => Transition::Navigate(Route::Settings),
        HomeItem::Exit => Transition::Quit,
    }
}

/// Settings: model toggle, model configuration, developer options, back.
fn activate_settings(
    cursor: usize,
    mode: Mode,
    model_choice: AiModel,
    config: &Config,
) -> Transition {
    let Some(item) = SettingsItem::ALL.get(cursor).copied() else {
        return Transition::Screen(Screen::Settings {
            cursor,
            mode,
            model_choice,
        });
    };

    match item {
        SettingsItem::AiModel => {
            let model_choice = model_choice.toggled();
            Transition::Effect {
                screen: Screen::Settings {
                    cursor,
                    mode,
                    model_choice,
                },
                effect: Effect::SaveConfig(Config {
                    ai_model: model_choice,
                    ..config.clone()
                }),
            }
        }
        SettingsItem::ModelConfiguration => match model_choice {
            AiModel::Local => Transition::Navigate(Route::LocalModelSetup),
            AiModel::Gpt => Transition::Screen(Screen::Settings {
                cursor,
                mode: Mode::Input(TextInput::secret(API_KEY_MAX_LEN)),
                model_choice,
            }),
        },
        SettingsItem::DeveloperOptions => Transition::Navigate(Route::Developer),
        SettingsItem::BackToMainMenu => Transition::Navigate(Route::Home),
    }
}

/// Developer: the first three entries flip a flag; two are reserved.
fn activate_developer(cursor: usize, mode: Mode, config: &Config) -> Transition {
    let stay = Screen::Developer { cursor, mode };
    let Some(item) = DeveloperItem::ALL.get(cursor).copied() else {
        return Transition::Screen(stay);
    };

    let mut next = config.clone();
    match item {
        DeveloperItem::DebugMode => next.debug = !next.debug,
        DeveloperItem::LogOutput => next.logs = !next.logs,
        DeveloperItem::ExperimentalFeatures => next.experimental = !next.experimental,
        DeveloperItem::PerformanceMetrics | DeveloperItem::NetworkDiagnostics => {
            return Transition::Screen(stay);
        }
        DeveloperItem::BackToSettings => return Transition::Navigate(Route::Settings),
    }

    Transition::Effect {
        screen: stay,
        effect: Effect::SaveConfig(next),
    }
}

/// LocalModelSetup: download and path steps are placeholders that only
/// set progress; Test Model is gated on step 3. Downloading again puts
/// progress back at step 2.
fn activate_setup(
    cursor: usize,
    mut mode: Mode,
    mut step: SetupStep,
    mut error: Option<String>,
    model_path: Option<String>,
) -> Transition {
    match SetupItem::ALL.get(cursor).copied() {
        Some(SetupItem::DownloadModel) => step = SetupStep::ConfigurePath,
        Some(SetupItem::ConfigureModelPath) => {
            mode = Mode::Input(TextInput::plain());
        }
        Some(SetupItem::TestModel) => {
            if step < SetupStep::Test {
                error = Some(STEPS_INCOMPLETE.to_string());
            } else {
                error = None;
            }
        }
        Some(SetupItem::BackToSettings) => return Transition::Navigate(Route::Settings),
        None => {}
    }

    Transition::Screen(Screen::LocalModelSetup {
        cursor,
        mode,
        step,
        error,
        model_path,
    })
}

// ============================================================================
// INPUT SUBMISSION
// ============================================================================

/// Enter inside a text input: validate and commit per screen.
fn submit_input(screen: Screen, config: &Config) -> Transition {
    match screen {
        Screen::Settings {
            cursor,
            mode: Mode::Input(mut input),
            model_choice,
        } => {
            let key = input.value().to_string();
            match validate_api_key(&key) {
                Err(e) => {
                    input.set_error(e.to_string());
                    Transition::Screen(Screen::Settings {
                        cursor,
                        mode: Mode::Input(input),
                        model_choice,
                    })
                }
                Ok(()) => Transition::Effect {
                    screen: Screen::Settings {
                        cursor,
                        mode: Mode::Browse,
                        model_choice,
                    },
                    effect: Effect::SaveConfig(Config {
                        api_key: key,
                        ..config.clone()
                    }),
                },
            }
        }
        Screen::LocalModelSetup {
            cursor,
            mode: Mode::Input(input),
            ..
        } => Transition::Screen(Screen::LocalModelSetup {
            cursor,
            mode: Mode::Browse,
            step: SetupStep::Test,
            error: None,
            model_path: Some(input.value().to_string()),
        }),
        mut other => {
            *other.mode_mut() = Mode::Browse;
            Transition::Screen(other)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
