//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches on the current mode first (help and input dialogs cover the
//! screen), then on the Screen variant. Widget-building functions are pure
//! (state in, widgets out); the only effect is Frame::render_widget().

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::config::{AiModel, Config};

use super::input::TextInput;
use super::state::{
    App, DeveloperItem, HomeItem, Mode, Route, Screen, SettingsItem, SetupItem, SetupStep,
    Viewport,
};
use super::theme;

/// Below this width the menu and detail panes stack vertically.
const SPLIT_MIN_WIDTH: u16 = 80;

/// Width of the setup progress bar, in cells.
const PROGRESS_BAR_WIDTH: usize = 40;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // footer
    ])
    .split(area);

    frame.render_widget(render_title(&app.screen), chunks[0]);
    frame.render_widget(render_footer(app), chunks[2]);

    let content_area = chunks[1];

    match app.screen.mode() {
        Mode::Help => render_help_dialog(app.screen.route(), frame, content_area),
        Mode::Input(input) => render_input_dialog(app.screen.route(), input, frame, content_area),
        Mode::Browse => match &app.screen {
            Screen::Home { cursor, .. } => render_home(*cursor, frame, content_area),
            Screen::Settings {
                cursor,
                model_choice,
                ..
            } => render_settings(*cursor, *model_choice, app, frame, content_area),
            Screen::Developer { cursor, .. } => render_developer(*cursor, app, frame, content_area),
            Screen::LocalModelSetup {
                cursor,
                step,
                error,
                model_path,
                ..
            } => render_setup(
                *cursor,
                *step,
                error.as_deref(),
                model_path.as_deref(),
                app.viewport,
                frame,
                content_area,
            ),
        },
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: app name and screen name.
fn render_title(screen: &Screen) -> Paragraph<'static> {
    let section = match screen.route() {
        Route::Home => "",
        Route::Settings => " · Settings",
        Route::Developer => " · Developer Options",
        Route::LocalModelSetup => " · Local Model Setup",
    };

    Paragraph::new(Line::from(vec![
        Span::styled(" Mainframe", theme::STYLE_TITLE),
        Span::styled(section, theme::STYLE_DIM),
    ]))
}

/// Footer: the last save failure if there is one, key hints otherwise.
fn render_footer(app: &App) -> Paragraph<'static> {
    if let Some(err) = &app.save_error {
        return Paragraph::new(Span::styled(
            format!(" Settings not saved: {}", err),
            theme::STYLE_ERROR,
        ));
    }
    Paragraph::new(Span::styled(
        footer_hint(&app.screen),
        theme::STYLE_HELP,
    ))
}

/// Key hints for the current screen and mode.
fn footer_hint(screen: &Screen) -> &'static str {
    match (screen.mode(), screen.route()) {
        (Mode::Input(_), _) => " enter to save • esc to cancel",
        (Mode::Help, _) => " Press ? to close help",
        (Mode::Browse, Route::Home) => {
            " ↑/↓ to move • enter to select • ? for help • q to quit"
        }
        (Mode::Browse, _) => {
            " ↑/↓ to move • enter to select • ? for help • esc to go back • q to quit"
        }
    }
}

/// Menu pane and detail pane, side by side when the terminal is wide.
fn split_panes(viewport: Viewport, area: Rect) -> (Rect, Rect) {
    let chunks = if viewport.width >= SPLIT_MIN_WIDTH {
        Layout::horizontal([Constraint::Length(44), Constraint::Min(0)]).split(area)
    } else {
        Layout::vertical([Constraint::Length(10), Constraint::Min(0)]).split(area)
    };
    (chunks[0], chunks[1])
}

fn pane(title: &'static str) -> Block<'static> {
    Block::bordered()
        .border_style(theme::STYLE_BORDER)
        .title(Span::styled(title, theme::STYLE_SECTION))
}

/// One menu row: cursor marker, then the row's spans.
fn menu_row(selected: bool, spans: Vec<Span<'static>>) -> Line<'static> {
    let (marker, style) = if selected {
        ("> ", theme::STYLE_HIGHLIGHT)
    } else {
        ("  ", theme::STYLE_MENU)
    };
    let mut row = vec![Span::styled(marker, style)];
    row.extend(spans);
    Line::from(row).style(style)
}

fn plain_rows(labels: &[&'static str], cursor: usize) -> Vec<Line<'static>> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| menu_row(i == cursor, vec![Span::raw(*label)]))
        .collect()
}

fn render_panes(
    menu_title: &'static str,
    menu: Vec<Line<'static>>,
    detail_title: &'static str,
    detail: Vec<Line<'static>>,
    viewport: Viewport,
    frame: &mut Frame,
    area: Rect,
) {
    let (menu_area, detail_area) = split_panes(viewport, area);
    frame.render_widget(Paragraph::new(menu).block(pane(menu_title)), menu_area);
    frame.render_widget(
        Paragraph::new(detail)
            .block(pane(detail_title))
            .wrap(Wrap { trim: false }),
        detail_area,
    );
}

fn bullets(items: &[&'static str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| Line::from(Span::styled(format!("• {}", item), theme::STYLE_DIM)))
        .collect()
}

fn dim(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, theme::STYLE_DIM))
}

/// A rectangle of at most `width` x `height`, centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ============================================================================
// SCREEN: HOME
// ============================================================================

fn render_home(cursor: usize, frame: &mut Frame, area: Rect) {
    let labels: Vec<_> = HomeItem::ALL.iter().map(|i| i.label()).collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("MAINFRAME", theme::STYLE_TITLE)).centered(),
        Line::from(Span::styled(
            "An immersive terminal-based learning environment",
            theme::STYLE_DIM,
        ))
        .centered(),
        Line::from(""),
    ];
    lines.extend(plain_rows(&labels, cursor));
    lines.extend([
        Line::from(""),
        dim("Welcome to Mainframe, your gateway to mastering terminal commands"),
        dim("and system administration through interactive learning."),
        Line::from(""),
    ]);
    lines.extend(bullets(&[
        "Gamified lessons with progressive difficulty",
        "Real-world scenarios in a safe environment",
        "AI-powered guidance and assistance",
    ]));

    let box_area = centered(area, 72, lines.len() as u16 + 2);
    let block = Block::bordered().border_style(theme::STYLE_BORDER);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        box_area,
    );
}

// ============================================================================
// SCREEN: SETTINGS
// ============================================================================

fn render_settings(
    cursor: usize,
    model_choice: AiModel,
    app: &App,
    frame: &mut Frame,
    area: Rect,
) {
    let labels: Vec<_> = SettingsItem::ALL.iter().map(|i| i.label()).collect();
    let menu = plain_rows(&labels, cursor);

    let (title, detail) = match SettingsItem::ALL.get(cursor) {
        Some(SettingsItem::AiModel) => ("AI Model Selection", settings_model_detail(model_choice)),
        Some(SettingsItem::ModelConfiguration) => match model_choice {
            AiModel::Local => ("Local Model Setup", settings_local_detail()),
            AiModel::Gpt => ("OpenAI Configuration", settings_gpt_detail(&app.config)),
        },
        Some(SettingsItem::DeveloperOptions) => {
            let mut lines = vec![
                dim("Advanced settings for development and debugging:"),
                Line::from(""),
            ];
            lines.extend(bullets(&[
                "Debug logging",
                "Performance monitoring",
                "Experimental features",
                "Network diagnostics",
            ]));
            lines.extend([Line::from(""), dim("Press ENTER to access developer settings")]);
            ("Developer Options", lines)
        }
        Some(SettingsItem::BackToMainMenu) | None => {
            ("Main Menu", vec![dim("Return to the main menu")])
        }
    };

    render_panes("Settings", menu, title, detail, app.viewport, frame, area);
}

fn settings_model_detail(model_choice: AiModel) -> Vec<Line<'static>> {
    let mut lines = vec![
        dim("Choose the AI model that powers your learning experience:"),
        Line::from(""),
        Line::from("• Local Model"),
        dim("  Run models directly on your machine"),
        dim("  Complete privacy and offline usage"),
        Line::from(""),
        Line::from("• GPT Model"),
        dim("  Use OpenAI's GPT models"),
        dim("  Requires internet and API key"),
        Line::from(""),
    ];
    lines.push(Line::from(vec![
        Span::raw("Current Model: "),
        Span::styled(model_choice.as_str().to_uppercase(), theme::STYLE_SUCCESS),
    ]));
    lines
}

fn settings_local_detail() -> Vec<Line<'static>> {
    vec![
        dim("Configure your local model installation:"),
        Line::from(""),
        dim("1. Download a compatible model"),
        dim("2. Set up the model path"),
        dim("3. Test the connection"),
        Line::from(""),
        dim("Press ENTER to start the setup process"),
    ]
}

fn settings_gpt_detail(config: &Config) -> Vec<Line<'static>> {
    let key_status = if config.api_key.is_empty() {
        Span::styled("NOT SET", theme::STYLE_WARNING)
    } else {
        Span::styled("CONFIGURED", theme::STYLE_SUCCESS)
    };

    let mut lines = vec![dim("Configure your OpenAI API access:"), Line::from("")];
    lines.extend(bullets(&[
        "Set up your API key",
        "Manage model preferences",
        "Test API connectivity",
    ]));
    lines.extend([
        Line::from(""),
        Line::from(vec![Span::raw("API Key: "), key_status]),
        Line::from(""),
        dim("Press ENTER to configure your API key"),
    ]);
    lines
}

// ============================================================================
// SCREEN: DEVELOPER
// ============================================================================

fn developer_description(item: DeveloperItem) -> &'static str {
    match item {
        DeveloperItem::DebugMode => {
            "Enable detailed debug information and error reporting for troubleshooting"
        }
        DeveloperItem::LogOutput => "Save detailed logs to the logs directory for system analysis",
        DeveloperItem::ExperimentalFeatures => {
            "Enable experimental features and updates (may be unstable)"
        }
        DeveloperItem::PerformanceMetrics => {
            "Monitor system performance, memory usage, and resource allocation"
        }
        DeveloperItem::NetworkDiagnostics => {
            "Test network connectivity and API endpoint responsiveness"
        }
        DeveloperItem::BackToSettings => "Return to the settings menu",
    }
}

/// Icon and status spans for one developer row.
fn developer_row(item: DeveloperItem, config: &Config) -> Vec<Span<'static>> {
    let on_style = if item == DeveloperItem::ExperimentalFeatures {
        theme::STYLE_WARNING
    } else {
        theme::STYLE_SUCCESS
    };

    match item.flag(config) {
        Some(true) => vec![
            Span::raw(format!("◉ {} ", item.label())),
            Span::styled("ON", on_style),
        ],
        Some(false) => vec![Span::raw(format!("○ {} OFF", item.label()))],
        None if !item.is_available() => vec![
            Span::raw(format!("⊘ {} ", item.label())),
            Span::styled("SOON", theme::STYLE_ERROR),
        ],
        None => vec![Span::raw(format!("← {}", item.label()))],
    }
}

fn status_indicator(enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled("[ACTIVE]", theme::STYLE_SUCCESS)
    } else {
        Span::styled("[INACTIVE]", theme::STYLE_WARNING)
    }
}

fn render_developer(cursor: usize, app: &App, frame: &mut Frame, area: Rect) {
    let config = &app.config;
    let menu: Vec<_> = DeveloperItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| menu_row(i == cursor, developer_row(*item, config)))
        .collect();

    let description = DeveloperItem::ALL
        .get(cursor)
        .map(|item| developer_description(*item))
        .unwrap_or("Toggle development features and debugging tools");

    let mut detail = vec![
        Line::from(Span::styled(description, theme::STYLE_DIM)),
        Line::from(""),
        Line::from(Span::styled("System Information", theme::STYLE_SECTION)),
    ];
    if let Some(path) = &app.config_path {
        detail.push(Line::from(Span::styled(
            format!("• Config Path: {}", path.display()),
            theme::STYLE_DIM,
        )));
    }
    detail.push(Line::from(vec![
        Span::styled("• Debug Level: ", theme::STYLE_DIM),
        if config.debug {
            Span::styled("VERBOSE", theme::STYLE_SUCCESS)
        } else {
            Span::raw("NORMAL")
        },
    ]));
    detail.extend([
        Line::from(""),
        Line::from(Span::styled("Status Dashboard", theme::STYLE_SECTION)),
        Line::from(vec![Span::raw("Debug Mode:          "), status_indicator(config.debug)]),
        Line::from(vec![Span::raw("Log Output:          "), status_indicator(config.logs)]),
        Line::from(vec![
            Span::raw("Experimental Mode:   "),
            status_indicator(config.experimental),
        ]),
        Line::from(vec![
            Span::raw("Performance Monitor: "),
            Span::styled("NOT AVAILABLE", theme::STYLE_ERROR),
        ]),
        Line::from(vec![
            Span::raw("Network Diagnostics: "),
            Span::styled("NOT AVAILABLE", theme::STYLE_ERROR),
        ]),
        Line::from(""),
        dim("Logging changes apply on next launch"),
    ]);

    render_panes(
        "Developer Options",
        menu,
        "Developer Tools",
        detail,
        app.viewport,
        frame,
        area,
    );
}

// ============================================================================
// SCREEN: LOCAL MODEL SETUP
// ============================================================================

/// Icon for a setup row relative to current progress.
fn step_icon(current: SetupStep, item: SetupItem) -> &'static str {
    match item.step() {
        None => "←",
        Some(step) if current > step => "✓",
        Some(step) if current == step => "►",
        Some(_) => "○",
    }
}

fn step_status(current: SetupStep, item: SetupItem) -> Option<Span<'static>> {
    let step = item.step()?;
    Some(if current > step {
        Span::styled("COMPLETED", theme::STYLE_SUCCESS)
    } else if current == step {
        Span::styled("IN PROGRESS", theme::STYLE_WARNING)
    } else {
        Span::raw("NOT STARTED")
    })
}

/// `█` filled, `░` empty, then a percentage.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * width as f64) as usize;
    format!(
        "{}{}  [{:>2}%]",
        "█".repeat(filled),
        "░".repeat(width - filled),
        (progress * 100.0) as u32
    )
}

fn setup_detail(
    item: Option<SetupItem>,
    step: SetupStep,
    model_path: Option<&str>,
) -> Vec<Line<'static>> {
    match item {
        Some(SetupItem::DownloadModel) => vec![
            dim("Choose and download one of these models:"),
            Line::from(""),
            Line::from("Llama 2"),
            dim("  • Size: 7B/13B/70B parameters"),
            dim("  • URL: huggingface.co/meta-llama"),
            Line::from("GPT-J"),
            dim("  • Size: 6B parameters"),
            dim("  • URL: huggingface.co/EleutherAI"),
            Line::from("BLOOM"),
            dim("  • Size: 7B parameters"),
            dim("  • URL: huggingface.co/bigscience"),
        ],
        Some(SetupItem::ConfigureModelPath) => {
            let mut lines = vec![
                dim("Set up the path to your downloaded model:"),
                Line::from(""),
                dim("1. Locate your downloaded model files"),
                dim("2. Press ENTER to open the path input"),
                dim("3. Paste or type the path"),
                Line::from(""),
                dim("Example paths:"),
            ];
            lines.extend(bullets(&[
                "~/.cache/huggingface/llama2-7b",
                "~/models/gpt-j-6B/weights",
                "/opt/models/bloom-7b1",
            ]));
            if let Some(path) = model_path {
                lines.extend([
                    Line::from(""),
                    Line::from(vec![
                        Span::raw("Current path: "),
                        Span::styled(path.to_string(), theme::STYLE_SUCCESS),
                    ]),
                ]);
            }
            lines
        }
        Some(SetupItem::TestModel) => {
            let status = if step < SetupStep::Test {
                Span::styled("NOT READY", theme::STYLE_WARNING)
            } else {
                Span::styled("READY TO TEST", theme::STYLE_SUCCESS)
            };
            let mut lines = vec![dim("Verify your model configuration:"), Line::from("")];
            lines.extend(bullets(&[
                "Check model file accessibility",
                "Validate model format",
                "Test basic inference",
            ]));
            lines.extend([Line::from(""), Line::from(vec![Span::raw("Status: "), status])]);
            lines
        }
        Some(SetupItem::BackToSettings) | None => vec![dim("Return to the settings menu")],
    }
}

fn render_setup(
    cursor: usize,
    step: SetupStep,
    error: Option<&str>,
    model_path: Option<&str>,
    viewport: Viewport,
    frame: &mut Frame,
    area: Rect,
) {
    let menu: Vec<_> = SetupItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let icon = step_icon(step, *item);
            let mut spans = vec![Span::raw(format!("{} {} ", icon, item.label()))];
            spans.extend(step_status(step, *item));
            menu_row(i == cursor, spans)
        })
        .collect();

    let mut detail = setup_detail(SetupItem::ALL.get(cursor).copied(), step, model_path);
    if let Some(err) = error {
        detail.extend([
            Line::from(""),
            Line::from(Span::styled(err.to_string(), theme::STYLE_ERROR)),
        ]);
    }
    detail.extend([
        Line::from(""),
        Line::from(Span::styled("Setup Progress", theme::STYLE_SECTION)),
        Line::from(Span::styled(
            progress_bar(step.progress(), PROGRESS_BAR_WIDTH),
            theme::STYLE_SUCCESS,
        )),
    ]);

    render_panes("Setup Steps", menu, "Local Model", detail, viewport, frame, area);
}

// ============================================================================
// DIALOGS
// ============================================================================

fn help_text(route: Route) -> (&'static str, Vec<Line<'static>>) {
    let mut lines = Vec::new();
    let (title, back) = match route {
        Route::Home => ("Mainframe Help", None),
        Route::Settings => ("Settings Help", Some("• Esc: Back to main menu")),
        Route::Developer => ("Developer Options Help", Some("• Esc: Back to settings")),
        Route::LocalModelSetup => {
            lines.extend([
                Line::from("Steps to set up your local model:"),
                Line::from(""),
                Line::from("1. Download a compatible model (e.g., Llama2)"),
                Line::from("2. Configure the path to model weights"),
                Line::from("3. Test the model connection"),
                Line::from(""),
            ]);
            ("Local Model Setup Help", Some("• Esc: Back to settings"))
        }
    };

    lines.extend([
        Line::from("Navigation:"),
        Line::from("• Up/Down or j/k: Move cursor"),
        Line::from(if route == Route::Developer {
            "• Enter/Space: Toggle option"
        } else {
            "• Enter/Space: Select option"
        }),
        Line::from("• ?: Toggle help"),
    ]);
    lines.extend(back.map(Line::from));
    lines.push(Line::from("• Ctrl+c/q: Quit"));
    (title, lines)
}

fn render_help_dialog(route: Route, frame: &mut Frame, area: Rect) {
    let (title, lines) = help_text(route);
    let dialog = centered(area, 60, lines.len() as u16 + 2);
    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(lines)
            .block(pane(title))
            .wrap(Wrap { trim: false }),
        dialog,
    );
}

fn render_input_dialog(route: Route, input: &TextInput, frame: &mut Frame, area: Rect) {
    let (title, prompt) = match route {
        Route::Settings => ("API Key Configuration", "Enter your OpenAI API key:"),
        _ => ("Configure Model Path", "Enter the path to your model weights:"),
    };

    let dialog = centered(area, 64, 8);
    frame.render_widget(Clear, dialog);
    let block = pane(title);
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let rows = Layout::vertical([
        Constraint::Length(1), // prompt
        Constraint::Length(1), // spacer
        Constraint::Length(1), // field
        Constraint::Length(1), // spacer
        Constraint::Min(0),    // error
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(Span::styled(prompt, theme::STYLE_MENU)), rows[0]);
    let (visible, column) = scroll_window(&input.display(), input.cursor(), rows[2].width);
    frame.render_widget(
        Paragraph::new(Span::styled(visible, theme::STYLE_INPUT)),
        rows[2],
    );
    if let Some(err) = input.error() {
        frame.render_widget(
            Paragraph::new(Span::styled(err.to_string(), theme::STYLE_ERROR)),
            rows[4],
        );
    }

    frame.set_cursor_position((rows[2].x + column, rows[2].y));
}

/// The part of `text` that fits in `width` cells with the cursor in view.
///
/// Returns the visible characters and the cursor's column within them.
/// The window only slides once the cursor would leave the right edge.
fn scroll_window(text: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = usize::from(width);
    if width == 0 {
        return (String::new(), 0);
    }
    let start = (cursor + 1).saturating_sub(width);
    let visible = text.chars().skip(start).take(width).collect();
    (visible, (cursor - start) as u16)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const WIDTH: u16 = 120;
    const HEIGHT: u16 = 40;

    fn make_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap()
    }

    fn app_with(screen: Screen) -> App {
        let mut app = App::new(Config::default());
        app.viewport = Viewport {
            width: WIDTH,
            height: HEIGHT,
        };
        app.screen = screen;
        app
    }

    fn rendered(app: &App) -> String {
        let mut terminal = make_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn every_screen_and_mode_renders_without_panic() {
        let config = Config::default();
        for route in Route::ALL {
            for mode in [Mode::Browse, Mode::Help, Mode::Input(TextInput::plain())] {
                let mut screen = Screen::enter(route, &config);
                *screen.mode_mut() = mode;
                for cursor in 0..screen.len() {
                    *screen.cursor_mut() = cursor;
                    rendered(&app_with(screen.clone()));
                }
            }
        }
    }

    #[test]
    fn tiny_terminal_renders_without_panic() {
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        let mut app = app_with(Screen::developer());
        app.viewport = Viewport {
            width: 20,
            height: 6,
        };
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }

    #[test]
    fn home_lists_entries_with_cursor() {
        let content = rendered(&app_with(Screen::home()));
        for item in HomeItem::ALL {
            assert!(content.contains(item.label()), "missing {}", item.label());
        }
        assert!(content.contains("> Start Lesson"));
    }

    #[test]
    fn settings_shows_current_model() {
        let content = rendered(&app_with(Screen::settings(&Config::default())));
        assert!(content.contains("Current Model: LOCAL"));
    }

    #[test]
    fn developer_marks_reserved_entries_unavailable() {
        let content = rendered(&app_with(Screen::developer()));
        assert!(content.contains("⊘ Performance Metrics SOON"));
        assert!(content.contains("⊘ Network Diagnostics SOON"));
        assert!(content.contains("○ Debug Mode OFF"));
        assert!(content.contains("NOT AVAILABLE"));
    }

    #[test]
    fn developer_shows_enabled_flags() {
        let mut app = app_with(Screen::developer());
        app.config.debug = true;
        let content = rendered(&app);
        assert!(content.contains("◉ Debug Mode ON"));
        assert!(content.contains("VERBOSE"));
    }

    #[test]
    fn setup_shows_error_and_progress() {
        let app = app_with(Screen::LocalModelSetup {
            cursor: 2,
            mode: Mode::Browse,
            step: SetupStep::ConfigurePath,
            error: Some("Please complete previous steps first".into()),
            model_path: None,
        });
        let content = rendered(&app);
        assert!(content.contains("Please complete previous steps first"));
        assert!(content.contains("✓ 1. Download Model COMPLETED"));
        assert!(content.contains("► 2. Configure Model Path IN PROGRESS"));
        assert!(content.contains("NOT READY"));
        assert!(content.contains("[33%]"));
    }

    #[test]
    fn secret_input_never_shows_the_key() {
        let mut input = TextInput::secret(100);
        for c in "sk-supersecretvalue".chars() {
            input.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        let app = app_with(Screen::Settings {
            cursor: 1,
            mode: Mode::Input(input),
            model_choice: AiModel::Gpt,
        });
        let content = rendered(&app);
        assert!(content.contains("API Key Configuration"));
        assert!(!content.contains("supersecret"));
        assert!(content.contains("•••••"));
    }

    #[test]
    fn configured_key_is_not_displayed() {
        let mut app = app_with(Screen::Settings {
            cursor: 1,
            mode: Mode::Browse,
            model_choice: AiModel::Gpt,
        });
        app.config.api_key = format!("sk-{}", "z".repeat(40));
        let content = rendered(&app);
        assert!(content.contains("CONFIGURED"));
        assert!(!content.contains("zzzz"));
    }

    #[test]
    fn input_error_is_shown() {
        let mut input = TextInput::plain();
        input.set_error("Invalid API key format");
        let app = app_with(Screen::Settings {
            cursor: 1,
            mode: Mode::Input(input),
            model_choice: AiModel::Gpt,
        });
        assert!(rendered(&app).contains("Invalid API key format"));
    }

    #[test]
    fn help_overlay_replaces_menu() {
        let mut screen = Screen::developer();
        *screen.mode_mut() = Mode::Help;
        let content = rendered(&app_with(screen));
        assert!(content.contains("Developer Options Help"));
        assert!(content.contains("Press ? to close help"));
    }

    #[test]
    fn save_error_replaces_footer() {
        let mut app = app_with(Screen::home());
        app.save_error = Some("disk full".into());
        assert!(rendered(&app).contains("Settings not saved: disk full"));
    }

    #[test]
    fn short_input_is_not_scrolled() {
        assert_eq!(scroll_window("/opt", 4, 10), ("/opt".to_string(), 4));
        assert_eq!(scroll_window("/opt/models", 0, 4), ("/opt".to_string(), 0));
    }

    #[test]
    fn long_input_follows_cursor() {
        let text = "abcdefghij";
        // Cursor past the end: the tail stays visible with room for the cursor.
        assert_eq!(scroll_window(text, 10, 4), ("hij".to_string(), 3));
        assert_eq!(scroll_window(text, 5, 4), ("cdef".to_string(), 3));
        assert_eq!(scroll_window(text, 3, 0), (String::new(), 0));
    }

    #[test]
    fn long_path_shows_its_tail() {
        let mut input = TextInput::plain();
        let path = format!("/opt/models/{}/weights-final", "nested/".repeat(12));
        for c in path.chars() {
            input.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        let app = app_with(Screen::LocalModelSetup {
            cursor: 1,
            mode: Mode::Input(input),
            step: SetupStep::ConfigurePath,
            error: None,
            model_path: None,
        });
        let content = rendered(&app);
        assert!(content.contains("weights-final"));
        assert!(!content.contains("/opt/models/"));
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 4), "░░░░  [ 0%]");
        assert_eq!(progress_bar(0.5, 4), "██░░  [50%]");
        assert_eq!(progress_bar(1.0, 4), "████  [100%]");
    }

    #[test]
    fn narrow_viewport_stacks_panes() {
        let area = Rect::new(0, 0, 60, 30);
        let (menu, detail) = split_panes(Viewport { width: 60, height: 30 }, area);
        assert_eq!(menu.x, detail.x);
        assert!(detail.y > menu.y);

        let area = Rect::new(0, 0, 120, 30);
        let (menu, detail) = split_panes(Viewport { width: 120, height: 30 }, area);
        assert_eq!(menu.y, detail.y);
        assert!(detail.x > menu.x);
    }
}
