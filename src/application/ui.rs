use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Tabs;
use ratatui::Frame;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::CandidateFile;
use crate::domain::models::CompletionSummary;
use crate::domain::models::Destination;
use crate::domain::models::Event;
use crate::domain::models::GenerationConfig;
use crate::domain::models::Loading;
use crate::domain::models::Notice;
use crate::domain::models::NoticeKind;
use crate::domain::models::QualityLevel;
use crate::domain::models::SessionApi;
use crate::domain::models::TextArea;
use crate::domain::models::WizardStep;
use crate::domain::services::events::EventsService;
use crate::domain::services::FileValidator;
use crate::domain::services::WizardState;
use crate::infrastructure::api::client::HttpSessionClient;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ConfigureFocus {
    ApiKey,
    Quality,
    Review,
}

struct WizardScreen<'a> {
    wizard: WizardState,
    path_input: tui_textarea::TextArea<'a>,
    key_input: tui_textarea::TextArea<'a>,
    focus: ConfigureFocus,
    quality: QualityLevel,
    review_enabled: bool,
    waiting: bool,
    loading: Loading,
    notice: Option<Notice>,
    session_id: Option<String>,
}

impl<'a> WizardScreen<'a> {
    fn new() -> WizardScreen<'a> {
        let quality = QualityLevel::parse(Config::get(ConfigKey::Quality)).unwrap_or_default();
        let review_enabled = Config::get(ConfigKey::EnableReview) == "true";

        return WizardScreen {
            wizard: WizardState::default(),
            path_input: TextArea::new("Document path"),
            key_input: TextArea::new_secret("API key"),
            focus: ConfigureFocus::ApiKey,
            quality,
            review_enabled,
            waiting: false,
            loading: Loading::default(),
            notice: None,
            session_id: None,
        };
    }

    async fn load_candidate(&mut self, input: &str) {
        if input.trim().is_empty() {
            self.notice = Some(Notice::new_with_kind(
                NoticeKind::Error,
                "Enter the path to a notes document first.",
            ));
            return;
        }

        let file = match CandidateFile::from_path(input).await {
            Ok(file) => file,
            Err(err) => {
                self.notice = Some(Notice::new_with_kind(NoticeKind::Error, &err.to_string()));
                return;
            }
        };

        if let Err(err) = FileValidator::validate(&file) {
            self.notice = Some(Notice::new_with_kind(NoticeKind::Error, &err.to_string()));
            return;
        }

        self.notice = Some(Notice::new(&format!(
            "Selected {name} ({size}).",
            name = file.name,
            size = file.human_size()
        )));
        self.wizard.accept_candidate(file);
    }

    fn submit(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let api_key = self.key_input.lines().join("").trim().to_string();
        if api_key.is_empty() {
            self.focus = ConfigureFocus::ApiKey;
            self.notice = Some(Notice::new_with_kind(
                NoticeKind::Error,
                "Enter your API key before starting generation.",
            ));
            return Ok(());
        }

        let file = match self.wizard.candidate() {
            Some(file) => file.clone(),
            None => {
                self.notice = Some(Notice::new_with_kind(
                    NoticeKind::Error,
                    "Choose a document before starting generation.",
                ));
                return Ok(());
            }
        };

        let config = GenerationConfig {
            quality: self.quality,
            review_enabled: self.review_enabled,
            api_key,
        };

        self.waiting = true;
        self.loading.message = "Uploading document...".to_string();
        self.notice = None;
        self.session_id = None;
        tx.send(Action::SubmitWorkflow(file, config))?;

        return Ok(());
    }

    fn cycle_quality(&mut self, forward: bool) {
        let levels = QualityLevel::iter().collect::<Vec<QualityLevel>>();
        let current = levels
            .iter()
            .position(|level| return *level == self.quality)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % levels.len()
        } else {
            (current + levels.len() - 1) % levels.len()
        };

        self.quality = levels[next];
        Config::set(ConfigKey::Quality, &self.quality.to_string());
    }

    fn toggle_review(&mut self) {
        self.review_enabled = !self.review_enabled;
        Config::set(ConfigKey::EnableReview, &self.review_enabled.to_string());
    }

    async fn handle_upload_event(&mut self, event: Event) {
        match event {
            Event::KeyboardEnter() => {
                let input = self.path_input.lines().join("\n");
                self.load_candidate(&input).await;
            }
            Event::KeyboardPaste(text) => {
                self.path_input.insert_str(&text);
            }
            Event::KeyboardCharInput(input) => {
                match input {
                    Input {
                        key: Key::Char('n'),
                        ctrl: true,
                        ..
                    } => {
                        if self.wizard.advance() {
                            self.notice = None;
                        } else {
                            self.notice = Some(Notice::new_with_kind(
                                NoticeKind::Error,
                                "Choose a document before continuing.",
                            ));
                        }
                    }
                    Input {
                        key: Key::Char('x'),
                        ctrl: true,
                        ..
                    } => {
                        self.wizard.clear_selection();
                        self.notice = Some(Notice::new("Selection cleared."));
                    }
                    input => {
                        self.path_input.input(input);
                    }
                }
            }
            _ => (),
        }
    }

    fn handle_configure_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        match event {
            Event::KeyboardTab() => {
                self.focus = match self.focus {
                    ConfigureFocus::ApiKey => ConfigureFocus::Quality,
                    ConfigureFocus::Quality => ConfigureFocus::Review,
                    ConfigureFocus::Review => ConfigureFocus::ApiKey,
                };
            }
            Event::KeyboardBackTab() => {
                self.focus = match self.focus {
                    ConfigureFocus::ApiKey => ConfigureFocus::Review,
                    ConfigureFocus::Quality => ConfigureFocus::ApiKey,
                    ConfigureFocus::Review => ConfigureFocus::Quality,
                };
            }
            Event::KeyboardEnter() => {
                self.submit(tx)?;
            }
            Event::KeyboardPaste(text) => {
                if self.focus == ConfigureFocus::ApiKey {
                    self.key_input.insert_str(&text);
                }
            }
            Event::KeyboardCharInput(input) => {
                match input {
                    Input {
                        key: Key::Char('b'),
                        ctrl: true,
                        ..
                    } => {
                        self.wizard.retreat();
                        self.notice = None;
                    }
                    Input { key: Key::Left, .. } => {
                        if self.focus == ConfigureFocus::Quality {
                            self.cycle_quality(false);
                        }
                    }
                    Input {
                        key: Key::Right, ..
                    } => {
                        if self.focus == ConfigureFocus::Quality {
                            self.cycle_quality(true);
                        }
                    }
                    Input {
                        key: Key::Char(' '),
                        ..
                    } => {
                        match self.focus {
                            ConfigureFocus::ApiKey => {
                                self.key_input.input(Input {
                                    key: Key::Char(' '),
                                    ctrl: false,
                                    alt: false,
                                });
                            }
                            ConfigureFocus::Quality => self.cycle_quality(true),
                            ConfigureFocus::Review => self.toggle_review(),
                        }
                    }
                    input => {
                        if self.focus == ConfigureFocus::ApiKey {
                            self.key_input.input(input);
                        }
                    }
                }
            }
            _ => (),
        }

        return Ok(());
    }
}

fn render_tabs<B: Backend>(frame: &mut Frame<B>, screen: &WizardScreen<'_>, rect: Rect) {
    let mut upload_title = "1. Upload".to_string();
    if screen.wizard.upload_completed() {
        upload_title = "1. Upload ✓".to_string();
    }

    let tabs = Tabs::new(vec![upload_title, "2. Configure".to_string()])
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .select(match screen.wizard.step() {
            WizardStep::Upload => 0,
            WizardStep::Configure => 1,
        });

    frame.render_widget(tabs, rect);
}

fn render_upload<B: Backend>(frame: &mut Frame<B>, screen: &WizardScreen<'_>, rect: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(4), Constraint::Min(1)])
        .split(rect);

    frame.render_widget(screen.path_input.widget(), layout[0]);

    let mut lines = vec![];
    match screen.wizard.candidate() {
        Some(file) => {
            lines.push(Line::from(format!(
                "Selected: {name} ({size})",
                name = file.name,
                size = file.human_size()
            )));
        }
        None => {
            lines.push(Line::from("No document selected."));
        }
    }
    lines.push(Line::from(
        "Supported formats: PDF, DOC, DOCX, TXT, MD. Up to 16 MB.",
    ));

    if let Some(notice) = &screen.notice {
        lines.push(Line::from(""));
        lines.push(notice.as_line());
    }

    frame.render_widget(Paragraph::new(lines), layout[1]);
}

fn render_configure<B: Backend>(frame: &mut Frame<B>, screen: &WizardScreen<'_>, rect: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(rect);

    let document_line = match screen.wizard.candidate() {
        Some(file) => Line::from(format!(
            "Document: {name} ({size})",
            name = file.name,
            size = file.human_size()
        )),
        None => Line::from("Document: none selected"),
    };
    frame.render_widget(Paragraph::new(document_line), layout[0]);

    frame.render_widget(screen.key_input.widget(), layout[1]);

    let mut quality_marker = "  ";
    if screen.focus == ConfigureFocus::Quality {
        quality_marker = "> ";
    }
    let mut review_marker = "  ";
    if screen.focus == ConfigureFocus::Review {
        review_marker = "> ";
    }
    let mut review_state = "[ ]";
    if screen.review_enabled {
        review_state = "[x]";
    }

    let mut lines = vec![
        Line::from(format!(
            "{quality_marker}Quality: < {quality} >",
            quality = screen.quality
        )),
        Line::from(format!("{review_marker}Review before quiz: {review_state}")),
    ];

    if let Some(notice) = &screen.notice {
        lines.push(Line::from(""));
        lines.push(notice.as_line());
    }

    frame.render_widget(Paragraph::new(lines), layout[2]);
}

fn render_footer<B: Backend>(frame: &mut Frame<B>, screen: &WizardScreen<'_>, rect: Rect) {
    let hint = if screen.waiting {
        match &screen.session_id {
            Some(session_id) => format!("Session {session_id} - CTRL+C to cancel"),
            None => "CTRL+C to cancel".to_string(),
        }
    } else {
        match screen.wizard.step() {
            WizardStep::Upload => {
                "Enter to validate - CTRL+N to continue - CTRL+X to clear - CTRL+C to quit"
                    .to_string()
            }
            WizardStep::Configure => {
                "Enter to start generation - Tab to switch fields - CTRL+B to go back - CTRL+C to quit"
                    .to_string()
            }
        }
    };

    frame.render_widget(Paragraph::new(hint), rect);
}

fn render<B: Backend>(frame: &mut Frame<B>, screen: &WizardScreen<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_tabs(frame, screen, layout[0]);

    if screen.waiting {
        screen.loading.render(frame, layout[1]);
    } else {
        match screen.wizard.step() {
            WizardStep::Upload => render_upload(frame, screen, layout[1]),
            WizardStep::Configure => render_configure(frame, screen, layout[1]),
        }
    }

    render_footer(frame, screen, layout[2]);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    screen: &mut WizardScreen<'_>,
    events: &mut EventsService,
    tx: mpsc::UnboundedSender<Action>,
) -> Result<Option<(Destination, CompletionSummary)>> {
    loop {
        terminal.draw(|frame| {
            render(frame, screen);
        })?;

        match events.next().await? {
            Event::UITick() => (),
            Event::UIResize() => (),
            Event::SessionCreated(session_id) => {
                tracing::info!(session_id, "session created");
                screen.session_id = Some(session_id);
            }
            Event::WorkflowProgress(message) => {
                screen.waiting = true;
                screen.loading.message = message;
            }
            Event::WorkflowFailed(reason) => {
                screen.waiting = false;
                screen.session_id = None;
                screen.notice = Some(Notice::new_with_kind(NoticeKind::Error, &reason));
            }
            Event::WorkflowCancelled() => {
                screen.waiting = false;
                screen.session_id = None;
                screen.notice = Some(Notice::new("Generation cancelled."));
            }
            Event::WorkflowComplete(destination, summary) => {
                return Ok(Some((destination, summary)));
            }
            Event::KeyboardCTRLC() => {
                if screen.waiting {
                    tx.send(Action::CancelWorkflow())?;
                } else {
                    return Ok(None);
                }
            }
            event => {
                if screen.waiting {
                    continue;
                }

                match screen.wizard.step() {
                    WizardStep::Upload => screen.handle_upload_event(event).await,
                    WizardStep::Configure => screen.handle_configure_event(event, &tx)?,
                }
            }
        }
    }
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<Option<(Destination, CompletionSummary)>> {
    let mut events = EventsService::new(rx);
    let mut screen = WizardScreen::new();

    if let Err(err) = HttpSessionClient::default().health_check().await {
        screen.notice = Some(Notice::new_with_kind(NoticeKind::Error, &err.to_string()));
    }

    let upload_file = Config::get(ConfigKey::UploadFile);
    if !upload_file.is_empty() {
        screen.path_input.insert_str(&upload_file);
        screen.load_candidate(&upload_file).await;
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let outcome = start_loop(&mut terminal, &mut screen, &mut events, tx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(outcome);
}
