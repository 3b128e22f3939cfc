//! Terminal front end for the business card viewer.
//!
//! Layout:
//! - Centered window titled "Digital Business Card"
//! - Inactive banner above the card when the profile is not activated
//! - Card body rendered by the selected template (premium / elite / black / sales)
//! - Bottom row: [ Share Your Info ] [ Reload ] [ Quit ]
//! - Share dialog as a modal with focusable fields; toasts in the top-right corner
//!
//! Note: Logging is file-only in TUI mode (stdout logging is disabled) to avoid corrupting the terminal UI.

use crate::api::service::ServiceError;
use crate::models::responses::{ApiResponse, ConnectResponse, ProfileRecord};
use crate::notify::{Toast, ToastKind, ToastQueue};
use crate::profile::{
    FetchTicket, PendingSubmit, ProfileState, ProfileViewController, ProfileViewRequest,
    SubmitOutcome, Template, TemplateProps,
};
use crate::share::{ContactField, ShareFormDialog};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, info};
use ratatui::backend::{Backend, CrosstermBackend, TestBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

const WINDOW_TITLE: &str = "Digital Business Card";
const SMOKE_VIEW_ID: &str = "smoke-preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageButton {
    Share,
    Reload,
    Quit,
}

/// Focus inside the share dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShareFocus {
    Field(ContactField),
    Toggle,
    Cancel,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Page(PageButton),
    Share(ShareFocus),
}

enum UiMsg {
    ProfileFetched {
        ticket: FetchTicket,
        result: Result<ApiResponse<ProfileRecord>, ServiceError>,
    },
    SubmitFinished {
        pending: PendingSubmit,
        result: Result<ConnectResponse, ServiceError>,
    },
}

struct ViewerApp {
    controller: ProfileViewController,
    toasts: Arc<ToastQueue>,
    request: ProfileViewRequest,
    focus: Focus,
    quit: bool,
}

impl ViewerApp {
    fn new(
        controller: ProfileViewController,
        toasts: Arc<ToastQueue>,
        request: ProfileViewRequest,
    ) -> Self {
        Self {
            controller,
            toasts,
            request,
            focus: Focus::Page(PageButton::Share),
            quit: false,
        }
    }
}

pub fn run(
    controller: ProfileViewController,
    toasts: Arc<ToastQueue>,
    request: ProfileViewRequest,
) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting card viewer");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, ViewerApp::new(controller, toasts, request));
    restore_terminal(&mut terminal)?;

    result
}

/// Render a single frame for `target` into an in-memory backend and return.
pub fn smoke(
    controller: ProfileViewController,
    toasts: Arc<ToastQueue>,
    target: &str,
) -> Result<()> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame TUI smoke target={}",
        target
    );

    let t = target.trim().to_ascii_lowercase();
    let mut app = ViewerApp::new(controller, toasts, ProfileViewRequest::new(SMOKE_VIEW_ID));
    seed_smoke_state(&mut app, t.as_str());

    // In-memory backend: no raw mode or alternate screen, so this runs in CI.
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f.size(), f, &app))?;

    Ok(())
}

fn sample_profile(design_type: &str, active: bool) -> ProfileRecord {
    ProfileRecord {
        id: Some("smoke-profile".to_string()),
        view_id: Some(SMOKE_VIEW_ID.to_string()),
        is_active: active,
        design_type: Some(design_type.to_string()),
        full_name: Some("Asha Rao".to_string()),
        designation: Some("Founder".to_string()),
        company_name: Some("Rao Traders".to_string()),
        phone_number: Some("+91 98765 43210".to_string()),
        email: Some("asha@example.com".to_string()),
        website: Some("https://example.com".to_string()),
        address: Some("12 Market Road, Pune".to_string()),
        bio: Some("Wholesale spices since 1998.".to_string()),
        extra: Default::default(),
    }
}

fn seed_smoke_state(app: &mut ViewerApp, target: &str) {
    let (design, active) = match target {
        "loading" => {
            app.controller.begin_fetch(&app.request);
            return;
        }
        "notfound" => {
            app.controller.begin_fetch(&ProfileViewRequest::default());
            return;
        }
        "elite" => ("elite", true),
        "black" => ("black", true),
        "sales" => ("SalesTemplate", true),
        "inactive" => ("premium", false),
        _ => ("premium", true),
    };

    if let Some(ticket) = app.controller.begin_fetch(&app.request) {
        app.controller
            .apply_fetch(ticket, Ok(ApiResponse::ok(sample_profile(design, active))));
    }

    if target == "share" && app.controller.open_share() {
        if let Some(dialog) = app.controller.dialog_mut() {
            dialog.update(ContactField::FullName, "Jane Doe");
            dialog.update(ContactField::Phone, "+1 555 0100");
        }
        app.focus = Focus::Share(ShareFocus::Field(ContactField::Email));
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: ViewerApp) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let (tx, rx) = mpsc::channel::<UiMsg>();

    start_fetch(&mut app, &tx);

    while !app.quit {
        drain_messages(&mut app, &rx);
        terminal.draw(|f| draw(f.size(), f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    handle_key(&mut app, key.code, &tx);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn start_fetch(app: &mut ViewerApp, tx: &mpsc::Sender<UiMsg>) {
    let Some(ticket) = app.controller.begin_fetch(&app.request) else {
        return;
    };

    let service = app.controller.service();
    let tx = tx.clone();
    app.controller.runtime().spawn(async move {
        let result = service.fetch_profile(ticket.view_id()).await;
        let _ = tx.send(UiMsg::ProfileFetched { ticket, result });
    });
}

fn start_submit(app: &mut ViewerApp, tx: &mpsc::Sender<UiMsg>) {
    let Ok(pending) = app.controller.begin_submit() else {
        // Rejections already raised a toast (or were a no-op double submit).
        return;
    };

    let service = app.controller.service();
    let tx = tx.clone();
    app.controller.runtime().spawn(async move {
        let result = service.connect(&pending.payload).await;
        let _ = tx.send(UiMsg::SubmitFinished { pending, result });
    });
}

fn drain_messages(app: &mut ViewerApp, rx: &mpsc::Receiver<UiMsg>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            UiMsg::ProfileFetched { ticket, result } => {
                app.controller.apply_fetch(ticket, result);
                if !app.controller.is_share_open() {
                    app.focus = Focus::Page(PageButton::Share);
                }
            }
            UiMsg::SubmitFinished { pending, result } => {
                let outcome = app.controller.finish_submit(&pending, result);
                if outcome == SubmitOutcome::Connected {
                    app.focus = Focus::Page(PageButton::Share);
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Keys
// -----------------------------------------------------------------------------

fn share_focus_order(dialog: &ShareFormDialog) -> Vec<ShareFocus> {
    let mut order: Vec<ShareFocus> = dialog
        .visible_fields()
        .into_iter()
        .map(ShareFocus::Field)
        .collect();
    order.push(ShareFocus::Toggle);
    order.push(ShareFocus::Cancel);
    order.push(ShareFocus::Submit);
    order
}

fn cycle_share_focus(app: &mut ViewerApp, forward: bool) {
    let Focus::Share(current) = app.focus else {
        return;
    };
    let Some(dialog) = app.controller.dialog() else {
        return;
    };
    let order = share_focus_order(dialog);
    let idx = order.iter().position(|f| *f == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % order.len()
    } else {
        (idx + order.len() - 1) % order.len()
    };
    app.focus = Focus::Share(order[next]);
}

fn edit_text(dialog: &mut ShareFormDialog, field: ContactField, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => dialog.input_char(field, c),
        KeyCode::Enter if field.is_multiline() => dialog.input_char(field, '\n'),
        KeyCode::Backspace => {
            dialog.backspace(field);
            true
        }
        _ => false,
    }
}

fn handle_key(app: &mut ViewerApp, code: KeyCode, tx: &mpsc::Sender<UiMsg>) {
    match app.focus {
        Focus::Share(focus) => handle_share_key(app, focus, code, tx),
        Focus::Page(button) => handle_page_key(app, button, code, tx),
    }
}

fn handle_page_key(
    app: &mut ViewerApp,
    button: PageButton,
    code: KeyCode,
    tx: &mpsc::Sender<UiMsg>,
) {
    let scroll = app.controller.scroll_host().clone();
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('r') => {
            scroll.reset();
            start_fetch(app, tx);
        }
        KeyCode::Char('s') => open_share(app),
        KeyCode::Up => {
            scroll.scroll_by(-1);
        }
        KeyCode::Down => {
            scroll.scroll_by(1);
        }
        KeyCode::PageUp => {
            scroll.scroll_by(-8);
        }
        KeyCode::PageDown => {
            scroll.scroll_by(8);
        }
        KeyCode::Left | KeyCode::BackTab => {
            app.focus = Focus::Page(match button {
                PageButton::Share => PageButton::Quit,
                PageButton::Reload => PageButton::Share,
                PageButton::Quit => PageButton::Reload,
            });
        }
        KeyCode::Right | KeyCode::Tab => {
            app.focus = Focus::Page(match button {
                PageButton::Share => PageButton::Reload,
                PageButton::Reload => PageButton::Quit,
                PageButton::Quit => PageButton::Share,
            });
        }
        KeyCode::Enter => match button {
            PageButton::Share => open_share(app),
            PageButton::Reload => {
                scroll.reset();
                start_fetch(app, tx);
            }
            PageButton::Quit => app.quit = true,
        },
        _ => {}
    }
}

fn open_share(app: &mut ViewerApp) {
    if app.controller.open_share() {
        app.focus = Focus::Share(ShareFocus::Field(ContactField::FullName));
    }
}

fn close_share(app: &mut ViewerApp) {
    app.controller.close_share();
    app.focus = Focus::Page(PageButton::Share);
}

fn handle_share_key(
    app: &mut ViewerApp,
    focus: ShareFocus,
    code: KeyCode,
    tx: &mpsc::Sender<UiMsg>,
) {
    match code {
        KeyCode::Esc => return close_share(app),
        KeyCode::Tab | KeyCode::Down => return cycle_share_focus(app, true),
        KeyCode::BackTab | KeyCode::Up => return cycle_share_focus(app, false),
        _ => {}
    }

    match focus {
        ShareFocus::Field(field) => {
            if code == KeyCode::Enter && !field.is_multiline() {
                return cycle_share_focus(app, true);
            }
            if let Some(dialog) = app.controller.dialog_mut() {
                edit_text(dialog, field, code);
            }
        }
        ShareFocus::Toggle => {
            if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                if let Some(dialog) = app.controller.dialog_mut() {
                    dialog.toggle_additional();
                    debug!(
                        "[PHASE: share] [STEP: disclosure] Additional details shown={}",
                        dialog.show_additional()
                    );
                }
            }
        }
        ShareFocus::Cancel => {
            if code == KeyCode::Enter {
                close_share(app);
            }
        }
        ShareFocus::Submit => {
            if code == KeyCode::Enter {
                start_submit(app, tx);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Drawing
// -----------------------------------------------------------------------------

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, app: &ViewerApp) {
    let window_area = centered_window(area, 100, 30);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(WINDOW_TITLE);
    f.render_widget(outer_block, window_area);

    let inner = window_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });

    let banner_height = if app.controller.show_inactive_banner() {
        5
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(banner_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    if banner_height > 0 {
        draw_inactive_banner(f, rows[0]);
    }

    match app.controller.state() {
        ProfileState::Idle | ProfileState::Loading => {
            let p = Paragraph::new("Loading profile...").alignment(Alignment::Center);
            f.render_widget(p, centered_line(rows[1]));
        }
        ProfileState::NotFound { message } => draw_not_found(f, rows[1], message),
        ProfileState::Loaded { .. } => {
            if let Some(props) = app.controller.template_props() {
                draw_card(f, rows[1], &props, app.controller.scroll_host().offset());
            }
        }
    }

    if !app.controller.is_loading() {
        draw_buttons(f, rows[2], app);
    }

    if let Some(dialog) = app.controller.dialog() {
        draw_share_modal(f, window_area, dialog, app);
    }

    draw_toasts(f, window_area, &app.toasts.visible());
}

fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: area.height.min(1),
    }
}

fn draw_inactive_banner(f: &mut ratatui::Frame<'_>, area: Rect) {
    let warn = Style::default().fg(Color::Yellow);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(warn)
        .title(Span::styled(
            "Profile Not Activated",
            warn.add_modifier(Modifier::BOLD),
        ));
    let body = Paragraph::new(Text::from(vec![
        Line::from("This profile is currently inactive and cannot be viewed."),
        Line::from(Span::styled("Status: Inactive", warn)),
    ]))
    .block(block)
    .wrap(Wrap { trim: true });
    f.render_widget(body, area);
}

fn draw_not_found(f: &mut ratatui::Frame<'_>, area: Rect, message: &str) {
    let body = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "Profile Not Found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(crate::profile::controller::MSG_NOT_FOUND),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    let height = 4.min(area.height);
    let y = area.y + area.height.saturating_sub(height) / 2;
    f.render_widget(body, Rect { y, height, ..area });
}

struct CardTheme {
    label: &'static str,
    border: BorderType,
    frame: Style,
    accent: Style,
}

fn theme(template: Template) -> CardTheme {
    match template {
        Template::Premium => CardTheme {
            label: "Premium",
            border: BorderType::Rounded,
            frame: Style::default().fg(Color::Yellow),
            accent: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        },
        Template::Elite => CardTheme {
            label: "Elite",
            border: BorderType::Double,
            frame: Style::default().fg(Color::Cyan),
            accent: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        },
        Template::Black => CardTheme {
            label: "Black",
            border: BorderType::Thick,
            frame: Style::default().fg(Color::White).bg(Color::Black),
            accent: Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        },
        Template::Sales => CardTheme {
            label: "Sales",
            border: BorderType::Plain,
            frame: Style::default().fg(Color::Green),
            accent: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        },
    }
}

fn card_lines<'a>(props: &TemplateProps<'a>, accent: Style) -> Vec<Line<'a>> {
    let p = props.profile;
    let mut lines = Vec::new();

    // The sales layout leads with the business; the others lead with the person.
    if props.template == Template::Sales {
        if let Some(company) = p.company_name.as_deref().filter(|s| !s.is_empty()) {
            lines.push(Line::from(Span::styled(company, accent)));
        }
        lines.push(Line::from(p.display_name()));
    } else {
        lines.push(Line::from(Span::styled(p.display_name(), accent)));
        let role = [p.designation.as_deref(), p.company_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" @ ");
        if !role.is_empty() {
            lines.push(Line::from(role));
        }
    }

    if let Some(bio) = p.bio.as_deref().filter(|s| !s.trim().is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(bio));
    }

    let contacts = p.contact_lines();
    if !contacts.is_empty() {
        lines.push(Line::from(""));
        for (label, value) in contacts {
            lines.push(Line::from(format!("{:<8} {}", label, value)));
        }
    }
    lines
}

fn draw_card(f: &mut ratatui::Frame<'_>, area: Rect, props: &TemplateProps<'_>, scroll: u16) {
    let t = theme(props.template);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(t.border)
        .border_style(t.frame)
        .style(t.frame)
        .title(format!(" {} ", t.label));

    let p = Paragraph::new(Text::from(card_lines(props, t.accent)))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}

fn button_text(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let mut style = Style::default();
    if !enabled {
        style = style.fg(Color::DarkGray);
    }
    if focused && enabled {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {} ]", label), style)
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, app: &ViewerApp) {
    let focused = |b: PageButton| app.focus == Focus::Page(b);
    let share_enabled = app.controller.profile().is_some() && !app.controller.connect_disabled();

    let line = Line::from(vec![
        button_text("Share Your Info", focused(PageButton::Share), share_enabled),
        Span::raw(" "),
        button_text("Reload", focused(PageButton::Reload), true),
        Span::raw(" "),
        button_text("Quit", focused(PageButton::Quit), true),
    ]);

    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn draw_share_modal(
    f: &mut ratatui::Frame<'_>,
    window_area: Rect,
    dialog: &ShareFormDialog,
    app: &ViewerApp,
) {
    let fields = dialog.visible_fields();
    let modal_w = 70u16.min(window_area.width.saturating_sub(4));
    let modal_h = (fields.len() as u16 + 8).min(window_area.height.saturating_sub(2));
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    let focus = match app.focus {
        Focus::Share(s) => Some(s),
        Focus::Page(_) => None,
    };
    let focused = |s: ShareFocus| focus == Some(s);

    let mut lines = vec![
        Line::from(ShareFormDialog::DESCRIPTION),
        Line::from(""),
    ];
    for field in fields {
        let marker = if field.is_required() { "*" } else { " " };
        let mut value = dialog.form().get(field).replace('\n', " ");
        let mut style = if focused(ShareFocus::Field(field)) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        if value.is_empty() && field.is_phone() {
            value = "e.g. +1 555 0100".to_string();
            style = style.fg(Color::DarkGray);
        }
        lines.push(Line::from(vec![
            Span::raw(format!("{:<18}{} ", field.label(), marker)),
            Span::styled(format!("{:<40}", value), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(button_text(
        dialog.toggle_label(),
        focused(ShareFocus::Toggle),
        true,
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(ShareFormDialog::TITLE);
    let body = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(body, area);

    let buttons_area = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let submit_label = if app.controller.is_connecting() {
        "Submitting..."
    } else {
        "Submit Information"
    };
    let line = Line::from(vec![
        button_text("Cancel", focused(ShareFocus::Cancel), true),
        Span::raw(" "),
        button_text(
            submit_label,
            focused(ShareFocus::Submit),
            !app.controller.is_connecting(),
        ),
    ]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, buttons_area);
}

fn draw_toasts(f: &mut ratatui::Frame<'_>, window_area: Rect, toasts: &[Toast]) {
    let width = 48u16.min(window_area.width.saturating_sub(2));
    let mut y = window_area.y + 1;

    for toast in toasts {
        if y + 3 > window_area.y + window_area.height {
            break;
        }
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        };
        let area = Rect {
            x: window_area.x + window_area.width.saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };
        let p = Paragraph::new(toast.message.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(p, area);
        y += 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::service::ProfileService;
    use crate::config::ViewerSettings;
    use crate::models::requests::ConnectPayload;
    use crate::notify::Notifier;
    use async_trait::async_trait;
    use tokio::runtime::Handle;

    struct OfflineService;

    #[async_trait]
    impl ProfileService for OfflineService {
        async fn fetch_profile(
            &self,
            _view_id: &str,
        ) -> Result<ApiResponse<ProfileRecord>, ServiceError> {
            Err(ServiceError::Decode("offline".to_string()))
        }

        async fn increment_views(&self, _profile_id: &str) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn connect(&self, _payload: &ConnectPayload) -> Result<ConnectResponse, ServiceError> {
            Err(ServiceError::Decode("offline".to_string()))
        }
    }

    fn app() -> ViewerApp {
        let settings = ViewerSettings::default();
        let toasts = Arc::new(ToastQueue::new(settings.toast_ttl()));
        let controller = ProfileViewController::new(
            Arc::new(OfflineService),
            toasts.clone(),
            Handle::current(),
            &settings,
        );
        ViewerApp::new(controller, toasts, ProfileViewRequest::new(SMOKE_VIEW_ID))
    }

    fn render(app: &ViewerApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f.size(), f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn every_smoke_target_renders() {
        for target in [
            "loading", "notfound", "premium", "elite", "black", "sales", "inactive", "share",
        ] {
            let mut a = app();
            seed_smoke_state(&mut a, target);
            let screen = render(&a);
            assert!(screen.contains(WINDOW_TITLE), "target {}", target);
        }
    }

    #[tokio::test]
    async fn loading_and_not_found_screens() {
        let mut a = app();
        seed_smoke_state(&mut a, "loading");
        let screen = render(&a);
        assert!(screen.contains("Loading profile..."));
        assert!(!screen.contains("Share Your Info"));
        assert!(!screen.contains("Reload"));

        let mut a = app();
        seed_smoke_state(&mut a, "notfound");
        let screen = render(&a);
        assert!(screen.contains("Profile Not Found"));
        assert!(!screen.contains("Asha Rao"));
    }

    #[tokio::test]
    async fn inactive_profile_shows_banner_above_card() {
        let mut a = app();
        seed_smoke_state(&mut a, "inactive");
        let screen = render(&a);
        assert!(screen.contains("Profile Not Activated"));
        assert!(screen.contains("Status: Inactive"));
        assert!(screen.contains("Asha Rao"));
        let banner_at = screen.find("Profile Not Activated").unwrap();
        let card_at = screen.find("Asha Rao").unwrap();
        assert!(banner_at < card_at);
    }

    #[tokio::test]
    async fn template_label_follows_design_type() {
        for (target, label) in [
            ("premium", " Premium "),
            ("elite", " Elite "),
            ("black", " Black "),
            ("sales", " Sales "),
        ] {
            let mut a = app();
            seed_smoke_state(&mut a, target);
            assert!(render(&a).contains(label), "target {}", target);
        }
    }

    #[tokio::test]
    async fn share_modal_lists_fields_and_toggle() {
        let mut a = app();
        seed_smoke_state(&mut a, "share");
        let screen = render(&a);
        assert!(screen.contains(ShareFormDialog::TITLE));
        assert!(screen.contains("Full Name"));
        assert!(screen.contains("Jane Doe"));
        assert!(screen.contains("Add More Details"));
        assert!(!screen.contains("Business Name"));
        assert!(screen.contains("Submit Information"));
        assert!(!screen.contains("Submitting..."));
    }

    #[tokio::test]
    async fn submit_button_reads_submitting_while_in_flight() {
        let mut a = app();
        seed_smoke_state(&mut a, "share");
        let pending = a.controller.begin_submit().unwrap();
        let screen = render(&a);
        assert!(screen.contains("Submitting..."));
        assert!(!screen.contains("Submit Information"));
        a.controller
            .finish_submit(&pending, Ok(ApiResponse::ok(serde_json::json!({}))));
    }

    #[tokio::test]
    async fn phone_keys_are_filtered_and_prefixed() {
        let (tx, _rx) = mpsc::channel();
        let mut a = app();
        seed_smoke_state(&mut a, "premium");
        open_share(&mut a);
        a.focus = Focus::Share(ShareFocus::Field(ContactField::Phone));

        handle_key(&mut a, KeyCode::Char('a'), &tx);
        assert_eq!(a.controller.dialog().unwrap().form().phone, "");

        for c in "98765".chars() {
            handle_key(&mut a, KeyCode::Char(c), &tx);
        }
        handle_key(&mut a, KeyCode::Char('-'), &tx);
        assert_eq!(a.controller.dialog().unwrap().form().phone, "+91 98765");
    }

    #[tokio::test]
    async fn keys_drive_share_dialog() {
        let (tx, _rx) = mpsc::channel();
        let mut a = app();
        seed_smoke_state(&mut a, "premium");

        handle_key(&mut a, KeyCode::Char('s'), &tx);
        assert!(a.controller.is_share_open());
        assert_eq!(a.focus, Focus::Share(ShareFocus::Field(ContactField::FullName)));

        for c in "Jane".chars() {
            handle_key(&mut a, KeyCode::Char(c), &tx);
        }
        handle_key(&mut a, KeyCode::Backspace, &tx);
        assert_eq!(a.controller.dialog().unwrap().form().full_name, "Jan");

        // Scrolling the page is refused while the dialog holds the lock.
        assert!(!a.controller.scroll_host().scroll_by(1));

        handle_key(&mut a, KeyCode::Esc, &tx);
        assert!(!a.controller.is_share_open());
        assert_eq!(a.focus, Focus::Page(PageButton::Share));
        assert!(a.controller.scroll_host().scroll_by(1));
    }

    #[tokio::test]
    async fn toggle_reveals_additional_fields_in_focus_order() {
        let (tx, _rx) = mpsc::channel();
        let mut a = app();
        seed_smoke_state(&mut a, "premium");
        open_share(&mut a);

        a.focus = Focus::Share(ShareFocus::Toggle);
        handle_key(&mut a, KeyCode::Enter, &tx);
        let order = share_focus_order(a.controller.dialog().unwrap());
        assert!(order.contains(&ShareFocus::Field(ContactField::BusinessName)));
        assert!(render(&a).contains("Hide Additional Details"));
    }

    #[tokio::test]
    async fn inactive_profile_cannot_open_share() {
        let (tx, _rx) = mpsc::channel();
        let mut a = app();
        seed_smoke_state(&mut a, "inactive");
        handle_key(&mut a, KeyCode::Enter, &tx);
        assert!(!a.controller.is_share_open());
        assert_eq!(a.focus, Focus::Page(PageButton::Share));
    }

    #[tokio::test]
    async fn toasts_render_in_corner() {
        let a = app();
        a.toasts.success("Connection successful! Your details have been shared.");
        assert!(render(&a).contains("Connection successful!"));
    }
}
