//! Headless terminal UI for the vision self-test.
//!
//! Layout:
//! - Centered window titled "Vision Self-Test"
//! - Left banner panel with an ASCII eye chart
//! - Main content panel showing the active stage (Snellen, Duochrome, Result)
//! - Bottom button row: [ Next | Submit | Finish ] [ Quit ]. There is no Back button.
//! - Modal confirmation before quitting
//!
//! The pages are views over a [`FormFlowController`] bound to a [`MemorySurface`]; the page
//! shown is the stage whose container the controller left visible.
//!
//! Note: Logging is file-only in TUI mode (stdout logging is disabled) to avoid corrupting the
//! terminal UI.

use crate::config::ChoiceOptions;
use crate::flow::FormFlowController;
use crate::models::form::{FieldId, Stage, SubmitEvent};
use crate::models::markup::{FormSurface, Markup, MemorySurface};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{error, info};
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

const EYE_CHART: &str = r#"
         E

        F P

       T O Z

      L P E D

     P E C F D

    E D F C Z P

   F E L O P Z D
"#;

const PLACEHOLDER: &str = "-- Select --";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonFocus {
    Primary,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Field(usize),
    Button(ButtonFocus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    /// `confirm` is true while "Yes, quit" is focused.
    ConfirmQuit { confirm: bool },
}

/// A select input: a placeholder (empty value) followed by the configured options.
#[derive(Debug, Clone)]
struct Select {
    options: Vec<String>,
    selected: Option<usize>,
}

impl Select {
    fn new(options: &[String]) -> Self {
        Self {
            options: options.to_vec(),
            selected: None,
        }
    }

    fn value(&self) -> &str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn display(&self) -> &str {
        match self.value() {
            "" => PLACEHOLDER,
            v => v,
        }
    }

    /// Step through placeholder + options, wrapping at both ends.
    fn cycle(&mut self, forward: bool) {
        let n = self.options.len();
        if n == 0 {
            return;
        }
        self.selected = match (self.selected, forward) {
            (None, true) => Some(0),
            (None, false) => Some(n - 1),
            (Some(i), true) if i + 1 < n => Some(i + 1),
            (Some(_), true) => None,
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }
}

struct WizardState {
    flow: FormFlowController<MemorySurface>,
    right_eye: Select,
    left_eye: Select,
    duochrome: Select,
    focus: FocusTarget,
    modal: Option<Modal>,
    quit: bool,
}

impl WizardState {
    fn new(options: &ChoiceOptions) -> Result<Self> {
        let markup = Markup::default();
        let surface = MemorySurface::from_markup(&markup);
        let flow = FormFlowController::new(markup, surface)?;
        Ok(Self {
            flow,
            right_eye: Select::new(&options.snellen),
            left_eye: Select::new(&options.snellen),
            duochrome: Select::new(&options.duochrome),
            focus: FocusTarget::Field(0),
            modal: None,
            quit: false,
        })
    }

    /// Stage whose container is currently shown.
    fn visible_stage(&self) -> Stage {
        let surface = self.flow.surface();
        let markup = self.flow.markup();
        Stage::ALL
            .into_iter()
            .find(|s| !surface.is_hidden(markup.stage_container(*s)))
            .unwrap_or_else(|| self.flow.stage())
    }

    fn select_for(&self, field: FieldId) -> &Select {
        match field {
            FieldId::RightEye => &self.right_eye,
            FieldId::LeftEye => &self.left_eye,
            FieldId::Duochrome => &self.duochrome,
        }
    }

    fn select_for_mut(&mut self, field: FieldId) -> &mut Select {
        match field {
            FieldId::RightEye => &mut self.right_eye,
            FieldId::LeftEye => &mut self.left_eye,
            FieldId::Duochrome => &mut self.duochrome,
        }
    }

    fn focus_order(&self) -> Vec<FocusTarget> {
        let mut order: Vec<FocusTarget> = (0..self.flow.stage().fields().len())
            .map(FocusTarget::Field)
            .collect();
        order.push(FocusTarget::Button(ButtonFocus::Primary));
        order.push(FocusTarget::Button(ButtonFocus::Quit));
        order
    }

    fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = order.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.focus = order[next];
    }

    fn focused_field(&self) -> Option<FieldId> {
        match self.focus {
            FocusTarget::Field(i) => self.flow.stage().fields().get(i).copied(),
            FocusTarget::Button(_) => None,
        }
    }

    /// Select option `index` (clamped to the list) and write it to the form.
    fn choose(&mut self, field: FieldId, index: usize) {
        let select = self.select_for_mut(field);
        let Some(last) = select.options.len().checked_sub(1) else {
            return;
        };
        select.selected = Some(index.min(last));
        let value = select.value().to_string();
        self.flow.select(field, &value);
    }

    fn cycle_focused(&mut self, forward: bool) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let select = self.select_for_mut(field);
        select.cycle(forward);
        let value = select.value().to_string();
        self.flow.select(field, &value);
    }

    fn activate_primary(&mut self) {
        match self.flow.stage() {
            Stage::Snellen => match self.flow.advance() {
                Ok(true) => self.focus = FocusTarget::Field(0),
                Ok(false) => self.focus_first_annotated(),
                Err(e) => error!("[PHASE: tui] [STEP: next] {}", e),
            },
            Stage::Duochrome => {
                let mut ev = SubmitEvent::new();
                match self.flow.submit(&mut ev) {
                    Ok(true) => self.focus = FocusTarget::Button(ButtonFocus::Primary),
                    Ok(false) => self.focus_first_annotated(),
                    Err(e) => error!("[PHASE: tui] [STEP: submit] {}", e),
                }
            }
            Stage::Result => {
                info!("[PHASE: tui] [STEP: finish] Self-test finished");
                self.quit = true;
            }
        }
    }

    fn focus_first_annotated(&mut self) {
        let fields = self.flow.stage().fields();
        if let Some(i) = fields
            .iter()
            .position(|f| self.flow.annotation(*f).map(|a| a.visible).unwrap_or(false))
        {
            self.focus = FocusTarget::Field(i);
        }
    }
}

fn primary_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Snellen => "Next",
        Stage::Duochrome => "Submit",
        Stage::Result => "Finish",
    }
}

pub fn run(options: &ChoiceOptions) -> Result<()> {
    info!("[PHASE: tui] [STEP: start] Starting self-test wizard");

    let mut state = WizardState::new(options)?;
    install_panic_restore();
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut state);
    restore_terminal(&mut terminal)?;

    if let Some(snapshot) = state.flow.snapshot() {
        info!(
            "[PHASE: tui] [STEP: result] right_eye={} left_eye={} duochrome={}",
            snapshot.right_eye, snapshot.left_eye, snapshot.duochrome
        );
    }
    result
}

fn new_smoke_wizard_state(target: &str, options: &ChoiceOptions) -> Result<WizardState> {
    // Seeded through the controller itself so every page is reached by real transitions.
    let mut state = WizardState::new(options)?;
    state.focus = FocusTarget::Button(ButtonFocus::Primary);

    match target {
        "invalid" => {
            state.activate_primary();
        }
        "duochrome" | "result" => {
            state.choose(FieldId::RightEye, 6);
            state.choose(FieldId::LeftEye, 5);
            state.activate_primary();

            if target == "result" {
                state.choose(FieldId::Duochrome, 0);
                state.activate_primary();
            }
        }
        _ => {
            // default: snellen
        }
    }

    Ok(state)
}

/// Non-interactive smoke mode: render a single frame and return it as text.
/// Target pages: snellen|duochrome|result|invalid
pub fn smoke(target: &str, options: &ChoiceOptions) -> Result<String> {
    info!(
        "[PHASE: tui] [STEP: smoke] Rendering single-frame TUI smoke target={}",
        target
    );

    let t = target.trim().to_ascii_lowercase();
    let state = new_smoke_wizard_state(t.as_str(), options)?;

    // In-memory backend: no raw mode, no alternate screen.
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f.size(), f, &state))?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

fn buffer_to_string(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.area.height {
        let mut line = String::new();
        for x in 0..buf.area.width {
            line.push_str(buf.get(buf.area.x + x, buf.area.y + y).symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    leave_raw_mode_on_error(|| {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    })
}

/// Run a setup step that follows `enable_raw_mode`; on failure raw mode is switched off again
/// before the error is returned.
fn leave_raw_mode_on_error<T>(step: impl FnOnce() -> io::Result<T>) -> Result<T> {
    step().map_err(|e| {
        if let Err(restore) = disable_raw_mode() {
            error!(
                "[PHASE: tui] [STEP: setup] Failed to disable raw mode: {}",
                restore
            );
        }
        anyhow::Error::from(e)
    })
}

/// Restore the terminal before the default panic report, so a panic inside the event loop
/// does not leave the shell in raw mode on the alternate screen.
fn install_panic_restore() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        default_hook(info);
    }));
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut WizardState,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    while !state.quit {
        terminal.draw(|f| draw(f.size(), f, state))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Windows terminals report both press and release.
                if key.kind == KeyEventKind::Press {
                    handle_key(state, key.code);
                }
            }
        }
    }

    Ok(())
}

fn handle_key(state: &mut WizardState, code: KeyCode) {
    if let Some(Modal::ConfirmQuit { confirm }) = state.modal {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                state.modal = Some(Modal::ConfirmQuit { confirm: !confirm });
            }
            KeyCode::Enter => {
                state.modal = None;
                if confirm {
                    info!("[PHASE: tui] [STEP: quit] Self-test abandoned by user");
                    state.quit = true;
                }
            }
            KeyCode::Esc => state.modal = None,
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Esc => state.modal = Some(Modal::ConfirmQuit { confirm: false }),
        KeyCode::Tab | KeyCode::Down => state.move_focus(true),
        KeyCode::BackTab | KeyCode::Up => state.move_focus(false),
        KeyCode::Left | KeyCode::Right => {
            let forward = code == KeyCode::Right;
            match state.focus {
                FocusTarget::Field(_) => state.cycle_focused(forward),
                FocusTarget::Button(ButtonFocus::Primary) => {
                    state.focus = FocusTarget::Button(ButtonFocus::Quit)
                }
                FocusTarget::Button(ButtonFocus::Quit) => {
                    state.focus = FocusTarget::Button(ButtonFocus::Primary)
                }
            }
        }
        KeyCode::Enter => match state.focus {
            FocusTarget::Field(_) => state.move_focus(true),
            FocusTarget::Button(ButtonFocus::Primary) => state.activate_primary(),
            FocusTarget::Button(ButtonFocus::Quit) => {
                state.modal = Some(Modal::ConfirmQuit { confirm: false })
            }
        },
        _ => {}
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame<'_>, state: &WizardState) {
    let window_area = centered_window(area, 100, 30);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Vision Self-Test");
    f.render_widget(outer_block, window_area);

    // Inner layout: banner + content + buttons row
    let inner = window_area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(inner);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)].as_ref())
        .split(rows[0]);

    let banner = Paragraph::new(EYE_CHART)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(banner, cols[0]);

    let stage = state.visible_stage();
    let content = Paragraph::new(page_text(state, stage))
        .block(Block::default().borders(Borders::ALL).title(stage.title()))
        .wrap(Wrap { trim: false });
    f.render_widget(content, cols[1]);

    draw_buttons(f, rows[1], state, stage);

    if let Some(Modal::ConfirmQuit { confirm }) = state.modal {
        draw_quit_modal(f, window_area, confirm);
    }
}

fn page_text(state: &WizardState, stage: Stage) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    match stage {
        Stage::Snellen => {
            lines.push(Line::from("Stand 6 metres from the chart and cover one eye at a time."));
            lines.push(Line::from("Pick the smallest line you can read with each eye."));
            lines.push(Line::from(""));
        }
        Stage::Duochrome => {
            lines.push(Line::from("Look at the letters on the red and on the green half."));
            lines.push(Line::from("Which side looks sharper?"));
            lines.push(Line::from(""));
        }
        Stage::Result => {
            let surface = state.flow.surface();
            let m = state.flow.markup();
            let rows = [
                ("Right eye:", m.result_right_eye.as_str()),
                ("Left eye:", m.result_left_eye.as_str()),
                ("Duochrome:", m.result_duochrome.as_str()),
            ];
            for (label, id) in rows {
                let value = surface.text(id).unwrap_or_default();
                lines.push(Line::from(format!("{:<11} {}", label, value)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from("This self-test is not a substitute for an eye examination."));
            return Text::from(lines);
        }
    }

    for (i, field) in stage.fields().iter().enumerate() {
        let select = state.select_for(*field);
        let focused = state.focus == FocusTarget::Field(i);
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{:<11}", format!("{}:", field.label()))),
            Span::styled(format!("< {} >", select.display()), style),
        ]));
        if let Some(a) = state.flow.annotation(*field).filter(|a| a.visible) {
            lines.push(Line::from(Span::styled(
                format!("           {}", a.message),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(
        "Left/Right change selection, Tab/Up/Down move, Enter activates.",
    ));
    Text::from(lines)
}

fn centered_window(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2)).max(60).min(area.width);
    let h = height.min(area.height.saturating_sub(2)).max(20).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

fn draw_buttons(f: &mut ratatui::Frame<'_>, area: Rect, state: &WizardState, stage: Stage) {
    let primary = button_text(
        primary_label(stage),
        state.focus == FocusTarget::Button(ButtonFocus::Primary),
    );
    let quit = button_text(
        "Quit",
        state.focus == FocusTarget::Button(ButtonFocus::Quit),
    );
    let line = Line::from(vec![primary, Span::raw(" "), quit]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn button_text(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    Span::styled(format!("[ {} ]", label), style)
}

fn draw_quit_modal(f: &mut ratatui::Frame<'_>, window_area: Rect, confirm: bool) {
    // Never wider or taller than the window, even on tiny terminals.
    let modal_w = 50u16
        .min(window_area.width.saturating_sub(4))
        .max(40)
        .min(window_area.width);
    let modal_h = 7u16.min(window_area.height);
    let x = window_area.x + (window_area.width.saturating_sub(modal_w)) / 2;
    let y = window_area.y + (window_area.height.saturating_sub(modal_h)) / 2;
    let area = Rect {
        x,
        y,
        width: modal_w,
        height: modal_h,
    };

    f.render_widget(Clear, area);
    let body = Paragraph::new(Text::from(vec![
        Line::from("Your answers will be discarded."),
        Line::from(""),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Quit self-test?"))
    .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    // Buttons: [ Yes, quit ] [ No ] (safe choice on the right)
    let buttons_area = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(2),
        height: area.height.min(1),
    };
    let line = Line::from(vec![
        button_text("Yes, quit", confirm),
        Span::raw(" "),
        button_text("No", !confirm),
    ]);
    let p = Paragraph::new(Text::from(line)).alignment(Alignment::Right);
    f.render_widget(p, buttons_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::MISSING_SELECTION_MESSAGE;

    fn state() -> WizardState {
        WizardState::new(&ChoiceOptions::default()).expect("wizard state")
    }

    fn render(state: &WizardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|f| draw(f.size(), f, state))
            .expect("draw frame");
        buffer_to_string(terminal.backend().buffer())
    }

    fn press(state: &mut WizardState, keys: &[KeyCode]) {
        for k in keys {
            handle_key(state, *k);
        }
    }

    #[test]
    fn select_cycles_through_placeholder() {
        let opts = vec!["6/9".to_string(), "6/6".to_string()];
        let mut s = Select::new(&opts);
        assert_eq!(s.value(), "");
        assert_eq!(s.display(), PLACEHOLDER);
        s.cycle(true);
        assert_eq!(s.value(), "6/9");
        s.cycle(true);
        assert_eq!(s.value(), "6/6");
        s.cycle(true);
        assert_eq!(s.value(), "");
        s.cycle(false);
        assert_eq!(s.value(), "6/6");
    }

    #[test]
    fn keyboard_walkthrough_reaches_result() {
        let mut st = state();
        // Right eye: 6/6 is the 7th option.
        press(&mut st, &[KeyCode::Right; 7]);
        assert_eq!(st.right_eye.value(), "6/6");
        press(&mut st, &[KeyCode::Down]);
        press(&mut st, &[KeyCode::Right; 6]);
        assert_eq!(st.left_eye.value(), "6/9");
        press(&mut st, &[KeyCode::Tab, KeyCode::Enter]);

        assert_eq!(st.flow.stage(), Stage::Duochrome);
        assert_eq!(st.focus, FocusTarget::Field(0));
        assert_eq!(st.flow.surface().value("hidden_right_eye"), Some("6/6"));
        assert_eq!(st.flow.surface().value("hidden_left_eye"), Some("6/9"));

        press(&mut st, &[KeyCode::Right, KeyCode::Enter, KeyCode::Enter]);
        assert_eq!(st.flow.stage(), Stage::Result);
        let snap = st.flow.snapshot().expect("snapshot");
        assert_eq!(snap.right_eye, "6/6");
        assert_eq!(snap.left_eye, "6/9");
        assert_eq!(snap.duochrome, "Red clearer");

        let frame = render(&st);
        assert!(frame.contains("Right eye:  6/6"), "{}", frame);
        assert!(frame.contains("Duochrome:  Red clearer"), "{}", frame);
        assert!(frame.contains("[ Finish ]"));

        press(&mut st, &[KeyCode::Enter]);
        assert!(st.quit);
    }

    #[test]
    fn next_without_selection_shows_annotations() {
        let mut st = state();
        press(&mut st, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Enter]);
        assert_eq!(st.flow.stage(), Stage::Snellen);
        // Focus jumps back to the first field needing a selection.
        assert_eq!(st.focus, FocusTarget::Field(0));

        let frame = render(&st);
        assert_eq!(frame.matches(MISSING_SELECTION_MESSAGE).count(), 2, "{}", frame);

        // Select the right eye only and retry.
        press(&mut st, &[KeyCode::Right, KeyCode::Tab, KeyCode::Tab, KeyCode::Enter]);
        assert_eq!(st.flow.stage(), Stage::Snellen);
        assert_eq!(st.focus, FocusTarget::Field(1));
        let frame = render(&st);
        assert_eq!(frame.matches(MISSING_SELECTION_MESSAGE).count(), 1, "{}", frame);
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut st = state();
        press(&mut st, &[KeyCode::Esc]);
        assert_eq!(st.modal, Some(Modal::ConfirmQuit { confirm: false }));
        assert!(render(&st).contains("Quit self-test?"));

        press(&mut st, &[KeyCode::Enter]);
        assert_eq!(st.modal, None);
        assert!(!st.quit);

        press(&mut st, &[KeyCode::Esc, KeyCode::Left, KeyCode::Enter]);
        assert!(st.quit);
    }

    #[test]
    fn quit_modal_fits_a_narrow_terminal() {
        let mut st = state();
        press(&mut st, &[KeyCode::Esc]);
        let mut terminal = Terminal::new(TestBackend::new(30, 12)).expect("terminal");
        terminal
            .draw(|f| draw(f.size(), f, &st))
            .expect("draw frame");
        let frame = buffer_to_string(terminal.backend().buffer());
        assert!(frame.contains("Quit self-test?"), "{}", frame);
    }

    #[test]
    fn failed_setup_step_returns_its_error() {
        let err = leave_raw_mode_on_error::<()>(|| {
            Err(io::Error::new(io::ErrorKind::Other, "no alternate screen"))
        })
        .expect_err("setup step fails");
        assert!(err.to_string().contains("no alternate screen"));

        let ok = leave_raw_mode_on_error(|| Ok(7)).expect("setup step succeeds");
        assert_eq!(ok, 7);
    }

    #[test]
    fn focus_order_has_no_back_button() {
        let st = state();
        assert_eq!(
            st.focus_order(),
            vec![
                FocusTarget::Field(0),
                FocusTarget::Field(1),
                FocusTarget::Button(ButtonFocus::Primary),
                FocusTarget::Button(ButtonFocus::Quit),
            ]
        );
    }

    #[test]
    fn smoke_renders_each_page() {
        let opts = ChoiceOptions::default();

        let snellen = smoke("snellen", &opts).expect("snellen");
        assert!(snellen.contains("Snellen Chart"));
        assert!(snellen.contains("[ Next ]"));
        assert!(snellen.contains(PLACEHOLDER));

        let invalid = smoke("invalid", &opts).expect("invalid");
        assert!(invalid.contains(MISSING_SELECTION_MESSAGE));

        let duochrome = smoke("duochrome", &opts).expect("duochrome");
        assert!(duochrome.contains("Duochrome Test"));
        assert!(duochrome.contains("[ Submit ]"));

        let result = smoke("RESULT", &opts).expect("result");
        assert!(result.contains("Your Results"));
        assert!(result.contains("Right eye:  6/6"), "{}", result);
        assert!(result.contains("Left eye:   6/9"), "{}", result);
        assert!(result.contains("Duochrome:  Red clearer"), "{}", result);
    }
}
