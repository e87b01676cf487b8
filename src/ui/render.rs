//! Render dispatch for the TUI.

use crate::app::{App, Content};
use crate::news::Rendered;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::loop_runner::SPINNER_FRAMES;
use super::{cards, status, tabs};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

const LOADING_MESSAGE: &str = "뉴스를 불러오는 중입니다...";

const SPINNER: [&str; SPINNER_FRAMES] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Draw the whole screen: header, tabs, main panel, status bar.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("창이 작음")
        } else {
            Paragraph::new(format!(
                "터미널 창이 너무 작습니다\n\n최소: {}x{}\n현재: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    tabs::render(f, app, chunks[1]);
    render_main(f, app, chunks[2]);
    status::render(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " 오늘의 뉴스",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.is_loading() {
        spans.push(Span::styled(
            format!("  {} 불러오는 중...", SPINNER[app.spinner_frame % SPINNER_FRAMES]),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_main(f: &mut Frame, app: &App, area: Rect) {
    if app.is_waiting_for_data() {
        let text = vec![Line::from(LOADING_MESSAGE)];
        render_centered(f, area, text, Style::default().fg(Color::Yellow));
        return;
    }

    match app.content() {
        Content::Feed(Rendered::Empty { lines }) => {
            let text = lines.iter().map(|line| Line::from(*line)).collect();
            render_centered(f, area, text, Style::default().fg(Color::Gray));
        }
        Content::Feed(Rendered::Cards(list)) => cards::render(f, app, list, area),
        Content::Error(message) => {
            let text = vec![Line::from(*message), Line::from(""), Line::from("[r] 다시 시도")];
            render_centered(f, area, text, Style::default().fg(Color::Red));
        }
    }
}

fn render_centered(f: &mut Frame, area: Rect, text: Vec<Line>, style: Style) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let height = text.len() as u16;
    let top = inner.y + inner.height.saturating_sub(height) / 2;
    let target = Rect::new(inner.x, top, inner.width, height.min(inner.height));
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).style(style),
        target,
    );
}
