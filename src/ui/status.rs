use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

const KEY_HINTS: &str = "[Tab/1-5]분류 [j/k]이동 [o]열기 [r]새로고침 [q]종료";

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = match &app.status_message {
        Some((msg, _)) => Cow::Borrowed(msg.as_ref()),
        None => Cow::Borrowed(KEY_HINTS),
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
