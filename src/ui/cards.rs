use crate::app::App;
use crate::news::Card;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the card list panel.
pub fn render(f: &mut Frame, app: &App, cards: &[Card], area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    // Borders take two columns
    let width = area.width.saturating_sub(2) as usize;
    let dim = Style::default().fg(Color::DarkGray);

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            let heading = format!("[{}] {}", card.label, card.title);

            let mut meta = card.source.clone();
            if let Some(date) = &card.date {
                meta.push_str(" · ");
                meta.push_str(date);
            }

            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_to_width(&heading, width).into_owned(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(truncate_to_width(&card.summary, width).into_owned()),
                Line::from(Span::styled(
                    truncate_to_width(&meta, width).into_owned(),
                    dim,
                )),
                Line::from(Span::styled(
                    truncate_to_width(&card.image, width).into_owned(),
                    dim,
                )),
                Line::from(""),
            ])
        })
        .collect();

    let title = format!("{} ({})", app.view_state().current_category.label(), cards.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let selected = app.selected_card.min(cards.len().saturating_sub(1));
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
