//! Keyboard input handling.

use crate::app::{App, AppEvent};
use crate::news::NewsRepository;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{open_selected_link, spawn_news_load};
use super::Action;

/// Map a key press to a controller transition.
///
/// | Key                     | Effect                         |
/// |-------------------------|--------------------------------|
/// | `q`, `Esc`, `Ctrl+C`    | quit                           |
/// | `Tab`, `l`, `→`         | next category tab              |
/// | `Shift+Tab`, `h`, `←`   | previous category tab          |
/// | `1`–`5`                 | jump to tab                    |
/// | `j`, `↓` / `k`, `↑`     | move card selection            |
/// | `Enter`, `o`            | open article in browser        |
/// | `r`                     | reload from the store          |
pub(super) fn handle_input(
    app: &mut App,
    key: KeyEvent,
    repository: &NewsRepository,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Continue;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit
        }
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_tab(),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(digit) = c.to_digit(10) {
                app.select_tab(digit as usize - 1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.nav_down(),
        KeyCode::Up | KeyCode::Char('k') => app.nav_up(),
        KeyCode::Enter | KeyCode::Char('o') => open_selected_link(app),
        KeyCode::Char('r') => {
            if app.is_loading() {
                app.set_status("이미 불러오는 중입니다...");
            } else {
                spawn_news_load(app, repository, event_tx);
            }
        }
        _ => {}
    }

    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::Selection;
    use crate::store::{Category, MemoryStore};
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fixture() -> (App, NewsRepository, mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
        let repository = NewsRepository::new(Arc::new(MemoryStore::default()));
        let (tx, rx) = mpsc::channel(4);
        (App::new(), repository, tx, rx)
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, repo, tx, _rx) = fixture();
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert!(matches!(handle_input(&mut app, key, &repo, &tx), Action::Quit));
        }
    }

    #[tokio::test]
    async fn test_tab_keys() {
        let (mut app, repo, tx, _rx) = fixture();

        handle_input(&mut app, press(KeyCode::Char('3')), &repo, &tx);
        assert_eq!(
            app.view_state().current_category,
            Selection::Only(Category::Stock)
        );

        handle_input(&mut app, press(KeyCode::Tab), &repo, &tx);
        assert_eq!(
            app.view_state().current_category,
            Selection::Only(Category::Economy)
        );

        handle_input(&mut app, press(KeyCode::Left), &repo, &tx);
        handle_input(&mut app, press(KeyCode::Left), &repo, &tx);
        assert_eq!(
            app.view_state().current_category,
            Selection::Only(Category::RealEstate)
        );
    }

    #[tokio::test]
    async fn test_reload_key_starts_load() {
        let (mut app, repo, tx, mut rx) = fixture();

        handle_input(&mut app, press(KeyCode::Char('r')), &repo, &tx);
        assert!(app.is_loading());

        handle_input(&mut app, press(KeyCode::Char('r')), &repo, &tx);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "이미 불러오는 중입니다...");

        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_release_events_ignored() {
        let (mut app, repo, tx, _rx) = fixture();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(matches!(handle_input(&mut app, key, &repo, &tx), Action::Continue));
    }
}
