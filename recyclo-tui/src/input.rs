use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recyclo_core::model::RecyclingCenter;

use crate::app::{App, Modal, SearchRequest};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Send a nearby search for the new generation
    Search(SearchRequest),
    /// Open the platform map app with directions to this center
    Directions(RecyclingCenter),
}

impl From<Option<SearchRequest>> for Action {
    fn from(request: Option<SearchRequest>) -> Self {
        request.map_or(Action::None, Action::Search)
    }
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Up};

    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // The search box swallows every other key
    if app.search.is_dialog_open() {
        return match key.code {
            Enter => app.submit_search().into(),
            Esc => app.close_search().into(),
            Backspace => {
                app.search.pop_char();
                Action::None
            }
            Char(character)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                app.search.push_char(character);
                Action::None
            }
            _ => Action::None,
        };
    }

    match app.modal {
        Some(Modal::Filter) => {
            if matches!(key.code, Esc | Enter | Char('f' | 'q')) {
                app.modal = None;
            }
            Action::None
        }

        Some(Modal::Detail(_)) => match key.code {
            Esc | Char('q' | 'b') => {
                app.modal = None;
                Action::None
            }
            Char('m') => {
                app.expanded.toggle();
                Action::None
            }
            Char('d') => app
                .detail_center()
                .cloned()
                .map_or(Action::None, Action::Directions),
            _ => Action::None,
        },

        None => match key.code {
            Char('q') if key.modifiers.is_empty() => Action::Quit,
            Up | Char('k') => {
                app.select_previous();
                Action::None
            }
            Down | Char('j') => {
                app.select_next();
                Action::None
            }
            Enter | Char(' ') => {
                app.open_selected();
                Action::None
            }
            Char('/' | 's') => {
                app.open_search();
                Action::None
            }
            Char('f') => {
                app.modal = Some(Modal::Filter);
                Action::None
            }
            Char('x') => app.clear_search().into(),
            _ => Action::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;
    use recyclo_core::model::{Coordinates, PlaceId, PlaceSummary, Region};

    use super::*;
    use crate::app::AppEvent;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn located_app() -> App {
        let mut app = App::new(None);
        app.handle_event(AppEvent::Located(Ok(Some(Region::around(Coordinates::new(1.0, 2.0))))));
        app
    }

    /// Located app with one center loaded and its detail view open.
    fn detail_app() -> App {
        let mut app = located_app();
        let generation = app.centers.begin_search();
        app.handle_event(AppEvent::SearchDone {
            generation,
            result: Ok(vec![PlaceSummary {
                id: PlaceId::from("yard"),
                name: "City Yard".to_owned(),
                location: Coordinates::new(1.01, 2.01),
                vicinity: None,
            }]),
        });
        app.open_selected();
        app
    }

    #[test]
    fn test_typing_q_in_search_box_does_not_quit() {
        let mut app = located_app();
        handle_key_event(press(KeyCode::Char('/')), &mut app);
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &mut app), Action::None);
        assert_eq!(app.search.draft(), "q");
    }

    #[test]
    fn test_enter_in_search_box_submits() {
        let mut app = located_app();
        handle_key_event(press(KeyCode::Char('/')), &mut app);
        for character in "oil".chars() {
            handle_key_event(press(KeyCode::Char(character)), &mut app);
        }
        let action = handle_key_event(press(KeyCode::Enter), &mut app);
        assert!(matches!(action, Action::Search(ref request) if request.keyword == "oil"));
        assert!(!app.search.is_dialog_open());
    }

    #[test]
    fn test_escape_on_empty_search_box_clears() {
        let mut app = located_app();
        handle_key_event(press(KeyCode::Char('s')), &mut app);
        let action = handle_key_event(press(KeyCode::Esc), &mut app);
        assert!(matches!(action, Action::Search(ref request) if request.keyword.is_empty()));
    }

    #[test]
    fn test_filter_dialog_opens_and_closes() {
        let mut app = located_app();
        handle_key_event(press(KeyCode::Char('f')), &mut app);
        assert_eq!(app.modal, Some(Modal::Filter));
        handle_key_event(press(KeyCode::Esc), &mut app);
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = located_app();
        app.open_search();
        let key = KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(handle_key_event(key, &mut app), Action::Quit);
    }

    #[test]
    fn test_m_flips_description_once_per_press() {
        let mut app = detail_app();
        assert!(!app.expanded.is_expanded());

        assert_eq!(handle_key_event(press(KeyCode::Char('m')), &mut app), Action::None);
        assert!(app.expanded.is_expanded());

        handle_key_event(press(KeyCode::Char('m')), &mut app);
        assert!(!app.expanded.is_expanded());
    }

    #[test]
    fn test_d_hands_open_center_to_directions() {
        let mut app = detail_app();
        let action = handle_key_event(press(KeyCode::Char('d')), &mut app);
        assert!(matches!(action, Action::Directions(ref center) if center.id == PlaceId::from("yard")));
        assert!(matches!(app.modal, Some(Modal::Detail(_))));
    }

    #[test]
    fn test_d_without_detail_view_does_nothing() {
        let mut app = located_app();
        assert_eq!(handle_key_event(press(KeyCode::Char('d')), &mut app), Action::None);
    }

    #[test]
    fn test_x_clears_committed_keyword_and_searches() {
        let mut app = located_app();
        handle_key_event(press(KeyCode::Char('/')), &mut app);
        for character in "tyres".chars() {
            handle_key_event(press(KeyCode::Char(character)), &mut app);
        }
        handle_key_event(press(KeyCode::Enter), &mut app);
        assert_eq!(app.search.committed(), "tyres");

        let action = handle_key_event(press(KeyCode::Char('x')), &mut app);
        assert!(matches!(
            action,
            Action::Search(ref request)
                if request.keyword.is_empty() && request.generation == app.centers.generation()
        ));
        assert_eq!(app.search.committed(), "");
    }
}
