use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, FocusPane, InputMode, Picker, View};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global quit, any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.picker.is_some() {
        handle_picker_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    let Some(picker) = app.picker else { return };
    let len = picker.options().len();
    match key.code {
        KeyCode::Esc => app.close_picker(),
        KeyCode::Char('j') | KeyCode::Down => {
            let i = app.picker_state.selected().unwrap_or(0);
            app.picker_state.select(Some((i + 1).min(len.saturating_sub(1))));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let i = app.picker_state.selected().unwrap_or(0);
            app.picker_state.select(Some(i.saturating_sub(1)));
        }
        KeyCode::Enter => app.apply_picker(),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Edit the topic
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
            app.topic_cursor = app.topic_input.chars().count();
        }

        // Trigger depends on what is focused
        KeyCode::Enter => match app.focus {
            FocusPane::History => {
                if let Some(i) = app.history_state.selected() {
                    app.use_history_entry(i);
                }
            }
            FocusPane::Presets => {
                if let Some(i) = app.presets_state.selected() {
                    app.use_preset(i);
                }
            }
            FocusPane::Content => app.start_generate(),
        },

        // Focus cycles content -> history -> presets -> content
        KeyCode::Tab => {
            app.focus = match app.focus {
                FocusPane::Content => {
                    if app.history_state.selected().is_none() && !app.state.sf_history.is_empty() {
                        app.history_state.select(Some(0));
                    }
                    FocusPane::History
                }
                FocusPane::History => {
                    if app.presets_state.selected().is_none() {
                        app.presets_state.select(Some(0));
                    }
                    FocusPane::Presets
                }
                FocusPane::Presets => FocusPane::Content,
            };
        }

        // View tabs
        KeyCode::Char('1') => app.activate_view(View::Markdown),
        KeyCode::Char('2') => app.activate_view(View::Outline),

        // Navigation / scrolling
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            FocusPane::History => app.history_nav_down(),
            FocusPane::Presets => app.presets_nav_down(),
            FocusPane::Content => app.scroll_down(1),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            FocusPane::History => app.history_nav_up(),
            FocusPane::Presets => app.presets_nav_up(),
            FocusPane::Content => app.scroll_up(1),
        },
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }
        KeyCode::Char('g') => app.scroll_top(),
        KeyCode::Char('G') => app.scroll_bottom(),

        // Selectors
        KeyCode::Char('M') => app.open_picker(Picker::Model),
        KeyCode::Char('L') => app.open_picker(Picker::Length),
        KeyCode::Char('E') => app.open_picker(Picker::Experience),
        KeyCode::Char('c') => app.cycle_chart_kind(),

        // Theme
        KeyCode::Char('t') => app.toggle_theme(),

        // Share deep link
        KeyCode::Char('s') => {
            let url = app.share_url();
            if copy_to_clipboard(&url) {
                app.toast("Link copied");
            } else {
                app.toast("Copy failed");
            }
        }

        // Roadmap actions
        KeyCode::Char('y') => {
            if let Some(text) = app.roadmap_text() {
                copy_to_clipboard(text);
            }
        }
        KeyCode::Char('D') => app.download_markdown(),
        KeyCode::Char('x') => app.clear_output(),

        KeyCode::Char('C') => app.clear_history(),

        _ => {}
    }
}

fn handle_editing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.show_suggestions {
                app.hide_suggestions();
            } else {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Enter => {
            if app.show_suggestions {
                if let Some(i) = app.suggestion_state.selected() {
                    app.accept_suggestion(i);
                    return;
                }
            }
            app.input_mode = InputMode::Normal;
            app.start_generate();
        }
        KeyCode::Down => {
            if app.show_suggestions {
                app.suggestions_nav_down();
            }
        }
        KeyCode::Up => {
            if app.show_suggestions {
                app.suggestions_nav_up();
            }
        }
        KeyCode::Backspace => {
            if app.topic_cursor > 0 {
                app.topic_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.topic_input, app.topic_cursor);
                app.topic_input.remove(byte_pos);
                app.update_suggestions();
            }
        }
        KeyCode::Delete => {
            let char_count = app.topic_input.chars().count();
            if app.topic_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.topic_input, app.topic_cursor);
                app.topic_input.remove(byte_pos);
                app.update_suggestions();
            }
        }
        KeyCode::Left => {
            app.topic_cursor = app.topic_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.topic_input.chars().count();
            app.topic_cursor = (app.topic_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.topic_cursor = 0;
        }
        KeyCode::End => {
            app.topic_cursor = app.topic_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.topic_input, app.topic_cursor);
            app.topic_input.insert(byte_pos, c);
            app.topic_cursor += 1;
            app.update_suggestions();
        }
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Row index inside a bordered list block, if the point falls on an entry.
fn list_row(x: u16, y: u16, area: Option<Rect>, len: usize) -> Option<usize> {
    let rect = area?;
    if !point_in_rect(x, y, rect) || y <= rect.y {
        return None;
    }
    let index = (y - rect.y - 1) as usize;
    (index < len).then_some(index)
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_content = app.content_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_history = app.history_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_presets = app.presets_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_input = app.input_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_suggestions = app.suggestions_area.is_some_and(|r| point_in_rect(x, y, r));

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_content {
                app.scroll_down(3);
            } else if in_history {
                app.history_nav_down();
            } else if in_presets {
                app.presets_nav_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_content {
                app.scroll_up(3);
            } else if in_history {
                app.history_nav_up();
            } else if in_presets {
                app.presets_nav_up();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if app.picker.is_some() {
                return;
            }

            // The popup overlays everything else, so resolve it first.
            if app.show_suggestions && in_suggestions {
                if let Some(i) = list_row(x, y, app.suggestions_area, app.suggestions.len()) {
                    app.accept_suggestion(i);
                }
                return;
            }
            // Clicking anywhere but the input or the popup dismisses it.
            if app.show_suggestions && !in_input {
                app.hide_suggestions();
            }

            if in_input {
                app.input_mode = InputMode::Editing;
                app.topic_cursor = app.topic_input.chars().count();
            } else if app.tab_markdown_area.is_some_and(|r| point_in_rect(x, y, r)) {
                app.activate_view(View::Markdown);
            } else if app.tab_outline_area.is_some_and(|r| point_in_rect(x, y, r)) {
                app.activate_view(View::Outline);
            } else if in_history {
                if let Some(i) = list_row(x, y, app.history_area, app.state.sf_history.len()) {
                    app.focus = FocusPane::History;
                    app.history_state.select(Some(i));
                    app.use_history_entry(i);
                }
            } else if in_presets {
                if let Some(i) =
                    list_row(x, y, app.presets_area, crate::insights::PRESET_TOPICS.len())
                {
                    app.focus = FocusPane::Presets;
                    app.presets_state.select(Some(i));
                    app.use_preset(i);
                }
            }
        }
        _ => {}
    }
}

/// Pipe text into the first clipboard utility that works.
fn copy_to_clipboard(text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let candidates: [&[&str]; 3] = [
        &["pbcopy"],
        &["wl-copy"],
        &["xclip", "-selection", "clipboard"],
    ];
    for argv in candidates {
        let spawned = Command::new(argv[0])
            .args(&argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let Ok(mut child) = spawned else { continue };
        if let Some(mut stdin) = child.stdin.take() {
            if stdin.write_all(text.as_bytes()).is_err() {
                let _ = child.wait();
                continue;
            }
        }
        if child.wait().map(|status| status.success()).unwrap_or(false) {
            return true;
        }
    }
    false
}
