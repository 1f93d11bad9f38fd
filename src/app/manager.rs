//! Bytemark manager: pick a hyperpath file, then reorder, duplicate,
//! delete, send, and save its records.
//!
//! All list mutations run on the in-memory record list; nothing touches
//! the file until the user confirms a save, which re-encodes the list and
//! rewrites the file in full.

use super::{is_quit, style, App, View};
use crate::bytemark::{self, Bytemark};
use crate::output::{self, OutputTarget};
use crate::urlmode;
use crate::{hyperpaths, ops};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span, Text};
use std::path::Path;

/// Read and decode one hyperpath file into the manager state.
fn open_hyperpath(app: &mut App, index: usize) -> Result<()> {
    let path = app.hyperpaths.hyperpaths[index].clone();
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            app.prompt.set(format!("Error opening hyperpath[{index}]: {e}"), &["Continue"]);
            app.view = View::ArticlesAdded;
            return Ok(());
        }
    };
    match bytemark::tables_to_bytemarks(&content) {
        Ok(records) => {
            app.manager.bytemarks = records;
            app.manager.hyperpath = path;
            app.manager.others = app
                .hyperpaths
                .hyperpaths
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(i, p)| (i, p.clone()))
                .collect();
            app.manager.cursor = 0;
            app.manager.move_mode = false;
            app.view = View::Manager;
        }
        Err(e) => {
            tracing::error!(path, "corrupt bytemark file: {e}");
            app.prompt.set(format!("Corrupt bytemark file {path}: {e}"), &["Continue"]);
            app.view = View::ArticlesAdded;
        }
    }
    Ok(())
}

/// Hyperpath file picker.
pub fn update_files(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.hyperpaths.cursor = app.hyperpaths.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.hyperpaths.cursor + 1 < app.hyperpaths.hyperpaths.len() {
                app.hyperpaths.cursor += 1;
            }
        }
        KeyCode::Enter => {
            let index = app.hyperpaths.cursor;
            if index < app.hyperpaths.hyperpaths.len() {
                open_hyperpath(app, index)?;
            }
        }
        KeyCode::Esc => app.view = View::Start,
        _ => {}
    }
    Ok(())
}

pub fn files_view(app: &App) -> Text<'static> {
    let state = &app.hyperpaths;
    let mut lines = vec![
        Line::from(""),
        Line::from(format!(
            "hyperpath[{}]: Manage bytemarks (enter)",
            state.cursor
        )),
        Line::from(""),
    ];
    for (i, hyperpath) in state.hyperpaths.iter().enumerate() {
        if i == state.cursor {
            lines.push(Line::from(vec![
                Span::raw(style::CURSOR),
                Span::styled(format!("{i}: "), style::number()),
                Span::styled(hyperpath.clone(), style::highlight()),
            ]));
        } else {
            lines.push(Line::from(format!("{i}: {hyperpath}")));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Go back (esc)"));
    Text::from(lines)
}

pub fn update(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Char('s') => {
            app.manager.move_mode = false;
            app.prompt.set(
                format!("Save changes to {}?", app.manager.hyperpath),
                &["Save", "Cancel"],
            );
            app.view = View::SaveChanges;
        }
        KeyCode::Char('t') => {
            if !app.manager.others.is_empty() && !app.manager.bytemarks.is_empty() {
                app.manager.send_cursor = 0;
                app.view = View::SendBytemark;
            }
        }
        KeyCode::Char('p') => {
            let state = &mut app.manager;
            if !state.bytemarks.is_empty() {
                let copy = state.bytemarks[state.cursor].clone();
                state.bytemarks = ops::insert_at(&state.bytemarks, copy, state.cursor)?;
            }
        }
        KeyCode::Char('d') => {
            if !app.manager.bytemarks.is_empty() {
                app.prompt.set("Are you sure?", &["Yes", "Cancel"]);
                app.view = View::DeleteBytemark;
            }
        }
        KeyCode::Char('m') => app.manager.move_mode = !app.manager.move_mode,
        KeyCode::Char('n') => match urlmode::capture_from_clipboard(&mut app.clipboard) {
            Ok(record) => app.manager.bytemarks.push(record),
            Err(e) => {
                app.prompt.set(e.to_string(), &["Okay"]);
                app.view = View::SentConfirmation;
            }
        },
        KeyCode::Up | KeyCode::Char('k') => {
            let state = &mut app.manager;
            if state.cursor > 0 {
                if state.move_mode {
                    state.bytemarks =
                        ops::swap_at(&state.bytemarks, state.cursor, state.cursor - 1)?;
                }
                state.cursor -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let state = &mut app.manager;
            if state.cursor + 1 < state.bytemarks.len() {
                if state.move_mode {
                    state.bytemarks =
                        ops::swap_at(&state.bytemarks, state.cursor, state.cursor + 1)?;
                }
                state.cursor += 1;
            }
        }
        KeyCode::Esc => {
            app.manager.cursor = 0;
            app.view = View::BytemarkFiles;
        }
        _ => {}
    }
    Ok(())
}

pub fn view(app: &App) -> Text<'static> {
    let state = &app.manager;
    if state.bytemarks.is_empty() {
        return Text::from(vec![
            Line::from("No bytemarks to display."),
            Line::from(""),
            Line::from("Create bytemark using system clipboard (n)"),
            Line::from("Go back (esc)"),
        ]);
    }

    let move_label = if state.move_mode { "Drop (m)" } else { "Move (m)" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("bytemarks", style::header()),
            Span::raw(format!(": {}", state.hyperpath)),
        ]),
        Line::from(format!(
            "Save changes (s) | Duplicate (p) | Send to (t) | Delete (d) | {move_label}"
        )),
        Line::from(""),
    ];

    for (i, record) in state.bytemarks.iter().enumerate() {
        if i == state.cursor {
            let title_style = if state.move_mode {
                style::move_highlight()
            } else {
                style::highlight()
            };
            lines.push(Line::from(vec![
                Span::raw(style::CURSOR),
                Span::styled(record.title.clone(), title_style),
            ]));
        } else {
            lines.push(Line::from(record.title.clone()));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Create bytemark using system clipboard (n)"));
    lines.push(Line::from("Go back (esc)"));
    Text::from(lines)
}

pub fn update_delete(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.prompt.cursor = app.prompt.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.prompt.cursor + 1 < app.prompt.options.len() {
                app.prompt.cursor += 1;
            }
        }
        KeyCode::Enter => {
            if app.prompt.cursor == 0 {
                let state = &mut app.manager;
                state.bytemarks = ops::delete_at(&state.bytemarks, state.cursor)?;
                state.cursor = state.cursor.saturating_sub(1);
            }
            app.prompt.wipe();
            app.view = View::Manager;
        }
        KeyCode::Esc => {
            app.prompt.wipe();
            app.view = View::Manager;
        }
        _ => {}
    }
    Ok(())
}

pub fn update_save(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.prompt.cursor = app.prompt.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.prompt.cursor + 1 < app.prompt.options.len() {
                app.prompt.cursor += 1;
            }
        }
        KeyCode::Enter => {
            if app.prompt.cursor == 0 {
                save_changes(app)?;
            }
            app.prompt.wipe();
            app.view = View::Manager;
        }
        KeyCode::Esc => {
            app.prompt.wipe();
            app.view = View::Manager;
        }
        _ => {}
    }
    Ok(())
}

/// Re-encode the record list, rewrite the file, and reload from disk so
/// the view reflects exactly what was persisted.
fn save_changes(app: &mut App) -> Result<()> {
    let content = bytemark::bytemarks_to_tables(&app.manager.bytemarks);
    let path = app.manager.hyperpath.clone();
    output::rewrite_file(Path::new(&path), &content)?;
    tracing::info!(path, records = app.manager.bytemarks.len(), "saved bytemarks");

    let reloaded = std::fs::read_to_string(&path)?;
    app.manager.bytemarks = bytemark::tables_to_bytemarks(&reloaded)?;
    if app.manager.cursor >= app.manager.bytemarks.len() {
        app.manager.cursor = app.manager.bytemarks.len().saturating_sub(1);
    }
    app.sync_output()?;
    Ok(())
}

pub fn update_send(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.manager.send_cursor = app.manager.send_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.manager.send_cursor + 1 < app.manager.others.len() {
                app.manager.send_cursor += 1;
            }
        }
        KeyCode::Enter => {
            let (_, dest) = app.manager.others[app.manager.send_cursor].clone();
            let record = app.manager.bytemarks[app.manager.cursor].clone();
            send_bytemark(app, &record, &dest)?;
        }
        KeyCode::Esc => app.view = View::Manager,
        _ => {}
    }
    Ok(())
}

/// Append one record to another hyperpath file.
fn send_bytemark(app: &mut App, record: &Bytemark, dest: &str) -> Result<()> {
    let target = OutputTarget::File(dest.into());
    output::write(&target, &record.to_table(), &mut app.clipboard)?;
    app.prompt.set(format!("Sent bytemark to {dest}"), &["Okay"]);
    app.view = View::SentConfirmation;
    Ok(())
}

pub fn send_view(app: &App) -> Text<'static> {
    let state = &app.manager;
    let registry_index = state
        .others
        .get(state.send_cursor)
        .map(|(i, _)| *i)
        .unwrap_or(0);

    let mut lines = vec![
        Line::from(format!("Send bytemark to hyperpath[{registry_index}] (enter)")),
        Line::from(""),
    ];
    for (pos, (i, hyperpath)) in state.others.iter().enumerate() {
        if pos == state.send_cursor {
            lines.push(Line::from(vec![
                Span::raw(style::CURSOR),
                Span::styled(format!("{i}: {hyperpath}"), style::highlight()),
            ]));
        } else {
            lines.push(Line::from(format!("{i}: {hyperpath}")));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Go back (esc)"));
    Text::from(lines)
}

/// "Sent" confirmation, also reused for in-manager notices.
pub fn update_sent(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        app.prompt.wipe();
        app.view = View::Manager;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{key, test_app};
    use crate::app::App;
    use tempfile::TempDir;

    fn record(title: &str) -> Bytemark {
        Bytemark {
            title: title.to_string(),
            date_time: "1/2/2026 3:4".to_string(),
            root_url: format!("https://example.com/{title}"),
            rows: vec!["No comments.".to_string()],
        }
    }

    /// Manager open on a real file holding records a, b, c; a second
    /// hyperpath exists as a send target.
    fn manager_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let main = dir.path().join("main.md");
        let other = dir.path().join("other.md");
        let records = vec![record("a"), record("b"), record("c")];
        std::fs::write(&main, bytemark::bytemarks_to_tables(&records)).unwrap();
        std::fs::write(&other, "").unwrap();

        let registry = dir.path().join("hyperpaths");
        let paths = vec![
            main.display().to_string(),
            other.display().to_string(),
        ];
        crate::hyperpaths::persist(&registry, &paths).unwrap();

        let mut app = test_app(&registry);
        app.load_hyperpaths().unwrap();
        app.view = View::BytemarkFiles;
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.view, View::Manager);
        (dir, app)
    }

    #[test]
    fn test_open_hyperpath_loads_records() {
        let (_dir, app) = manager_app();
        let titles: Vec<_> = app.manager.bytemarks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(app.manager.others.len(), 1);
        assert_eq!(app.manager.others[0].0, 1);
    }

    #[test]
    fn test_file_picker_enter_is_inert_on_empty_registry() {
        let dir = TempDir::new().unwrap();
        let registry = dir.path().join("hyperpaths");
        hyperpaths::ensure_registry(&registry).unwrap();

        let mut app = test_app(&registry);
        app.load_hyperpaths().unwrap();
        assert!(app.hyperpaths.hyperpaths.is_empty());
        app.view = View::BytemarkFiles;

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.view, View::BytemarkFiles);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_corrupt_file_surfaces_error() {
        let (dir, mut app) = manager_app();
        let bad = dir.path().join("bad.md");
        std::fs::write(&bad, "| just a title |\n| :-- |\n").unwrap();
        app.hyperpaths.hyperpaths.push(bad.display().to_string());
        app.view = View::BytemarkFiles;
        app.hyperpaths.cursor = 2;

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.view, View::ArticlesAdded);
        assert!(app.prompt.prompt.starts_with("Corrupt bytemark file"));
    }

    #[test]
    fn test_move_mode_reorders() {
        let (_dir, mut app) = manager_app();
        app.handle_key(key(KeyCode::Char('m'))).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();

        let titles: Vec<_> = app.manager.bytemarks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
        assert_eq!(app.manager.cursor, 1);
    }

    #[test]
    fn test_duplicate_precedes_original() {
        let (_dir, mut app) = manager_app();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Char('p'))).unwrap();

        let titles: Vec<_> = app.manager.bytemarks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_dir, mut app) = manager_app();
        app.handle_key(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.view, View::DeleteBytemark);

        // Cancel leaves the list alone.
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.manager.bytemarks.len(), 3);

        app.handle_key(key(KeyCode::Char('d'))).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        let titles: Vec<_> = app.manager.bytemarks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn test_save_rewrites_file_and_reloads() {
        let (_dir, mut app) = manager_app();
        // Delete "a", then save.
        app.handle_key(key(KeyCode::Char('d'))).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.view, View::SaveChanges);
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.view, View::Manager);
        let on_disk = std::fs::read_to_string(&app.manager.hyperpath).unwrap();
        let records = bytemark::tables_to_bytemarks(&on_disk).unwrap();
        let titles: Vec<_> = records.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn test_send_appends_to_other_hyperpath() {
        let (_dir, mut app) = manager_app();
        app.handle_key(key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.view, View::SendBytemark);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.view, View::SentConfirmation);

        let dest = app.manager.others[0].1.clone();
        let sent = std::fs::read_to_string(dest).unwrap();
        let records = bytemark::tables_to_bytemarks(&sent).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "a");

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.view, View::Manager);
    }

    #[test]
    fn test_capture_notice_on_bad_clipboard() {
        let (_dir, mut app) = manager_app();
        app.clipboard.write_all("not a url").unwrap();
        app.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.view, View::SentConfirmation);
        assert!(app.prompt.prompt.contains("not a url"));
    }
}
