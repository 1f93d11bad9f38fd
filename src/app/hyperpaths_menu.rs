//! Hyperpaths menu: edit, add, delete, and reorder registry entries.

use super::{is_quit, style, App, View};
use crate::{hyperpaths, ops};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::{Line, Span, Text};

pub fn update(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    if app.hyperpaths.move_mode {
        return update_move_mode(app, key);
    }
    match key.code {
        KeyCode::Esc => app.view = View::Start,
        KeyCode::Up | KeyCode::Char('k') => {
            app.hyperpaths.cursor = app.hyperpaths.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.hyperpaths.cursor + 1 < app.hyperpaths.hyperpaths.len() {
                app.hyperpaths.cursor += 1;
            }
        }
        KeyCode::Char('e') => {
            let state = &mut app.hyperpaths;
            // Nothing to edit on a fresh, empty registry; only add works.
            if state.hyperpaths.is_empty() {
                return Ok(());
            }
            let selected = state.hyperpaths[state.cursor].clone();
            state.edit_index = state.cursor;
            app.input.init(
                &selected,
                &format!("Editing hyperpath[{}]", state.cursor),
                "Submit (enter) | Go back (esc)",
            );
            app.view = View::EditHyperpath;
        }
        KeyCode::Char('d') => {
            let state = &mut app.hyperpaths;
            // The registry never shrinks below one entry.
            if state.hyperpaths.len() > 1 {
                state.hyperpaths = ops::delete_at(&state.hyperpaths, state.cursor)?;
                state.cursor = state.cursor.saturating_sub(1);
                hyperpaths::persist(&app.output.registry, &state.hyperpaths)?;
                app.load_hyperpaths()?;
                app.sync_output()?;
            }
        }
        KeyCode::Char('m') => app.hyperpaths.move_mode = true,
        KeyCode::Char('n') => {
            let next = app.hyperpaths.hyperpaths.len();
            app.hyperpaths.edit_index = next;
            app.input.init(
                &format!("hyperpath[{next}]"),
                &format!("Creating hyperpath[{next}]"),
                "Submit (enter) | Go back (esc)",
            );
            app.view = View::AddHyperpath;
        }
        _ => {}
    }
    Ok(())
}

/// Move mode drags the cursor entry; dropping persists the new order.
fn update_move_mode(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('m') | KeyCode::Enter | KeyCode::Esc => {
            hyperpaths::persist(&app.output.registry, &app.hyperpaths.hyperpaths)?;
            app.sync_output()?;
            app.hyperpaths.move_mode = false;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let state = &mut app.hyperpaths;
            if state.cursor > 0 {
                state.hyperpaths =
                    ops::swap_at(&state.hyperpaths, state.cursor - 1, state.cursor)?;
                state.cursor -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let state = &mut app.hyperpaths;
            if state.cursor + 1 < state.hyperpaths.len() {
                state.hyperpaths =
                    ops::swap_at(&state.hyperpaths, state.cursor + 1, state.cursor)?;
                state.cursor += 1;
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn view(app: &App) -> Text<'static> {
    let state = &app.hyperpaths;

    let mut actions = format!("hyperpath[{}]: Edit (e)", state.cursor);
    if state.hyperpaths.len() > 1 && !state.move_mode {
        actions.push_str(" | Delete (d)");
    }
    actions.push_str(if state.move_mode { " | Drop (m)" } else { " | Move (m)" });

    let mut lines = vec![Line::from(""), Line::from(actions), Line::from("")];
    for (i, hyperpath) in state.hyperpaths.iter().enumerate() {
        if i == state.cursor {
            let path_style = if state.move_mode {
                style::move_highlight()
            } else {
                style::highlight()
            };
            lines.push(Line::from(vec![
                Span::raw(style::CURSOR),
                Span::raw(format!("{i}: ")),
                Span::styled(hyperpath.clone(), path_style),
            ]));
        } else {
            lines.push(Line::from(format!("{i}: {hyperpath}")));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Add new hyperpath (n)"));
    lines.push(Line::from("Go back (esc)"));
    Text::from(lines)
}

/// Text input for editing or adding a registry entry. Characters go into
/// the input buffer, so only ctrl+c quits here.
pub fn update_edit(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Esc => app.view = View::Hyperpaths,
        KeyCode::Enter => submit_hyperpath(app)?,
        KeyCode::Char(c) => app.input.value.push(c),
        KeyCode::Backspace => {
            app.input.value.pop();
        }
        _ => {}
    }
    Ok(())
}

fn submit_hyperpath(app: &mut App) -> Result<()> {
    let entered = app.input.value.clone();
    let expanded = hyperpaths::expand_tilde(&entered);
    let index = app.hyperpaths.edit_index;

    let outcome = hyperpaths::edit_nth(&app.output.registry, &entered, index)?;
    if outcome.written && outcome.valid {
        app.sync_output()?;
        app.load_hyperpaths()?;
        app.view = View::Hyperpaths;
    } else if outcome.valid {
        // Usable path, but the file is missing; offer to create it.
        app.hyperpaths.pending_path = expanded.clone();
        app.prompt.set(format!("{expanded} does not exist."), &["Create file", "Go back"]);
        app.view = View::CreateFile;
    } else {
        app.prompt.set(format!("{expanded} is not a valid filepath."), &["Go back"]);
        app.view = View::InvalidFilepath;
    }
    Ok(())
}

pub fn update_create_file(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Esc => {
            app.prompt.wipe();
            app.view = View::Start;
        }
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
                create_pending_file(app)?;
            }
            app.prompt.wipe();
            app.view = View::Hyperpaths;
        }
        _ => {}
    }
    Ok(())
}

fn create_pending_file(app: &mut App) -> Result<()> {
    let path = app.hyperpaths.pending_path.clone();
    let index = app.hyperpaths.edit_index;
    std::fs::File::create(&path)?;
    tracing::info!(path, "created hyperpath file");

    let outcome = hyperpaths::edit_nth(&app.output.registry, &path, index)?;
    if !outcome.written || !outcome.valid {
        anyhow::bail!("hyperpath {path:?} still unusable after creating the file");
    }
    app.sync_output()?;
    app.load_hyperpaths()?;
    Ok(())
}

pub fn update_invalid(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        app.prompt.wipe();
        app.view = View::Hyperpaths;
    }
    Ok(())
}
