//! Tree-view demo
//!
//! Drives the widget in a plain terminal loop:
//! - Up/Down move the cursor
//! - Enter toggles expand/collapse
//! - Space toggles the checkbox
//! - 's' selects the row (click), 'x' clears the selection
//! - 'd' deletes the row under the cursor
//! - 'q' quits

use std::fs::File;
use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use arbor::prelude::*;

fn sample_tree() -> TreeView<&'static str> {
    TreeView::new(
        TreeViewProps::new()
            .item_style(ItemStyle::Plain)
            .root(
                NodeDecl::new("project").value("/").expanded(true).children([
                    NodeDecl::new("src").value("/src").expanded(true).children([
                        NodeDecl::new("lib.rs").value("/src/lib.rs"),
                        NodeDecl::new("error.rs").value("/src/error.rs"),
                        NodeDecl::new("tree").value("/src/tree").children([
                            NodeDecl::new("mod.rs").value("/src/tree/mod.rs"),
                            NodeDecl::new("state.rs").value("/src/tree/state.rs"),
                            NodeDecl::new("item.rs").value("/src/tree/item.rs"),
                        ]),
                    ]),
                    NodeDecl::new("tests").value("/tests").children([
                        NodeDecl::new("tree.rs").value("/tests/tree.rs"),
                        NodeDecl::new("render.rs").value("/tests/render.rs"),
                    ]),
                    NodeDecl::new("Cargo.toml").value("/Cargo.toml").item_style(ItemStyle::Muted),
                ]),
            )
            .on_expand(|item, expanded| {
                log::info!(
                    "[demo] {} expanded -> {expanded}",
                    item.label().unwrap_or_default()
                );
            })
            .on_item_click(|item| {
                log::info!("[demo] clicked {}", item.label().unwrap_or_default());
            }),
    )
}

fn main() -> io::Result<()> {
    let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), File::create("demo.log")?);

    let tree = sample_tree();
    let mut cursor = 0usize;

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;
    let result = run(&tree, &mut cursor);
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(tree: &TreeView<&'static str>, cursor: &mut usize) -> io::Result<()> {
    loop {
        let row_count = draw(tree, *cursor)?;
        for event in tree.take_events() {
            log::debug!("[demo] event {event:?}");
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let current = row_at(tree, *cursor);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Up => *cursor = cursor.saturating_sub(1),
            KeyCode::Down => *cursor = (*cursor + 1).min(row_count.saturating_sub(1)),
            KeyCode::Enter => {
                if let Some(item) = current {
                    let _ = item.toggle_expanded();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(item) = current {
                    let _ = item.toggle_checked();
                }
            }
            KeyCode::Char('s') => {
                if let Some(item) = current {
                    let _ = item.click();
                }
            }
            KeyCode::Char('x') => {
                let _ = tree.select_item(None);
            }
            KeyCode::Char('d') => {
                if let Some(item) = current {
                    let _ = tree.del_item(&item);
                    *cursor = cursor.saturating_sub(1);
                }
            }
            _ => {}
        }
    }
}

fn row_at(tree: &TreeView<&'static str>, cursor: usize) -> Option<TreeItem<&'static str>> {
    let visual = tree.render();
    let key = visual.flatten().get(cursor).map(|row| row.key)?;
    tree.node(key).ok()
}

fn draw(tree: &TreeView<&'static str>, cursor: usize) -> io::Result<usize> {
    let visual = tree.render();
    let rows = visual.flatten();
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;

    for (i, row) in rows.iter().enumerate() {
        let indent = "  ".repeat(row.depth as usize);
        let arrow = if row.has_children {
            if row.expanded { "▼" } else { "▶" }
        } else {
            " "
        };
        let check = if row.checked { "[x]" } else { "[ ]" };
        let marker = if i == cursor { ">" } else { " " };
        let dim = row.style == ItemStyle::Muted;
        let line = format!("{marker} {indent}{arrow} {check} {}", row.fit_label(48));

        queue!(out, MoveTo(0, i as u16))?;
        if row.selected {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        } else if dim {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        queue!(out, Print(line), SetAttribute(Attribute::Reset))?;
    }

    let checked = tree.get_check_items().map(|items| items.len()).unwrap_or(0);
    let selected = tree
        .get_select_item()
        .and_then(|item| item.label().ok())
        .unwrap_or_else(|| "-".to_string());
    queue!(
        out,
        MoveTo(0, rows.len() as u16 + 1),
        Print(format!(
            "selected: {selected}  checked: {checked}  (q quit, s select, d delete)"
        ))
    )?;

    out.flush()?;
    tree.clear_dirty();
    Ok(rows.len())
}
