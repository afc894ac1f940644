//! Painting rows to the terminal.

use std::io::{self, Write};
use std::ops::Range;
use std::path::Path;

use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, queue, terminal};
use inspector_lib::present::{AssetRef, RowFacts};

use crate::menu::OpenMenu;

const SELECTED_BG: Color = Color::Rgb { r: 38, g: 79, b: 120 };
const FOCUSED_BG: Color = Color::Rgb { r: 50, g: 50, b: 58 };
const EVEN_BG: Color = Color::Rgb { r: 28, g: 28, b: 32 };
const MATCH_FG: Color = Color::Yellow;
const ATTR_FG: Color = Color::DarkGrey;

/// Everything needed to paint one frame.
pub struct Frame<'a> {
    pub rows: &'a [RowFacts],
    /// Tree guide prefix per row, parallel to `rows`.
    pub guides: &'a [String],
    pub status: &'a str,
    pub menu: Option<&'a OpenMenu>,
}

/// Tree guide prefixes (`├─`, `└─`, `│`) for rows in `window`.
///
/// `levels` and `counts` cover the whole projection; `counts[i]` is the number
/// of visible descendants of row `i`. A node has a following sibling when its
/// subtree ends before its parent's.
pub fn guide_prefixes(levels: &[usize], counts: &[usize], window: Range<usize>) -> Vec<String> {
    // Last row index of each open ancestor's subtree, by depth.
    let mut ends: Vec<usize> = Vec::new();
    let mut prefixes = Vec::with_capacity(window.len());

    for (i, &level) in levels.iter().enumerate().take(window.end) {
        let end = i + counts[i];
        ends.truncate(level.saturating_sub(1));
        ends.push(end);

        if i < window.start {
            continue;
        }
        let mut prefix = String::new();
        for depth in 1..ends.len() {
            let has_sibling_after = ends[depth] < ends[depth - 1];
            let last = depth + 1 == ends.len();
            prefix.push_str(match (last, has_sibling_after) {
                (true, true) => "├─",
                (true, false) => "└─",
                (false, true) => "│ ",
                (false, false) => "  ",
            });
        }
        prefixes.push(prefix);
    }
    prefixes
}

/// Split `text` into `(segment, highlighted)` pieces.
pub fn split_highlights<'t>(text: &'t str, ranges: &[Range<usize>]) -> Vec<(&'t str, bool)> {
    let mut pieces = Vec::new();
    let mut pos = 0;
    for range in ranges {
        if range.start > pos {
            pieces.push((&text[pos..range.start], false));
        }
        pieces.push((&text[range.clone()], true));
        pos = range.end;
    }
    if pos < text.len() {
        pieces.push((&text[pos..], false));
    }
    pieces
}

/// Short label for a decoration asset: its file stem.
fn decoration_label(asset: &AssetRef) -> &str {
    Path::new(asset.as_str())
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(asset.as_str())
}

/// Paint a frame of `height` rows plus a status line.
pub fn draw(out: &mut impl Write, frame: &Frame<'_>, width: u16, height: u16) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;

    let tree_height = height.saturating_sub(1);
    for (y, (row, guide)) in frame.rows.iter().zip(frame.guides).enumerate() {
        if y as u16 >= tree_height {
            break;
        }
        draw_row(out, row, guide, y as u16)?;
    }

    queue!(
        out,
        cursor::MoveTo(0, tree_height),
        SetAttribute(Attribute::Reverse),
        Print(format!("{:<width$}", frame.status, width = width as usize)),
        SetAttribute(Attribute::Reset),
    )?;

    if let Some(menu) = frame.menu {
        draw_menu(out, menu, width, tree_height)?;
    }
    out.flush()
}

fn draw_row(out: &mut impl Write, row: &RowFacts, guide: &str, y: u16) -> io::Result<()> {
    let bg = if row.selected {
        SELECTED_BG
    } else if row.focused {
        FOCUSED_BG
    } else if row.is_even {
        EVEN_BG
    } else {
        Color::Reset
    };
    queue!(
        out,
        cursor::MoveTo(0, y),
        SetBackgroundColor(bg),
        terminal::Clear(terminal::ClearType::UntilNewLine),
        SetForegroundColor(ATTR_FG),
        Print(guide),
    )?;

    let disclosure = match (row.node.has_children(), row.node.expanded) {
        (false, _) => "  ",
        (true, true) => "▾ ",
        (true, false) => "▸ ",
    };
    queue!(out, ResetColor, SetBackgroundColor(bg), Print(disclosure))?;

    if let Some(asset) = &row.decoration {
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format!("[{}] ", decoration_label(asset))),
        )?;
    }

    print_highlighted(out, &row.node.name, &row.name_highlights, Color::Reset, bg)?;

    for attr in &row.attributes {
        queue!(out, SetForegroundColor(ATTR_FG), Print(format!(" {}=", attr.name)))?;
        print_highlighted(out, &attr.value, &attr.highlights, ATTR_FG, bg)?;
    }

    if !row.node.expanded && row.node.has_children() {
        queue!(
            out,
            SetForegroundColor(ATTR_FG),
            Print(format!("  ({})", row.node.children.len())),
        )?;
    }

    queue!(out, ResetColor)?;
    Ok(())
}

fn print_highlighted(
    out: &mut impl Write,
    text: &str,
    ranges: &[Range<usize>],
    fg: Color,
    bg: Color,
) -> io::Result<()> {
    for (segment, highlighted) in split_highlights(text, ranges) {
        if highlighted {
            queue!(
                out,
                SetForegroundColor(MATCH_FG),
                SetAttribute(Attribute::Bold),
                Print(segment),
                SetAttribute(Attribute::NormalIntensity),
                SetBackgroundColor(bg),
            )?;
        } else {
            queue!(out, SetForegroundColor(fg), Print(segment))?;
        }
    }
    Ok(())
}

fn draw_menu(out: &mut impl Write, menu: &OpenMenu, width: u16, height: u16) -> io::Result<()> {
    let menu_width: u16 = menu
        .entries
        .iter()
        .filter_map(|e| e.label())
        .map(|l| l.chars().count() as u16 + 4)
        .max()
        .unwrap_or(8)
        .max(12);
    let x = width.saturating_sub(menu_width + 2);

    for (i, entry) in menu.entries.iter().enumerate() {
        let y = 1 + i as u16;
        if y >= height {
            break;
        }
        let line = match entry.label() {
            Some(label) => format!("  {:<w$}", label, w = menu_width as usize - 2),
            None => "─".repeat(menu_width as usize),
        };
        let bg = if i == menu.cursor {
            SELECTED_BG
        } else {
            FOCUSED_BG
        };
        queue!(
            out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(bg),
            SetForegroundColor(Color::White),
            Print(line),
            ResetColor,
        )?;
    }
    Ok(())
}
