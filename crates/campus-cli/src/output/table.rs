const MIN_COLUMN_WIDTH: usize = 6;
const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render string rows as an aligned table with a dashed divider under the header.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.len(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false, false))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push("-".repeat(header_line.chars().count()));
    lines.insert(0, header_line);

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let numeric = looks_numeric(&cell);
                if options.color {
                    pad(&colorize_status(&cell), *width, numeric, true)
                } else {
                    pad(&cell, *width, numeric, false)
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        lines.push(line);
    }

    lines.join("\n")
}

/// Narrow the widest columns one character at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * COLUMN_GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool, has_ansi: bool) -> String {
    let visible = if has_ansi {
        strip_ansi(value).chars().count()
    } else {
        value.chars().count()
    };
    let fill = " ".repeat(width.saturating_sub(visible));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Color listing and group states: open states green, held states yellow, finished states red.
fn colorize_status(value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "available" | "active" | "open" | "true" | "authenticated" => "32",
        "reserved" | "full" | "lost" => "33",
        "sold" | "closed" | "resolved" | "false" => "31",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}

fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, render_rows, strip_ansi, truncate};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn header_divider_and_rows_line_up() {
        let rows = vec![
            vec!["bk-1".to_string(), "available".to_string(), "12.5".to_string()],
            vec!["bk-200".to_string(), "sold".to_string(), "3".to_string()],
        ];
        let table = render_rows(&["id", "status", "price"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2].chars().count(), lines[3].chars().count());
    }

    #[test]
    fn narrow_terminal_truncates_long_cells() {
        let rows = vec![vec![
            "grp-1".to_string(),
            "an extremely long study group description that will not fit".to_string(),
        ]];
        let options = TableOptions {
            max_width: Some(40),
            color: false,
        };
        let table = render_rows(&["id", "description"], &rows, options);
        assert!(table.lines().all(|line| line.chars().count() <= 40));
        assert!(table.contains('…'));
    }

    #[test]
    fn colored_cells_keep_alignment() {
        let rows = vec![vec!["closed".to_string()], vec!["other".to_string()]];
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let table = render_rows(&["status"], &rows, options);
        let widths: Vec<usize> = table
            .lines()
            .skip(2)
            .map(|line| strip_ansi(line).chars().count())
            .collect();
        assert_eq!(widths, vec![6, 6]);
        assert!(table.contains("\u{1b}[31m"));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("campus", 10), "campus");
        assert_eq!(truncate("campus hub", 5), "camp…");
    }
}
