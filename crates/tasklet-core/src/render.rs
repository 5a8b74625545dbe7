use std::io::{self, IsTerminal, Write};

use tasklet_shared::{RenderedItem, Theme};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    theme: Theme,
}

impl Renderer {
    pub fn new(cfg: &Config, theme: Theme) -> anyhow::Result<Self> {
        Ok(Self {
            color: cfg.color_enabled()?,
            theme,
        })
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[tracing::instrument(skip(self, items))]
    pub fn print_task_list(&self, items: &[RenderedItem]) -> anyhow::Result<()> {
        let color = self.color && io::stdout().is_terminal();
        self.write_task_list(io::stdout().lock(), items, color)
    }

    /// Writes the list as a numbered table. Positions are shown 1-based.
    pub fn write_task_list<W: Write>(
        &self,
        mut out: W,
        items: &[RenderedItem],
        color: bool,
    ) -> anyhow::Result<()> {
        if items.is_empty() {
            writeln!(out, "No tasks.")?;
            return Ok(());
        }

        let headers = vec!["#".to_string(), "Task".to_string(), "Actions".to_string()];

        let rows = items
            .iter()
            .map(|item| {
                let position = (item.position + 1).to_string();
                let actions = item
                    .controls
                    .iter()
                    .map(|control| control.glyph())
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![
                    self.paint(&position, self.accent(), color),
                    item.text.clone(),
                    actions,
                ]
            })
            .collect();

        write_table(&mut out, headers, rows)?;
        writeln!(out)?;
        writeln!(out, "{} task(s)", items.len())?;
        Ok(())
    }

    pub fn print_theme(&self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let color = self.color && io::stdout().is_terminal();
        writeln!(
            out,
            "theme {}",
            self.paint(self.theme.storage_value(), self.accent(), color)
        )?;
        Ok(())
    }

    fn accent(&self) -> &'static str {
        match self.theme {
            Theme::Light => "34",
            Theme::Dark => "96",
        }
    }

    fn paint(&self, text: &str, code: &str, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
