//! Plain per-directory dump of the statistics map.

use crate::config::Theme;
use crate::model::StatsMap;
use anyhow::Result;
use crossterm::style::{self, Stylize};
use std::io::{self, IsTerminal, Write};

/// Resolved colours; `None` prints unstyled text.
struct Palette {
    heading: Option<style::Color>,
    path: Option<style::Color>,
    percentage: Option<style::Color>,
}

impl Palette {
    fn new(theme: &Theme, colored: bool) -> Result<Self> {
        if !colored {
            return Ok(Self {
                heading: None,
                path: None,
                percentage: None,
            });
        }
        Ok(Self {
            heading: Some(theme.heading.to_style()?),
            path: Some(theme.path.to_style()?),
            percentage: Some(theme.percentage.to_style()?),
        })
    }
}

fn paint(text: &str, color: Option<style::Color>) -> String {
    match color {
        Some(color) => style::style(text).with(color).to_string(),
        None => text.to_string(),
    }
}

/// Colours are used only on a terminal and when `NO_COLOR` is unset.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Writes every directory's record to `out`, in path order.
/// ```text
/// Path: demo/sub
/// Number of files: 1
/// Size: 30
/// Total number of files: 1
/// Total size of files: 0.03 KB
/// Subdirectories:
/// ---
/// ```
pub fn print_summary<W: Write>(
    stats: &StatsMap,
    theme: &Theme,
    colored: bool,
    out: &mut W,
) -> Result<()> {
    let palette = Palette::new(theme, colored)?;

    for (path, dir) in stats {
        let path = path.display().to_string();
        writeln!(
            out,
            "{} {}",
            paint("Path:", palette.heading),
            paint(&path, palette.path)
        )?;
        writeln!(out, "Number of files: {}", dir.file_count)?;
        writeln!(out, "Size: {}", dir.own_size)?;
        writeln!(out, "Total number of files: {}", dir.total_file_count)?;
        writeln!(
            out,
            "Total size of files: {:.2} KB",
            dir.total_size as f64 / 1024.0
        )?;
        writeln!(out, "{}", paint("Subdirectories:", palette.heading))?;
        for share in &dir.subdir_shares {
            let pct = format!("{:.2}%", share.percentage);
            writeln!(out, "    {}: {}", share.name, paint(&pct, palette.percentage))?;
        }
        writeln!(out, "---")?;
    }
    Ok(())
}
