use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{Color as ClapColor, RgbColor, Style, Styles},
};
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// What a piece of output is. Commands pick a role; the palette picks the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Timestamp,
  Progress,
  /// Statistic labels and table headers.
  Label,
  /// Statistic values and handler or module names.
  Value,
  Method,
  /// Paths, type lists and warning text.
  Detail,
  Module,
  Cycle,
  Warning,
  Success,
}

type Rgb = (u8, u8, u8);

const fn dark(role: Role) -> Rgb {
  match role {
    Role::Timestamp | Role::Module => (118, 166, 166),
    Role::Progress => (191, 126, 4),
    Role::Label => (217, 164, 4),
    Role::Value => (242, 211, 56),
    Role::Method | Role::Cycle => (166, 84, 55),
    Role::Detail => (200, 200, 190),
    Role::Warning => (230, 120, 60),
    Role::Success => (120, 190, 120),
  }
}

const fn light(role: Role) -> Rgb {
  match role {
    Role::Timestamp => (92, 62, 38),
    Role::Progress => (70, 42, 25),
    Role::Label => (176, 103, 66),
    Role::Value => (199, 146, 76),
    Role::Method | Role::Cycle => (211, 99, 70),
    Role::Detail => (60, 60, 60),
    Role::Module => (40, 111, 170),
    Role::Warning => (168, 64, 20),
    Role::Success => (34, 142, 90),
  }
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  /// Every role resets, for redirected output and tests.
  pub const fn plain() -> Self {
    Self::new(false, Theme::Dark)
  }

  const fn rgb(&self, role: Role) -> Option<Rgb> {
    if !self.enabled {
      return None;
    }
    Some(match self.theme {
      Theme::Dark => dark(role),
      Theme::Light => light(role),
    })
  }

  /// Terminal color for `role`.
  pub const fn get(&self, role: Role) -> Color {
    match self.rgb(role) {
      Some((r, g, b)) => Color::Rgb { r, g, b },
      None => Color::Reset,
    }
  }

  /// Table cell color for `role`.
  pub const fn cell(&self, role: Role) -> comfy_table::Color {
    match self.rgb(role) {
      Some((r, g, b)) => comfy_table::Color::Rgb { r, g, b },
      None => comfy_table::Color::Reset,
    }
  }

  /// Help output always uses the dark palette; clap strips it when stdout is not a terminal.
  pub fn clap_styles() -> Styles {
    let fg = |role: Role| {
      let (r, g, b) = dark(role);
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    };

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(fg(Role::Label)))
      .usage(Style::new().bold().fg_color(fg(Role::Label)))
      .literal(Style::new().fg_color(fg(Role::Success)))
      .placeholder(Style::new().fg_color(fg(Role::Module)))
      .error(Style::new().bold().fg_color(fg(Role::Warning)))
      .valid(Style::new().fg_color(fg(Role::Success)))
      .invalid(Style::new().bold().fg_color(fg(Role::Warning)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background codes 8 and up are light.
fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
  match value
    .and_then(|value| value.split(';').next_back())
    .and_then(|bg| bg.parse::<u8>().ok())
  {
    Some(bg) if bg >= 8 => Theme::Light,
    _ => Theme::Dark,
  }
}
