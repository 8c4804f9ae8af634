use std::{
    io::{self, Write},
    sync::Mutex,
};

use weatherdash_core::{DashboardView, DisplaySurface, Theme};

/// Draws the dashboard on stdout; notices and progress go to stderr.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    theme: Mutex<Option<Theme>>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only one theme is active at a time.
    fn apply_theme(&self, theme: Theme) {
        if let Ok(mut active) = self.theme.lock() {
            let previous = active.replace(theme);
            if previous != Some(theme) {
                tracing::debug!(?previous, ?theme, "theme changed");
            }
        }
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_loading(&self, active: bool) {
        if active {
            eprintln!("Fetching weather...");
        }
    }

    fn show_notice(&self, message: &str) {
        eprintln!("⚠ {message}");
    }

    fn clear_notice(&self) {}

    fn render(&self, view: &DashboardView) {
        self.apply_theme(view.theme);

        let mut out = io::stdout().lock();
        if let Err(err) = write_view(&mut out, view) {
            tracing::warn!(%err, "failed to write dashboard");
        }
    }
}

pub fn write_view(out: &mut impl Write, view: &DashboardView) -> io::Result<()> {
    let current = &view.current;

    writeln!(out)?;
    match view.theme.class_name() {
        Some(theme) => writeln!(out, "{}  [{theme}]", current.location)?,
        None => writeln!(out, "{}", current.location)?,
    }
    writeln!(out, "{}", current.date)?;
    writeln!(out)?;
    writeln!(out, "  {}  {}°C  {}", current.icon.glyph(), current.temperature, current.description)?;
    writeln!(out)?;
    writeln!(out, "  Feels like  {}°C", current.feels_like)?;
    writeln!(out, "  Humidity    {}%", current.humidity)?;
    writeln!(out, "  Wind        {} m/s", current.wind_speed)?;
    writeln!(out, "  Pressure    {} hPa", current.pressure)?;

    if !view.forecast.is_empty() {
        writeln!(out)?;
        for day in &view.forecast {
            writeln!(
                out,
                "  {:<4} {}  {:>3}°C  {}° / {}°",
                day.weekday,
                day.icon.glyph(),
                day.temperature,
                day.temp_min,
                day.temp_max
            )?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherdash_core::{
        WeatherIcon,
        presenter::{CurrentView, ForecastDay},
    };

    fn view(theme: Theme) -> DashboardView {
        DashboardView {
            current: CurrentView {
                location: "London, GB".into(),
                date: "Monday, October 19, 2026".into(),
                icon: WeatherIcon::Rain,
                temperature: 16,
                feels_like: 15,
                description: "light rain".into(),
                humidity: 82,
                wind_speed: 4.1,
                pressure: 1012.0,
            },
            forecast: vec![ForecastDay {
                weekday: "Tue".into(),
                icon: WeatherIcon::ClearDay,
                temperature: 18,
                temp_min: 12,
                temp_max: 19,
            }],
            theme,
        }
    }

    fn rendered(view: &DashboardView) -> String {
        let mut buf = Vec::new();
        write_view(&mut buf, view).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_current_and_forecast() {
        let text = rendered(&view(Theme::Rainy));

        assert!(text.contains("London, GB  [rainy]"));
        assert!(text.contains("16°C  light rain"));
        assert!(text.contains("Humidity    82%"));
        assert!(text.contains("Wind        4.1 m/s"));
        assert!(text.contains("Pressure    1012 hPa"));
        assert!(text.contains("Tue"));
        assert!(text.contains("12° / 19°"));
    }

    #[test]
    fn neutral_theme_has_no_tag() {
        let text = rendered(&view(Theme::Neutral));
        assert!(text.contains("London, GB\n"));
    }

    #[test]
    fn render_replaces_active_theme() {
        let surface = TerminalSurface::new();
        surface.apply_theme(Theme::Rainy);
        surface.apply_theme(Theme::Night);

        assert_eq!(*surface.theme.lock().unwrap(), Some(Theme::Night));
    }
}
