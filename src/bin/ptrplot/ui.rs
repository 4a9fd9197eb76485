use std::io::IsTerminal;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use nu_ansi_term::{Color, Style};
use ptrplot::chart::plain_number;
use ptrplot::{Column, Figure, ResultTable};

/// Terminal reporting for a single plotting run. Styling only on a TTY.
pub struct Ui {
    palette: Palette,
    spinner: Option<ProgressStyle>,
}

impl Ui {
    pub fn new() -> Self {
        let tty = std::io::stdout().is_terminal();

        #[cfg(windows)]
        if tty {
            let _ = nu_ansi_term::enable_ansi_support();
        }

        let spinner = tty.then(|| {
            ProgressStyle::with_template("{prefix} {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        });

        Self {
            palette: if tty { Palette::color() } else { Palette::plain() },
            spinner,
        }
    }

    /// Prints where the rows came from and the extent of every column.
    pub fn dataset(&self, table: &ResultTable, load_time: Duration) {
        println!(
            "{}",
            self.palette
                .heading
                .paint(format!("▸ {}", table.origin().display()))
        );
        self.field("rows", &table.len().to_string());
        for column in Column::ALL {
            self.field(column.name(), &column_span(table, column));
        }
        self.field("loaded in", &format_duration(load_time));
    }

    /// Prints the chart shape and how to dismiss the window.
    pub fn figure(&self, figure: &Figure) {
        let points = figure.series.first().map_or(0, |s| s.points.len());
        println!(
            "{} {} series × {points} points, {}×{} px; close the window or press Esc to exit",
            self.palette.info.paint("ℹ"),
            figure.series.len(),
            figure.width,
            figure.height,
        );
    }

    pub fn done(&self) {
        println!("{} figure dismissed", self.palette.success.paint("✔"));
    }

    pub fn error(&self, message: &str) {
        eprintln!(
            "{} {}",
            self.palette.error.paint("✖"),
            self.palette.error.paint(message)
        );
    }

    /// Starts a spinner that stops when the guard is finished or dropped.
    pub fn task(&self, label: impl Into<String>) -> TaskGuard<'_> {
        let label = label.into();
        let pb = self.spinner.as_ref().map(|style| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(style.clone());
            pb.set_prefix(self.palette.info.paint("▶").to_string());
            pb.set_message(label.clone());
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        });
        TaskGuard {
            ui: self,
            label,
            start: Instant::now(),
            finished: false,
            pb,
        }
    }

    fn field(&self, key: &str, value: &str) {
        println!(
            "  {} {}",
            self.palette.key.paint(format!("{key:>9}:")),
            self.palette.value.paint(value)
        );
    }
}

pub struct TaskGuard<'a> {
    ui: &'a Ui,
    label: String,
    start: Instant,
    finished: bool,
    pb: Option<ProgressBar>,
}

impl TaskGuard<'_> {
    pub fn finish(mut self) -> Duration {
        self.finished = true;
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
        self.start.elapsed()
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let message = format!(
            "{} failed after {}",
            self.label,
            format_duration(self.start.elapsed())
        );
        match self.pb.take() {
            Some(pb) => pb.abandon_with_message(message),
            None => self.ui.error(&message),
        }
    }
}

fn column_span(table: &ResultTable, column: Column) -> String {
    let values = table.column(column);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    format!("{} .. {}", plain_number(min), plain_number(max))
}

fn format_duration(duration: Duration) -> String {
    if duration.as_secs_f64() >= 1.0 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        format!("{:.0}ms", duration.as_secs_f64() * 1_000.0)
    }
}

struct Palette {
    heading: Style,
    key: Style,
    value: Style,
    info: Style,
    success: Style,
    error: Style,
}

impl Palette {
    fn color() -> Self {
        Self {
            heading: Style::new().fg(Color::Purple).bold(),
            key: Style::new().fg(Color::LightBlue).bold(),
            value: Style::new().fg(Color::White),
            info: Style::new().fg(Color::LightCyan),
            success: Style::new().fg(Color::LightGreen).bold(),
            error: Style::new().fg(Color::Red).bold(),
        }
    }

    fn plain() -> Self {
        Self {
            heading: Style::new(),
            key: Style::new(),
            value: Style::new(),
            info: Style::new(),
            success: Style::new(),
            error: Style::new(),
        }
    }
}
