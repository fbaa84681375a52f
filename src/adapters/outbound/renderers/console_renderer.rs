use crate::application::read_models::DashboardFrame;
use crate::ports::outbound::DashboardRenderer;
use crate::roc::domain::{ViewKind, WidgetPayload, WidgetReport};
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write as _;

/// ConsoleRenderer adapter producing the human-readable frame view.
///
/// One block per widget in render order. Empty states are colored by
/// confidence: no-visibility is the analyst's cue that the data source
/// is the problem, no-events that the window was genuinely quiet.
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self
    }

    fn header(frame: &DashboardFrame) -> String {
        let mut line = format!(
            "Risk Operations Center - trailing {} days",
            frame.window_days
        );
        if let Some(generated_at) = frame.generated_at {
            let _ = write!(line, " (data as of {})", generated_at.format("%Y-%m-%d %H:%M UTC"));
        }
        line
    }

    fn widget_block(report: &WidgetReport) -> String {
        let mut block = String::new();
        let estimated = matches!(&report.payload, WidgetPayload::Ready { view } if view.estimated);
        if estimated {
            let _ = writeln!(block, "{} {}", report.title.bold(), "(estimated)".dimmed());
        } else {
            let _ = writeln!(block, "{}", report.title.bold());
        }
        match &report.payload {
            WidgetPayload::NoVisibility { detail } => {
                let _ = writeln!(block, "  {} {}", "no visibility:".red(), detail.dimmed());
            }
            WidgetPayload::NoEvents { detail } => {
                let _ = writeln!(block, "  {} {}", "no events:".yellow(), detail.dimmed());
            }
            WidgetPayload::Ready { view } => match &view.kind {
                ViewKind::Scalar(value) => {
                    let _ = writeln!(block, "  {}", format_number(*value).green());
                }
                ViewKind::Ranked(entries) | ViewKind::Buckets(entries) => {
                    for entry in entries {
                        let _ = writeln!(
                            block,
                            "  {:>6}  {}",
                            entry.count.to_string().green(),
                            entry.category
                        );
                    }
                }
                ViewKind::Percentages(entries) => {
                    for entry in entries {
                        let _ = writeln!(block, "  {:>6.1}%  {}", entry.percent, entry.category);
                    }
                }
                ViewKind::Series(points) => {
                    let _ = writeln!(
                        block,
                        "  {} points{}",
                        points.len().to_string().green(),
                        span_of(points)
                    );
                }
            },
        }
        block
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn span_of(points: &[crate::roc::domain::TrendPoint]) -> String {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => format!(
            ", {} to {}",
            first.timestamp.format("%Y-%m-%d"),
            last.timestamp.format("%Y-%m-%d")
        ),
        _ => String::new(),
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardRenderer for ConsoleRenderer {
    fn render(&self, frame: &DashboardFrame) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(output, "{}", Self::header(frame).bold());
        let _ = writeln!(output);
        for report in &frame.widgets {
            output.push_str(&Self::widget_block(report));
        }
        if frame.all_unavailable() {
            let _ = writeln!(
                output,
                "{}",
                "Every widget is dark - check the metric source.".red()
            );
        }
        Ok(output)
    }
}
