use crate::application::read_models::{
    HomeView, LatestView, PackageCardView, PackageReport, RecentView, RowState, SearchView,
    TreeRowView, TreeView, VersionsView, ViewModel,
};
use crate::ports::outbound::ViewFormatter;
use crate::shared::Result;
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

const INDENT: &str = "  ";

/// TextFormatter adapter for human-readable terminal output
///
/// Colors are applied through `owo-colors` and can be switched off for
/// pipes and `--no-color`.
pub struct TextFormatter {
    color: bool,
}

impl TextFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, Style::new().bold().underline())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, Style::new().dimmed())
    }

    fn warn(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }

    fn error(&self, text: &str) -> String {
        self.paint(text, Style::new().red())
    }

    fn format_search(&self, view: &SearchView, out: &mut String) {
        if view.hits.is_empty() {
            let _ = writeln!(out, "No packages found for '{}'", view.query);
            return;
        }
        let _ = writeln!(out, "{}", self.heading(&format!("Search results for '{}'", view.query)));
        for hit in &view.hits {
            let _ = writeln!(out, "{}{}  {}", INDENT, hit.label, self.dim(&hit.coordinate));
        }
    }

    fn format_versions(&self, view: &VersionsView, out: &mut String) {
        let _ = writeln!(out, "{}", self.heading(&view.artifact));
        if let Some(latest) = &view.latest {
            let _ = writeln!(out, "Latest version: {}", latest);
        }
        for series in &view.series {
            let marker = if series.current { "▾" } else { "▸" };
            let label = format!("{} {} ({})", marker, series.label, series.versions.len());
            let label = if series.current {
                self.paint(&label, Style::new().bold())
            } else {
                label
            };
            let _ = writeln!(out, "{}", label);
            for version in &series.versions {
                let pointer = if version.selected { "→ " } else { "  " };
                let mut line = format!("{}{}{}", INDENT, pointer, version.version);
                if version.analyzed {
                    let details = [
                        version.effective_size.as_deref(),
                        version.effective_license.as_deref(),
                    ]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ");
                    let _ = write!(line, "  {}", self.paint(&format!("analyzed: {}", details), Style::new().green()));
                }
                let _ = writeln!(out, "{}", line);
            }
        }
    }

    fn format_report(&self, report: &PackageReport, out: &mut String) {
        let _ = writeln!(out, "{}", self.heading(&report.title));
        let _ = writeln!(out, "{}", self.dim(&report.coordinate));
        if let Some(description) = &report.description {
            let _ = writeln!(out, "\n{}", description);
        }
        for alert in &report.alerts {
            let _ = writeln!(out, "\n{}", self.error(&format!("⚠️  {}", alert)));
        }
        if !report.links.is_empty() {
            let _ = writeln!(out);
            for link in &report.links {
                let _ = writeln!(out, "{:<10} {}", format!("{}:", link.label), link.url);
            }
        }
        if !report.metrics.is_empty() {
            let _ = writeln!(out);
            let width = report.metrics.iter().map(|m| m.title.len()).max().unwrap_or(0);
            for metric in &report.metrics {
                let mut line = format!("{:<width$}  {}", metric.title, metric.value, width = width);
                if let Some(hint) = &metric.hint {
                    let _ = write!(line, "  {}", self.dim(&format!("({})", hint)));
                }
                let _ = writeln!(out, "{}", line);
            }
        }
        if !report.license_histogram.is_empty() {
            let _ = writeln!(out, "\nLicense types across required dependencies:");
            for entry in &report.license_histogram {
                let _ = writeln!(out, "{}{}: {}", INDENT, entry.license, entry.count);
            }
        }
        if let Some(versions) = &report.versions {
            let _ = writeln!(out);
            self.format_versions(versions, out);
        }
        if let Some(tree) = &report.tree {
            let _ = writeln!(out);
            for notice in &report.notices {
                let _ = writeln!(out, "{}", self.dim(&format!("ℹ️  {}", notice)));
            }
            self.format_tree(tree, out);
        }
    }

    fn format_tree(&self, view: &TreeView, out: &mut String) {
        let _ = writeln!(out, "{}", self.heading("Dependency explorer"));
        for row in &view.rows {
            let _ = writeln!(out, "{}", self.tree_row(row));
        }
    }

    fn tree_row(&self, row: &TreeRowView) -> String {
        let marker = match row.state {
            RowState::Leaf => "·",
            RowState::Collapsed => "+",
            RowState::Expanded => "-",
            RowState::Loading => "…",
            RowState::Failed => "!",
        };
        let mut line = format!(
            "{:>3} {}{} {}",
            row.row,
            INDENT.repeat(row.depth),
            marker,
            row.coordinate
        );
        if let Some(scope) = &row.scope {
            let _ = write!(line, " {}", self.dim(&format!("[{}]", scope)));
        }
        if row.optional {
            let _ = write!(line, " {}", self.dim("(optional)"));
        }
        if row.unresolved {
            let _ = write!(line, " {}", self.warn("(unresolved)"));
        }
        if row.state == RowState::Loading {
            let _ = write!(line, " {}", self.dim("loading..."));
        }
        if let Some(error) = &row.error {
            let _ = write!(line, " {}", self.error(&format!("error: {}", error)));
        }
        line
    }

    fn card(&self, card: &PackageCardView) -> String {
        format!(
            "{}{}\n{}{}{} | {} | {} | {}",
            INDENT,
            self.paint(&card.coordinate, Style::new().bold()),
            INDENT,
            INDENT,
            card.effective_size,
            card.dependencies,
            card.bytecode_version,
            card.license
        )
    }

    fn format_latest(&self, view: &LatestView, out: &mut String) {
        let _ = writeln!(out, "{}", self.heading("Recently analyzed packages"));
        for card in &view.packages {
            let _ = writeln!(out, "{}", self.card(card));
        }
    }

    fn format_recent(&self, view: &RecentView, out: &mut String) {
        let _ = writeln!(out, "{}", self.heading("Recently viewed"));
        if view.entries.is_empty() {
            let _ = writeln!(out, "{}{}", INDENT, self.dim("nothing yet"));
        }
        for entry in &view.entries {
            let _ = writeln!(out, "{}{}", INDENT, entry);
        }
    }

    fn format_home(&self, view: &HomeView, out: &mut String) {
        let _ = writeln!(out, "{} packages analyzed so far\n", view.count);
        self.format_latest(
            &LatestView {
                packages: view.latest.clone(),
            },
            out,
        );
        let _ = writeln!(out);
        self.format_recent(
            &RecentView {
                entries: view.recently_viewed.clone(),
            },
            out,
        );
    }
}

impl ViewFormatter for TextFormatter {
    fn format(&self, view: &ViewModel) -> Result<String> {
        let mut out = String::new();
        match view {
            ViewModel::Home(home) => self.format_home(home, &mut out),
            ViewModel::Search(search) => self.format_search(search, &mut out),
            ViewModel::Versions(versions) => self.format_versions(versions, &mut out),
            ViewModel::Package(report) => self.format_report(report, &mut out),
            ViewModel::Tree(tree) => self.format_tree(tree, &mut out),
            ViewModel::Recent(recent) => self.format_recent(recent, &mut out),
            ViewModel::Latest(latest) => self.format_latest(latest, &mut out),
            ViewModel::Count(count) => {
                let _ = writeln!(out, "{} packages analyzed", count.count);
            }
            ViewModel::Message(message) => {
                let _ = writeln!(out, "{}", message.message);
            }
        }
        Ok(out)
    }
}
