//! Terminal output for the view model.

use std::fmt::Write as _;

use client_core::{ListItem, NoticeKind, ReportView, ViewModel};
use shared::domain::ReportSection;

fn notice_label(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Validation => "Input",
        NoticeKind::Transport => "Connection",
        NoticeKind::UnreadableFile => "File",
        NoticeKind::Recognition => "Not recognized",
    }
}

pub fn render_view(view: &ViewModel) -> String {
    let mut out = String::new();
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{}: {}", notice_label(notice.kind), notice.text);
    }
    if let Some(report) = &view.report {
        render_report(&mut out, report);
    }
    out
}

/// Text report, or the view model as pretty JSON when `json` is set.
pub fn render_for(view: &ViewModel, json: bool) -> serde_json::Result<String> {
    if json {
        let mut text = serde_json::to_string_pretty(view)?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(render_view(view))
    }
}

fn render_report(out: &mut String, report: &ReportView) {
    let _ = writeln!(out, "{:<14}{}", "Title:", report.title);
    let _ = writeln!(out, "{:<14}{}", "Artists:", report.artists);
    let _ = writeln!(out, "{:<14}{}", "Confidence:", report.confidence);
    if let Some(album) = &report.album {
        let _ = writeln!(out, "{:<14}{}", "Album:", album);
    }
    if let Some(release_date) = &report.release_date {
        let _ = writeln!(out, "{:<14}{}", "Released:", release_date);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.copyright_label);
    if let Some(summary) = &report.summary {
        let _ = writeln!(out, "{summary}");
    }

    let links: Vec<_> = report.visible_pro_links().collect();
    if !links.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Official repertoire searches");
        for (pro, url) in links {
            let _ = writeln!(out, "  {:<7}{}", pro.label(), url);
        }
    }

    for section in ReportSection::ALL {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", section.heading());
        for item in &report.region(section).items {
            match item {
                ListItem::Link { url } => {
                    let _ = writeln!(out, "  - {url}");
                }
                other => {
                    let _ = writeln!(out, "  - {}", other.text());
                }
            }
        }
    }
}
