//! Report renderer: maps a successful [`AnalysisResponse`] onto a [`ReportView`].
//!
//! Every region is computed on its own from the payload, so a missing
//! intermediate object only ever affects the regions beneath it.

use shared::{
    domain::Pro,
    protocol::{AnalysisResponse, CopyrightReport, TextList},
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::PresentationSettings,
    view::{ListItem, ListRegion, ProLinkView, ReportView},
};

const CONFIDENCE_FALLBACK: &str = "N/A";
const MIN_CONFIDENCE: f64 = 0.0;
const MAX_CONFIDENCE: f64 = 100.0;

pub fn render_report(response: &AnalysisResponse, settings: &PresentationSettings) -> ReportView {
    let report = response.copyright_report.as_ref();

    let title = response
        .title
        .as_deref()
        .map(sanitize_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| settings.title_fallback.clone());
    let artists = join_artists(&response.artists);
    let confidence = format_confidence(response.confidence_score, &settings.confidence_suffix);

    let copyright_label = match report {
        Some(report) if report.error.is_none() => settings.copyright_label.clone(),
        Some(report) => {
            warn!(
                error = report.error.as_deref().unwrap_or_default(),
                "render: backend copyright lookup failed"
            );
            settings.copyright_unavailable_label.clone()
        }
        None => settings.copyright_unavailable_label.clone(),
    };

    let shown_confidence = response
        .confidence_score
        .is_some()
        .then_some(confidence.as_str());
    let summary = settings
        .show_summary
        .then(|| summary_sentence(&title, &artists, shown_confidence));

    let view = ReportView {
        album: optional_text(response.album.as_deref()),
        release_date: optional_text(response.release_date.as_deref()),
        pro_links: pro_links(response),
        publishers: text_region(report.map(|r| &r.publisher)),
        master_rights_holders: text_region(report.map(|r| &r.master_rights_holder)),
        pros: text_region(report.map(|r| &r.pros)),
        composition_licenses: text_region(
            report.and_then(CopyrightReport::composition_licensing),
        ),
        master_recording_licenses: text_region(
            report.and_then(CopyrightReport::master_recording_licensing),
        ),
        source_links: link_region(report.map(|r| &r.source_links)),
        title,
        artists,
        confidence,
        copyright_label,
        summary,
    };
    debug!(
        title = %view.title,
        visible_links = view.visible_pro_links().count(),
        "render: report ready"
    );
    view
}

/// Zero-width and bidi formatting characters.
fn is_invisible_format(ch: char) -> bool {
    matches!(
        ch,
        '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{FEFF}'
    )
}

/// Strips control and invisible formatting characters and collapses
/// whitespace runs so backend text can never smuggle terminal escapes,
/// reordered text or layout breaks.
pub fn sanitize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            pending_space = true;
        } else if ch.is_control() || is_invisible_format(ch) {
            continue;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }
    out
}

pub fn join_artists(artists: &TextList) -> String {
    artists
        .iter()
        .map(|artist| sanitize_text(artist))
        .filter(|artist| !artist.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_confidence(score: Option<f64>, suffix: &str) -> String {
    let Some(score) = score.filter(|score| score.is_finite()) else {
        return CONFIDENCE_FALLBACK.to_string();
    };
    // `+ 0.0` turns a negative zero into a positive one.
    let clamped = score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) + 0.0;
    if clamped != score {
        warn!(score, clamped, "render: confidence score out of range");
    }

    let number = if clamped.fract() == 0.0 {
        format!("{clamped:.0}")
    } else {
        let fixed = format!("{clamped:.2}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    format!("{number}{suffix}")
}

/// Returns the link text when it is an absolute http(s) URL.
pub fn safe_link(raw: &str) -> Option<String> {
    let cleaned = sanitize_text(raw);
    match Url::parse(&cleaned) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            Some(cleaned)
        }
        _ => None,
    }
}

fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(sanitize_text).filter(|text| !text.is_empty())
}

fn summary_sentence(title: &str, artists: &str, confidence: Option<&str>) -> String {
    let mut sentence = format!("Identified \"{title}\"");
    if !artists.is_empty() {
        sentence.push_str(&format!(" by {artists}"));
    }
    if let Some(confidence) = confidence {
        sentence.push_str(&format!(" with {confidence} confidence"));
    }
    sentence.push('.');
    sentence
}

fn pro_links(response: &AnalysisResponse) -> Vec<ProLinkView> {
    let links = response.official_search_links.as_ref();
    Pro::ALL
        .into_iter()
        .map(|pro| {
            let raw = links.and_then(|links| links.get(pro));
            let url = raw.and_then(safe_link);
            if raw.is_some() && url.is_none() {
                warn!(pro = pro.key(), "render: hiding unusable search link");
            }
            ProLinkView { pro, url }
        })
        .collect()
}

fn text_region(entries: Option<&TextList>) -> ListRegion {
    region_from(entries, |entry| ListItem::Text { text: entry })
}

fn link_region(entries: Option<&TextList>) -> ListRegion {
    region_from(entries, |entry| match safe_link(&entry) {
        Some(url) => ListItem::Link { url },
        None => ListItem::Text { text: entry },
    })
}

fn region_from(entries: Option<&TextList>, to_item: impl Fn(String) -> ListItem) -> ListRegion {
    let items: Vec<ListItem> = entries
        .into_iter()
        .flatten()
        .map(|entry| sanitize_text(entry))
        .filter(|entry| !entry.is_empty())
        .map(to_item)
        .collect();

    if items.is_empty() {
        ListRegion::placeholder()
    } else {
        ListRegion { items }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
