//! Plain view model written by the controller and renderer.
//!
//! Front-ends only read these types; nothing here knows about a toolkit.

use std::path::PathBuf;

use serde::Serialize;
use shared::domain::{Pro, ReportSection};

pub const NOT_AVAILABLE: &str = "Not available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub selected_file: Option<PathBuf>,
    pub trigger: TriggerView,
    /// Busy indicator text; `None` hides the indicator.
    pub busy: Option<String>,
    pub notice: Option<Notice>,
    /// `None` keeps the results region hidden.
    pub report: Option<ReportView>,
}

impl ViewModel {
    pub fn idle(ready_label: &str) -> Self {
        Self {
            selected_file: None,
            trigger: TriggerView {
                enabled: true,
                label: ready_label.to_string(),
            },
            busy: None,
            notice: None,
            report: None,
        }
    }

    pub fn report_visible(&self) -> bool {
        self.report.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Validation,
    Transport,
    UnreadableFile,
    Recognition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub title: String,
    pub artists: String,
    pub confidence: String,
    pub album: Option<String>,
    pub release_date: Option<String>,
    pub copyright_label: String,
    pub summary: Option<String>,
    pub pro_links: Vec<ProLinkView>,
    pub publishers: ListRegion,
    pub master_rights_holders: ListRegion,
    pub pros: ListRegion,
    pub composition_licenses: ListRegion,
    pub master_recording_licenses: ListRegion,
    pub source_links: ListRegion,
}

impl ReportView {
    pub fn region(&self, section: ReportSection) -> &ListRegion {
        match section {
            ReportSection::Publishers => &self.publishers,
            ReportSection::MasterRightsHolders => &self.master_rights_holders,
            ReportSection::Pros => &self.pros,
            ReportSection::CompositionLicenses => &self.composition_licenses,
            ReportSection::MasterRecordingLicenses => &self.master_recording_licenses,
            ReportSection::SourceLinks => &self.source_links,
        }
    }

    pub fn visible_pro_links(&self) -> impl Iterator<Item = (Pro, &str)> {
        self.pro_links
            .iter()
            .filter_map(|link| link.url.as_deref().map(|url| (link.pro, url)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProLinkView {
    pub pro: Pro,
    /// Hidden when `None`.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRegion {
    pub items: Vec<ListItem>,
}

impl ListRegion {
    pub fn placeholder() -> Self {
        Self {
            items: vec![ListItem::Placeholder],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.items.as_slice(), [ListItem::Placeholder])
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(ListItem::text).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListItem {
    Text { text: String },
    /// Opens in a new browser context.
    Link { url: String },
    Placeholder,
}

impl ListItem {
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } => text,
            Self::Link { url } => url,
            Self::Placeholder => NOT_AVAILABLE,
        }
    }
}
