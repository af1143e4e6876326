use serde::{Deserialize, Serialize};

/// Performing rights organizations the backend can return search links for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pro {
    Bmi,
    Ascap,
    Socan,
}

impl Pro {
    pub const ALL: [Pro; 3] = [Pro::Bmi, Pro::Ascap, Pro::Socan];

    pub fn key(self) -> &'static str {
        match self {
            Self::Bmi => "bmi",
            Self::Ascap => "ascap",
            Self::Socan => "socan",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bmi => "BMI",
            Self::Ascap => "ASCAP",
            Self::Socan => "SOCAN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Publishers,
    MasterRightsHolders,
    Pros,
    CompositionLicenses,
    MasterRecordingLicenses,
    SourceLinks,
}

impl ReportSection {
    pub const ALL: [ReportSection; 6] = [
        ReportSection::Publishers,
        ReportSection::MasterRightsHolders,
        ReportSection::Pros,
        ReportSection::CompositionLicenses,
        ReportSection::MasterRecordingLicenses,
        ReportSection::SourceLinks,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Self::Publishers => "Publishers",
            Self::MasterRightsHolders => "Master rights holders",
            Self::Pros => "Performing rights organizations",
            Self::CompositionLicenses => "Composition licensing",
            Self::MasterRecordingLicenses => "Master recording licensing",
            Self::SourceLinks => "Sources",
        }
    }
}
