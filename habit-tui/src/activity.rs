use serde::{Deserialize, Serialize};
use skapi::TableRef;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Name of the private table activities are written to.
pub const ACTIVITIES_TABLE: &str = "activities";

pub const NO_DESCRIPTION: &str = "No description provided";
pub const NOT_SPECIFIED: &str = "Not specified";

pub fn activities_table() -> TableRef {
    TableRef::private(ACTIVITIES_TABLE)
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityType {
    #[default]
    JobApplication,
    JobInterview,
    JobShortlist,
    JobOffer,
    ApplicationTime,
    Education,
    Leisure,
    Holiday,
    Friends,
    HouseChores,
    Sleep,
    Walk,
    Other,
}

/// Which optional field group an activity type shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    /// Carries `company` and `position`.
    JobRelated,
    /// Carries `duration` in hours.
    DurationBearing,
}

impl ActivityType {
    pub fn category(self) -> Option<ActivityCategory> {
        match self {
            ActivityType::JobApplication
            | ActivityType::JobInterview
            | ActivityType::JobShortlist
            | ActivityType::JobOffer => Some(ActivityCategory::JobRelated),
            ActivityType::ApplicationTime
            | ActivityType::Education
            | ActivityType::Leisure
            | ActivityType::Holiday
            | ActivityType::Friends
            | ActivityType::HouseChores
            | ActivityType::Sleep
            | ActivityType::Walk
            | ActivityType::Other => Some(ActivityCategory::DurationBearing),
        }
    }

    pub fn is_job_related(self) -> bool {
        self.category() == Some(ActivityCategory::JobRelated)
    }

    pub fn needs_duration(self) -> bool {
        self.category() == Some(ActivityCategory::DurationBearing)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityType::JobApplication => "Job Application Sent",
            ActivityType::JobInterview => "Job Interview",
            ActivityType::JobShortlist => "Job Shortlist",
            ActivityType::JobOffer => "Job Offer Received",
            ActivityType::ApplicationTime => "Application Time (Cover Letter/Form)",
            ActivityType::Education => "Education/Recap",
            ActivityType::Leisure => "Leisure Time",
            ActivityType::Holiday => "Holiday",
            ActivityType::Friends => "Talking to Friends",
            ActivityType::HouseChores => "House Chores",
            ActivityType::Sleep => "Sleep",
            ActivityType::Walk => "Walk/Exercise",
            ActivityType::Other => "Other Activity",
        }
    }

    /// The tag records of this type are written with.
    pub fn tag(self) -> String {
        self.as_ref().to_string()
    }

    pub fn next(self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn previous(self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// An activity type as read back from the store. Types this client does not
/// know about are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityKind {
    Known(ActivityType),
    Unknown(String),
}

impl ActivityKind {
    pub fn label(&self) -> &str {
        match self {
            ActivityKind::Known(t) => t.label(),
            ActivityKind::Unknown(raw) => raw,
        }
    }
}

impl From<ActivityType> for ActivityKind {
    fn from(value: ActivityType) -> Self {
        ActivityKind::Known(value)
    }
}

/// Payload of an activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityData {
    pub activity_type: ActivityKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Epoch milliseconds of `date` + `time` in the user's time zone on that date.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}
