use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which backing table a dated item comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Formal press release
    Press,
    /// COMMANDO social-media content
    Content,
    /// Scheduled media plan entry
    Plan,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Press, ItemKind::Content, ItemKind::Plan];

    /// Identifier used in URLs and serialized data
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Press => "press",
            ItemKind::Content => "content",
            ItemKind::Plan => "plan",
        }
    }

    /// Name of the backend table holding rows of this kind
    pub fn table_name(&self) -> &'static str {
        match self {
            ItemKind::Press => "press_releases",
            ItemKind::Content => "commando_contents",
            ItemKind::Plan => "media_plans",
        }
    }

    /// Column holding the free-text date
    pub fn date_column(&self) -> &'static str {
        match self {
            ItemKind::Press | ItemKind::Content => "TANGGAL",
            ItemKind::Plan => "tanggal_rencana",
        }
    }

    /// Column holding the free-text process / status
    pub fn process_column(&self) -> &'static str {
        match self {
            ItemKind::Press | ItemKind::Content => "PROCESS",
            ItemKind::Plan => "status",
        }
    }

    pub fn parse(value: &str) -> Option<ItemKind> {
        match value {
            "press" => Some(ItemKind::Press),
            "content" => Some(ItemKind::Content),
            "plan" => Some(ItemKind::Plan),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A press release, content entry or media plan as fetched from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedItem {
    /// Opaque identifier owned by the backend
    pub id: String,
    pub title: String,
    /// Freeform category text
    pub category: String,
    /// Indonesian free-text date, e.g. "Senin, 3 Januari 2025"
    pub raw_date: String,
    pub kind: ItemKind,
    /// Free-text PROCESS / status field, may be empty
    #[serde(default)]
    pub process: String,
    /// Person in charge (media plans)
    #[serde(default)]
    pub pic: Option<String>,
}

/// Fields the reschedule protocol is allowed to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Date,
    Process,
}

impl ItemField {
    pub fn column_name(&self, kind: ItemKind) -> &'static str {
        match self {
            ItemField::Date => kind.date_column(),
            ItemField::Process => kind.process_column(),
        }
    }
}

/// Content approval stage shown as a Kanban column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Draft,
    Review,
    Approved,
    Published,
}

impl PipelineStage {
    /// Columns in board order
    pub const ALL: [PipelineStage; 4] = [
        PipelineStage::Draft,
        PipelineStage::Review,
        PipelineStage::Approved,
        PipelineStage::Published,
    ];

    /// Kanban column id
    pub fn id(&self) -> &'static str {
        match self {
            PipelineStage::Draft => "draft",
            PipelineStage::Review => "review",
            PipelineStage::Approved => "approved",
            PipelineStage::Published => "published",
        }
    }

    /// Value written to the free-text PROCESS field
    pub fn process_label(&self) -> &'static str {
        match self {
            PipelineStage::Draft => "Draft",
            PipelineStage::Review => "Pending Review",
            PipelineStage::Approved => "Approved",
            PipelineStage::Published => "Published",
        }
    }

    pub fn from_id(id: &str) -> Option<PipelineStage> {
        Self::ALL.into_iter().find(|stage| stage.id() == id)
    }

    pub fn from_process_label(label: &str) -> Option<PipelineStage> {
        Self::ALL.into_iter().find(|stage| stage.process_label() == label)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Represents a single cell in the month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Day of month, None for leading padding cells
    pub day: Option<u32>,
    pub items: Vec<DatedItem>,
    /// Matches the wall-clock date at build time
    pub is_today: bool,
}

/// A month grid with items bucketed per day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    /// 0 = January
    pub month_index: u32,
    pub month_name: String,
    pub first_weekday: u32, // 0 = Sunday
    pub days_in_month: u32,
    pub days: Vec<CalendarDay>,
}

/// Represents the current focus month for calendar navigation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalendarFocusDate {
    pub year: i32,
    pub month_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusRequest {
    pub year: i32,
    pub month_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusResponse {
    pub focus_date: CalendarFocusDate,
    pub success_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub year: i32,
    pub month_index: u32,
    pub day: u32,
    pub formatted_date: String,
    pub iso_date: String,
}

/// Color bucket of a heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityLevel {
    None,
    Low,
    Medium,
    High,
    Peak,
}

/// Activity counts for one year keyed by `YYYY-MM-DD`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapYear {
    pub year: i32,
    pub counts: BTreeMap<String, u32>,
    /// Color bucket of every day present in `counts`
    pub levels: BTreeMap<String, IntensityLevel>,
    pub total: u32,
    pub active_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineColumn {
    pub stage: PipelineStage,
    pub items: Vec<DatedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineBoard {
    pub columns: Vec<PipelineColumn>,
}

/// Where a dragged item was dropped
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DropTarget {
    /// Calendar cell, as an ISO date
    Day(chrono::NaiveDate),
    /// Kanban column
    Stage(PipelineStage),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RescheduleRequest {
    pub target: DropTarget,
}

/// Result of a committed or skipped drop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RescheduleOutcome {
    /// Dropped on the item's current position
    Unchanged,
    Committed { item: DatedItem },
    RolledBack { item: DatedItem, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateFieldRequest {
    pub field: ItemField,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateItemRequest {
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub raw_date: String,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub pic: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub level: NotificationLevel,
    pub message: String,
    /// RFC 3339
    pub created_at: String,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

/// Monthly publication targets per item kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct KpiTargets {
    pub monthly: BTreeMap<ItemKind, u32>,
}

/// Visible table columns per item kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ColumnPreferences {
    pub visible: BTreeMap<ItemKind, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiProgress {
    pub kind: ItemKind,
    pub target: u32,
    pub actual: u32,
    /// Not clamped, may exceed 100
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSummary {
    pub year: i32,
    /// Index 0 = January
    pub monthly_counts: [u32; 12],
    pub categories: Vec<CategoryCount>,
    pub stages: BTreeMap<PipelineStage, u32>,
    pub kpi: Vec<KpiProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
