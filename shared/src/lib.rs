use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Page size used when a list request does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a list request may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Response envelope returned by every API endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// True iff the operation completed without an error
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable status, always present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field-level validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            errors: None,
        }
    }

    /// Success without a payload, e.g. after a delete
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        if !errors.is_empty() {
            self.errors = Some(errors);
        }
        self
    }
}

/// Paginated list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    /// Number of records that matched before the page was sliced
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, total: usize, page: u32, limit: u32) -> Self {
        let total_pages = if total == 0 || limit == 0 {
            0
        } else {
            total.div_ceil(limit as usize) as u32
        };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

// ---------------------------------------------------------------------------
// Search parameters
// ---------------------------------------------------------------------------

/// Sort direction for list requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Parameters accepted by every `list` operation.
///
/// On the wire this is a flat query string. The keys `page`, `limit`,
/// `search`, `sortBy` and `sortOrder` are reserved; any other key is an
/// equality filter on the field of the same name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl SearchParams {
    pub const PAGE: &'static str = "page";
    pub const LIMIT: &'static str = "limit";
    pub const SEARCH: &'static str = "search";
    pub const SORT_BY: &'static str = "sortBy";
    pub const SORT_ORDER: &'static str = "sortOrder";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn sorted_by(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(key.into());
        self.sort_order = Some(order);
        self
    }

    /// 1-based page, treating a missing or zero page as the first
    pub fn page_or_default(&self) -> u32 {
        self.page.filter(|page| *page > 0).unwrap_or(1)
    }

    /// Page size, falling back to the default and capped at [`MAX_PAGE_SIZE`]
    pub fn limit_or_default(&self) -> u32 {
        self.limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    /// The trimmed search text, or `None` when there is nothing to search for
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Build params from decoded query-string pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value: String = value.into();
            match key.as_ref() {
                Self::PAGE => params.page = value.trim().parse().ok(),
                Self::LIMIT => params.limit = value.trim().parse().ok(),
                Self::SEARCH => params.search = Some(value),
                Self::SORT_BY => {
                    params.sort_by = Some(value).filter(|key| !key.trim().is_empty())
                }
                Self::SORT_ORDER => params.sort_order = Some(SortOrder::parse(&value)),
                other => {
                    params.filters.insert(other.to_string(), value);
                }
            }
        }
        params
    }

    /// Flatten into query-string pairs, omitting unset values
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push((Self::PAGE.to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push((Self::LIMIT.to_string(), limit.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push((Self::SEARCH.to_string(), search.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push((Self::SORT_BY.to_string(), sort_by.clone()));
        }
        if let Some(order) = self.sort_order {
            pairs.push((Self::SORT_ORDER.to_string(), order.as_str().to_string()));
        }
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

/// Date window and currency selection for report endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Inclusive start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    pub to: Option<String>,
    pub currency: Option<String>,
}

impl ReportQuery {
    /// True if `date` (YYYY-MM-DD or RFC 3339) falls inside the window
    pub fn contains(&self, date: &str) -> bool {
        let day = date.get(..10).unwrap_or(date);
        let after_start = self.from.as_deref().map_or(true, |from| day >= from);
        let before_end = self.to.as_deref().map_or(true, |to| day <= to);
        after_start && before_end
    }
}

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

/// Active/inactive flag used by groups, departments and classes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Visitor,
    Transferred,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Visitor => "visitor",
            MemberStatus::Transferred => "transferred",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Direction of money in a finance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceKind {
    Income,
    Expense,
}

impl FinanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinanceKind::Income => "income",
            FinanceKind::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Check,
    Card,
    BankTransfer,
    MobileMoney,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::MobileMoney => "mobile_money",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Numeric rank used when sorting by priority
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Normal => 1,
            Priority::High => 2,
            Priority::Urgent => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl AnnouncementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementStatus::Draft => "draft",
            AnnouncementStatus::Published => "published",
            AnnouncementStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }

    /// Present and late both count as having attended
    pub fn attended(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_via_as_str!(
    SortOrder,
    ActivityStatus,
    MemberStatus,
    Gender,
    FinanceKind,
    PaymentMethod,
    EventStatus,
    Priority,
    AnnouncementStatus,
    AttendanceStatus,
);

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// Member ID in format: "member_<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    /// YYYY-MM-DD
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub status: MemberStatus,
    pub department_id: Option<String>,
    /// YYYY-MM-DD
    pub join_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub status: Option<MemberStatus>,
    pub department_id: Option<String>,
    /// Defaults to the creation date
    pub join_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub status: Option<MemberStatus>,
    pub department_id: Option<String>,
    pub join_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-form category such as "Ministry", "Music" or "Prayer"
    pub category: String,
    pub leader: Option<String>,
    pub meeting_schedule: Option<String>,
    pub member_count: u32,
    pub status: ActivityStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub leader: Option<String>,
    pub meeting_schedule: Option<String>,
    pub member_count: Option<u32>,
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub leader: Option<String>,
    pub meeting_schedule: Option<String>,
    pub member_count: Option<u32>,
    pub status: Option<ActivityStatus>,
}

// ---------------------------------------------------------------------------
// Departments and roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: String,
    pub head: Option<String>,
    pub status: ActivityStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub head: Option<String>,
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub head: Option<String>,
    pub status: Option<ActivityStatus>,
}

/// A role inside a department, linked by `department_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRole {
    pub id: String,
    pub department_id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    pub department_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub department_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

/// Finance ledger entry. ID in format: "txn_<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
    pub id: String,
    pub kind: FinanceKind,
    pub category: String,
    /// Always positive; `kind` carries the direction
    pub amount: f64,
    pub description: String,
    /// YYYY-MM-DD
    pub date: String,
    pub reference: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFinanceRecordRequest {
    pub kind: FinanceKind,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFinanceRecordRequest {
    pub kind: Option<FinanceKind>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub reference: Option<String>,
}

// ---------------------------------------------------------------------------
// Giving
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub donor_name: String,
    pub member_id: Option<String>,
    pub amount: f64,
    /// ISO 4217 code
    pub currency: String,
    /// "Tithe", "Offering", "Building Fund", ...
    pub category: String,
    pub payment_method: PaymentMethod,
    /// YYYY-MM-DD
    pub date: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub donor_name: String,
    pub member_id: Option<String>,
    pub amount: f64,
    /// Defaults to "USD"
    pub currency: Option<String>,
    pub category: String,
    pub payment_method: Option<PaymentMethod>,
    pub date: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationRequest {
    pub donor_name: Option<String>,
    pub member_id: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    /// RFC 3339 or YYYY-MM-DD
    pub start_date: String,
    pub end_date: Option<String>,
    pub status: EventStatus,
    pub organizer: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub category: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub status: Option<EventStatus>,
    pub organizer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<EventStatus>,
    pub organizer: Option<String>,
}

// ---------------------------------------------------------------------------
// Communications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    /// "all", "members", "leaders", ...
    pub audience: String,
    pub priority: Priority,
    pub status: AnnouncementStatus,
    /// RFC 3339, set when the announcement is published
    pub publish_date: Option<String>,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    /// Defaults to "all"
    pub audience: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<AnnouncementStatus>,
    pub publish_date: Option<String>,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub audience: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<AnnouncementStatus>,
    pub publish_date: Option<String>,
    pub author: Option<String>,
}

// ---------------------------------------------------------------------------
// Sunday school
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SundaySchoolClass {
    pub id: String,
    pub name: String,
    pub teacher: String,
    /// "Toddlers", "Juniors", "Teens", "Adults", ...
    pub age_group: String,
    pub room: Option<String>,
    pub schedule: Option<String>,
    pub capacity: u32,
    pub enrolled: u32,
    pub status: ActivityStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    pub teacher: String,
    pub age_group: String,
    pub room: Option<String>,
    pub schedule: Option<String>,
    pub capacity: u32,
    pub enrolled: Option<u32>,
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub teacher: Option<String>,
    pub age_group: Option<String>,
    pub room: Option<String>,
    pub schedule: Option<String>,
    pub capacity: Option<u32>,
    pub enrolled: Option<u32>,
    pub status: Option<ActivityStatus>,
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub member_id: Option<String>,
    pub member_name: String,
    /// YYYY-MM-DD
    pub date: String,
    /// "Sunday Service", "Midweek Service", ...
    pub service_type: String,
    pub status: AttendanceStatus,
    /// HH:MM
    pub check_in_time: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceRequest {
    pub member_id: Option<String>,
    pub member_name: String,
    pub date: String,
    pub service_type: String,
    pub status: Option<AttendanceStatus>,
    pub check_in_time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub member_id: Option<String>,
    pub member_name: Option<String>,
    pub date: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub check_in_time: Option<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Document metadata. Content bytes are served from `/documents/:id/content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub category: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_by: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub title: String,
    pub file_name: String,
    pub category: String,
    /// Defaults to "application/octet-stream"
    pub content_type: Option<String>,
    pub size_bytes: Option<u64>,
    pub uploaded_by: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub visitors: usize,
    pub transferred: usize,
    /// Members whose join date falls in the current month
    pub new_this_month: usize,
    pub by_gender: BTreeMap<String, usize>,
    /// Keyed by department id; members without one are under "unassigned"
    pub by_department: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub total: usize,
    pub active: usize,
    pub total_members: u64,
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub total: usize,
    pub active: usize,
    /// Role count keyed by department name
    pub roles_by_department: BTreeMap<String, usize>,
}

/// Amount for one category together with its share of the whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    /// 0-100, rounded to two decimals
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinance {
    /// YYYY-MM
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub income_by_category: Vec<CategoryTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyFinance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAmount {
    /// YYYY-MM
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorTotal {
    pub donor_name: String,
    pub amount: f64,
    pub gifts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivingReport {
    /// Every amount below is in this currency. Without an explicit
    /// selection it is the currency most gifts in the window were made in.
    pub currency: Option<String>,
    pub total_amount: f64,
    pub donation_count: usize,
    pub average_gift: f64,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthlyAmount>,
    pub top_donors: Vec<DonorTotal>,
    /// Currencies with gifts in the window that the totals leave out
    #[serde(default)]
    pub other_currencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_records: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    /// (present + late) / total * 100, rounded to two decimals
    pub attendance_rate: f64,
    pub by_service_type: BTreeMap<String, usize>,
    /// Attended count keyed by YYYY-MM
    pub by_month: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub upcoming: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SundaySchoolStats {
    pub classes: usize,
    pub active_classes: usize,
    pub total_enrolled: u64,
    pub total_capacity: u64,
    /// enrolled / capacity * 100, rounded to two decimals
    pub utilization_rate: f64,
    pub enrolled_by_age_group: BTreeMap<String, u64>,
}

/// Headline numbers for the dashboard landing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_members: usize,
    pub active_members: usize,
    pub giving_this_month: f64,
    /// Currency of `giving_this_month`; none when nothing was given
    pub giving_currency: Option<String>,
    pub attendance_rate: f64,
    pub upcoming_events: usize,
    pub published_announcements: usize,
    pub generated_at: String,
}

/// Which dataset a CSV report export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Members,
    Giving,
    Attendance,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Members => "members",
            ReportKind::Giving => "giving",
            ReportKind::Attendance => "attendance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "members" => Some(ReportKind::Members),
            "giving" => Some(ReportKind::Giving),
            "attendance" => Some(ReportKind::Attendance),
            _ => None,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}-report.csv", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Session and health
// ---------------------------------------------------------------------------

/// Signed-in user as stored in the dashboard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
