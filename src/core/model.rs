// LeadDesk - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Lead
// =============================================================================

/// A prospective student tracked through the admissions pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque unique identifier.
    pub id: String,

    pub name: String,

    pub phone: String,

    #[serde(default)]
    pub email: Option<String>,

    /// Acquisition channel (e.g. "Facebook", "Walk-in").
    #[serde(default)]
    pub source: String,

    pub stage: PipelineStage,

    /// Coarse priority bucket.
    pub score: LeadScore,

    /// Fine-grained priority, 0-100. Not required to agree with `score`.
    pub score_value: u8,

    /// Agent id. May not resolve; see `CrmRepository::agent_name`.
    pub assigned_to: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub last_contacted_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub next_follow_up: Option<DateTime<Utc>>,

    #[serde(default)]
    pub course: Option<String>,

    /// Budget in whole currency units.
    #[serde(default)]
    pub budget: Option<u64>,

    #[serde(default)]
    pub is_decision_maker: bool,

    pub urgency: Urgency,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Lead returned to the pipeline after previously dropping out.
    #[serde(default)]
    pub reactivated: bool,

    #[serde(default)]
    pub previous_stage: Option<PipelineStage>,
}

// =============================================================================
// Pipeline stage
// =============================================================================

/// The seven pipeline phases, in funnel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    NewProspect,
    Contacted,
    Interested,
    VisitScheduled,
    PaymentPending,
    Admission,
    NotQualified,
}

impl PipelineStage {
    /// Returns all variants in funnel order.
    pub fn all() -> &'static [PipelineStage] {
        &[
            PipelineStage::NewProspect,
            PipelineStage::Contacted,
            PipelineStage::Interested,
            PipelineStage::VisitScheduled,
            PipelineStage::PaymentPending,
            PipelineStage::Admission,
            PipelineStage::NotQualified,
        ]
    }

    /// Stable machine identifier, as used in dataset files.
    pub fn id(&self) -> &'static str {
        match self {
            PipelineStage::NewProspect => "new_prospect",
            PipelineStage::Contacted => "contacted",
            PipelineStage::Interested => "interested",
            PipelineStage::VisitScheduled => "visit_scheduled",
            PipelineStage::PaymentPending => "payment_pending",
            PipelineStage::Admission => "admission",
            PipelineStage::NotQualified => "not_qualified",
        }
    }

    /// Default human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::NewProspect => "New Prospect",
            PipelineStage::Contacted => "Contacted",
            PipelineStage::Interested => "Interested",
            PipelineStage::VisitScheduled => "Visit Scheduled",
            PipelineStage::PaymentPending => "Payment Pending",
            PipelineStage::Admission => "Admission",
            PipelineStage::NotQualified => "Not Qualified",
        }
    }

    /// True for stages a lead never leaves (no further calls needed).
    pub fn is_closed(&self) -> bool {
        matches!(self, PipelineStage::Admission | PipelineStage::NotQualified)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PipelineStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        PipelineStage::all()
            .iter()
            .copied()
            .find(|stage| stage.id() == wanted)
            .ok_or_else(|| format!("unknown pipeline stage '{s}'"))
    }
}

// =============================================================================
// Score and urgency
// =============================================================================

/// Coarse lead temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadScore {
    Hot,
    Warm,
    Cold,
}

impl LeadScore {
    /// Returns all variants, hottest first.
    pub fn all() -> &'static [LeadScore] {
        &[LeadScore::Hot, LeadScore::Warm, LeadScore::Cold]
    }

    /// Priority rank used by the call queue: hot=0, warm=1, cold=2.
    pub fn rank(&self) -> u8 {
        match self {
            LeadScore::Hot => 0,
            LeadScore::Warm => 1,
            LeadScore::Cold => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadScore::Hot => "Hot",
            LeadScore::Warm => "Warm",
            LeadScore::Cold => "Cold",
        }
    }
}

impl std::fmt::Display for LeadScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadScore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hot" => Ok(LeadScore::Hot),
            "warm" => Ok(LeadScore::Warm),
            "cold" => Ok(LeadScore::Cold),
            _ => Err(format!("unknown lead score '{s}'")),
        }
    }
}

/// How soon the lead intends to enrol. Independent of `LeadScore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::High => "High",
            Urgency::Medium => "Medium",
            Urgency::Low => "Low",
        }
    }
}

// =============================================================================
// Activity
// =============================================================================

/// One logged interaction with a lead. Never mutates the lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,

    pub lead_id: String,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub outcome: Option<CallOutcome>,

    /// Call or meeting length in seconds.
    #[serde(default)]
    pub duration_secs: Option<u32>,

    pub created_at: DateTime<Utc>,

    /// Agent id of the author.
    pub created_by: String,

    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Call,
    Whatsapp,
    Visit,
    Note,
    Email,
    Meeting,
}

impl ActivityType {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Call => "Call",
            ActivityType::Whatsapp => "WhatsApp",
            ActivityType::Visit => "Visit",
            ActivityType::Note => "Note",
            ActivityType::Email => "Email",
            ActivityType::Meeting => "Meeting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    ConnectedDiscussed,
    NoAnswer,
    Busy,
    WrongNumber,
    CallbackRequested,
    Voicemail,
}

impl CallOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CallOutcome::ConnectedDiscussed => "Connected",
            CallOutcome::NoAnswer => "No answer",
            CallOutcome::Busy => "Busy",
            CallOutcome::WrongNumber => "Wrong number",
            CallOutcome::CallbackRequested => "Callback requested",
            CallOutcome::Voicemail => "Voicemail",
        }
    }
}

// =============================================================================
// Agent
// =============================================================================

/// A staff member leads can be assigned to. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Manager,
    Agent,
    Auditor,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super Admin",
            UserRole::Manager => "Manager",
            UserRole::Agent => "Agent",
            UserRole::Auditor => "Auditor",
        }
    }
}

// =============================================================================
// Stage configuration
// =============================================================================

/// Display and ordering metadata for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    pub id: PipelineStage,
    pub label: String,
    /// Ordinal used for sorting and stage-progress display.
    pub order: u32,
    #[serde(default)]
    pub requires_activity: bool,
    #[serde(default)]
    pub requires_payment: bool,
}

impl StageConfig {
    /// The built-in stage table: orders 1-7 in funnel order.
    pub fn defaults() -> Vec<StageConfig> {
        PipelineStage::all()
            .iter()
            .zip(1u32..)
            .map(|(&stage, order)| StageConfig {
                id: stage,
                label: stage.label().to_string(),
                order,
                requires_activity: stage != PipelineStage::NewProspect,
                requires_payment: stage == PipelineStage::Admission,
            })
            .collect()
    }
}

/// Configured order of `stage`, or 0 when the table has no entry for it.
pub fn stage_order(stages: &[StageConfig], stage: PipelineStage) -> u32 {
    stages
        .iter()
        .find(|s| s.id == stage)
        .map(|s| s.order)
        .unwrap_or(0)
}

/// Configured label of `stage`, falling back to the built-in label.
pub fn stage_label(stages: &[StageConfig], stage: PipelineStage) -> &str {
    stages
        .iter()
        .find(|s| s.id == stage)
        .map(|s| s.label.as_str())
        .unwrap_or_else(|| stage.label())
}

// =============================================================================
// Targets
// =============================================================================

/// A numeric goal tracked over a period (e.g. monthly admissions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub current: u64,
    pub target: u64,
    /// Unit label; "BDT" marks a currency amount.
    pub unit: String,
    pub period: TargetPeriod,
    /// Change versus the previous period, in percent.
    #[serde(default)]
    pub trend: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TargetPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            TargetPeriod::Daily => "Daily",
            TargetPeriod::Weekly => "Weekly",
            TargetPeriod::Monthly => "Monthly",
        }
    }
}
