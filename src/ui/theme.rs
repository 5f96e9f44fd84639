// LeadDesk - ui/theme.rs
//
// Colour scheme, score/stage/tier colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{ActivityType, LeadScore, PipelineStage};
use crate::core::stats::PerformanceTier;
use crate::core::targets::TargetTier;
use egui::Color32;

/// Colour for a lead temperature badge.
pub fn score_colour(score: LeadScore) -> Color32 {
    match score {
        LeadScore::Hot => Color32::from_rgb(220, 38, 38),   // Red 600
        LeadScore::Warm => Color32::from_rgb(217, 119, 6),  // Amber 600
        LeadScore::Cold => Color32::from_rgb(37, 99, 235),  // Blue 600
    }
}

/// Accent colour for a pipeline stage (column headers, stage badges).
pub fn stage_colour(stage: PipelineStage) -> Color32 {
    match stage {
        PipelineStage::NewProspect => Color32::from_rgb(107, 114, 128),    // Gray 500
        PipelineStage::Contacted => Color32::from_rgb(59, 130, 246),       // Blue 500
        PipelineStage::Interested => Color32::from_rgb(139, 92, 246),      // Violet 500
        PipelineStage::VisitScheduled => Color32::from_rgb(234, 179, 8),   // Yellow 500
        PipelineStage::PaymentPending => Color32::from_rgb(249, 115, 22),  // Orange 500
        PipelineStage::Admission => Color32::from_rgb(34, 197, 94),        // Green 500
        PipelineStage::NotQualified => Color32::from_rgb(239, 68, 68),     // Red 500
    }
}

pub fn activity_colour(kind: ActivityType) -> Color32 {
    match kind {
        ActivityType::Call => Color32::from_rgb(59, 130, 246),
        ActivityType::Whatsapp => Color32::from_rgb(34, 197, 94),
        ActivityType::Visit => Color32::from_rgb(139, 92, 246),
        ActivityType::Note => Color32::from_rgb(107, 114, 128),
        ActivityType::Email => Color32::from_rgb(14, 165, 233),
        ActivityType::Meeting => Color32::from_rgb(249, 115, 22),
    }
}

pub fn target_colour(tier: TargetTier) -> Color32 {
    match tier {
        TargetTier::Achieved => Color32::from_rgb(34, 197, 94),
        TargetTier::OnTrack => Color32::from_rgb(59, 130, 246),
        TargetTier::Behind => Color32::from_rgb(234, 179, 8),
    }
}

pub fn performance_colour(tier: PerformanceTier) -> Color32 {
    match tier {
        PerformanceTier::Strong => Color32::from_rgb(34, 197, 94),
        PerformanceTier::Fair => Color32::from_rgb(234, 179, 8),
        PerformanceTier::Low => Color32::from_rgb(239, 68, 68),
    }
}

/// Overdue follow-ups and stale contacts.
pub const OVERDUE: Color32 = Color32::from_rgb(220, 38, 38);

/// Selected-row tint in the lead table.
pub fn selection_bg(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_premultiplied(59, 130, 246, 40)
    } else {
        Color32::from_rgba_premultiplied(59, 130, 246, 25)
    }
}

/// Apply the dark or light visuals to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool) {
    if dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 190.0;
pub const DETAIL_PANE_WIDTH: f32 = 340.0;
pub const ROW_HEIGHT: f32 = 22.0;
pub const PIPELINE_COLUMN_WIDTH: f32 = 180.0;
pub const STAT_CARD_WIDTH: f32 = 150.0;
