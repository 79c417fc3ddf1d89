//! # Profit-Margin Override
//!
//! The one piece of state that outlives a single computation is the margin an
//! operator saves for an order. This module holds the request shape sent to the
//! store and [`MarginEditor`], the caller-side session that keeps the
//! displayed breakdown consistent while a candidate is typed, recomputed and
//! saved.
//!
//! ## Editing Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  new(order) ──► breakdown from stored margin                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  edit(35) / edit_text("35") ──► breakdown from candidate (sync)         │
//! │       │                                                                 │
//! │       │   begin_recompute(40) ──► RecomputeRequest { generation: 7 }    │
//! │       │   begin_recompute(45) ──► RecomputeRequest { generation: 8 }    │
//! │       │   finish_recompute(gen 8) ──► shown                             │
//! │       │   finish_recompute(gen 7) ──► stale, discarded                  │
//! │       ▼                                                                 │
//! │  save_request() ──► MarginOverrideRequest ──► store                     │
//! │       │                                                                 │
//! │       ├── save_succeeded(stored) ──► stored default updated             │
//! │       └── save_failed(reason)    ──► nothing changes but the error      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::costing::compute_order_costs;
use crate::error::{CoreError, CoreResult};
use crate::numeric::{parse_decimal, NumericValue};
use crate::types::{CostBreakdown, Order};
use crate::validation::validate_margin_percent;

// =============================================================================
// Wire Types
// =============================================================================

/// Persist `profit_margin_percentage` as the new default for `order_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MarginOverrideRequest {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub profit_margin_percentage: Decimal,
}

// =============================================================================
// Offloaded Recomputation
// =============================================================================

/// A self-contained recomputation that can run on another thread.
#[derive(Debug, Clone)]
pub struct RecomputeRequest {
    pub generation: u64,
    pub order: Order,
    pub margin: Option<Decimal>,
}

impl RecomputeRequest {
    /// Runs the engine. Pure, so it may run anywhere.
    pub fn compute(self) -> RecomputeResult {
        RecomputeResult {
            generation: self.generation,
            breakdown: compute_order_costs(&self.order, self.margin),
        }
    }
}

/// Output of a [`RecomputeRequest`], tagged with the generation it answers.
#[derive(Debug, Clone)]
pub struct RecomputeResult {
    pub generation: u64,
    pub breakdown: CostBreakdown,
}

// =============================================================================
// Margin Editor
// =============================================================================

/// Editing session for the margin of a single order.
#[derive(Debug, Clone)]
pub struct MarginEditor {
    order: Order,
    candidate: Option<Decimal>,
    generation: u64,
    displayed: CostBreakdown,
    last_save_error: Option<String>,
}

impl MarginEditor {
    /// Starts a session showing the breakdown for the stored margin.
    pub fn new(order: Order) -> Self {
        let displayed = compute_order_costs(&order, None);
        MarginEditor {
            order,
            candidate: None,
            generation: 0,
            displayed,
            last_save_error: None,
        }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The unsaved margin currently being edited, if any.
    pub fn candidate(&self) -> Option<Decimal> {
        self.candidate
    }

    /// The breakdown currently on screen.
    pub fn breakdown(&self) -> &CostBreakdown {
        &self.displayed
    }

    /// Error message from the most recent failed save.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Sets the candidate and recomputes in place.
    ///
    /// Any offloaded recomputation still in flight becomes stale.
    pub fn edit(&mut self, candidate: Decimal) -> &CostBreakdown {
        self.candidate = Some(candidate);
        self.generation += 1;
        self.displayed = compute_order_costs(&self.order, self.candidate);
        &self.displayed
    }

    /// Like [`MarginEditor::edit`] for raw input text; unparsable text counts as 0.
    pub fn edit_text(&mut self, text: &str) -> &CostBreakdown {
        self.edit(parse_decimal(text).unwrap_or(Decimal::ZERO))
    }

    /// Drops the candidate and goes back to the stored margin.
    pub fn discard_candidate(&mut self) -> &CostBreakdown {
        self.candidate = None;
        self.generation += 1;
        self.displayed = compute_order_costs(&self.order, None);
        &self.displayed
    }

    /// Sets the candidate and hands back a recomputation to run elsewhere.
    pub fn begin_recompute(&mut self, candidate: Decimal) -> RecomputeRequest {
        self.candidate = Some(candidate);
        self.generation += 1;
        RecomputeRequest {
            generation: self.generation,
            order: self.order.clone(),
            margin: self.candidate,
        }
    }

    /// Shows `result` if it answers the newest request.
    ///
    /// Returns `false` and leaves the display untouched for superseded results.
    pub fn finish_recompute(&mut self, result: RecomputeResult) -> bool {
        if result.generation != self.generation {
            return false;
        }
        self.displayed = result.breakdown;
        true
    }

    /// Builds the persistence request for the current candidate.
    pub fn save_request(&self) -> CoreResult<MarginOverrideRequest> {
        let candidate = self.candidate.ok_or_else(|| CoreError::NoPendingOverride {
            order_id: self.order.id.clone(),
        })?;

        Ok(MarginOverrideRequest {
            order_id: self.order.id.clone(),
            profit_margin_percentage: validate_margin_percent(candidate)?,
        })
    }

    /// Records a successful save of `stored` as the order's new default.
    ///
    /// The candidate is cleared only if it still equals what was stored; an
    /// operator who kept typing keeps their newer value.
    pub fn save_succeeded(&mut self, stored: Decimal) {
        self.order.profit_margin_percentage = Some(NumericValue::from(stored));
        self.last_save_error = None;
        if self.candidate == Some(stored) {
            self.candidate = None;
        }
    }

    /// Records a failed save. The displayed breakdown and the stored default
    /// are left exactly as they were.
    pub fn save_failed(&mut self, reason: impl Into<String>) {
        self.last_save_error = Some(reason.into());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
