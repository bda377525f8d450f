//! # till-core: Pure Business Logic for Till Counter
//!
//! This crate holds every rule of the end-of-day cash count as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till Counter Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web client (till counter page)               │   │
//! │  │    Count till ──► Pick float ──► Save day ──► Ask for summary   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-server (axum)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐ ┌──────────────┐ ┌────────────┐ ┌───────────┐  │   │
//! │  │   │   money   │ │ denomination │ │   record   │ │ validation│  │   │
//! │  │   └───────────┘ └──────────────┘ └────────────┘ └───────────┘  │   │
//! │  │   ┌────────────────┐ ┌────────────┐ ┌─────────┐                 │   │
//! │  │   │ reconciliation │ │ float_plan │ │ summary │                 │   │
//! │  │   └────────────────┘ └────────────┘ └─────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (pence, no floating point)
//! - [`denomination`] - The fixed set of notes and coins, and count tables
//! - [`record`] - Daily till record, submissions and the JSON view
//! - [`validation`] - Input validation at the wire boundary
//! - [`reconciliation`] - Takings vs expected, float target, banking breakdown
//! - [`float_plan`] - Suggests a float that makes up exactly £200
//! - [`summary`] - Builds the text prompt for the day's summary
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::denomination::{Denomination, TillCounts};
//! use till_core::money::Money;
//!
//! let mut till = TillCounts::default();
//! till.set(Denomination::Note20, 3);
//! till.set(Denomination::Coin50, 4);
//!
//! assert_eq!(till.total(), Money::from_cents(6200)); // £62.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod denomination;
pub mod error;
pub mod float_plan;
pub mod money;
pub mod reconciliation;
pub mod record;
pub mod summary;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use denomination::{Denomination, FloatCounts, TillCounts};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use record::{DailyTillRecord, TillRecordView, TillSubmission, TillSubmissionRequest};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The float left in the till for the next day's trading.
///
/// ## Business Reason
/// The shop opens every morning with exactly £200.00 in the drawer; any
/// other float means change runs out or the banking is wrong.
pub const FLOAT_TARGET: Money = Money::from_cents(20_000);

/// Takings within this distance of the expected figure count as a match.
pub const VARIANCE_TOLERANCE: Money = Money::from_cents(500);
