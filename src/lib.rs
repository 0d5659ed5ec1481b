//! Movie Success Predictor
//!
//! Box-office revenue estimation for a planned movie.
//!
//! ## Architecture
//!
//! ```text
//! Console / Dashboard (presenters) → Estimator (heuristic) → Report (financials, verdict)
//!                                  ↘ ML (trained model)    ↗
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod estimator;
pub mod ml;
pub mod monitor;
pub mod report;
pub mod types;
