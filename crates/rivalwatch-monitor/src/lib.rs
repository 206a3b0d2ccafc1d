//! Competitor page monitoring: one pipeline job per scrape target.
//!
//! A job fetches the target page, fingerprints its visible text, and when the
//! text has changed since the last run, classifies it and records an insight
//! together with the new fingerprint. [`Scheduler`] fans a job out per active
//! target; [`Monitor`] runs and reports individual jobs.

pub mod error;
pub mod in_flight;
pub mod pipeline;
pub mod scheduler;
pub mod store;

pub use error::JobError;
pub use in_flight::{InFlight, InFlightPermit};
pub use pipeline::{summarize, JobOutcome, JobReport, Monitor, SUMMARY_CHARS};
pub use scheduler::{CycleSummary, Scheduler};
pub use store::{MonitorStore, PgStore};
