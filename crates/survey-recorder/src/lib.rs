//! `survey-recorder` - Income and expense survey collector
//!
//! This library provides the form handling, the append-only CSV record store
//! and the HTTP front end behind the `surveyrec` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod storage;
pub mod submission;
pub mod survey;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{RecordStore, StoreStats};
pub use submission::{parse_submission, FormFields, ValidationPolicy};
pub use survey::{ExpenseCategory, Expenses, SurveyResponse};
