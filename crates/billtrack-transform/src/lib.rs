//! Resource tracking transform for billing DataFrames.
//!
//! - **frame**: [`TrackingFrame`], a billing DataFrame with its resolved columns
//! - **tracking**: [`apply_resource_tracking`], which writes labels onto the frame
//! - **audit**: [`build_audit_frame`], the audit sink as a DataFrame

pub mod audit;
pub mod error;
pub mod frame;
pub mod tracking;

pub use audit::{AUDIT_COLUMNS, build_audit_frame};
pub use error::{Result, TransformError};
pub use frame::{DEFAULT_LABEL_COLUMN, TrackingFrame};
pub use tracking::{TrackingResult, TransformOptions, apply_resource_tracking};
