//! Academic timetable clash resolution.
//!
//! Given the subjects a student wants and their placement preferences,
//! picks one (degree, semester, section) offering per subject so that the
//! weekly timetable has as few same-day time overlaps as possible.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `Location`, `Subject`,
//!   `Preferences`, `Assignment`, `ConflictRecord`, `ResolvedTimetable`,
//!   and the `TimetableDataset` input
//! - **`catalog`**: Per-subject section catalog built from the dataset
//! - **`conflicts`**: Same-day overlap detection
//! - **`ranking`**: Preference rules ordering each subject's candidates
//! - **`search`**: Exhaustive, backtracking, and evolutionary assignment
//!   search with progress reporting and cancellation
//! - **`assembler`**: Timetable assembly, suggestions, and KPIs
//! - **`validation`**: Non-fatal input diagnostics
//! - **`resolver`**: The `resolve` entry point
//!
//! # Architecture
//!
//! Resolution is synchronous, CPU-bound, and free of I/O beyond the
//! caller's dataset provider. Long searches yield to a progress sink and
//! honor a cancel token at fixed evaluation intervals.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

pub mod assembler;
pub mod catalog;
pub mod conflicts;
pub mod error;
pub mod models;
pub mod ranking;
pub mod resolver;
pub mod search;
pub mod validation;

pub use error::{TimetableError, TimetableResult};
pub use resolver::{resolve, ResolveResult, Resolver, SubjectRequest};
