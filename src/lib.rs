//! Aspect-ratio resolution calculator with precision-grid snapping.
//!
//! Computes new canvas dimensions from an aspect ratio or a fixed resolution
//! while keeping the pixel budget implied by the current size. Pure
//! arithmetic at the core, `no_std` compatible.
//!
//! # Modules
//!
//! - [`calc`]: Average anchor, grid rounding, offset and single-dimension strategies
//! - [`ratio`]: `n:d` aspect ratios as exact decimals
//! - [`session`]: Per-session lock/switch/mode/info state and button transitions
//! - [`buttons`]: Button identifiers mapped to transitions and labels (`alloc`)
//! - [`lists`]: Aspect-ratio and resolution list parsing, titles script (`alloc`)
//! - [`files`]: Load-or-create list files, write the titles script (`std`)
//!
//! # Example
//!
//! ```
//! use zenaspect::{Action, Session, Size};
//!
//! let ratio = "4:3".parse().unwrap();
//! let (session, size) = Session::new()
//!     .apply(&Action::AspectRatio(ratio), Size::new(512, 512))
//!     .unwrap();
//!
//! assert_eq!(size, Size::new(576, 448));
//! assert_eq!(session.avg, Some(512));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod calc;
pub mod ratio;
pub mod session;

#[cfg(feature = "alloc")]
pub mod buttons;
#[cfg(feature = "alloc")]
pub mod lists;

#[cfg(feature = "std")]
pub mod files;

// Re-exports: core types
pub use calc::{
    CalcError, Precision, Size, SolveFor, Strategy, apply_aspect_ratio, apply_fixed_resolution,
    average_of, round_to_grid,
};
pub use ratio::{AspectRatio, Decimal, RatioError};
pub use session::{Action, Session};

#[cfg(feature = "alloc")]
pub use buttons::{ButtonId, ButtonTable, PressError};
#[cfg(feature = "alloc")]
pub use lists::{ListParse, ListWarning, ListWarningReason, RatioEntry, ResolutionEntry};

#[cfg(feature = "std")]
pub use files::{FilesError, Lists, load_lists};
