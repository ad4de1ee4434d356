//! Per-session calculator state and button transitions.
//!
//! The lock, switch, mode and info toggles live in a [`Session`] value owned by
//! the caller (one per UI session). Each button press is a pure transition
//! `(Session, current size) -> (Session, new size)` through [`Session::apply`].
//!
//! ```
//! use zenaspect::{Action, AspectRatio, Session, Size};
//!
//! let session = Session::new();
//! let (session, _) = session.apply(&Action::ToggleSwitch, Size::new(512, 512)).unwrap();
//! let ratio: AspectRatio = "16:9".parse().unwrap();
//! let (session, size) = session
//!     .apply(&Action::AspectRatio(ratio), Size::new(512, 512))
//!     .unwrap();
//!
//! assert_eq!(size, Size::new(384, 704));
//! assert_eq!(session.avg, Some(512));
//! ```

use crate::calc::{
    CalcError, Precision, Size, Strategy, apply_aspect_ratio, apply_fixed_resolution,
};
use crate::ratio::AspectRatio;

/// 🔓
pub const LOCK_OPEN_ICON: &str = "\u{1F513}";
/// 🔒
pub const LOCK_CLOSED_ICON: &str = "\u{1F512}";
/// ▭
pub const LANDSCAPE_ICON: &str = "\u{25AD}";
/// ▯
pub const PORTRAIT_ICON: &str = "\u{25AF}";
/// ⮃
pub const OFFSET_ICON: &str = "\u{2B83}";
/// ⮅
pub const SINGLE_DIMENSION_ICON: &str = "\u{2B85}";
/// ℹ
pub const INFO_ICON: &str = "\u{2139}";
/// ⯅
pub const HIDE_INFO_ICON: &str = "\u{2BC5}";

pub const LOCK_TOOLTIP: &str = "Toggle to lock the \"average\" width/height values in the UI\n\
It is recommended to \"Lock\" when switching between ARs in \"Offset\" mode.\n\n\
\u{1F512} = Locked\n\
\u{1F513} = Unlocked";
pub const SWITCH_TOOLTIP: &str = "For \"Offset mode\" (default):\n\
\u{25AF} = Portrait resolutions\n\
\u{25AD} = Landscape resolutions\n\n\
For \"One Dimension\" mode:\n\
\u{25AD} = Modify Width\n\
\u{25AF} = Modify Height";
pub const MODE_TOOLTIP: &str = "Toggle the Mode for updating resolution.\n\
Resolution is always rounded to precision (default 64px).\n\n\
\u{2B83} = \"Offset\" updates both Width/Height from the average current resolution\n\
\u{2B85} = \"One Dimension\" changes only Width or Height";
pub const SHOW_INFO_TOOLTIP: &str = "Show the Information panel including additional settings.";
pub const HIDE_INFO_TOOLTIP: &str = "Hide the Information panel.";

/// A button press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Freeze or release the average anchor.
    ToggleLock,
    /// Landscape ↔ portrait (offset) or height ↔ width solving (single-dimension).
    ToggleSwitch,
    /// Offset ↔ single-dimension.
    ToggleStrategy,
    /// Show or hide the information panel. Does not touch the size.
    ToggleInfo,
    /// Apply an aspect ratio to the current size.
    AspectRatio(AspectRatio),
    /// Jump to a fixed resolution.
    FixedResolution(Size),
}

/// Calculator state for one UI session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Session {
    /// When set, the anchor is not recomputed from the current size.
    pub locked: bool,
    /// Portrait output (offset) or width solving (single-dimension).
    pub switched: bool,
    pub strategy: Strategy,
    /// The information panel is shown.
    pub info_visible: bool,
    /// The average anchor. `None` until the first press that sets it.
    pub avg: Option<u32>,
    pub precision: Precision,
}

impl Session {
    /// Unlocked, landscape, offset strategy, info hidden, 64px grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid step.
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the initial strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Flip the lock. Seeds the anchor from `current` if none is set yet.
    pub fn toggle_lock(&mut self, current: Size) {
        self.locked = !self.locked;
        if self.avg.is_none_or(|avg| avg == 0) {
            self.avg = Some(current.average());
        }
    }

    /// Flip between landscape and portrait (or held side).
    pub fn toggle_switch(&mut self) {
        self.switched = !self.switched;
    }

    /// Flip between offset and single-dimension.
    pub fn toggle_strategy(&mut self) {
        self.strategy = self.strategy.toggled();
    }

    /// Show or hide the information panel.
    pub fn toggle_info(&mut self) {
        self.info_visible = !self.info_visible;
    }

    /// Apply `ratio` to `current`, updating the anchor.
    ///
    /// On error the session is left untouched.
    pub fn apply_ratio(&mut self, ratio: &AspectRatio, current: Size) -> Result<Size, CalcError> {
        let (avg, size) = apply_aspect_ratio(
            self.avg.unwrap_or(0),
            ratio,
            current,
            self.precision,
            self.locked,
            self.switched,
            self.strategy,
        )?;
        self.avg = Some(avg);
        Ok(size)
    }

    /// Jump to `fixed`, re-anchoring unless locked.
    pub fn apply_resolution(&mut self, fixed: Size) -> Size {
        let (avg, size) = apply_fixed_resolution(fixed, self.avg.unwrap_or(0), self.locked);
        if !self.locked {
            self.avg = Some(avg);
        }
        size
    }

    /// The transition for one button press.
    ///
    /// Toggles return `current` unchanged.
    pub fn apply(mut self, action: &Action, current: Size) -> Result<(Self, Size), CalcError> {
        let size = match action {
            Action::ToggleLock => {
                self.toggle_lock(current);
                current
            }
            Action::ToggleSwitch => {
                self.toggle_switch();
                current
            }
            Action::ToggleStrategy => {
                self.toggle_strategy();
                current
            }
            Action::ToggleInfo => {
                self.toggle_info();
                current
            }
            Action::AspectRatio(ratio) => self.apply_ratio(ratio, current)?,
            Action::FixedResolution(fixed) => self.apply_resolution(*fixed),
        };
        log::debug!("{action:?}: {self:?} -> {}x{}", size.width, size.height);
        Ok((self, size))
    }

    /// 🔒 while locked, 🔓 otherwise.
    pub fn lock_icon(&self) -> &'static str {
        if self.locked {
            LOCK_CLOSED_ICON
        } else {
            LOCK_OPEN_ICON
        }
    }

    /// ▯ while switched, ▭ otherwise.
    pub fn switch_icon(&self) -> &'static str {
        if self.switched {
            PORTRAIT_ICON
        } else {
            LANDSCAPE_ICON
        }
    }

    /// ⮃ for offset, ⮅ for single-dimension.
    pub fn strategy_icon(&self) -> &'static str {
        match self.strategy {
            Strategy::Offset => OFFSET_ICON,
            Strategy::SingleDimension => SINGLE_DIMENSION_ICON,
        }
    }

    /// ⯅ while the panel is shown, ℹ otherwise.
    pub fn info_icon(&self) -> &'static str {
        if self.info_visible {
            HIDE_INFO_ICON
        } else {
            INFO_ICON
        }
    }

    /// Tooltip of the info button, which names what the next press does.
    pub fn info_tooltip(&self) -> &'static str {
        if self.info_visible {
            HIDE_INFO_TOOLTIP
        } else {
            SHOW_INFO_TOOLTIP
        }
    }
}
