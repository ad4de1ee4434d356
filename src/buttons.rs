//! Button table: button identifiers mapped to session transitions.
//!
//! Replaces per-widget callback wiring. A host adapter renders
//! [`ButtonTable::buttons`], shows [`ButtonTable::label`] on each, and routes
//! clicks through [`ButtonTable::press`].

use alloc::vec::Vec;

use crate::calc::{CalcError, Size};
use crate::lists::{RatioEntry, ResolutionEntry};
use crate::session::{Action, LOCK_TOOLTIP, MODE_TOOLTIP, SWITCH_TOOLTIP, Session};

/// Identifies one button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Lock,
    Switch,
    /// Shows or hides the information panel.
    Info,
    Mode,
    /// Index into the aspect-ratio list.
    Ratio(usize),
    /// Index into the resolution list.
    Resolution(usize),
}

/// Failure of a button press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PressError {
    /// The identifier is not in this table.
    #[error("no such button: {0:?}")]
    UnknownButton(ButtonId),
    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// The aspect-ratio and resolution buttons of one UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonTable {
    ratios: Vec<RatioEntry>,
    resolutions: Vec<ResolutionEntry>,
}

impl ButtonTable {
    pub fn new(ratios: Vec<RatioEntry>, resolutions: Vec<ResolutionEntry>) -> Self {
        Self {
            ratios,
            resolutions,
        }
    }

    pub fn ratios(&self) -> &[RatioEntry] {
        &self.ratios
    }

    pub fn resolutions(&self) -> &[ResolutionEntry] {
        &self.resolutions
    }

    /// All buttons in display order: top row (lock, switch, ratios), then
    /// bottom row (info, mode, resolutions).
    pub fn buttons(&self) -> impl Iterator<Item = ButtonId> + '_ {
        [ButtonId::Lock, ButtonId::Switch]
            .into_iter()
            .chain((0..self.ratios.len()).map(ButtonId::Ratio))
            .chain([ButtonId::Info, ButtonId::Mode])
            .chain((0..self.resolutions.len()).map(ButtonId::Resolution))
    }

    /// The transition a button triggers.
    pub fn action(&self, id: ButtonId) -> Option<Action> {
        match id {
            ButtonId::Lock => Some(Action::ToggleLock),
            ButtonId::Switch => Some(Action::ToggleSwitch),
            ButtonId::Info => Some(Action::ToggleInfo),
            ButtonId::Mode => Some(Action::ToggleStrategy),
            ButtonId::Ratio(i) => self.ratios.get(i).map(|e| Action::AspectRatio(e.ratio)),
            ButtonId::Resolution(i) => self
                .resolutions
                .get(i)
                .map(|e| Action::FixedResolution(e.size)),
        }
    }

    /// Text shown on a button for the given session.
    ///
    /// Ratio buttons show the flipped ratio while switched; toggles show the
    /// icon for their current state.
    pub fn label<'a>(&'a self, id: ButtonId, session: &Session) -> Option<&'a str> {
        match id {
            ButtonId::Lock => Some(session.lock_icon()),
            ButtonId::Switch => Some(session.switch_icon()),
            ButtonId::Info => Some(session.info_icon()),
            ButtonId::Mode => Some(session.strategy_icon()),
            ButtonId::Ratio(i) => self.ratios.get(i).map(|e| {
                if session.switched {
                    e.flipped_label.as_str()
                } else {
                    e.label.as_str()
                }
            }),
            ButtonId::Resolution(i) => self.resolutions.get(i).map(|e| e.label.as_str()),
        }
    }

    /// Tooltip for a button.
    ///
    /// List buttons show their comment. Toggles show a fixed help text; the
    /// info button's text depends on whether the panel is shown.
    pub fn comment<'a>(&'a self, id: ButtonId, session: &Session) -> Option<&'a str> {
        match id {
            ButtonId::Lock => Some(LOCK_TOOLTIP),
            ButtonId::Switch => Some(SWITCH_TOOLTIP),
            ButtonId::Info => Some(session.info_tooltip()),
            ButtonId::Mode => Some(MODE_TOOLTIP),
            ButtonId::Ratio(i) => self.ratios.get(i).map(|e| e.comment.as_str()),
            ButtonId::Resolution(i) => self.resolutions.get(i).map(|e| e.comment.as_str()),
        }
    }

    /// Press a button: look up its action and apply it to `session`.
    pub fn press(
        &self,
        id: ButtonId,
        session: Session,
        current: Size,
    ) -> Result<(Session, Size), PressError> {
        let action = self.action(id).ok_or(PressError::UnknownButton(id))?;
        Ok(session.apply(&action, current)?)
    }
}
