//! Resolution computation from an aspect ratio or a fixed resolution.
//!
//! New dimensions are derived from an "average anchor" (the ceiling of the
//! mean of the current width and height) so that switching between aspect
//! ratios keeps the pixel budget roughly constant. All outputs are snapped
//! to a precision grid. Pure arithmetic, no allocations, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use zenaspect::{AspectRatio, Precision, Size, Strategy, apply_aspect_ratio};
//!
//! let ratio: AspectRatio = "16:9".parse().unwrap();
//! let (avg, size) = apply_aspect_ratio(
//!     0,
//!     &ratio,
//!     Size::new(512, 512),
//!     Precision::default(),
//!     false,
//!     false,
//!     Strategy::Offset,
//! )
//! .unwrap();
//!
//! assert_eq!(avg, 512);
//! assert_eq!(size, Size::new(704, 384));
//! ```

use core::cmp::Ordering;

use num_traits::Float;

use crate::ratio::AspectRatio;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width and height exchanged.
    pub const fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Total pixel count.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if either side is zero.
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The [`average_of`] anchor for these dimensions.
    pub fn average(&self) -> u32 {
        average_of(self.width, self.height)
    }
}

/// Grid step that every output dimension is a multiple of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Precision(u32);

impl Precision {
    /// 64px, the bucketing step commonly used when training image models.
    pub const DEFAULT: Self = Self(64);
    /// Smallest step offered by the host's precision input.
    pub const UI_MIN: u32 = 4;
    /// Largest step offered by the host's precision input.
    pub const UI_MAX: u32 = 128;
    /// Increment of the host's precision input.
    pub const UI_STEP: u32 = 4;

    /// Any positive step. Values outside the UI range are accepted.
    pub const fn new(px: u32) -> Result<Self, CalcError> {
        if px == 0 {
            return Err(CalcError::ZeroPrecision);
        }
        Ok(Self(px))
    }

    /// The step in pixels.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How an aspect ratio is applied to the current dimensions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Both sides move around the average anchor, preserving approximate area.
    #[default]
    Offset,
    /// One side is held and the other derived from the ratio.
    SingleDimension,
}

impl Strategy {
    /// The other strategy.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Offset => Self::SingleDimension,
            Self::SingleDimension => Self::Offset,
        }
    }
}

/// Which side the single-dimension strategy solves for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SolveFor {
    Width,
    Height,
}

/// Calculator error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// Current width or height is zero.
    #[error("current width or height is zero")]
    ZeroDimension,
    /// The anchor average is zero.
    #[error("average anchor is zero")]
    ZeroAverage,
    /// Precision step is zero.
    #[error("precision must be positive")]
    ZeroPrecision,
    /// The ratio collapses one side to zero before snapping.
    #[error("aspect ratio too extreme for the current size")]
    RatioTooExtreme,
    /// A side snapped to zero on the precision grid.
    #[error("result rounds to zero at this precision")]
    ZeroResult,
}

/// Ceiling of the mean of `width` and `height`.
///
/// Floor division with a +1 correction for odd sums; never banker's rounding.
pub fn average_of(width: u32, height: u32) -> u32 {
    let sum = u64::from(width) + u64::from(height);
    let mut avg = sum / 2;
    if sum % 2 != 0 {
        avg += 1;
    }
    avg as u32
}

/// Snap `value` to the nearest multiple of `precision`.
///
/// Ties at the division step round half-to-even: with a 64px grid, 96 snaps
/// to 128 and 160 also snaps to 128.
pub fn round_to_grid(value: f64, precision: Precision) -> f64 {
    let step = f64::from(precision.get());
    round_half_even(value / step) * step
}

/// Compute new dimensions for `ratio`.
///
/// Unless `locked`, the anchor `avg` is first replaced by the average of
/// `current`. Returns the anchor used and the new size.
///
/// With [`Strategy::Offset`], `switched` swaps the result (portrait instead
/// of landscape). With [`Strategy::SingleDimension`], `switched` solves for
/// the width instead of the height.
pub fn apply_aspect_ratio(
    avg: u32,
    ratio: &AspectRatio,
    current: Size,
    precision: Precision,
    locked: bool,
    switched: bool,
    strategy: Strategy,
) -> Result<(u32, Size), CalcError> {
    let avg = if locked {
        avg
    } else {
        if current.is_degenerate() {
            return Err(CalcError::ZeroDimension);
        }
        current.average()
    };

    let size = match strategy {
        Strategy::Offset => {
            let size = offset_dimensions(avg, ratio, precision)?;
            if switched { size.swapped() } else { size }
        }
        Strategy::SingleDimension => {
            let solve = if switched {
                SolveFor::Width
            } else {
                SolveFor::Height
            };
            single_dimension(ratio, current, solve, precision)?
        }
    };

    log::debug!(
        "{ratio} ({strategy:?}, locked={locked}, switched={switched}): {}x{} -> {}x{} (avg {avg})",
        current.width,
        current.height,
        size.width,
        size.height
    );
    Ok((avg, size))
}

/// Return `fixed` unchanged, re-anchoring the average unless `locked`.
pub fn apply_fixed_resolution(fixed: Size, current_avg: u32, locked: bool) -> (u32, Size) {
    let avg = if locked { current_avg } else { fixed.average() };
    (avg, fixed)
}

/// Both sides from the anchor: split `2 * avg` by the ratio, then scale the
/// pair to an area of `avg²` and snap to the grid.
pub fn offset_dimensions(
    avg: u32,
    ratio: &AspectRatio,
    precision: Precision,
) -> Result<Size, CalcError> {
    if avg == 0 {
        return Err(CalcError::ZeroAverage);
    }
    let (w, h) = ratio.split(2 * u64::from(avg));
    if w == 0 || h == 0 {
        return Err(CalcError::RatioTooExtreme);
    }
    fit_to_area(avg, w, h, precision)
}

/// Hold one side of `current` and derive the other from `ratio` rounded to
/// two decimals. Both sides are then snapped with a half-step upward bias.
pub fn single_dimension(
    ratio: &AspectRatio,
    current: Size,
    solve: SolveFor,
    precision: Precision,
) -> Result<Size, CalcError> {
    if current.is_degenerate() {
        return Err(CalcError::ZeroDimension);
    }
    let hundredths = ratio.hundredths();
    if hundredths == 0 {
        return Err(CalcError::RatioTooExtreme);
    }
    let hundredths = hundredths as f64;

    let mut w = f64::from(current.width);
    let mut h = f64::from(current.height);
    match (solve, ratio.rounded_orientation()) {
        (SolveFor::Width, Ordering::Greater) => h = w * 100.0 / hundredths,
        (SolveFor::Width, Ordering::Less) => w = h * hundredths / 100.0,
        (SolveFor::Width, Ordering::Equal) => {
            let side = f64::from(current.width.max(current.height));
            (w, h) = (side, side);
        }
        (SolveFor::Height, Ordering::Greater) => w = h * hundredths / 100.0,
        (SolveFor::Height, Ordering::Less) => h = w * 100.0 / hundredths,
        (SolveFor::Height, Ordering::Equal) => {
            let side = f64::from(current.width.min(current.height));
            (w, h) = (side, side);
        }
    }

    let bias = f64::from(precision.get()) / 2.0;
    Ok(Size::new(
        snapped(w + bias, precision)?,
        snapped(h + bias, precision)?,
    ))
}

fn fit_to_area(avg: u32, w: u64, h: u64, precision: Precision) -> Result<Size, CalcError> {
    let target = f64::from(avg) * f64::from(avg);
    let area = w as f64 * h as f64;
    let scale = Float::sqrt(target / area);
    Ok(Size::new(
        snapped(w as f64 * scale, precision)?,
        snapped(h as f64 * scale, precision)?,
    ))
}

fn snapped(value: f64, precision: Precision) -> Result<u32, CalcError> {
    let v = round_to_grid(value, precision);
    if v < 1.0 {
        return Err(CalcError::ZeroResult);
    }
    Ok(v.min(f64::from(u32::MAX)) as u32)
}

fn round_half_even(x: f64) -> f64 {
    if Float::abs(x - Float::trunc(x)) == 0.5 {
        2.0 * Float::round(x / 2.0)
    } else {
        Float::round(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ar(text: &str) -> AspectRatio {
        text.parse().unwrap()
    }

    fn p(px: u32) -> Precision {
        Precision::new(px).unwrap()
    }

    // ---- average_of ----

    #[test]
    fn average_equal_sides() {
        assert_eq!(average_of(512, 512), 512);
    }

    #[test]
    fn average_odd_sum_rounds_up() {
        assert_eq!(average_of(511, 512), 512);
        assert_eq!(average_of(1, 2), 2);
        assert_eq!(average_of(1, 0), 1);
    }

    #[test]
    fn average_does_not_overflow() {
        assert_eq!(average_of(u32::MAX, u32::MAX), u32::MAX);
        assert_eq!(average_of(u32::MAX, u32::MAX - 1), u32::MAX);
    }

    #[test]
    fn average_is_symmetric() {
        for (w, h) in [(1, 2), (640, 480), (1023, 7), (0, 5)] {
            assert_eq!(average_of(w, h), average_of(h, w));
        }
    }

    // ---- round_to_grid ----

    #[test]
    fn grid_ties_round_half_even() {
        assert_eq!(round_to_grid(96.0, p(64)), 128.0);
        assert_eq!(round_to_grid(160.0, p(64)), 128.0);
        assert_eq!(round_to_grid(32.0, p(64)), 0.0);
    }

    #[test]
    fn grid_nearest_multiple() {
        assert_eq!(round_to_grid(682.14, p(64)), 704.0);
        assert_eq!(round_to_grid(384.29, p(64)), 384.0);
        assert_eq!(round_to_grid(11.0, p(4)), 12.0);
        assert_eq!(round_to_grid(9.0, p(4)), 8.0);
        assert_eq!(round_to_grid(10.0, p(4)), 8.0);
        assert_eq!(round_to_grid(14.0, p(4)), 16.0);
    }

    #[test]
    fn grid_is_idempotent() {
        for v in [0.0, 31.9, 96.0, 500.5, 1234.0, 4095.99] {
            let once = round_to_grid(v, p(64));
            assert_eq!(round_to_grid(once, p(64)), once);
        }
    }

    #[test]
    fn precision_rejects_zero() {
        assert_eq!(Precision::new(0), Err(CalcError::ZeroPrecision));
        assert_eq!(Precision::default().get(), 64);
    }

    // ---- offset strategy ----

    #[test]
    fn offset_square() {
        assert_eq!(offset_dimensions(512, &ar("1:1"), p(64)), Ok(Size::new(512, 512)));
    }

    #[test]
    fn offset_16_9() {
        // split 655x369, scaled by sqrt(512² / (655*369)), snapped.
        assert_eq!(offset_dimensions(512, &ar("16:9"), p(64)), Ok(Size::new(704, 384)));
    }

    #[test]
    fn offset_4_3() {
        assert_eq!(offset_dimensions(512, &ar("4:3"), p(64)), Ok(Size::new(576, 448)));
    }

    #[test]
    fn offset_21_9() {
        assert_eq!(offset_dimensions(512, &ar("21:9"), p(64)), Ok(Size::new(768, 320)));
    }

    #[test]
    fn offset_split_ties_round_half_even() {
        // 554 splits into 415.5 and 138.5, which round to 416 and 138.
        // Rounding 138.5 up would give 448x192 instead.
        assert_eq!(offset_dimensions(277, &ar("3:1"), p(64)), Ok(Size::new(512, 128)));
        assert_eq!(
            apply_aspect_ratio(277, &ar("3:1"), Size::new(0, 0), p(64), true, false, Strategy::Offset),
            Ok((277, Size::new(512, 128)))
        );
    }

    #[test]
    fn offset_zero_average() {
        assert_eq!(
            offset_dimensions(0, &ar("1:1"), p(64)),
            Err(CalcError::ZeroAverage)
        );
    }

    #[test]
    fn offset_extreme_ratio() {
        assert_eq!(
            offset_dimensions(2, &ar("1000:1"), p(4)),
            Err(CalcError::RatioTooExtreme)
        );
    }

    #[test]
    fn offset_snaps_to_zero() {
        assert_eq!(
            offset_dimensions(20, &ar("1:1"), p(64)),
            Err(CalcError::ZeroResult)
        );
    }

    // ---- single-dimension strategy ----

    #[test]
    fn single_height_solve_landscape() {
        // ar rounds to 1.78; w = 512 * 1.78 = 911.36 -> +32 -> 960
        assert_eq!(
            single_dimension(&ar("16:9"), Size::new(512, 512), SolveFor::Height, p(64)),
            Ok(Size::new(960, 512))
        );
    }

    #[test]
    fn single_width_solve_landscape() {
        // h = 512 / 1.78 = 287.6 -> +32 -> 320
        assert_eq!(
            single_dimension(&ar("16:9"), Size::new(512, 512), SolveFor::Width, p(64)),
            Ok(Size::new(512, 320))
        );
    }

    #[test]
    fn single_portrait_ratio() {
        // ar = 0.56; height solve: h = 576 / 0.56 = 1028.6 -> 1088.
        // The held width 576 + 32 = 608 ties at 9.5 steps and rounds to 640.
        assert_eq!(
            single_dimension(&ar("9:16"), Size::new(576, 576), SolveFor::Height, p(64)),
            Ok(Size::new(640, 1088))
        );
        // width solve: w = 512 * 0.56 = 286.7 -> 320
        assert_eq!(
            single_dimension(&ar("9:16"), Size::new(512, 512), SolveFor::Width, p(64)),
            Ok(Size::new(320, 512))
        );
    }

    #[test]
    fn single_square_takes_max_or_min() {
        let current = Size::new(768, 512);
        assert_eq!(
            single_dimension(&ar("1:1"), current, SolveFor::Width, p(64)),
            Ok(Size::new(768, 768))
        );
        assert_eq!(
            single_dimension(&ar("1:1"), current, SolveFor::Height, p(64)),
            Ok(Size::new(512, 512))
        );
    }

    #[test]
    fn single_near_square_counts_as_square() {
        // 1.004 rounds to 1.00
        assert_eq!(
            single_dimension(&ar("1.004:1"), Size::new(768, 512), SolveFor::Height, p(64)),
            Ok(Size::new(512, 512))
        );
    }

    #[test]
    fn single_rejects_degenerate() {
        assert_eq!(
            single_dimension(&ar("16:9"), Size::new(0, 512), SolveFor::Height, p(64)),
            Err(CalcError::ZeroDimension)
        );
        assert_eq!(
            single_dimension(&ar("1:300"), Size::new(512, 512), SolveFor::Height, p(64)),
            Err(CalcError::RatioTooExtreme)
        );
    }

    // ---- apply_aspect_ratio ----

    #[test]
    fn apply_recomputes_average_when_unlocked() {
        let (avg, size) = apply_aspect_ratio(
            999,
            &ar("1:1"),
            Size::new(768, 512),
            p(64),
            false,
            false,
            Strategy::Offset,
        )
        .unwrap();
        assert_eq!(avg, 640);
        assert_eq!(size, Size::new(640, 640));
    }

    #[test]
    fn apply_keeps_average_when_locked() {
        let (avg, size) = apply_aspect_ratio(
            512,
            &ar("1:1"),
            Size::new(1024, 1024),
            p(64),
            true,
            false,
            Strategy::Offset,
        )
        .unwrap();
        assert_eq!(avg, 512);
        assert_eq!(size, Size::new(512, 512));
    }

    #[test]
    fn apply_locked_ignores_degenerate_current() {
        let result = apply_aspect_ratio(
            512,
            &ar("16:9"),
            Size::new(0, 0),
            p(64),
            true,
            false,
            Strategy::Offset,
        );
        assert_eq!(result, Ok((512, Size::new(704, 384))));
    }

    #[test]
    fn apply_unlocked_rejects_degenerate_current() {
        let result = apply_aspect_ratio(
            512,
            &ar("16:9"),
            Size::new(512, 0),
            p(64),
            false,
            false,
            Strategy::Offset,
        );
        assert_eq!(result, Err(CalcError::ZeroDimension));
    }

    #[test]
    fn apply_switched_offset_swaps() {
        let (_, size) = apply_aspect_ratio(
            0,
            &ar("16:9"),
            Size::new(512, 512),
            p(64),
            false,
            true,
            Strategy::Offset,
        )
        .unwrap();
        assert_eq!(size, Size::new(384, 704));
    }

    #[test]
    fn apply_single_dimension_switch_selects_axis() {
        let run = |switched| {
            apply_aspect_ratio(
                0,
                &ar("16:9"),
                Size::new(512, 512),
                p(64),
                false,
                switched,
                Strategy::SingleDimension,
            )
            .unwrap()
        };
        assert_eq!(run(false), (512, Size::new(960, 512)));
        assert_eq!(run(true), (512, Size::new(512, 320)));
    }

    // ---- apply_fixed_resolution ----

    #[test]
    fn fixed_resolution_reanchors_when_unlocked() {
        assert_eq!(
            apply_fixed_resolution(Size::new(1024, 768), 512, false),
            (896, Size::new(1024, 768))
        );
    }

    #[test]
    fn fixed_resolution_keeps_anchor_when_locked() {
        assert_eq!(
            apply_fixed_resolution(Size::new(1024, 768), 512, true),
            (512, Size::new(1024, 768))
        );
    }

    #[test]
    fn strategy_toggle_is_involution() {
        assert_eq!(Strategy::Offset.toggled(), Strategy::SingleDimension);
        assert_eq!(Strategy::Offset.toggled().toggled(), Strategy::Offset);
    }
}
