//! Routines that are shared between the different Launchpad implementations

use crate::{Layout, Xy};

/// Splits a "decade" number, where the tens digit counts rows from the bottom and the ones digit
/// counts columns, into a coordinate with the origin at the top.
///
/// Appropriate for the numbers up to 99 of the Pro, Mk2 and Mk3 generation.
pub fn decade_to_xy(raw: u8, layout: Layout) -> Option<Xy> {
    if raw > 99 {
        return None;
    }
    let x = match layout {
        Layout::Classic => (raw + 9) % 10,
        Layout::Pro => raw % 10,
    };
    Some(Xy::new(x, (99 - raw) / 10))
}

/// Inverse of [`decade_to_xy`]. Returns `None` for columns past 9 and rows past 9.
pub fn xy_to_decade(xy: Xy, layout: Layout) -> Option<u8> {
    if xy.x > 9 || xy.y > 9 {
        return None;
    }
    let column = match layout {
        Layout::Classic => (xy.x + 1) % 10,
        Layout::Pro => xy.x,
    };
    Some(90 - 10 * xy.y + column)
}

/// Accepts `candidate` only if it maps back onto `xy`.
///
/// Forward formulas are usually defined on a bounding box that is larger than the device. Checking
/// the round trip keeps the gaps of the device out of both directions.
pub fn confirm_xy(
    candidate: Option<u8>,
    xy: Xy,
    raw_to_xy: impl Fn(u8) -> Option<Xy>,
) -> Option<u8> {
    candidate.filter(|&raw| raw_to_xy(raw) == Some(xy))
}
