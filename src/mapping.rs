use crate::error::{Error, Result};

/// Maps `x` from `in_min..in_max` onto `out_min..out_max` and clamps it into the target range.
///
/// The target may run in either direction. A NaN `x` is passed through unclamped.
pub fn map_range(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<f64> {
    if in_max == in_min {
        return Err(Error::DegenerateRange { in_min, in_max });
    }

    let mapped = (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min;
    let (low, high) = if out_min <= out_max {
        (out_min, out_max)
    } else {
        (out_max, out_min)
    };

    if mapped > high {
        Ok(high)
    } else if mapped < low {
        Ok(low)
    } else {
        Ok(mapped)
    }
}
