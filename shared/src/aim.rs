//! Aim orientation helpers
//!
//! Pitch is expressed in wrapped degrees `[0, 360)`: climbing from 0 toward
//! 85 looks up, descending from 360 toward 280 looks down. The band between
//! the two poles is unreachable so the view can never flip over the top.

/// Upper pitch pole in degrees.
pub const PITCH_UP_LIMIT: f32 = 85.0;
/// Lower pitch pole in degrees (equivalent to -80).
pub const PITCH_DOWN_LIMIT: f32 = 280.0;
/// Pitches at or below this inside the forbidden band snap to the up pole.
const PITCH_SNAP_SPLIT: f32 = 150.0;

/// Clamp a view pitch out of the forbidden band around the vertical poles.
///
/// Both recoil application and direct look input must route through this
/// one function so the rule cannot drift between the two.
pub fn clamp_view_pitch(pitch_deg: f32) -> f32 {
    let pitch = pitch_deg.rem_euclid(360.0);
    if (PITCH_UP_LIMIT..=PITCH_DOWN_LIMIT).contains(&pitch) {
        if pitch <= PITCH_SNAP_SPLIT {
            PITCH_UP_LIMIT
        } else {
            PITCH_DOWN_LIMIT
        }
    } else {
        pitch
    }
}

/// Wrap a yaw angle into `[0, 360)`.
pub fn wrap_yaw(yaw_deg: f32) -> f32 {
    yaw_deg.rem_euclid(360.0)
}
