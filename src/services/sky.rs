//! Sun and moon positions for the time-of-day and moon-phase conditions.
//!
//! Sun events use the sunrise equation with the usual low-precision
//! approximations (about a minute of error at mid latitudes).

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{MoonPhase, TimeOfDay};

const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const OBLIQUITY_DEG: f64 = 23.4397;

/// Altitude of the sun's upper limb at sunrise, refraction included.
const SUNRISE_ALTITUDE: f64 = -0.833;
/// Civil twilight.
const TWILIGHT_ALTITUDE: f64 = -6.0;

/// Mean length of the lunar cycle in days.
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Sun events for one solar day at one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunTimes {
    pub dawn: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub noon: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
}

fn julian_to_utc(jd: f64) -> DateTime<Utc> {
    let millis = ((jd - UNIX_EPOCH_JD) * 86_400_000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Sun events on `date` at the given position.
///
/// During polar day the rise and set times collapse to noon +/- 12 h; during
/// polar night they collapse onto noon.
pub fn sun_times(date: NaiveDate, latitude: f64, longitude: f64) -> SunTimes {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let n = (date - epoch).num_days() as f64 + 0.0008;

    let mean_noon = n - longitude / 360.0;
    let anomaly = (357.5291 + 0.985_600_28 * mean_noon).rem_euclid(360.0);
    let m = anomaly.to_radians();
    let center = 1.9148 * m.sin() + 0.0200 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin();
    let ecliptic = (anomaly + center + 180.0 + 102.9372).rem_euclid(360.0).to_radians();
    let transit = J2000 + mean_noon + 0.0053 * m.sin() - 0.0069 * (2.0 * ecliptic).sin();

    let sin_decl = ecliptic.sin() * OBLIQUITY_DEG.to_radians().sin();
    let cos_decl = sin_decl.asin().cos();
    let phi = latitude.to_radians();

    let half_day = |altitude: f64| -> f64 {
        let cos_w = (altitude.to_radians().sin() - phi.sin() * sin_decl) / (phi.cos() * cos_decl);
        cos_w.clamp(-1.0, 1.0).acos().to_degrees() / 360.0
    };
    let rise_set = half_day(SUNRISE_ALTITUDE);
    let twilight = half_day(TWILIGHT_ALTITUDE);

    SunTimes {
        dawn: julian_to_utc(transit - twilight),
        sunrise: julian_to_utc(transit - rise_set),
        noon: julian_to_utc(transit),
        sunset: julian_to_utc(transit + rise_set),
        dusk: julian_to_utc(transit + twilight),
    }
}

/// Classify `now` at the given position.
///
/// The solar day is the UTC date shifted by the longitude, so no time zone
/// database is needed.
pub fn time_of_day(now: DateTime<Utc>, latitude: f64, longitude: f64) -> TimeOfDay {
    let solar_offset = Duration::seconds((longitude / 15.0 * 3600.0) as i64);
    let date = (now + solar_offset).date_naive();
    let sun = sun_times(date, latitude, longitude);

    if sun.dawn < now && now <= sun.sunrise {
        TimeOfDay::Sunrise
    } else if sun.sunset < now && now <= sun.dusk {
        TimeOfDay::Sunset
    } else if sun.sunrise < now && now <= sun.sunset {
        TimeOfDay::Day
    } else {
        TimeOfDay::Night
    }
}

/// Days since the last new moon, 0 to [`SYNODIC_MONTH`].
pub fn moon_age(now: DateTime<Utc>) -> f64 {
    // New moon of 2000-01-06 18:14 UTC
    const REFERENCE_NEW_MOON_UNIX: f64 = 947_182_440.0;
    let days = (now.timestamp() as f64 - REFERENCE_NEW_MOON_UNIX) / 86_400.0;
    days.rem_euclid(SYNODIC_MONTH)
}

/// Full scale of the phase value: 0 new, 7 first quarter, 14 full,
/// 21 last quarter.
pub const PHASE_SCALE: f64 = 28.0;

/// Moon age in days mapped onto `0..PHASE_SCALE`.
pub fn phase_value(age_days: f64) -> f64 {
    age_days.rem_euclid(SYNODIC_MONTH) * PHASE_SCALE / SYNODIC_MONTH
}

pub fn moon_phase(now: DateTime<Utc>) -> MoonPhase {
    MoonPhase::from_phase(phase_value(moon_age(now)))
}
