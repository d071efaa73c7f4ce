//! Unit conversions shared across the engines.
//!
//! Everything internal is metric: kilograms, centimetres, kilocalories,
//! minutes. These helpers convert at the edges for callers that log in
//! imperial units or want kilojoules out.

/// Pounds per kilogram (exact by definition).
pub const LB_PER_KG: f64 = 1.0 / 0.453_592_37;

/// Centimetres per inch (exact by definition).
pub const CM_PER_IN: f64 = 2.54;

/// Kilojoules per kilocalorie (thermochemical calorie).
pub const KJ_PER_KCAL: f64 = 4.184;

pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

pub fn in_to_cm(inches: f64) -> f64 {
    inches * CM_PER_IN
}

pub fn cm_to_in(cm: f64) -> f64 {
    cm / CM_PER_IN
}

pub fn kcal_to_kj(kcal: f64) -> f64 {
    kcal * KJ_PER_KCAL
}

pub fn kj_to_kcal(kj: f64) -> f64 {
    kj / KJ_PER_KCAL
}

/// Minutes to fractional hours, as used by the MET burn formula.
pub fn minutes_to_hours(minutes: f64) -> f64 {
    minutes / 60.0
}
