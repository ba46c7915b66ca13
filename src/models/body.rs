use serde::{Deserialize, Serialize};

/// A complete body-shape snapshot sent to the renderer and persisted locally.
///
/// The camelCase field names (`armLength`, `legLength`) are part of the wire
/// contract: the renderer payload and the persisted JSON both use them, so
/// they must not be renamed.
///
/// Values are advisory-range only. Nothing in the model clamps or validates
/// them; out-of-range values (for example, injected programmatically or loaded
/// from an old profile) are accepted and displayed as-is. The slider ranges in
/// [`BodyField`] exist purely for presentation.
///
/// Every change produces a new complete snapshot via [`with_field`](Self::with_field);
/// partial updates are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyParameters {
    pub height: f64,
    pub chest: f64,
    pub waist: f64,
    pub hips: f64,
    pub shoulders: f64,
    pub arm_length: f64,
    pub leg_length: f64,
}

impl Default for BodyParameters {
    /// The fixed baseline snapshot used on first launch and after a reset.
    fn default() -> Self {
        Self {
            height: 170.0,
            chest: 90.0,
            waist: 75.0,
            hips: 95.0,
            shoulders: 40.0,
            arm_length: 60.0,
            leg_length: 85.0,
        }
    }
}

impl BodyParameters {
    /// Pure merge: return a new snapshot with exactly `field` replaced by
    /// `value` and the other six fields unchanged.
    ///
    /// No validation or clamping is performed.
    #[must_use]
    pub fn with_field(&self, field: BodyField, value: f64) -> Self {
        let mut next = *self;
        match field {
            BodyField::Height => next.height = value,
            BodyField::Chest => next.chest = value,
            BodyField::Waist => next.waist = value,
            BodyField::Hips => next.hips = value,
            BodyField::Shoulders => next.shoulders = value,
            BodyField::ArmLength => next.arm_length = value,
            BodyField::LegLength => next.leg_length = value,
        }
        next
    }

    /// Read a single field's current value.
    pub fn get(&self, field: BodyField) -> f64 {
        match field {
            BodyField::Height => self.height,
            BodyField::Chest => self.chest,
            BodyField::Waist => self.waist,
            BodyField::Hips => self.hips,
            BodyField::Shoulders => self.shoulders,
            BodyField::ArmLength => self.arm_length,
            BodyField::LegLength => self.leg_length,
        }
    }
}

/// The seven adjustable body fields, with presentation metadata per field.
///
/// Minimum/maximum are slider bounds for the UI only; the model itself does
/// not enforce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyField {
    Height,
    Chest,
    Waist,
    Hips,
    Shoulders,
    ArmLength,
    LegLength,
}

impl BodyField {
    /// All fields in display order.
    pub const ALL: [BodyField; 7] = [
        BodyField::Height,
        BodyField::Chest,
        BodyField::Waist,
        BodyField::Hips,
        BodyField::Shoulders,
        BodyField::ArmLength,
        BodyField::LegLength,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BodyField::Height => "Height",
            BodyField::Chest => "Chest",
            BodyField::Waist => "Waist",
            BodyField::Hips => "Hips",
            BodyField::Shoulders => "Shoulders",
            BodyField::ArmLength => "Arm Length",
            BodyField::LegLength => "Leg Length",
        }
    }

    /// Slider minimum (advisory).
    pub fn min(&self) -> f64 {
        match self {
            BodyField::Height => 140.0,
            BodyField::Chest => 70.0,
            BodyField::Waist => 60.0,
            BodyField::Hips => 75.0,
            BodyField::Shoulders => 30.0,
            BodyField::ArmLength => 50.0,
            BodyField::LegLength => 70.0,
        }
    }

    /// Slider maximum (advisory).
    pub fn max(&self) -> f64 {
        match self {
            BodyField::Height => 200.0,
            BodyField::Chest => 130.0,
            BodyField::Waist => 120.0,
            BodyField::Hips => 135.0,
            BodyField::Shoulders => 55.0,
            BodyField::ArmLength => 70.0,
            BodyField::LegLength => 100.0,
        }
    }

    /// Display unit. All measurements are in centimetres.
    pub fn unit(&self) -> &'static str {
        "cm"
    }
}
