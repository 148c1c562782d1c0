//! # Health input
//! Validated `(age, bmi, workout_frequency)` triple handed to the engine.
//!
//! Policy, identical for all three dimensions:
//! - outside the *hard domain* (non-finite, age <= 0, bmi <= 0, frequency
//!   outside 0..=7) → `InputError::InvalidInput`;
//! - inside the hard domain but outside the *practical range* → accepted, and
//!   clamped to the practical range by the sub-score functions.

use serde::Serialize;

use crate::error::InputError;

/// Practical age range in years.
pub const AGE_RANGE: (f64, f64) = (18.0, 80.0);
/// Practical BMI range.
pub const BMI_RANGE: (f64, f64) = (15.0, 40.0);
/// Workout days per week; hard domain and practical range coincide.
pub const WORKOUT_RANGE: (f64, f64) = (0.0, 7.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthInput {
    age: f64,
    bmi: f64,
    workout_frequency: f64,
}

impl HealthInput {
    pub fn new(age: f64, bmi: f64, workout_frequency: f64) -> Result<Self, InputError> {
        positive("age", age)?;
        positive("bmi", bmi)?;
        if !workout_frequency.is_finite()
            || !(WORKOUT_RANGE.0..=WORKOUT_RANGE.1).contains(&workout_frequency)
        {
            return Err(InputError::InvalidInput {
                field: "workout_frequency",
                value: workout_frequency,
                reason: "must be between 0 and 7 days",
            });
        }
        Ok(Self {
            age,
            bmi,
            workout_frequency,
        })
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn workout_frequency(&self) -> f64 {
        self.workout_frequency
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::InvalidInput {
            field,
            value,
            reason: "must be a finite number",
        });
    }
    if value <= 0.0 {
        return Err(InputError::InvalidInput {
            field,
            value,
            reason: "must be greater than 0",
        });
    }
    Ok(())
}

/// Clamp a value into a practical range.
pub(crate) fn clamp_to(value: f64, range: (f64, f64)) -> f64 {
    value.clamp(range.0, range.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_practical_values() {
        let i = HealthInput::new(25.0, 22.5, 3.0).unwrap();
        assert_eq!(i.age(), 25.0);
        assert_eq!(i.bmi(), 22.5);
        assert_eq!(i.workout_frequency(), 3.0);
    }

    #[test]
    fn accepts_positive_values_outside_practical_range() {
        // clamped later by the curves, not rejected here
        assert!(HealthInput::new(95.0, 45.0, 0.0).is_ok());
        assert!(HealthInput::new(12.0, 13.0, 7.0).is_ok());
    }

    #[test]
    fn rejects_non_positive_age_and_bmi() {
        let e = HealthInput::new(-1.0, 22.0, 3.0).unwrap_err();
        assert_eq!(e.field(), "age");
        let e = HealthInput::new(30.0, 0.0, 3.0).unwrap_err();
        assert_eq!(e.field(), "bmi");
    }

    #[test]
    fn rejects_frequency_outside_week() {
        assert_eq!(
            HealthInput::new(30.0, 22.0, 7.5).unwrap_err().field(),
            "workout_frequency"
        );
        assert_eq!(
            HealthInput::new(30.0, 22.0, -0.1).unwrap_err().field(),
            "workout_frequency"
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert!(HealthInput::new(f64::NAN, 22.0, 3.0).is_err());
        assert!(HealthInput::new(30.0, f64::INFINITY, 3.0).is_err());
        assert!(HealthInput::new(30.0, 22.0, f64::NAN).is_err());
    }

    #[test]
    fn error_message_names_field() {
        let e = HealthInput::new(30.0, 22.0, 9.0).unwrap_err();
        assert_eq!(
            e.to_string(),
            "workout_frequency = 9 is invalid: must be between 0 and 7 days"
        );
    }
}
