use shared::{
    domain::{OutputOptions, OutputToggle},
    protocol::{position_field, FieldValue, FormFields, SubmissionPayload, CIPHERTEXT_FIELD},
};
use thiserror::Error;
use tracing::warn;

use crate::{error::SubmitError, validation::ValidationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionBlocked {
    #[error("Please resolve plugboard errors before encoding")]
    Plugboard,
    #[error("Please resolve rotor errors before encoding")]
    Rotors,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("missing form field {0}")]
    MissingField(String),
    #[error("rotor {slot} position {value:?} is not a non-negative number")]
    InvalidPosition { slot: usize, value: String },
}

/// Decides at submit time whether the form may be sent, from the last computed validator
/// states, and normalizes the form fields into a payload.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionGate {
    slots: usize,
}

impl SubmissionGate {
    pub fn new(slots: usize) -> Self {
        Self { slots }
    }

    /// Plugboard errors are checked before rotor errors.
    pub fn check(
        &self,
        rotors: &ValidationState,
        plugboard: &ValidationState,
    ) -> Result<(), SubmissionBlocked> {
        if !plugboard.is_valid() {
            return Err(SubmissionBlocked::Plugboard);
        }
        if !rotors.is_valid() {
            return Err(SubmissionBlocked::Rotors);
        }
        Ok(())
    }

    pub fn build_payload(
        &self,
        fields: FormFields,
        options: OutputOptions,
    ) -> Result<SubmissionPayload, PayloadError> {
        let mut payload = SubmissionPayload::from_fields(fields);

        for toggle in OutputToggle::ALL {
            payload.insert(toggle.field_name(), FieldValue::Flag(options.get(toggle)));
        }
        payload.remove(CIPHERTEXT_FIELD);

        for slot in 1..=self.slots {
            let name = position_field(slot);
            let raw = payload
                .text(&name)
                .ok_or_else(|| PayloadError::MissingField(name.clone()))?;
            let position = coerce_position(raw).ok_or_else(|| PayloadError::InvalidPosition {
                slot,
                value: raw.to_string(),
            })?;
            payload.insert(name, FieldValue::Integer(position));
        }

        Ok(payload)
    }

    pub fn submit(
        &self,
        rotors: &ValidationState,
        plugboard: &ValidationState,
        fields: FormFields,
        options: OutputOptions,
    ) -> Result<SubmissionPayload, SubmitError> {
        if let Err(blocked) = self.check(rotors, plugboard) {
            warn!(reason = %blocked, "submission blocked");
            return Err(blocked.into());
        }
        Ok(self.build_payload(fields, options)?)
    }
}

/// Reads a base-10 position the way a lenient integer parse does: leading whitespace and
/// an optional `+` are skipped, and parsing stops at the first non-digit.
pub fn coerce_position(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let digits = text.strip_prefix('+').unwrap_or(text);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use shared::protocol::{rotor_field, PLUGBOARD_FIELD, PLAINTEXT_FIELD};

    use super::*;

    fn invalid() -> ValidationState {
        ValidationState::from_result(&Err::<(), _>("broken"))
    }

    fn form_fields(positions: [&str; 3]) -> FormFields {
        let mut fields = FormFields::new();
        for (index, (rotor, position)) in ["I", "II", "III"].iter().zip(positions).enumerate() {
            fields.insert(rotor_field(index + 1), rotor.to_string());
            fields.insert(position_field(index + 1), position.to_string());
        }
        fields.insert(PLUGBOARD_FIELD.into(), "ab cd".into());
        fields.insert(PLAINTEXT_FIELD.into(), "hello".into());
        fields.insert(CIPHERTEXT_FIELD.into(), "previous output".into());
        fields
    }

    #[test]
    fn plugboard_errors_block_before_rotor_errors() {
        let gate = SubmissionGate::new(3);
        assert_eq!(
            gate.check(&invalid(), &invalid()),
            Err(SubmissionBlocked::Plugboard)
        );
        assert_eq!(
            gate.check(&ValidationState::valid(), &invalid()),
            Err(SubmissionBlocked::Plugboard)
        );
        assert_eq!(
            gate.check(&invalid(), &ValidationState::valid()),
            Err(SubmissionBlocked::Rotors)
        );
        assert_eq!(
            gate.check(&ValidationState::valid(), &ValidationState::valid()),
            Ok(())
        );
    }

    #[test]
    fn payload_coerces_positions_and_overlays_toggles() {
        let gate = SubmissionGate::new(3);
        let options = OutputOptions {
            preserve_punctuation: true,
            preserve_case: false,
            preserve_spacing: true,
        };
        let payload = gate
            .build_payload(form_fields(["1", " 12", "+7x"]), options)
            .expect("payload");

        assert_eq!(payload.integer("rotor1-pos"), Some(1));
        assert_eq!(payload.integer("rotor2-pos"), Some(12));
        assert_eq!(payload.integer("rotor3-pos"), Some(7));
        assert_eq!(payload.text("rotor2"), Some("II"));
        assert_eq!(payload.text(PLUGBOARD_FIELD), Some("ab cd"));
        assert_eq!(payload.flag("punc"), Some(true));
        assert_eq!(payload.flag("case"), Some(false));
        assert_eq!(payload.flag("space"), Some(true));
        assert!(!payload.contains(CIPHERTEXT_FIELD));
    }

    #[test]
    fn payload_rejects_non_numeric_positions() {
        let gate = SubmissionGate::new(3);
        let err = gate
            .build_payload(form_fields(["1", "abc", "-2"]), OutputOptions::default())
            .expect_err("invalid position");
        assert_eq!(
            err,
            PayloadError::InvalidPosition {
                slot: 2,
                value: "abc".into()
            }
        );
    }

    #[test]
    fn payload_requires_every_position_field() {
        let gate = SubmissionGate::new(3);
        let mut fields = form_fields(["1", "1", "1"]);
        fields.remove("rotor3-pos");
        assert_eq!(
            gate.build_payload(fields, OutputOptions::default()),
            Err(PayloadError::MissingField("rotor3-pos".into()))
        );
    }

    #[test]
    fn submit_blocks_without_building_payload() {
        let gate = SubmissionGate::new(3);
        let err = gate
            .submit(
                &invalid(),
                &ValidationState::valid(),
                form_fields(["x", "x", "x"]),
                OutputOptions::default(),
            )
            .expect_err("blocked");
        assert!(matches!(err, SubmitError::Blocked(SubmissionBlocked::Rotors)));
        assert_eq!(err.to_string(), "Please resolve rotor errors before encoding");
    }

    #[test]
    fn coerce_position_follows_lenient_integer_parse() {
        assert_eq!(coerce_position("0"), Some(0));
        assert_eq!(coerce_position("  25"), Some(25));
        assert_eq!(coerce_position("3.9"), Some(3));
        assert_eq!(coerce_position(""), None);
        assert_eq!(coerce_position("-1"), None);
        assert_eq!(coerce_position("x1"), None);
        assert_eq!(coerce_position("5000000000"), Some(5_000_000_000));
        assert_eq!(coerce_position("99999999999999999999"), None);
    }
}
