//! Form state and input-event handling: the adapter between user edits and the validators.

use shared::{
    domain::{OutputOptions, OutputToggle, ReflectorId, RotorId, DEFAULT_POSITION},
    protocol::{
        position_field, rotor_field, FormFields, SubmissionPayload, CIPHERTEXT_FIELD,
        PLAINTEXT_FIELD, PLUGBOARD_FIELD, REFLECTOR_FIELD,
    },
};
use tracing::{debug, info};

use crate::{
    client::EncodeError,
    error::{FormError, SubmitError},
    gate::SubmissionGate,
    plugboard::PlugboardValidator,
    rotor::RotorValidator,
    validation::ValidationState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    RotorChanged { slot: usize, rotor: RotorId },
    PositionChanged { slot: usize, value: String },
    ReflectorChanged(ReflectorId),
    PlugboardInput(String),
    PlaintextInput(String),
    ToggleChanged { toggle: OutputToggle, checked: bool },
}

/// Text of the two error banners; `None` hides a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banners<'a> {
    pub rotor: Option<&'a str>,
    pub plugboard: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub generation: u64,
    pub payload: SubmissionPayload,
}

#[derive(Debug)]
pub enum Completion {
    Applied,
    /// A newer submission was issued after this one, so the display was left alone. A failed
    /// stale request still carries its error.
    Stale(Option<EncodeError>),
    Failed(EncodeError),
}

#[derive(Debug, Clone)]
pub struct EncodeForm {
    rotors: RotorValidator,
    plugboard: PlugboardValidator,
    positions: Vec<String>,
    reflector: ReflectorId,
    plaintext: String,
    options: OutputOptions,
    ciphertext: String,
    gate: SubmissionGate,
    latest_generation: u64,
}

impl Default for EncodeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeForm {
    pub fn new() -> Self {
        Self::with_rotors(RotorId::defaults())
    }

    pub fn with_rotors(rotors: Vec<RotorId>) -> Self {
        let slots = rotors.len();
        Self {
            rotors: RotorValidator::new(rotors),
            plugboard: PlugboardValidator::new(),
            positions: vec![DEFAULT_POSITION.to_string(); slots],
            reflector: ReflectorId::default(),
            plaintext: String::new(),
            options: OutputOptions::default(),
            ciphertext: String::new(),
            gate: SubmissionGate::new(slots),
            latest_generation: 0,
        }
    }

    pub fn handle(&mut self, event: FormEvent) -> Result<(), FormError> {
        match event {
            FormEvent::RotorChanged { slot, rotor } => {
                self.select_rotor(slot, rotor)?;
            }
            FormEvent::PositionChanged { slot, value } => self.set_position(slot, value)?,
            FormEvent::ReflectorChanged(reflector) => self.set_reflector(reflector),
            FormEvent::PlugboardInput(text) => {
                self.input_plugboard(text);
            }
            FormEvent::PlaintextInput(text) => self.set_plaintext(text),
            FormEvent::ToggleChanged { toggle, checked } => self.set_toggle(toggle, checked),
        }
        Ok(())
    }

    pub fn select_rotor(
        &mut self,
        slot: usize,
        rotor: RotorId,
    ) -> Result<&ValidationState, FormError> {
        self.rotors.select(slot, rotor)
    }

    /// Stores the raw text; it is only coerced to a number at submit time.
    pub fn set_position(&mut self, slot: usize, value: impl Into<String>) -> Result<(), FormError> {
        let slots = self.positions.len();
        let entry = slot
            .checked_sub(1)
            .and_then(|index| self.positions.get_mut(index))
            .ok_or(FormError::SlotOutOfRange { slot, slots })?;
        *entry = value.into();
        Ok(())
    }

    pub fn input_plugboard(&mut self, text: impl Into<String>) -> &ValidationState {
        self.plugboard.input(text)
    }

    pub fn set_reflector(&mut self, reflector: ReflectorId) {
        self.reflector = reflector;
    }

    pub fn set_plaintext(&mut self, text: impl Into<String>) {
        self.plaintext = text.into();
    }

    pub fn set_toggle(&mut self, toggle: OutputToggle, checked: bool) {
        self.options.set(toggle, checked);
    }

    pub fn options(&self) -> OutputOptions {
        self.options
    }

    pub fn banners(&self) -> Banners<'_> {
        Banners {
            rotor: self.rotors.state().message(),
            plugboard: self.plugboard.state().message(),
        }
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Every named text and select field, display-only output included.
    pub fn fields(&self) -> FormFields {
        let mut fields = FormFields::new();
        for (index, rotor) in self.rotors.selections().iter().enumerate() {
            fields.insert(rotor_field(index + 1), rotor.to_string());
        }
        for (index, position) in self.positions.iter().enumerate() {
            fields.insert(position_field(index + 1), position.clone());
        }
        fields.insert(REFLECTOR_FIELD.to_string(), self.reflector.to_string());
        fields.insert(PLUGBOARD_FIELD.to_string(), self.plugboard.text().to_string());
        fields.insert(PLAINTEXT_FIELD.to_string(), self.plaintext.clone());
        fields.insert(CIPHERTEXT_FIELD.to_string(), self.ciphertext.clone());
        fields
    }

    /// Runs the gate against the last computed validator states. On success the returned
    /// submission carries a fresh generation and must be handed back to [`Self::complete`].
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        let payload = self.gate.submit(
            self.rotors.state(),
            self.plugboard.state(),
            self.fields(),
            self.options,
        )?;
        self.latest_generation += 1;
        info!(generation = self.latest_generation, "submission accepted");
        Ok(Submission {
            generation: self.latest_generation,
            payload,
        })
    }

    /// Applies the outcome of a submission. Failures and stale outcomes leave the displayed
    /// ciphertext untouched.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<String, EncodeError>,
    ) -> Completion {
        if generation != self.latest_generation {
            debug!(
                generation,
                latest = self.latest_generation,
                "discarding stale encode response"
            );
            return Completion::Stale(outcome.err());
        }
        match outcome {
            Ok(ciphertext) => {
                self.ciphertext = ciphertext;
                Completion::Applied
            }
            Err(err) => Completion::Failed(err),
        }
    }
}
