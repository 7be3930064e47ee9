use std::collections::HashSet;

use shared::domain::RotorId;
use thiserror::Error;
use tracing::debug;

use crate::{error::FormError, validation::ValidationState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotorError {
    #[error("Duplicate rotor: Rotor {rotor} is selected multiple times")]
    Duplicate { rotor: RotorId },
}

/// Scans slots left to right and reports the first identifier that repeats an earlier slot.
pub fn validate_rotors(selections: &[RotorId]) -> Result<(), RotorError> {
    let mut seen = HashSet::with_capacity(selections.len());
    for rotor in selections {
        if !seen.insert(rotor) {
            return Err(RotorError::Duplicate {
                rotor: rotor.clone(),
            });
        }
    }
    Ok(())
}

/// Current rotor selection of every slot plus the outcome of the last scan.
#[derive(Debug, Clone)]
pub struct RotorValidator {
    selections: Vec<RotorId>,
    duplicate: Option<RotorId>,
    state: ValidationState,
}

impl Default for RotorValidator {
    fn default() -> Self {
        Self::new(RotorId::defaults())
    }
}

impl RotorValidator {
    pub fn new(selections: Vec<RotorId>) -> Self {
        let mut validator = Self {
            selections,
            duplicate: None,
            state: ValidationState::valid(),
        };
        validator.revalidate();
        validator
    }

    /// Applies a change event from the selector of a 1-based `slot`. Every slot is rescanned.
    pub fn select(&mut self, slot: usize, rotor: RotorId) -> Result<&ValidationState, FormError> {
        let slots = self.selections.len();
        let entry = slot
            .checked_sub(1)
            .and_then(|index| self.selections.get_mut(index))
            .ok_or(FormError::SlotOutOfRange { slot, slots })?;
        *entry = rotor;
        self.revalidate();
        Ok(&self.state)
    }

    pub fn selections(&self) -> &[RotorId] {
        &self.selections
    }

    pub fn slots(&self) -> usize {
        self.selections.len()
    }

    pub fn duplicate(&self) -> Option<&RotorId> {
        self.duplicate.as_ref()
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    fn revalidate(&mut self) {
        let result = validate_rotors(&self.selections);
        self.duplicate = match &result {
            Ok(()) => None,
            Err(RotorError::Duplicate { rotor }) => Some(rotor.clone()),
        };
        self.state = ValidationState::from_result(&result);
        debug!(
            valid = self.state.is_valid(),
            duplicate = ?self.duplicate,
            "rotor selection revalidated"
        );
    }
}
