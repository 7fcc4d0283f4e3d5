//! Registration wizard shown before the deck on first launch.
//!
//! A single configurable step sequence drives the whole flow. Each step
//! validates its slice of the draft before the cursor may advance;
//! completion persists a single boolean flag.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Wizard steps in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Name,
    Age,
    Gender,
    LookingFor,
    Location,
    Photos,
    Bio,
}

impl OnboardingStep {
    /// The default full sequence
    pub fn standard_flow() -> Vec<OnboardingStep> {
        vec![
            OnboardingStep::Name,
            OnboardingStep::Age,
            OnboardingStep::Gender,
            OnboardingStep::LookingFor,
            OnboardingStep::Location,
            OnboardingStep::Photos,
            OnboardingStep::Bio,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Profile data collected across the wizard
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[validate(length(min = 2, max = 50, message = "name must be 2-50 characters"))]
    pub name: String,
    #[validate(range(min = 18, max = 99, message = "age must be between 18 and 99"))]
    pub age: u8,
    pub gender: Option<Gender>,
    pub looking_for: Option<Gender>,
    /// Optional free-form city label; provider lookups live outside the core
    pub city: Option<String>,
    #[validate(length(min = 1, message = "at least one photo is required"))]
    pub photo_urls: Vec<String>,
    #[validate(length(max = 300, message = "bio is limited to 300 characters"))]
    pub bio: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("invalid input for step {step:?}: {message}")]
    InvalidStep { step: OnboardingStep, message: String },

    #[error("already at the first step")]
    AtStart,

    #[error("wizard not finished")]
    Incomplete,
}

/// Key-value persistence for the registration flag
///
/// The mini app keeps this in host local storage; tests keep it in memory.
pub trait ProfileStore {
    fn profile_complete(&self) -> bool;
    fn set_profile_complete(&mut self);
}

/// In-memory store, also used by the demo binary
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    complete: bool,
}

impl ProfileStore for MemoryProfileStore {
    fn profile_complete(&self) -> bool {
        self.complete
    }

    fn set_profile_complete(&mut self) {
        self.complete = true;
    }
}

/// Step-by-step registration flow over a validated draft
#[derive(Debug)]
pub struct OnboardingFlow {
    steps: Vec<OnboardingStep>,
    position: usize,
    draft: ProfileDraft,
}

impl OnboardingFlow {
    pub fn new(steps: Vec<OnboardingStep>) -> Self {
        Self {
            steps,
            position: 0,
            draft: ProfileDraft::default(),
        }
    }

    pub fn standard() -> Self {
        Self::new(OnboardingStep::standard_flow())
    }

    pub fn current_step(&self) -> Option<OnboardingStep> {
        self.steps.get(self.position).copied()
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.steps.len()
    }

    /// Progress as (1-based position, total), for the step indicator
    pub fn progress(&self) -> (usize, usize) {
        let shown = self.position.min(self.steps.len().saturating_sub(1)) + 1;
        (shown, self.steps.len())
    }

    /// Validate the current step's fields and advance past it
    pub fn next(&mut self) -> Result<(), OnboardingError> {
        let Some(step) = self.current_step() else {
            return Ok(());
        };
        self.validate_step(step)?;
        self.position += 1;
        Ok(())
    }

    /// Return to the previous step; drafted values are retained
    pub fn back(&mut self) -> Result<(), OnboardingError> {
        if self.position == 0 {
            return Err(OnboardingError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    /// Finish the wizard: validate the whole draft and persist the flag
    pub fn complete(
        &self,
        store: &mut dyn ProfileStore,
    ) -> Result<ProfileDraft, OnboardingError> {
        if !self.is_finished() {
            return Err(OnboardingError::Incomplete);
        }
        let last_step = self.steps.last().copied().unwrap_or(OnboardingStep::Name);
        self.draft.validate().map_err(|errors| OnboardingError::InvalidStep {
            step: last_step,
            message: errors.to_string(),
        })?;
        store.set_profile_complete();
        Ok(self.draft.clone())
    }

    fn validate_step(&self, step: OnboardingStep) -> Result<(), OnboardingError> {
        let invalid = |message: &str| OnboardingError::InvalidStep {
            step,
            message: message.to_string(),
        };
        match step {
            OnboardingStep::Name => {
                let len = self.draft.name.trim().chars().count();
                if !(2..=50).contains(&len) {
                    return Err(invalid("name must be 2-50 characters"));
                }
            }
            OnboardingStep::Age => {
                if !(18..=99).contains(&self.draft.age) {
                    return Err(invalid("age must be between 18 and 99"));
                }
            }
            OnboardingStep::Gender => {
                if self.draft.gender.is_none() {
                    return Err(invalid("pick a gender"));
                }
            }
            OnboardingStep::LookingFor => {
                if self.draft.looking_for.is_none() {
                    return Err(invalid("pick who you are looking for"));
                }
            }
            // Location is optional; provider fallbacks are out of scope
            OnboardingStep::Location => {}
            OnboardingStep::Photos => {
                if self.draft.photo_urls.is_empty() {
                    return Err(invalid("at least one photo is required"));
                }
            }
            OnboardingStep::Bio => {
                if self.draft.bio.chars().count() > 300 {
                    return Err(invalid("bio is limited to 300 characters"));
                }
            }
        }
        Ok(())
    }
}
