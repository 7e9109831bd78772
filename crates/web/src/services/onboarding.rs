//! Onboarding flow: region selection, then crop selection, then dashboard.
//!
//! [`OnboardingSession`] is the only reader and writer of the
//! `selectedDistrict` and `selectedCrops` session keys.

use thiserror::Error;
use tower_sessions::Session;

use crate::models::session_keys;

/// Errors that can occur while advancing the onboarding flow.
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// The district was blank.
    #[error("a district must be selected")]
    MissingDistrict,

    /// No crop was selected.
    #[error("at least one crop must be selected")]
    MissingCrops,

    /// Reading or writing the session failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// District and crops chosen during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingSelection {
    /// Empty when no district has been chosen.
    pub district: String,
    /// Crop names in order of first selection.
    pub crops: Vec<String>,
}

/// Session-backed owner of the onboarding selections.
pub struct OnboardingSession<'a> {
    session: &'a Session,
}

impl<'a> OnboardingSession<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// The stored selections, defaulting to `""` and `[]`.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Session` if the session cannot be read.
    pub async fn selection(&self) -> Result<OnboardingSelection, OnboardingError> {
        let district: Option<String> = self.session.get(session_keys::SELECTED_DISTRICT).await?;
        let crops: Option<Vec<String>> = self.session.get(session_keys::SELECTED_CROPS).await?;

        Ok(OnboardingSelection {
            district: district.unwrap_or_default(),
            crops: crops.unwrap_or_default(),
        })
    }

    /// Store the district, completing the region step.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::MissingDistrict` if the trimmed district is
    /// empty, in which case nothing is written.
    pub async fn select_district(&self, district: &str) -> Result<(), OnboardingError> {
        let district = district.trim();
        if district.is_empty() {
            return Err(OnboardingError::MissingDistrict);
        }

        self.session
            .insert(session_keys::SELECTED_DISTRICT, district)
            .await?;
        tracing::debug!(district, "District selected");
        Ok(())
    }

    /// Store the crop list, completing the crop step.
    ///
    /// Blank names are dropped and duplicates collapse to their first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::MissingCrops` if no crop remains, in which
    /// case nothing is written.
    pub async fn select_crops<I, S>(&self, crops: I) -> Result<Vec<String>, OnboardingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let crops = normalize_crops(crops);
        if crops.is_empty() {
            return Err(OnboardingError::MissingCrops);
        }

        self.session
            .insert(session_keys::SELECTED_CROPS, &crops)
            .await?;
        tracing::debug!(count = crops.len(), "Crops selected");
        Ok(crops)
    }
}

fn normalize_crops<I, S>(crops: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for crop in crops {
        let crop = crop.as_ref().trim();
        if !crop.is_empty() && !out.iter().any(|c| c == crop) {
            out.push(crop.to_string());
        }
    }
    out
}

// =============================================================================
// Progress indicator
// =============================================================================

/// A step of the first-run flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OnboardingStep {
    Register,
    SelectRegion,
    SelectCrops,
    Dashboard,
}

impl OnboardingStep {
    pub const ALL: [Self; 4] = [
        Self::Register,
        Self::SelectRegion,
        Self::SelectCrops,
        Self::Dashboard,
    ];

    /// Translation key of the step label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Register => "flow.register",
            Self::SelectRegion => "flow.selectRegion",
            Self::SelectCrops => "flow.selectCrops",
            Self::Dashboard => "flow.dashboard",
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Register => "/auth",
            Self::SelectRegion => "/region-selection",
            Self::SelectCrops => "/crop-selection",
            Self::Dashboard => "/dashboard",
        }
    }

    /// The progress indicator as seen from this step.
    #[must_use]
    pub fn progress(self) -> Vec<ProgressStep> {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(index, &step)| ProgressStep {
                number: index + 1,
                label_key: step.label_key(),
                path: step.path(),
                completed: step < self,
                current: step == self,
            })
            .collect()
    }
}

/// One entry of the rendered progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    pub number: usize,
    pub label_key: &'static str,
    pub path: &'static str,
    pub completed: bool,
    pub current: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let session = session();
        let selection = OnboardingSession::new(&session).selection().await.unwrap();
        assert_eq!(selection, OnboardingSelection::default());
    }

    #[tokio::test]
    async fn test_selection_roundtrip() {
        let session = session();
        let onboarding = OnboardingSession::new(&session);

        onboarding.select_district(" Nashik ").await.unwrap();
        onboarding
            .select_crops(["Onion", "Grapes", "Onion", " "])
            .await
            .unwrap();

        let selection = onboarding.selection().await.unwrap();
        assert_eq!(selection.district, "Nashik");
        assert_eq!(selection.crops, vec!["Onion", "Grapes"]);
    }

    #[tokio::test]
    async fn test_blank_district_is_rejected_and_not_written() {
        let session = session();
        let onboarding = OnboardingSession::new(&session);

        onboarding.select_district("Pune").await.unwrap();
        let err = onboarding.select_district("   ").await.unwrap_err();

        assert!(matches!(err, OnboardingError::MissingDistrict));
        assert_eq!(onboarding.selection().await.unwrap().district, "Pune");
    }

    #[tokio::test]
    async fn test_empty_crops_are_rejected() {
        let session = session();
        let onboarding = OnboardingSession::new(&session);

        let err = onboarding
            .select_crops(Vec::<String>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OnboardingError::MissingCrops));
    }

    #[test]
    fn test_progress_marks_earlier_steps_completed() {
        let steps = OnboardingStep::SelectCrops.progress();
        assert_eq!(steps.len(), 4);
        assert!(steps[0].completed && steps[1].completed);
        assert!(steps[2].current && !steps[2].completed);
        assert!(!steps[3].completed && !steps[3].current);
    }
}
