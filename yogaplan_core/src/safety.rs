//! Safety notes shown alongside every plan.

use crate::types::UserProfile;

pub const WARM_UP_NOTE: &str = "Warm up for at least 5 minutes before deeper stretches.";
pub const PAIN_FREE_NOTE: &str = "Move within a pain-free range; never force positions.";
pub const BREATH_NOTE: &str =
    "Breathe through the nose and avoid breath-holding unless instructed.";

pub const HYPERTENSION_NOTE: &str =
    "Avoid long inversions like Legs Up The Wall; keep head above heart.";
pub const ARTHRITIS_NOTE: &str =
    "Favor gentle range of motion; avoid deep knee flexion and long static holds.";
pub const ASTHMA_NOTE: &str = "Keep pranayama light and even; stop if breath feels strained.";
pub const SENIOR_NOTE: &str =
    "Use support (blocks/chair) to reduce balance risk; rise slowly to avoid dizziness.";
pub const INJURY_NOTE: &str =
    "Modify poses around recent injuries; consult a professional if unsure.";

/// Age from which the fall-risk note applies
pub const SENIOR_AGE: u32 = 60;

/// Baseline notes plus one note per matching condition, in fixed order
pub fn build_safety_notes(profile: &UserProfile) -> Vec<String> {
    let mut notes = vec![
        WARM_UP_NOTE.to_string(),
        PAIN_FREE_NOTE.to_string(),
        BREATH_NOTE.to_string(),
    ];

    let conditional = [
        (profile.has_condition("hypertension"), HYPERTENSION_NOTE),
        (profile.has_condition("arthritis"), ARTHRITIS_NOTE),
        (profile.has_condition("asthma"), ASTHMA_NOTE),
        (profile.age >= SENIOR_AGE, SENIOR_NOTE),
        (profile.injuries.is_some(), INJURY_NOTE),
    ];

    notes.extend(
        conditional
            .iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, note)| note.to_string()),
    );

    notes
}
