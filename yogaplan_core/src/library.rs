//! Built-in content library of activity items.
//!
//! The library is built once and shared read-only across all plan requests.
//! A replacement library can be loaded from JSON (see [`ContentLibrary::load_from`]).

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Cached default library - built once and reused across all plan requests
static DEFAULT_LIBRARY: Lazy<ContentLibrary> = Lazy::new(build_default_library);

/// Get a reference to the cached default library
pub fn default_library() -> &'static ContentLibrary {
    &DEFAULT_LIBRARY
}

/// A catalog of activity items
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentLibrary {
    items: Vec<ActivityItem>,
}

impl ContentLibrary {
    pub fn new(items: Vec<ActivityItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ActivityItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ActivityItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one category, in library order
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ActivityItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Load a library from a JSON file, rejecting it if validation fails
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let library: ContentLibrary = serde_json::from_str(&contents)?;

        let errors = library.validate();
        if !errors.is_empty() {
            return Err(Error::LibraryValidation(errors.join("; ")));
        }

        tracing::info!("Loaded {} library items from {:?}", library.len(), path);
        Ok(library)
    }

    /// Validate the library for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for item in &self.items {
            if item.id.is_empty() {
                errors.push(format!("Item '{}' has empty ID", item.name));
            } else if !seen.insert(item.id.as_str()) {
                errors.push(format!("Duplicate item ID '{}'", item.id));
            }
            if item.name.is_empty() {
                errors.push(format!("Item '{}' has empty name", item.id));
            }
            if item.duration.min == 0 {
                errors.push(format!("Item '{}': min duration must be > 0", item.id));
            }
            if item.duration.min > item.duration.max {
                errors.push(format!(
                    "Item '{}': min duration {} > max {}",
                    item.id, item.duration.min, item.duration.max
                ));
            }
            if let (Some(min_age), Some(max_age)) = (item.min_age, item.max_age) {
                if min_age > max_age {
                    errors.push(format!(
                        "Item '{}': min_age {} > max_age {}",
                        item.id, min_age, max_age
                    ));
                }
            }
        }

        for category in Category::ALL {
            if self.in_category(category).next().is_none() {
                errors.push(format!("Library has no {} items", category.as_str()));
            }
        }

        errors
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Builds the default library
///
/// Prefer [`default_library`], which returns a cached reference.
pub fn build_default_library() -> ContentLibrary {
    let items = vec![
        // ====================================================================
        // Warm-ups
        // ====================================================================
        ActivityItem {
            id: "cat_cow".into(),
            name: "Cat-Cow".into(),
            alternate_name: Some("Marjaryasana-Bitilasana".into()),
            category: Category::Warmup,
            goals: strings(&["flexibility", "stress_relief", "pain_relief"]),
            contraindications: vec![],
            instructions: strings(&[
                "Start on all fours with wrists under shoulders and knees under hips.",
                "Inhale, arch your back, lift your tailbone and chest (Cow).",
                "Exhale, round your spine, tuck your tailbone and chin (Cat).",
                "Flow smoothly with your breath.",
            ]),
            benefits: strings(&["Mobilizes spine", "Warms up back and core", "Eases stress"]),
            duration: DurationRange::new(2, 4),
            hold_time: None,
            modifications: Some("Pad the knees with a folded blanket.".into()),
            reps: Some(Repetitions { sets: 1, per_set: 8 }),
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "sun_salutation_a".into(),
            name: "Sun Salutation A".into(),
            alternate_name: Some("Surya Namaskar A".into()),
            category: Category::Warmup,
            goals: strings(&["strength", "weight_loss", "balance"]),
            contraindications: strings(&["arthritis", "hypertension"]),
            instructions: strings(&[
                "Begin standing, inhale reach arms overhead.",
                "Exhale fold forward, inhale half lift.",
                "Exhale step back to plank and lower.",
                "Inhale cobra/up-dog, exhale down-dog.",
                "Step forward, half lift, fold, rise to stand.",
            ]),
            benefits: strings(&["Full-body warm-up", "Builds heat", "Improves mobility"]),
            duration: DurationRange::new(3, 6),
            hold_time: None,
            modifications: Some("Lower the knees in plank and skip the jump back.".into()),
            reps: Some(Repetitions { sets: 2, per_set: 3 }),
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "neck_rolls".into(),
            name: "Neck Rolls".into(),
            alternate_name: None,
            category: Category::Warmup,
            goals: strings(&["relaxation", "stress_relief", "pain_relief"]),
            contraindications: vec![],
            instructions: strings(&[
                "Sit or stand tall with shoulders relaxed.",
                "Drop the chin toward the chest.",
                "Roll the head slowly toward one shoulder, then the other.",
                "Keep the movement small and breathe evenly.",
            ]),
            benefits: strings(&["Releases neck tension", "Prepares upper body"]),
            duration: DurationRange::new(1, 2),
            hold_time: None,
            modifications: Some("Use half circles only if full rolls cause dizziness.".into()),
            reps: Some(Repetitions { sets: 1, per_set: 5 }),
            min_age: None,
            max_age: None,
        },
        // ====================================================================
        // Main practice (standing / seated / balance)
        // ====================================================================
        ActivityItem {
            id: "warrior_ii".into(),
            name: "Warrior II".into(),
            alternate_name: Some("Virabhadrasana II".into()),
            category: Category::MainPractice,
            goals: strings(&["strength", "weight_loss", "balance"]),
            contraindications: strings(&["arthritis", "hypertension"]),
            instructions: strings(&[
                "Step feet wide, turn front toes forward, back foot slightly in.",
                "Bend front knee over ankle, arms reach parallel to floor.",
                "Gaze over front fingers, keep torso upright and strong.",
                "Press into outer edge of back foot.",
            ]),
            benefits: strings(&[
                "Strengthens legs and core",
                "Improves stamina",
                "Enhances focus",
            ]),
            duration: DurationRange::new(1, 2),
            hold_time: Some("20-40 seconds each side".into()),
            modifications: Some("Shorten the stance and rest hands on hips.".into()),
            reps: None,
            min_age: Some(18),
            max_age: None,
        },
        ActivityItem {
            id: "tree_pose".into(),
            name: "Tree Pose".into(),
            alternate_name: Some("Vrikshasana".into()),
            category: Category::MainPractice,
            goals: strings(&["balance", "mindfulness", "stress_relief"]),
            contraindications: strings(&["arthritis"]),
            instructions: strings(&[
                "Stand tall, shift weight to one foot.",
                "Place sole of other foot to ankle, calf, or inner thigh (avoid knee).",
                "Hands at heart or overhead, keep hips level.",
                "Gaze softly at a fixed point.",
            ]),
            benefits: strings(&["Improves balance", "Strengthens legs", "Calms the mind"]),
            duration: DurationRange::new(1, 2),
            hold_time: Some("20-40 seconds each side".into()),
            modifications: Some("Keep the toes of the lifted foot on the floor.".into()),
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "triangle_pose".into(),
            name: "Triangle Pose".into(),
            alternate_name: Some("Trikonasana".into()),
            category: Category::MainPractice,
            goals: strings(&["flexibility", "strength", "balance"]),
            contraindications: strings(&["back_pain"]),
            instructions: strings(&[
                "Step feet wide, turn the front foot out.",
                "Reach forward over the front leg, then lower the hand to shin or block.",
                "Extend the top arm toward the ceiling.",
                "Keep both sides of the waist long.",
            ]),
            benefits: strings(&["Stretches hamstrings and hips", "Opens chest"]),
            duration: DurationRange::new(1, 2),
            hold_time: Some("20-30 seconds each side".into()),
            modifications: None,
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "seated_forward_bend".into(),
            name: "Seated Forward Bend".into(),
            alternate_name: Some("Paschimottanasana".into()),
            category: Category::MainPractice,
            goals: strings(&["flexibility", "better_sleep", "mindfulness"]),
            contraindications: strings(&["back_pain"]),
            instructions: strings(&[
                "Sit with legs extended, flex feet.",
                "Inhale lengthen spine, exhale hinge from hips to fold.",
                "Keep spine long, use strap if needed.",
                "Breathe steadily without forcing.",
            ]),
            benefits: strings(&["Stretches hamstrings and back", "Soothes nervous system"]),
            duration: DurationRange::new(2, 3),
            hold_time: Some("30-60 seconds".into()),
            modifications: Some("Bend the knees and sit on a folded blanket.".into()),
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "butterfly_pose".into(),
            name: "Butterfly Pose".into(),
            alternate_name: Some("Baddha Konasana".into()),
            category: Category::MainPractice,
            goals: strings(&["flexibility", "relaxation"]),
            contraindications: strings(&["arthritis"]),
            instructions: strings(&[
                "Sit tall and bring the soles of the feet together.",
                "Let the knees fall open without pushing them down.",
                "Hold the feet and lengthen through the crown of the head.",
            ]),
            benefits: strings(&["Opens hips", "Stretches inner thighs"]),
            duration: DurationRange::new(2, 3),
            hold_time: Some("30-60 seconds".into()),
            modifications: Some("Support the knees with blocks.".into()),
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "pigeon_pose".into(),
            name: "Pigeon Pose".into(),
            alternate_name: Some("Eka Pada Rajakapotasana".into()),
            category: Category::MainPractice,
            goals: strings(&["flexibility", "pain_relief"]),
            contraindications: strings(&["arthritis", "back_pain"]),
            instructions: strings(&[
                "From down-dog, bring one knee behind the same wrist.",
                "Extend the back leg straight behind you.",
                "Square the hips and fold forward if comfortable.",
            ]),
            benefits: strings(&["Deep hip opener", "Releases lower back tension"]),
            duration: DurationRange::new(2, 4),
            hold_time: Some("45-90 seconds each side".into()),
            modifications: Some("Practice reclined figure-four instead.".into()),
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "eagle_pose".into(),
            name: "Eagle Pose".into(),
            alternate_name: Some("Garudasana".into()),
            category: Category::MainPractice,
            goals: strings(&["balance", "mindfulness"]),
            contraindications: strings(&["arthritis"]),
            instructions: strings(&[
                "Bend the knees and cross one thigh over the other.",
                "Wrap the arms, same side arm underneath.",
                "Sink the hips and lift the elbows.",
            ]),
            benefits: strings(&["Improves balance", "Builds concentration"]),
            duration: DurationRange::new(1, 2),
            hold_time: Some("15-30 seconds each side".into()),
            modifications: None,
            reps: None,
            min_age: None,
            max_age: Some(59),
        },
        ActivityItem {
            id: "half_moon".into(),
            name: "Half Moon".into(),
            alternate_name: Some("Ardha Chandrasana".into()),
            category: Category::MainPractice,
            goals: strings(&["balance", "strength"]),
            contraindications: strings(&["arthritis"]),
            instructions: strings(&[
                "From triangle, bend the front knee and reach the hand forward.",
                "Lift the back leg parallel to the floor as the front leg straightens.",
                "Stack the hips and open the top arm.",
            ]),
            benefits: strings(&["Strengthens standing leg", "Improves coordination"]),
            duration: DurationRange::new(1, 2),
            hold_time: Some("15-30 seconds each side".into()),
            modifications: Some("Use a block under the lower hand.".into()),
            reps: None,
            min_age: None,
            max_age: Some(59),
        },
        // ====================================================================
        // Breathing
        // ====================================================================
        ActivityItem {
            id: "box_breathing".into(),
            name: "Box Breathing".into(),
            alternate_name: Some("Sama Vritti".into()),
            category: Category::Breathing,
            goals: strings(&["stress_relief", "mindfulness", "better_sleep"]),
            contraindications: vec![],
            instructions: strings(&[
                "Inhale 4, hold 4, exhale 4, hold 4.",
                "Breathe through the nose, keep shoulders relaxed.",
                "Repeat cycles with smooth, even rhythm.",
            ]),
            benefits: strings(&["Balances nervous system", "Improves focus"]),
            duration: DurationRange::new(3, 6),
            hold_time: None,
            modifications: Some("Shorten the holds to a count of 2.".into()),
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "alternate_nostril".into(),
            name: "Alternate Nostril Breathing".into(),
            alternate_name: Some("Nadi Shodhana".into()),
            category: Category::Breathing,
            goals: strings(&["mindfulness", "stress_relief", "balance"]),
            contraindications: strings(&["sinus_congestion"]),
            instructions: strings(&[
                "Right hand in Vishnu mudra: close right nostril, inhale left.",
                "Close both briefly, open right, exhale right.",
                "Inhale right, close both, exhale left. Repeat.",
            ]),
            benefits: strings(&["Calms mind", "Balances hemispheres"]),
            duration: DurationRange::new(3, 6),
            hold_time: None,
            modifications: None,
            reps: None,
            min_age: None,
            max_age: None,
        },
        // ====================================================================
        // Meditation
        // ====================================================================
        ActivityItem {
            id: "body_scan".into(),
            name: "Body Scan Meditation".into(),
            alternate_name: None,
            category: Category::Meditation,
            goals: strings(&["mindfulness", "better_sleep", "stress_relief"]),
            contraindications: vec![],
            instructions: strings(&[
                "Lie or sit comfortably, close eyes.",
                "Scan attention from toes to head slowly.",
                "Notice sensations without judgment, return to breath when distracted.",
            ]),
            benefits: strings(&["Enhances awareness", "Reduces stress"]),
            duration: DurationRange::new(5, 10),
            hold_time: None,
            modifications: None,
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "loving_kindness".into(),
            name: "Loving-Kindness Meditation".into(),
            alternate_name: Some("Metta".into()),
            category: Category::Meditation,
            goals: strings(&["mindfulness", "depression", "anxiety"]),
            contraindications: vec![],
            instructions: strings(&[
                "Sit comfortably, breathe naturally.",
                "Silently repeat phrases of goodwill for self and others.",
                "Expand circle from self to loved ones to all beings.",
            ]),
            benefits: strings(&["Improves mood", "Builds compassion"]),
            duration: DurationRange::new(5, 10),
            hold_time: None,
            modifications: None,
            reps: None,
            min_age: None,
            max_age: None,
        },
        // ====================================================================
        // Cool-down
        // ====================================================================
        ActivityItem {
            id: "childs_pose".into(),
            name: "Child's Pose".into(),
            alternate_name: Some("Balasana".into()),
            category: Category::Cooldown,
            goals: strings(&["relaxation", "stress_relief", "pain_relief", "better_sleep"]),
            contraindications: vec![],
            instructions: strings(&[
                "Kneel, sit back on heels, fold torso over thighs.",
                "Arms forward or by sides, relax shoulders and jaw.",
                "Breathe into back body.",
                "Use bolster or blanket as needed.",
            ]),
            benefits: strings(&["Releases back and hips", "Calms mind"]),
            duration: DurationRange::new(2, 4),
            hold_time: None,
            modifications: None,
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "legs_up_the_wall".into(),
            name: "Legs Up The Wall".into(),
            alternate_name: Some("Viparita Karani".into()),
            category: Category::Cooldown,
            goals: strings(&["relaxation", "better_sleep", "stress_relief"]),
            contraindications: strings(&["hypertension"]),
            instructions: strings(&[
                "Sit sideways to a wall, swing legs up and lie back.",
                "Hips a few inches from wall, arms relaxed by sides.",
                "Soften breath and face.",
                "Exit slowly rolling to side.",
            ]),
            benefits: strings(&["Relieves tired legs", "Supports relaxation"]),
            duration: DurationRange::new(3, 6),
            hold_time: None,
            modifications: None,
            reps: None,
            min_age: None,
            max_age: None,
        },
        ActivityItem {
            id: "savasana".into(),
            name: "Savasana".into(),
            alternate_name: Some("Corpse Pose".into()),
            category: Category::Cooldown,
            goals: strings(&["relaxation", "better_sleep", "stress_relief", "mindfulness"]),
            contraindications: vec![],
            instructions: strings(&[
                "Lie on your back, legs extended and arms by your sides.",
                "Let the feet fall open and the palms face up.",
                "Release effort from every muscle and let the breath be natural.",
            ]),
            benefits: strings(&["Integrates the practice", "Deep relaxation"]),
            duration: DurationRange::new(3, 8),
            hold_time: None,
            modifications: Some("Place a bolster under the knees to ease the lower back.".into()),
            reps: None,
            min_age: None,
            max_age: None,
        },
    ];

    ContentLibrary::new(items)
}
