//! Core domain types for the plan generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Activity items and their categories
//! - The normalized user profile
//! - Budgets, assembled phases and daily sessions
//! - The weekly schedule, progression outline and final plan

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Activity Types
// ============================================================================

/// Phase category an activity belongs to.
///
/// The declaration order is the fixed order phases run in within a session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Warmup,
    MainPractice,
    Breathing,
    Meditation,
    Cooldown,
}

impl Category {
    /// All categories in session order
    pub const ALL: [Category; 5] = [
        Category::Warmup,
        Category::MainPractice,
        Category::Breathing,
        Category::Meditation,
        Category::Cooldown,
    ];

    /// Human-readable phase label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Warmup => "Warm-up",
            Category::MainPractice => "Asana Flow",
            Category::Breathing => "Pranayama",
            Category::Meditation => "Meditation",
            Category::Cooldown => "Cool-down",
        }
    }

    /// Stable snake_case key
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Warmup => "warmup",
            Category::MainPractice => "main_practice",
            Category::Breathing => "breathing",
            Category::Meditation => "meditation",
            Category::Cooldown => "cooldown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "warmup" | "warm_up" => Ok(Category::Warmup),
            "main_practice" | "main" | "asana" => Ok(Category::MainPractice),
            "breathing" | "pranayama" => Ok(Category::Breathing),
            "meditation" => Ok(Category::Meditation),
            "cooldown" | "cool_down" => Ok(Category::Cooldown),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// Declared duration range of an activity, in minutes
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
}

impl DurationRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && minutes <= self.max
    }
}

/// Repetition scheme for flowing sequences (e.g. Sun Salutations)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repetitions {
    pub sets: u32,
    pub per_set: u32,
}

/// An entry in the content library
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub duration: DurationRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Repetitions>,
    /// Rejected for users younger than this age
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    /// Rejected for users older than this age
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Self-reported fitness level
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Low,
    #[default]
    Beginner,
    Moderate,
    High,
    Athlete,
    Other(String),
}

impl FitnessLevel {
    /// Parse a fitness level, case-insensitively.
    ///
    /// Unrecognized strings are kept as `Other` rather than rejected.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => FitnessLevel::Low,
            "" | "beginner" => FitnessLevel::Beginner,
            "moderate" => FitnessLevel::Moderate,
            "high" => FitnessLevel::High,
            "athlete" => FitnessLevel::Athlete,
            other => FitnessLevel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FitnessLevel::Low => "low",
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Moderate => "moderate",
            FitnessLevel::High => "high",
            FitnessLevel::Athlete => "athlete",
            FitnessLevel::Other(s) => s,
        }
    }

    /// High and athlete levels share the most demanding cadence
    pub fn is_advanced(&self) -> bool {
        matches!(self, FitnessLevel::High | FitnessLevel::Athlete)
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical user profile, produced by [`crate::profile::normalize`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub age: u32,
    pub conditions: BTreeSet<String>,
    pub fitness_level: FitnessLevel,
    pub goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: crate::profile::DEFAULT_AGE,
            conditions: BTreeSet::new(),
            fitness_level: FitnessLevel::default(),
            goals: Vec::new(),
            injuries: None,
        }
    }
}

impl UserProfile {
    pub fn has_condition(&self, condition: &str) -> bool {
        self.conditions.contains(condition)
    }
}

// ============================================================================
// Budget and Phase Types
// ============================================================================

/// Minutes allocated to one phase
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseBudget {
    pub category: Category,
    pub minutes: u32,
}

/// Total session length and its split across the five phases
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionBudget {
    pub total: u32,
    pub warmup: u32,
    pub main_practice: u32,
    pub breathing: u32,
    pub meditation: u32,
    pub cooldown: u32,
}

impl SessionBudget {
    pub fn minutes_for(&self, category: Category) -> u32 {
        match category {
            Category::Warmup => self.warmup,
            Category::MainPractice => self.main_practice,
            Category::Breathing => self.breathing,
            Category::Meditation => self.meditation,
            Category::Cooldown => self.cooldown,
        }
    }

    /// Phase budgets in session order
    pub fn phases(&self) -> [PhaseBudget; 5] {
        Category::ALL.map(|category| PhaseBudget {
            category,
            minutes: self.minutes_for(category),
        })
    }

    pub fn phase_sum(&self) -> u32 {
        self.warmup + self.main_practice + self.breathing + self.meditation + self.cooldown
    }
}

/// A library item chosen for a phase, with its resolved duration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SelectedActivity {
    #[serde(flatten)]
    pub item: ActivityItem,
    pub recommended_duration: u32,
}

/// One phase of a session after item selection
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AssembledPhase {
    pub category: Category,
    pub label: String,
    pub allocated_minutes: u32,
    /// Minutes actually filled; never more than `allocated_minutes`
    pub duration_minutes: u32,
    pub activities: Vec<SelectedActivity>,
}

impl AssembledPhase {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

// ============================================================================
// Schedule Types
// ============================================================================

/// Calendar day, Monday first
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Focus label used for inactive days
pub const REST_FOCUS: &str = "rest";

/// One entry of the weekly cadence
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: Day,
    pub active: bool,
    pub focus: String,
    pub duration: u32,
}

/// What happens on a given day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DailySession {
    Rest,
    Active {
        total_duration: u32,
        phases: [AssembledPhase; 5],
    },
}

impl DailySession {
    pub fn is_rest(&self) -> bool {
        matches!(self, DailySession::Rest)
    }

    pub fn phases(&self) -> &[AssembledPhase] {
        match self {
            DailySession::Rest => &[],
            DailySession::Active { phases, .. } => phases,
        }
    }
}

// ============================================================================
// Progression and Plan Types
// ============================================================================

/// A block of weeks in the progression outline
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressionBlock {
    pub weeks: String,
    pub focus: String,
    pub goals: Vec<String>,
}

/// Multi-week progression outline
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progression {
    pub timeline: String,
    pub weeks: u32,
    pub blocks: Vec<ProgressionBlock>,
}

/// The generated plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub profile: UserProfile,
    pub weekly_schedule: Vec<DaySchedule>,
    pub daily_sessions: BTreeMap<Day, DailySession>,
    pub progression: Progression,
    pub safety_notes: Vec<String>,
}

impl Plan {
    pub fn session_for(&self, day: Day) -> Option<&DailySession> {
        self.daily_sessions.get(&day)
    }

    pub fn active_days(&self) -> usize {
        self.weekly_schedule.iter().filter(|d| d.active).count()
    }
}
