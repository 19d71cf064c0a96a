use chrono::{DateTime, Utc};
use tracing::debug;

/// A single break-time exercise suggestion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exercise {
    pub name: &'static str,
    pub description: &'static str,
    pub duration_hint: &'static str,
}

pub static DEFAULT_EXERCISES: &[Exercise] = &[
    Exercise {
        name: "Push-ups",
        description: "Place your hands shoulder-width apart, keep your body straight, lower yourself until your chest nearly touches the ground, then push back up.",
        duration_hint: "Do 3 sets of 15 repetitions",
    },
    Exercise {
        name: "Bodyweight Squats",
        description: "Squat down as deep as possible, Alternatively do wide leg squats.",
        duration_hint: "Do 3 sets of 15 repetitions",
    },
    Exercise {
        name: "Plank",
        description: "Hold a push-up position with your forearms on the ground. Alternatively- do side planks",
        duration_hint: "Hold for 30 seconds, rest, repeat 3 times",
    },
    Exercise {
        name: "Curls",
        description: "Grab some dumbbells, Work them guns. If you don't have dumbbells do close grip pushups",
        duration_hint: "20-30 reps, 5 sets",
    },
    Exercise {
        name: "Lunges",
        description: "Walking Lunges",
        duration_hint: "3 sets of 15 each leg",
    },
    Exercise {
        name: "Overhead Press",
        description: "Grab some dumbbells, put em overhead",
        duration_hint: "5 sets of 15-20",
    },
    Exercise {
        name: "Side Delt Raise",
        description: "Grab some dumbbells, Start with hands at side, raise them to the side to slightly above shoulder level, lower controlled.",
        duration_hint: "5 sets of 15-20",
    },
];

/// Read-only set of exercises a break can draw from. Never empty.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    exercises: &'static [Exercise],
}

impl Catalog {
    /// Returns `None` for an empty slice since selection needs at least one entry
    pub fn new(exercises: &'static [Exercise]) -> Option<Self> {
        if exercises.is_empty() {
            None
        } else {
            Some(Self { exercises })
        }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercises(&self) -> &'static [Exercise] {
        self.exercises
    }

    /// Index for a wall-clock instant: unix seconds modulo catalog size.
    /// Deterministic within a second, no repetition guarantee.
    pub fn index_at(&self, at: DateTime<Utc>) -> usize {
        at.timestamp().rem_euclid(self.exercises.len() as i64) as usize
    }

    pub fn select_at(&self, at: DateTime<Utc>) -> &'static Exercise {
        let exercises = self.exercises;
        let idx = self.index_at(at);
        debug!(idx, name = exercises[idx].name, "selected exercise");
        &exercises[idx]
    }

    pub fn select_now(&self) -> &'static Exercise {
        self.select_at(Utc::now())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            exercises: DEFAULT_EXERCISES,
        }
    }
}
