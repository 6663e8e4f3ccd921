//src/coach.rs
use crate::db::DbError;
use crate::store::{read_json, write_json, Store, StoreKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub const QUICK_PROMPTS: [&str; 8] = [
    "What muscles does lat pulldown work?",
    "Give me form cues for goblet squats.",
    "What should my rest time be for 8–10 reps?",
    "I have shoulder pain—what should I avoid?",
    "Give me a 10-min stretching routine.",
    "Beginner diet basics for fat loss.",
    "Cardio: zone 2 vs intervals—what should I do?",
    "How do I warm up for leg day?",
];

// First matching key wins, so "curl" must stay after "hamstring curl".
const MUSCLE_MAP: [(&str, &str); 13] = [
    ("lat pulldown", "Lats, upper back, biceps"),
    ("seated cable row", "Mid-back (rhomboids), lats, biceps"),
    ("face pull", "Rear delts, upper back, rotator cuff"),
    ("bench press", "Chest, triceps, front delts"),
    ("shoulder press", "Delts, triceps, upper chest (secondary)"),
    ("goblet squat", "Quads, glutes, core"),
    ("leg press", "Quads, glutes (hamstrings secondary)"),
    ("hamstring curl", "Hamstrings"),
    ("romanian deadlift", "Hamstrings, glutes, low back (secondary)"),
    ("lunge", "Quads, glutes, adductors"),
    ("curl", "Biceps, forearms"),
    ("tricep pushdown", "Triceps"),
    ("plank", "Core: abs, obliques, deep stabilizers"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[strum(serialize = "You")]
    User,
    #[strum(serialize = "Coach")]
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub at: DateTime<Utc>,
    pub role: Role,
    pub text: String,
}

fn find_muscles(text: &str) -> Option<&'static str> {
    MUSCLE_MAP
        .iter()
        .find(|(key, _)| text.contains(key))
        .map(|(_, muscles)| *muscles)
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Canned, keyword-driven answer to a training question.
#[must_use]
pub fn coach_reply(question: &str) -> String {
    let text = question.to_lowercase();

    let lines: &[&str] = if contains_any(&text, &["sharp pain", "numb", "tingle"]) {
        &[
            "If you have sharp pain, numbness, or tingling:",
            "• Stop that movement immediately.",
            "• Switch to a pain-free alternative and reduce load.",
            "• If symptoms persist, consider evaluation by a qualified clinician.",
            "",
            "Tell me the exercise + where it hurts and I’ll suggest safer swaps.",
        ]
    } else if contains_any(&text, &["what muscles", "muscles does", "targets"]) {
        return find_muscles(&text).map_or_else(
            || "Tell me the exercise name and I’ll map the primary + secondary muscles.".to_string(),
            |m| format!("Muscles worked: {m}\n\nIf you tell me your equipment options, I can suggest alternatives too."),
        );
    } else if contains_any(&text, &["rest", "how long"]) {
        &[
            "Rest guidance:",
            "• 1–5 reps: 3–5 min",
            "• 6–10 reps: 2–3 min",
            "• 10–12 reps: 1–2 min",
            "• 12–20 reps: 45–90 sec",
            "",
            "If your last set was near-failure, use the high end.",
        ]
    } else if contains_any(&text, &["warm up", "warmup"]) {
        &[
            "Quick warm-up template (5–10 min):",
            "1) 2–4 min easy cardio",
            "2) Dynamic mobility (hips/shoulders depending on day)",
            "3) 2 ramp-up sets on your first lift (light → moderate)",
            "",
            "If you tell me push/pull/legs + any injury, I’ll tailor it.",
        ]
    } else if contains_any(&text, &["stretch", "mobility"]) {
        &[
            "10-minute mobility routine (general):",
            "• Hip flexor stretch: 2×20 sec/side",
            "• Thoracic rotations: 6/side",
            "• Calf stretch: 2×20 sec/side",
            "• Band external rotations (light): 2×10",
            "",
            "Tell me what feels tight (hips/hamstrings/shoulders) and I’ll narrow it.",
        ]
    } else if contains_any(&text, &["diet", "calorie", "protein", "cut", "bulk"]) {
        &[
            "Diet basics (beginner-safe):",
            "• Protein: aim ~0.7–1.0g per lb of goal bodyweight (or start 120–160g/day for many adults).",
            "• Fat loss: small calorie deficit; muscle gain: small surplus.",
            "• Whole foods + fiber help adherence.",
            "",
            "Tell me your goal and I’ll give a simple plan.",
        ]
    } else if contains_any(&text, &["cardio", "zone 2", "hiit", "interval"]) {
        &[
            "Cardio guidelines:",
            "• Zone 2 (easy conversational pace): best base fitness + recovery support.",
            "• Intervals/HIIT: time-efficient but higher fatigue.",
            "",
            "Beginner: 2–3x/week Zone 2 (20–30 min) + optional 0–1 interval day.",
        ]
    } else if contains_any(&text, &["form", "cue", "how do i do"]) {
        &[
            "Tell me the exercise name and I’ll give:",
            "• setup cues",
            "• execution cues",
            "• common mistakes",
            "• what it should feel like",
        ]
    } else if contains_any(&text, &["injury", "hurt", "pain", "avoid"]) {
        &[
            "Training around injury (general):",
            "• Avoid sharp pain and flare-up positions.",
            "• Use stable patterns (machines, supported rows).",
            "• Prefer moderate reps (10–12) and controlled tempo.",
            "",
            "Tell me the body area + movement that hurts and I’ll suggest swaps.",
        ]
    } else if contains_any(&text, &["progress", "pr", "add weight"]) {
        &[
            "Progression options (choose ONE):",
            "1) Add 2.5–5 lb upper / 5–10 lb lower if reps stayed in-range",
            "2) Add 1 rep at same weight",
            "3) Improve form/tempo and keep reps",
            "",
            "Consistency > perfection.",
        ]
    } else {
        &[
            "I can help with:",
            "• muscles worked",
            "• form cues",
            "• substitutions",
            "• mobility/stretching",
            "• cardio programming",
            "• diet basics",
            "• injury-aware swaps",
            "• progression advice",
            "",
            "Ask your question with an exercise name if possible.",
        ]
    };
    lines.join("\n")
}

/// # Errors
/// Returns `DbError` on backend failure.
pub fn chat_log(store: &dyn Store) -> Result<Vec<ChatMessage>, DbError> {
    read_json(store, StoreKey::Chat, Vec::new())
}

/// Appends the question and the coach's answer to the chat log.
///
/// Blank questions are ignored and return `None`.
/// # Errors
/// Returns `DbError` on backend failure.
pub fn ask(store: &mut dyn Store, question: &str) -> Result<Option<ChatMessage>, DbError> {
    let question = question.trim();
    if question.is_empty() {
        return Ok(None);
    }

    let mut log = chat_log(store)?;
    let message = |role, text: String| ChatMessage {
        id: crate::new_id(),
        at: Utc::now(),
        role,
        text,
    };
    log.push(message(Role::User, question.to_string()));
    let reply = message(Role::Bot, coach_reply(question));
    log.push(reply.clone());
    write_json(store, StoreKey::Chat, &log)?;

    tracing::debug!(messages = log.len(), "Chat log updated");
    Ok(Some(reply))
}
