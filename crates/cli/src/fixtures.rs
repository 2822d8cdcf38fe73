// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin suites, used when proctor.toml declares none.

use crate::model::{Priority, TestCase, TestSuite};

/// AI validation, admin dashboard, student journey, and the combined
/// end-to-end system suite, in that order.
pub fn builtin_suites() -> Vec<TestSuite> {
    vec![
        ai_validation(),
        admin_dashboard(),
        student_journey(),
        revolutionary_system(),
    ]
}

fn case(
    id: &str,
    name: &str,
    category: &str,
    priority: Priority,
    description: &str,
) -> TestCase {
    TestCase::new(id, name, category)
        .with_priority(priority)
        .with_description(description)
}

fn ai_validation() -> TestSuite {
    use Priority::*;
    TestSuite::new("ai-validation", "AI Validation")
        .with_description("Quality of explanations, tutoring, analysis, generation and prediction")
        .with_tests(vec![
            case(
                "ai-explain-constitutional",
                "Explain constitutional law concepts",
                "explainer",
                High,
                "Plain-language explanation of judicial review and due process",
            ),
            case(
                "ai-explain-contracts",
                "Explain contract formation",
                "explainer",
                Medium,
                "Offer, acceptance and consideration walkthrough",
            ),
            case(
                "ai-tutor-socratic",
                "Socratic tutoring session",
                "tutor",
                High,
                "Multi-turn questioning on a torts hypothetical",
            ),
            case(
                "ai-tutor-feedback",
                "Answer feedback",
                "tutor",
                Medium,
                "Targeted feedback on an incorrect multiple-choice answer",
            ),
            case(
                "ai-analyze-essay",
                "Essay weakness analysis",
                "analyzer",
                Critical,
                "Identify issue-spotting gaps in a practice essay",
            ),
            case(
                "ai-generate-mbe",
                "MBE question generation",
                "generator",
                High,
                "Generate a multistate question with four distractors",
            ),
            case(
                "ai-generate-flashcards",
                "Flashcard generation",
                "generator",
                Low,
                "Rule statements condensed into flashcards",
            ),
            case(
                "ai-predict-score",
                "Bar exam score prediction",
                "predictor",
                Critical,
                "Projected scaled score from practice history",
            ),
        ])
}

fn admin_dashboard() -> TestSuite {
    use Priority::*;
    TestSuite::new("admin-dashboard", "Admin Dashboard")
        .with_description("Administrative workflows behind the student product")
        .with_tests(vec![
            case(
                "admin-user-roles",
                "User role assignment",
                "user_management",
                High,
                "Promote a student to tutor and revoke it again",
            ),
            case(
                "admin-user-bulk-import",
                "Bulk user import",
                "user_management",
                Medium,
                "Import a cohort roster",
            ),
            case(
                "admin-analytics-cohort",
                "Cohort analytics",
                "analytics",
                Medium,
                "Pass-rate aggregation by cohort",
            ),
            case(
                "admin-content-publish",
                "Publish study module",
                "content",
                High,
                "Draft, review and publish an outline",
            ),
            case(
                "admin-system-health",
                "System health overview",
                "system",
                Low,
                "Service status probes",
            ),
            case(
                "admin-security-audit",
                "Access audit trail",
                "security",
                Critical,
                "Privileged actions are logged and restricted",
            ),
        ])
}

fn student_journey() -> TestSuite {
    use Priority::*;
    TestSuite::new("student-journey", "Student Journey")
        .with_description("Interactive behavior a student sees while studying")
        .with_tests(vec![
            case(
                "journey-dashboard-transition",
                "Dashboard to lesson transition",
                "transition",
                Medium,
                "Page transition completes without layout shift",
            ),
            case(
                "journey-quiz-transition",
                "Lesson to quiz transition",
                "transition",
                Medium,
                "Quiz loads with the lesson context",
            ),
            case(
                "journey-live-progress",
                "Live progress updates",
                "realtime",
                High,
                "Progress ring updates as answers are submitted",
            ),
            case(
                "journey-notification-bell",
                "Notification bell",
                "notification",
                Low,
                "Unread badge increments on new feedback",
            ),
            case(
                "journey-render-budget",
                "Render performance",
                "performance",
                High,
                "Dashboard renders within budget on a mid-range device",
            ),
        ])
}

fn revolutionary_system() -> TestSuite {
    use Priority::*;
    TestSuite::new("revolutionary-system", "Revolutionary System")
        .with_description("End-to-end run across AI, admin and student surfaces")
        .with_tests(vec![
            case(
                "system-ai-explain",
                "AI explanation end to end",
                "explainer",
                High,
                "Explanation requested from a lesson page",
            ),
            case(
                "system-ai-tutor",
                "AI tutor end to end",
                "tutor",
                High,
                "Tutor session opened from a missed question",
            ),
            case(
                "system-ai-predict",
                "Readiness prediction",
                "predictor",
                Critical,
                "Readiness score after a full practice exam",
            ),
            case(
                "system-realtime-sync",
                "Cross-device sync",
                "realtime",
                Medium,
                "Progress made on one device appears on another",
            ),
            case(
                "system-security-session",
                "Session security",
                "security",
                Critical,
                "Expired sessions cannot reach protected pages",
            ),
            case(
                "system-performance-load",
                "Peak load performance",
                "performance",
                Medium,
                "Response times under exam-week load",
            ),
            case(
                "system-health",
                "Platform health",
                "system",
                Low,
                "All services report healthy",
            ),
        ])
}

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;
