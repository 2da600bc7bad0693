//! Fallback Question Bank: static technology → question lists used when no tailored
//! questions are available.
//!
//! Matching is case-insensitive substring containment of the *key inside the token*:
//! `"Python3"` hits `python`, `"django-rest"` hits `django`. The first key in declaration
//! order wins, so results are reproducible.
//!
//! Known quirk: an unrelated key hidden inside a longer token still matches
//! (`"NoSQL"` → `sql`, `"Dockerfile linting"` → `docker`). This is kept as-is.

/// One bank entry: a lowercase technology key and exactly five questions.
#[derive(Debug, Clone, Copy)]
pub struct BankEntry {
    pub key: &'static str,
    pub questions: [&'static str; 5],
}

/// Bank entries in declaration order. Order matters for first-match-wins lookup.
pub const QUESTION_BANK: &[BankEntry] = &[
    BankEntry {
        key: "python",
        questions: [
            "Explain the difference between a list, tuple, and set. When would you use each?",
            "How do generators differ from list comprehensions and when are they preferable?",
            "What are common pitfalls with mutable default arguments in functions?",
            "How does the GIL impact multithreading in Python and how can you work around it?",
            "Describe how you'd structure a project for packaging and dependency management.",
        ],
    },
    BankEntry {
        key: "django",
        questions: [
            "How do Django ORM querysets evaluate lazily and why does that matter?",
            "What’s the difference between function-based and class-based views, and when would you choose one over the other?",
            "How do you handle N+1 query issues in Django and optimize database access?",
            "Explain Django’s middleware and a scenario where you’d write custom middleware.",
            "How do you manage settings and secrets across environments in Django projects?",
        ],
    },
    BankEntry {
        key: "sql",
        questions: [
            "Explain normalization vs denormalization and when each is appropriate.",
            "How would you detect and resolve a slow query? Mention indexes and query plans.",
            "Difference between INNER JOIN, LEFT JOIN, and CROSS JOIN with examples.",
            "What is a transaction isolation level and why does it matter?",
            "How do window functions work and when would you use them?",
        ],
    },
    BankEntry {
        key: "javascript",
        questions: [
            "Explain event loop and microtask queue in JavaScript.",
            "Compare var, let, and const, and scoping implications.",
            "How does prototypal inheritance work?",
            "What are closures and common use-cases?",
            "Explain debouncing vs throttling and when to use each.",
        ],
    },
    BankEntry {
        key: "react",
        questions: [
            "What problems do hooks solve compared to class components?",
            "Explain reconciliation and keys in lists.",
            "How do you manage state at scale? Compare Context, Redux, and server cache libraries.",
            "What are Suspense and concurrent features used for?",
            "How do you optimize renders and bundle size?",
        ],
    },
    BankEntry {
        key: "docker",
        questions: [
            "Explain the difference between images and containers.",
            "How do you write a multi-stage Dockerfile and why?",
            "What strategies do you use to keep image size small?",
            "How do you handle secrets and environment variables in containers?",
            "Describe common networking modes and when to use them.",
        ],
    },
    BankEntry {
        key: "kubernetes",
        questions: [
            "What are Deployments vs StatefulSets and when would you use each?",
            "Explain Services, Ingress, and how traffic reaches a pod.",
            "How do you configure liveness/readiness probes?",
            "What is a ConfigMap vs Secret and typical patterns to use them?",
            "How do you roll out zero-downtime updates?",
        ],
    },
    BankEntry {
        key: "machine learning",
        questions: [
            "How do you handle class imbalance beyond resampling (e.g., metrics, thresholds)?",
            "What’s the bias-variance tradeoff and how do you diagnose it?",
            "Compare L1 vs L2 regularization and their effects.",
            "How do you validate time-series models properly?",
            "What steps ensure reproducibility in ML experiments?",
        ],
    },
];

/// Questions of the first bank entry whose key occurs inside `tech_token`, or an empty
/// slice when nothing matches.
pub fn lookup(tech_token: &str) -> &'static [&'static str] {
    let token = tech_token.to_lowercase();
    QUESTION_BANK
        .iter()
        .find(|entry| token.contains(entry.key))
        .map(|entry| &entry.questions[..])
        .unwrap_or(&[])
}
