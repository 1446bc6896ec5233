//! Deterministic offline strategy for development and tests.
//!
//! Answers are picked from a small keyword table, so the API can be
//! exercised end to end without credentials or network access.

use std::time::Duration;

use iscoolgpt_core::llm::provider::LlmProvider;
use iscoolgpt_types::llm::{GenerationResult, LlmError, Query};

/// Model identifier reported by every mock answer.
pub const MOCK_MODEL: &str = "mock-iscoolgpt-v1.0";

/// Simulated round-trip latency.
const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Heuristic: one word is about 1.3 tokens.
const TOKENS_PER_WORD: f64 = 1.3;

/// Heuristic: one token is about 0.75 words.
const WORDS_PER_TOKEN: f64 = 0.75;

const ELLIPSIS: &str = "...";

struct Topic {
    keywords: &'static [&'static str],
    answer: &'static str,
}

// Order matters: the first topic with a matching keyword wins.
const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["python"],
        answer: "Python is a high-level, interpreted, general-purpose programming language. \
            It is known for its clear and readable syntax, which makes it ideal for beginners. \
            Python supports multiple programming paradigms, including object-oriented, \
            functional and procedural programming.",
    },
    Topic {
        keywords: &["docker"],
        answer: "Docker is a containerization platform that packages applications and their \
            dependencies into isolated containers. This ensures the application behaves \
            consistently across environments, from development to production.",
    },
    Topic {
        keywords: &["api", "rest"],
        answer: "A REST API (Representational State Transfer) is an architectural style for \
            building web services. It uses HTTP methods (GET, POST, PUT, DELETE) for operations \
            and usually returns data as JSON. It is stateless, meaning every request carries \
            all the information needed to process it.",
    },
    Topic {
        keywords: &["fastapi"],
        answer: "FastAPI is a modern, fast web framework for Python based on type hints. It \
            offers high performance, automatic documentation (Swagger/OpenAPI), data validation \
            and native async/await support. It is a great fit for modern REST APIs.",
    },
    Topic {
        keywords: &["aws", "cloud"],
        answer: "AWS (Amazon Web Services) is a cloud computing platform offering more than 200 \
            services, including compute, storage, databases and machine learning. It enables \
            scalability, flexibility and lower costs for companies of every size.",
    },
    Topic {
        keywords: &["programação", "código", "programming", "code"],
        answer: "Programming is the process of writing instructions a computer can execute. It \
            involves solving problems, thinking logically and using programming languages to \
            build software. It is an essential skill in the digital age and anyone can learn it \
            with dedication and practice.",
    },
];

/// Deterministic mock provider.
#[derive(Debug, Clone)]
pub struct MockProvider {
    latency: Duration,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }

    /// Override the simulated latency (tests use `Duration::ZERO`).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, query: &Query) -> Result<GenerationResult, LlmError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let answer = compose_answer(query);
        let tokens_used = estimate_tokens(&answer);

        Ok(GenerationResult {
            answer,
            tokens_used: Some(tokens_used),
            model: Some(MOCK_MODEL.to_string()),
        })
    }
}

/// Build the full mock answer: topic lookup, context annotation, then truncation.
pub fn compose_answer(query: &Query) -> String {
    let mut answer = select_answer(&query.question);

    if let Some(context) = query.context() {
        answer = format!("[Context: {context}]\n\n{answer}");
    }

    match query.max_output_tokens() {
        Some(limit) => truncate_to_budget(answer, limit),
        None => answer,
    }
}

/// Pick the answer of the first topic whose keyword occurs in the question.
fn select_answer(question: &str) -> String {
    let lowered = question.to_lowercase();
    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| lowered.contains(k)))
        .map(|topic| topic.answer.to_string())
        .unwrap_or_else(|| fallback_answer(question))
}

fn fallback_answer(question: &str) -> String {
    format!(
        "This is a demo answer from IsCoolGPT. You asked: '{question}'. In production, this \
         answer would be generated by an advanced language model. To get real answers, \
         configure an OpenAI or Hugging Face API key in the .env file. This mock answer shows \
         that the API is working correctly!"
    )
}

/// Cut the answer to `floor(limit * 0.75)` words when its estimate exceeds `limit`.
fn truncate_to_budget(answer: String, limit: u32) -> String {
    let words: Vec<&str> = answer.split_whitespace().collect();
    if (words.len() as f64) * TOKENS_PER_WORD <= f64::from(limit) {
        return answer;
    }

    let keep = (f64::from(limit) * WORDS_PER_TOKEN).floor() as usize;
    let mut truncated = words[..keep.min(words.len())].join(" ");
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Estimated token count: `floor(word_count * 1.3)`.
pub fn estimate_tokens(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    (words as f64 * TOKENS_PER_WORD).floor() as u32
}
