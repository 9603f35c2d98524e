//! Prompt Perfecter - turns short image ideas into detailed, AI-ready prompts
//!
//! One OpenAI chat completion per submission, decoded into a nine-field
//! structured prompt and held in a per-session single-slot store behind a
//! small axum API.

pub mod models;
pub mod openai;
pub mod routes;
pub mod store;
pub mod template;
