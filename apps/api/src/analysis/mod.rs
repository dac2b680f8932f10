// Skill gap analysis: extraction gateway, matching engine, rules data and
// the diagnostic analysis store.
// All LLM calls go through llm_client, never directly to the vendor.

pub mod gateway;
pub mod handlers;
pub mod matcher;
pub mod rules;
pub mod store;
