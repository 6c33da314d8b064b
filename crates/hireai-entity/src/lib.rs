//! # hireai-entity
//!
//! Domain entity models for HireAI. Database entities derive
//! `sqlx::FromRow`; identity payloads mirror the JSON the external
//! identity provider sends in webhooks and backend API responses.

pub mod identity;
pub mod profile;
pub mod user;
