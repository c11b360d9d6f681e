//! Domains module containing business logic organized by bounded contexts.
//!
//! Only the tools domain exists: the servers expose no resources or prompts.

pub mod tools;
