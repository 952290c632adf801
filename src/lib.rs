//! HearSay - lesson runner core for audio language learning
//!
//! This crate provides the client-side engine behind short listening and
//! speaking lessons: a runner that sequences heterogeneous steps, per-step
//! phase machines with strict audio/recording lifecycles, and a terminal
//! player for working through lesson fixtures.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Lesson/step/response schema, score, value objects
//! - **Application**: The lesson runner, step views, the audio resource
//!   manager, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (rodio, cpal, fixtures,
//!   config store)
//! - **CLI**: Command-line interface and the interactive lesson player

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
