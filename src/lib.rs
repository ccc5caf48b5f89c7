//! # Bonsai Appraiser Bot
//!
//! A messaging-platform webhook bot that receives bonsai photos, asks the
//! sender for the tree's size, and replies with an appraisal generated by a
//! multimodal completion API, optionally enriched with vision labels.

pub mod bot;
pub mod config;
pub mod errors;
pub mod events;
pub mod generation;
pub mod messaging;
pub mod pending_store;
pub mod signature;
pub mod size;
pub mod vision;
