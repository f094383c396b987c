//! blacksmith-lib: recipe resolution and build environments for Blacksmith
//!
//! This crate provides the pieces a build orchestrator needs before it can run
//! a recipe:
//! - `Platform`: the target a build is produced for
//! - `EnvVars`: environment variable accumulation with merge/append/prepend/replace semantics
//! - `BuildEnvironment`: directory layout, target platform and the accumulated environment
//! - `RecipeSelector` / `ComponentResolver`: version-constrained recipe selection and instantiation

pub mod config;
pub mod consts;
pub mod env;
pub mod environment;
pub mod platform;
pub mod recipe;
pub mod version;

pub use env::{EnvOperation, EnvPolicy, EnvValue, EnvVars, VarKind};
pub use environment::{BuildEnvironment, BuildEnvironmentOptions, Target};
pub use platform::{Platform, PlatformSpec};
pub use recipe::{Component, ComponentData, ComponentResolver, RecipeRegistry, Requirements};
