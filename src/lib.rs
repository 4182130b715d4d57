// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Liftlog: workout planning and lift progress tracking
//!
//! This crate provides the backend API for the exercise catalog, workouts,
//! shareable splits and the tracked-exercise weight ledger.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::{
    ExerciseCatalog, LedgerService, ProfileService, ProgressService, SplitService, WorkoutService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub profiles: ProfileService,
    pub catalog: ExerciseCatalog,
    pub ledger: LedgerService,
    pub workouts: WorkoutService,
    pub splits: SplitService,
    pub progress: ProgressService,
}

impl AppState {
    /// Wire every service to the same database handle.
    pub fn new(config: Config, db: Db) -> Self {
        let catalog = ExerciseCatalog::new(db.clone());
        let ledger = LedgerService::new(db.clone());
        let workouts = WorkoutService::new(db.clone(), catalog.clone());

        Self {
            profiles: ProfileService::new(db.clone(), config.default_profile_picture.clone()),
            splits: SplitService::new(db.clone(), workouts.clone()),
            progress: ProgressService::new(db.clone(), ledger.clone()),
            catalog,
            ledger,
            workouts,
            config,
            db,
        }
    }
}
