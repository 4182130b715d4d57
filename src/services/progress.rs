// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only progress charts over the ledger.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{Repetition, TrackedExercise, Weight};
use crate::services::LedgerService;
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Maximum concurrent bucket reads for one chart.
const MAX_CONCURRENT_READS: usize = 8;

/// One charted entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressPoint {
    pub date: String,
    pub weight: f64,
}

impl From<&Weight> for ProgressPoint {
    fn from(weight: &Weight) -> Self {
        Self {
            date: weight.date.clone(),
            weight: weight.weight,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressSeries {
    pub repetition: Repetition,
    pub points: Vec<ProgressPoint>,
}

/// Every bucket of a tracked exercise with its series.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressChart {
    pub tracked_exercise: TrackedExercise,
    pub series: Vec<ProgressSeries>,
}

#[derive(Clone)]
pub struct ProgressService {
    db: Db,
    ledger: LedgerService,
}

impl ProgressService {
    pub fn new(db: Db, ledger: LedgerService) -> Self {
        Self { db, ledger }
    }

    /// Series for one bucket, in logged order.
    pub async fn series(&self, owner_id: &str, repetition_id: &str) -> Result<ProgressSeries> {
        let repetition = self.ledger.get_repetition(owner_id, repetition_id).await?;
        let weights = self.db.get_weights_for_repetition(&repetition.id).await?;

        Ok(ProgressSeries {
            repetition,
            points: weights.iter().map(ProgressPoint::from).collect(),
        })
    }

    /// Chart for a tracked exercise: buckets ascending by count.
    pub async fn chart(&self, owner_id: &str, tracked_exercise_id: &str) -> Result<ProgressChart> {
        let tracked_exercise = self
            .ledger
            .get_tracked(owner_id, tracked_exercise_id)
            .await?;
        let repetitions = self
            .ledger
            .list_repetitions(owner_id, &tracked_exercise.id)
            .await?;

        let db = &self.db;
        let series: Vec<ProgressSeries> = stream::iter(repetitions)
            .map(|repetition| async move {
                let weights = db.get_weights_for_repetition(&repetition.id).await?;
                Ok::<_, AppError>(ProgressSeries {
                    points: weights.iter().map(ProgressPoint::from).collect(),
                    repetition,
                })
            })
            .buffered(MAX_CONCURRENT_READS)
            .try_collect()
            .await?;

        tracing::debug!(
            owner_id,
            tracked_exercise_id,
            buckets = series.len(),
            "Progress chart assembled"
        );

        Ok(ProgressChart {
            tracked_exercise,
            series,
        })
    }
}
