// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for rendering

use neuroviz_data::DataError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown layer diagram variant: {0} (expected 'primary' or 'alternate')")]
    UnknownVariant(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Nothing to plot: {0}")]
    EmptyDataset(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type RenderResult<T> = Result<T, RenderError>;
