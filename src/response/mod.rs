// ABOUTME: Response handling for Terra API calls
// ABOUTME: Normalization of raw HTTP responses into typed API results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Raw response decoding and typed record extraction
pub mod normalize;

/// Completed API call results
pub mod api_result;

pub use api_result::ApiResult;
pub use normalize::{normalize, Normalized, RawResponse, ResponseShape};
