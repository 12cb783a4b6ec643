// ABOUTME: Re-exports command modules for terra-cli
// ABOUTME: Provides access to webhook signing and inspection commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod webhook;
