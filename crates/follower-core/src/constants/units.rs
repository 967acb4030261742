// ABOUTME: Unit conversion constants for glucose concentration
// ABOUTME: Provides named constants to eliminate magic numbers in conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// mg/dL per mmol/L of glucose (molar mass 180.182 g/mol)
pub const MG_DL_PER_MMOL_L: f64 = 18.0182;

/// Milliseconds per second
pub const MS_PER_SECOND: u64 = 1000;
