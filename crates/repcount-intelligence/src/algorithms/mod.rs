// ABOUTME: Geometric algorithms over detected joint positions
// ABOUTME: Interior joint angle computation and confidence-gated angle readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Interior angle at a vertex joint
pub mod joint_angle;
