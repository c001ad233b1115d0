// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data structures for loaded images and watermark settings.

pub mod image;
pub mod watermark;
