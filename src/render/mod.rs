// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Watermark rendering: text rasterization and tiled compositing.

pub mod text;
pub mod watermark;
