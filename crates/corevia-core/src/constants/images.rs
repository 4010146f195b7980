// ABOUTME: Image transfer constants for food entry photos and profile photos
// ABOUTME: Both variants share one resize/compress routine parameterized by these values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Longest edge of an uploaded food entry photo
pub const FOOD_MAX_DIMENSION: u32 = 500;

/// JPEG quality factor for food entry photos
pub const FOOD_JPEG_QUALITY: u8 = 70;

/// Longest edge of an uploaded profile photo
pub const PROFILE_MAX_DIMENSION: u32 = 300;

/// JPEG quality factor for profile photos
pub const PROFILE_JPEG_QUALITY: u8 = 80;

/// File name sent with profile photo uploads
pub const PROFILE_FILE_NAME: &str = "profile.jpg";

/// Upload file name for a food entry photo
#[must_use]
pub fn food_file_name(entry_id: &str) -> String {
    format!("food_{entry_id}.jpg")
}
