//! Validation and Formatting Helpers
//!
//! Local checks applied before anything goes over the wire, plus the id
//! and file-name generators shared by the registration flows.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::ApiError;

/// Maximum accepted upload size for plant photos
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6-9]\d{9}$").expect("phone regex is valid"))
}

fn aadhar_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{4}-\d{4}$").expect("aadhar regex is valid"))
}

/// Validate an Indian mobile number (10 digits, starting 6-9)
pub fn is_valid_phone(phone: &str) -> bool {
    phone_re().is_match(phone)
}

/// Validate an Aadhar number in `1234-5678-9012` form
pub fn is_valid_aadhar(aadhar: &str) -> bool {
    aadhar_re().is_match(aadhar)
}

/// Plant register id for a sequence number (`HGM001`)
pub fn plant_id(sequence: u32) -> String {
    format!("HGM{:03}", sequence)
}

/// Family register id for a sequence number (`FAM001`)
pub fn family_id(sequence: u32) -> String {
    format!("FAM{:03}", sequence)
}

/// Anganwadi center id for a sequence number (`AWC001`)
pub fn center_id(sequence: u32) -> String {
    format!("AWC{:03}", sequence)
}

/// Percentage of plants still healthy, rounded; 0 when none were handed out
pub fn survival_rate(total_plants: u32, healthy_plants: u32) -> u32 {
    if total_plants == 0 {
        return 0;
    }
    ((healthy_plants as f64 / total_plants as f64) * 100.0).round() as u32
}

/// Human-readable file size (`1.50 MB`)
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// Check a photo upload before building the multipart request
pub fn validate_image_upload(content_type: &str, size: u64) -> Result<(), ApiError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(ApiError::validation(
            "file",
            "Only JPG, PNG, and WebP format files are allowed",
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ApiError::validation(
            "file",
            "File size must be less than 5MB",
        ));
    }
    Ok(())
}

/// Timestamped download file name (`HGM_families_2024-01-20_14-30-00`)
pub fn download_filename(kind: &str, at: DateTime<Utc>) -> String {
    format!(
        "HGM_{}_{}_{}",
        kind,
        at.format("%Y-%m-%d"),
        at.format("%H-%M-%S")
    )
}
