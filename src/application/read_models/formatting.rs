//! Display formatting shared by every view

use chrono::NaiveDateTime;

const KB: f64 = 1_000.0;
const MB: f64 = 1_000_000.0;
const GB: f64 = 1_000_000_000.0;

/// Bytecode minor version marking classes compiled with preview features
const PREVIEW_MINOR: u32 = 65535;

/// Human readable size in decimal units, e.g. `15.24KB`
pub fn format_bytes(bytes: u64) -> String {
    let value = bytes as f64;
    if value < KB {
        format!("{}B", bytes)
    } else if value < MB {
        format!("{:.2}KB", value / KB)
    } else if value < GB {
        format!("{:.2}MB", value / MB)
    } else {
        format!("{:.2}GB", value / GB)
    }
}

/// Java release that introduced a class file version, e.g. `52.0` -> `Java 8`
///
/// A `*` suffix marks preview features. Missing or unparsable versions render
/// as `N/A`.
pub fn format_bytecode_version(bytecode_version: Option<&str>) -> String {
    let Some(version) = bytecode_version.filter(|v| !v.is_empty()) else {
        return "N/A".to_string();
    };
    let legacy = match version {
        "45.0" => Some("Java 1.0"),
        "45.3" => Some("Java 1.1"),
        "46.0" => Some("Java 1.2"),
        "47.0" => Some("Java 1.3"),
        "48.0" => Some("Java 1.4"),
        _ => None,
    };
    if let Some(label) = legacy {
        return label.to_string();
    }

    let (major, minor) = version.split_once('.').unwrap_or((version, ""));
    match major.parse::<i64>() {
        Ok(major) => {
            let preview = minor.parse::<u32>() == Ok(PREVIEW_MINOR);
            format!("Java {}{}", major - 44, if preview { "*" } else { "" })
        }
        Err(_) => "N/A".to_string(),
    }
}

pub fn format_date(date: Option<&NaiveDateTime>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn format_date_time(date: Option<&NaiveDateTime>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
}
