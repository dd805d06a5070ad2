//! Build script for resq-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Known sections and their keys; `true` marks keys that must be non-zero
const SECTIONS: &[(&str, &[(&str, bool)])] = &[
    (
        "detector",
        &[
            ("tilt_threshold_deg", false),
            ("impact_delta_raw", false),
            ("full_scale_lsb_per_g", true),
        ],
    ),
    ("button", &[("debounce_ms", false), ("click_window_ms", true)]),
    (
        "alert",
        &[
            ("countdown_ms", true),
            ("blink_half_period_ms", true),
            ("tick_ms", true),
        ],
    ),
    (
        "modem",
        &[
            ("baud_rate", true),
            ("prompt_timeout_ms", false),
            ("settle_ms", false),
            ("contact_gap_ms", false),
            ("rx_idle_ms", true),
        ],
    ),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml as its configuration.           ║\n\
            ║  Please create one in the resq-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_sections(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device.toml                                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check every section and key against what the firmware parser accepts
fn validate_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => {
            errors.push("top level must be a table".to_string());
            return errors;
        }
    };

    for (name, section) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(known, _)| known == name) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };

        let section = match section {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for (key, value) in section {
            let Some((_, nonzero)) = keys.iter().find(|(known, _)| known == key) else {
                println!("cargo:warning=[{}] ignoring unknown key '{}'", name, key);
                continue;
            };

            match value {
                toml::Value::Integer(n) if *n < 0 && key != "impact_delta_raw" => {
                    errors.push(format!("[{}] {} must not be negative", name, key));
                }
                toml::Value::Integer(0) if *nonzero => {
                    errors.push(format!("[{}] {} must not be zero", name, key));
                }
                toml::Value::Integer(_) => {}
                _ => errors.push(format!("[{}] {} must be an integer", name, key)),
            }
        }
    }

    errors
}
