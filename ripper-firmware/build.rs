//! Build script for ripper-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Known sections and their keys, with the accepted integer range
const SCHEMA: &[(&str, &[(&str, Range)])] = &[
    (
        "timing",
        &[
            ("tick_ms", Range::Int(1, u32::MAX as i64)),
            ("indicator_half_period", Range::Int(1, u32::MAX as i64)),
        ],
    ),
    (
        "enable",
        &[
            ("on_ticks", Range::Int(1, u32::MAX as i64)),
            ("off_ticks", Range::Int(0, u32::MAX as i64)),
        ],
    ),
    (
        "spool",
        &[
            ("speed", Range::Int(0, 255)),
            ("acceleration", Range::Int(0, 255)),
        ],
    ),
    (
        "guide",
        &[
            ("speed", Range::Int(0, 255)),
            ("acceleration", Range::Int(0, 255)),
            ("on_ticks", Range::Int(1, u32::MAX as i64)),
            ("off_ticks", Range::Int(0, u32::MAX as i64)),
        ],
    ),
    (
        "pwm",
        &[("divider", Range::Int(1, 255)), ("phase_correct", Range::Bool)],
    ),
];

/// Accepted value of a key
#[derive(Clone, Copy)]
enum Range {
    Int(i64, i64),
    Bool,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
fn validate_config() {
    // Re-run if machine.toml changes
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a machine.toml configuration file.        ║\n\
            ║  Please create one in the ripper-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = validate_sections(&config);
    errors.extend(validate_motion(&config));

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid machine configuration                            ║\n\
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

    println!("cargo:warning=machine.toml validated successfully");
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

/// Check every section and key against the schema
fn validate_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return errors,
    };

    for (name, section) in root {
        let keys = match SCHEMA.iter().find(|(s, _)| s == name) {
            Some((_, keys)) => keys,
            None => {
                errors.push(format!("Unknown section [{}]", name));
                continue;
            }
        };

        let section = match section {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for (key, value) in section {
            let range = match keys.iter().find(|(k, _)| k == key) {
                Some((_, range)) => *range,
                None => {
                    errors.push(format!("[{}] unknown key '{}'", name, key));
                    continue;
                }
            };

            match (range, value) {
                (Range::Int(min, max), toml::Value::Integer(v)) => {
                    if *v < min || *v > max {
                        errors.push(format!("[{}] {} must be {}-{}", name, key, min, max));
                    }
                }
                (Range::Int(..), _) => {
                    errors.push(format!("[{}] {} must be an integer", name, key));
                }
                (Range::Bool, toml::Value::Boolean(_)) => {}
                (Range::Bool, _) => {
                    errors.push(format!("[{}] {} must be true or false", name, key));
                }
            }
        }
    }

    errors
}

/// Read an integer setting, if present
fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Check that each motor can reach its speed within its run window
///
/// Only checked when all involved keys are given; missing keys fall back
/// to defaults that the firmware checks again at startup.
fn validate_motion(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let windows = [
        ("spool", int(config, "enable", "on_ticks")),
        ("guide", int(config, "guide", "on_ticks")),
    ];

    for (motor, on_ticks) in windows {
        let speed = int(config, motor, "speed");
        let accel = int(config, motor, "acceleration");

        if let (Some(speed), Some(accel)) = (speed, accel) {
            if speed > 0 && accel == 0 {
                errors.push(format!("[{}] acceleration must be nonzero", motor));
                continue;
            }

            if let Some(on_ticks) = on_ticks {
                if speed > 0 && on_ticks > 0 {
                    let ramp_ticks = (speed + accel - 1) / accel;
                    if ramp_ticks > on_ticks {
                        errors.push(format!(
                            "[{}] needs {} ticks to reach speed, runs for {}",
                            motor, ramp_ticks, on_ticks
                        ));
                    }
                }
            }
        }
    }

    errors
}
