//! Parser for the machine configuration file
//!
//! This is a minimal, allocation-free parser for the TOML subset used by
//! `machine.toml`. It does NOT support the full TOML format.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs with integer and boolean values
//! - Decimal and `0x` hexadecimal integers, with `_` separators
//! - Comments (`# ...`), on their own line or after a value
//!
//! Keys missing from the file keep their value from
//! [`RipperConfig::DEFAULT`]. Unknown sections and keys are errors, so a
//! typo never silently leaves a default in place.
//!
//! ```toml
//! [timing]
//! tick_ms = 100
//! indicator_half_period = 20
//!
//! [guide]
//! speed = 0x80
//! acceleration = 0x80
//! on_ticks = 10
//! off_ticks = 30
//! ```

use heapless::String as HString;

use super::types::{DutyConfig, MotorConfig, RipperConfig};

/// Parse error, with the 1-based line number it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection(u32),
    /// Line is not `key = value`, or the value has the wrong type
    InvalidValue(u32),
    /// Key is not valid in the current section
    UnknownKey(u32),
    /// Integer does not fit the setting
    OutOfRange(u32),
}

impl ParseError {
    /// Line the error occurred on
    pub fn line(&self) -> u32 {
        match *self {
            ParseError::InvalidSection(line)
            | ParseError::InvalidValue(line)
            | ParseError::UnknownKey(line)
            | ParseError::OutOfRange(line) => line,
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Enable,
    Spool,
    Guide,
    Pwm,
}

/// Value-level failure, turned into a [`ParseError`] once the line is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    InvalidValue,
    UnknownKey,
    OutOfRange,
}

impl Fault {
    fn at(self, line: u32) -> ParseError {
        match self {
            Fault::InvalidValue => ParseError::InvalidValue(line),
            Fault::UnknownKey => ParseError::UnknownKey(line),
            Fault::OutOfRange => ParseError::OutOfRange(line),
        }
    }
}

/// Parse a configuration file on top of [`RipperConfig::DEFAULT`]
///
/// The result is not validated; call [`RipperConfig::validate`] on it.
pub fn parse_config(input: &str) -> Result<RipperConfig, ParseError> {
    let mut config = RipperConfig::DEFAULT;
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index as u32 + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = parse_section_header(header).ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue(line_no))?;
        apply_value(&mut config, section, key, value).map_err(|fault| fault.at(line_no))?;
    }

    Ok(config)
}

/// Remove a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse a section name like "guide"
fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "timing" => Some(Section::Timing),
        "enable" => Some(Section::Enable),
        "spool" => Some(Section::Spool),
        "guide" => Some(Section::Guide),
        "pwm" => Some(Section::Pwm),
        _ => None,
    }
}

/// Split a "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an unsigned integer, decimal or `0x` hexadecimal
fn parse_int(value: &str) -> Result<u32, Fault> {
    // Longest accepted literal: "0x" + 8 hex digits with separators
    let mut digits: HString<24> = HString::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| Fault::OutOfRange)?;
    }

    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => digits.parse::<u32>(),
    };

    parsed.map_err(|e| match e.kind() {
        core::num::IntErrorKind::PosOverflow => Fault::OutOfRange,
        _ => Fault::InvalidValue,
    })
}

/// Parse an integer that must fit in a byte (speeds, accelerations)
fn parse_byte(value: &str) -> Result<u8, Fault> {
    u8::try_from(parse_int(value)?).map_err(|_| Fault::OutOfRange)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, Fault> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Fault::InvalidValue),
    }
}

/// Apply a duty cycle key
fn apply_duty(duty: &mut DutyConfig, key: &str, value: &str) -> Result<(), Fault> {
    match key {
        "on_ticks" => duty.on_ticks = parse_int(value)?,
        "off_ticks" => duty.off_ticks = parse_int(value)?,
        _ => return Err(Fault::UnknownKey),
    }
    Ok(())
}

/// Apply a motor key
fn apply_motor(motor: &mut MotorConfig, key: &str, value: &str) -> Result<(), Fault> {
    match key {
        "speed" => motor.speed = parse_byte(value)?,
        "acceleration" => motor.acceleration = parse_byte(value)?,
        _ => return Err(Fault::UnknownKey),
    }
    Ok(())
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    config: &mut RipperConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), Fault> {
    match section {
        Section::Timing => match key {
            "tick_ms" => config.timing.tick_ms = parse_int(value)?,
            "indicator_half_period" => config.timing.indicator_half_period = parse_int(value)?,
            _ => return Err(Fault::UnknownKey),
        },
        Section::Enable => apply_duty(&mut config.enable, key, value)?,
        Section::Spool => apply_motor(&mut config.spool, key, value)?,
        // The guide section holds both its speed and its pulse cycle
        Section::Guide => match key {
            "on_ticks" | "off_ticks" => apply_duty(&mut config.guide_pulse, key, value)?,
            _ => apply_motor(&mut config.guide, key, value)?,
        },
        Section::Pwm => match key {
            "divider" => config.pwm.divider = parse_byte(value)?,
            "phase_correct" => config.pwm.phase_correct = parse_bool(value)?,
            _ => return Err(Fault::UnknownKey),
        },
        Section::Root => return Err(Fault::UnknownKey),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("100"), Ok(100));
        assert_eq!(parse_int("0x40"), Ok(0x40));
        assert_eq!(parse_int("0XfF"), Ok(0xff));
        assert_eq!(parse_int("7_200"), Ok(7200));
        assert_eq!(parse_int("-1"), Err(Fault::InvalidValue));
        assert_eq!(parse_int("ten"), Err(Fault::InvalidValue));
        assert_eq!(parse_int("4294967296"), Err(Fault::OutOfRange));
    }

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("255"), Ok(255));
        assert_eq!(parse_byte("256"), Err(Fault::OutOfRange));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("speed = 0x40"), Some(("speed", "0x40")));
        assert_eq!(parse_key_value("speed="), None);
        assert_eq!(parse_key_value("speed"), None);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config(""), Ok(RipperConfig::DEFAULT));
    }

    #[test]
    fn test_parse_sections() {
        let input = r#"
# Fast test rig
[timing]
tick_ms = 50
indicator_half_period = 5   # blink faster

[enable]
on_ticks = 100
off_ticks = 0

[spool]
speed = 0xff
acceleration = 0x10

[guide]
speed = 200
acceleration = 100
on_ticks = 4
off_ticks = 8

[pwm]
divider = 64
phase_correct = false
"#;

        let config = parse_config(input).unwrap();
        assert_eq!(config.timing.tick_ms, 50);
        assert_eq!(config.timing.indicator_half_period, 5);
        assert_eq!(config.enable.on_ticks, 100);
        assert_eq!(config.enable.off_ticks, 0);
        assert_eq!(config.spool.speed, 0xff);
        assert_eq!(config.spool.acceleration, 0x10);
        assert_eq!(config.guide.speed, 200);
        assert_eq!(config.guide.acceleration, 100);
        assert_eq!(config.guide_pulse.on_ticks, 4);
        assert_eq!(config.guide_pulse.off_ticks, 8);
        assert_eq!(config.pwm.divider, 64);
        assert!(!config.pwm.phase_correct);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config("[spool]\nspeed = 0x30\n").unwrap();
        assert_eq!(config.spool.speed, 0x30);
        assert_eq!(config.spool.acceleration, RipperConfig::DEFAULT.spool.acceleration);
        assert_eq!(config.guide, RipperConfig::DEFAULT.guide);
    }

    #[test]
    fn test_errors_carry_line() {
        assert_eq!(
            parse_config("[timing]\n\n[heater]\n"),
            Err(ParseError::InvalidSection(3))
        );
        assert_eq!(
            parse_config("[spool]\nspeed = 300\n"),
            Err(ParseError::OutOfRange(2))
        );
        assert_eq!(
            parse_config("[guide]\nsped = 1\n"),
            Err(ParseError::UnknownKey(2))
        );
        assert_eq!(
            parse_config("tick_ms = 100\n"),
            Err(ParseError::UnknownKey(1))
        );
        assert_eq!(
            parse_config("[pwm]\nphase_correct = yes\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[pwm]\ndivider\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(ParseError::UnknownKey(7).line(), 7);
    }

    #[test]
    fn test_shipped_machine_file() {
        let input = include_str!("../../../ripper-firmware/machine.toml");
        let config = parse_config(input).unwrap();
        assert_eq!(config, RipperConfig::DEFAULT);
        assert_eq!(config.validate(), Ok(()));
    }
}
