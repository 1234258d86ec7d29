//! Profile capture for the dashboard session.
//!
//! Interactive mode asks for each field on stdin with the form's default
//! values and re-prompts on out-of-domain entries; single-shot mode reads
//! a profile JSON file and validates it after parsing. Domain enforcement
//! lives here, not in the feature encoder.

use crate::types::profile::{
    ExerciseLevel, Gender, UserProfile, AGE_RANGE, HEIGHT_RANGE, WATER_CUPS_RANGE, WEIGHT_RANGE,
};
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Load and validate a profile from a JSON file (single-shot mode)
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<UserProfile> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: UserProfile = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid profile JSON in {}", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("Profile {} failed validation", path.display()))?;

    info!(path = %path.display(), "Profile loaded");
    Ok(profile)
}

/// Prompt for one full profile on stdin.
///
/// Returns `None` when stdin closes before the profile is complete.
pub fn prompt_profile() -> Result<Option<UserProfile>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_profile_from(&mut input, &mut output)
}

/// Ask whether to evaluate another profile; EOF counts as no
pub fn confirm_another() -> Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    confirm_another_from(&mut input, &mut output)
}

fn prompt_profile_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<UserProfile>> {
    let Some(weight_kg) = read_number(input, output, "Weight (kg)", &WEIGHT_RANGE, 70.0)? else {
        return Ok(None);
    };
    let Some(height_cm) = read_number(input, output, "Height (cm)", &HEIGHT_RANGE, 170.0)? else {
        return Ok(None);
    };
    let Some(age) = read_number(input, output, "Age", &AGE_RANGE, 25)? else {
        return Ok(None);
    };
    let Some(gender) = read_gender(input, output)? else {
        return Ok(None);
    };
    let Some(exercise_level) = read_exercise_level(input, output)? else {
        return Ok(None);
    };
    let Some(water_cups) = read_number(input, output, "Water cups/day", &WATER_CUPS_RANGE, 6)?
    else {
        return Ok(None);
    };

    Ok(Some(UserProfile {
        weight_kg,
        height_cm,
        age,
        gender,
        exercise_level,
        water_cups,
    }))
}

fn confirm_another_from<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "Evaluate another profile? [y/N]: ")?;
    output.flush()?;

    match read_trimmed_line(input)? {
        Some(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
        None => Ok(false),
    }
}

/// One trimmed line of input; `None` on EOF
fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// Prompt for a number until it parses and falls inside the domain.
/// An empty entry takes the default.
fn read_number<T, R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    range: &RangeInclusive<T>,
    default: T,
) -> Result<Option<T>>
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
    R: BufRead,
    W: Write,
{
    loop {
        write!(
            output,
            "{} [{}-{}, default {}]: ",
            label,
            range.start(),
            range.end(),
            default
        )?;
        output.flush()?;

        let Some(line) = read_trimmed_line(input)? else {
            return Ok(None);
        };

        if line.is_empty() {
            return Ok(Some(default));
        }

        match line.parse::<T>() {
            Ok(value) if range.contains(&value) => return Ok(Some(value)),
            _ => {
                writeln!(
                    output,
                    "Please enter a value between {} and {}.",
                    range.start(),
                    range.end()
                )?;
            }
        }
    }
}

fn read_gender<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Gender>> {
    loop {
        write!(output, "Gender (male/female) [default male]: ")?;
        output.flush()?;

        let Some(line) = read_trimmed_line(input)? else {
            return Ok(None);
        };

        if line.is_empty() {
            return Ok(Some(Gender::Male));
        }

        match Gender::parse(&line) {
            Some(gender) => return Ok(Some(gender)),
            None => writeln!(output, "Please enter 'male' or 'female'.")?,
        }
    }
}

fn read_exercise_level<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<ExerciseLevel>> {
    loop {
        write!(
            output,
            "Exercise level (sedentary/light/moderate/active/very active) [default sedentary]: "
        )?;
        output.flush()?;

        let Some(line) = read_trimmed_line(input)? else {
            return Ok(None);
        };

        if line.is_empty() {
            return Ok(Some(ExerciseLevel::Sedentary));
        }

        match ExerciseLevel::parse(&line) {
            Some(level) => return Ok(Some(level)),
            None => writeln!(
                output,
                "Please pick one of: sedentary, light, moderate, active, very active."
            )?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(lines: &str) -> Result<Option<UserProfile>> {
        let mut input = Cursor::new(lines.to_string());
        let mut output = Vec::new();
        prompt_profile_from(&mut input, &mut output)
    }

    #[test]
    fn test_prompt_full_profile() {
        let profile = prompt("70\n170\n25\nfemale\nmoderate\n6\n").unwrap().unwrap();

        assert_eq!(profile.weight_kg, 70.0);
        assert_eq!(profile.height_cm, 170.0);
        assert_eq!(profile.age, 25);
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.exercise_level, ExerciseLevel::Moderate);
        assert_eq!(profile.water_cups, 6);
    }

    #[test]
    fn test_prompt_empty_entries_take_defaults() {
        let profile = prompt("\n\n\n\n\n\n").unwrap().unwrap();

        assert_eq!(profile.weight_kg, 70.0);
        assert_eq!(profile.height_cm, 170.0);
        assert_eq!(profile.age, 25);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.exercise_level, ExerciseLevel::Sedentary);
        assert_eq!(profile.water_cups, 6);
    }

    #[test]
    fn test_prompt_reasks_out_of_domain_values() {
        let mut input = Cursor::new("300\nabc\n82\n180\n41\nm\nvery active\n8\n".to_string());
        let mut output = Vec::new();

        let profile = prompt_profile_from(&mut input, &mut output)
            .unwrap()
            .unwrap();

        assert_eq!(profile.weight_kg, 82.0);
        assert_eq!(profile.exercise_level, ExerciseLevel::VeryActive);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("between 40 and 150"));
    }

    #[test]
    fn test_prompt_eof_ends_session() {
        assert!(prompt("").unwrap().is_none());
        assert!(prompt("70\n170\n").unwrap().is_none());
    }

    #[test]
    fn test_confirm_another() {
        let mut output = Vec::new();

        let mut input = Cursor::new("y\n".to_string());
        assert!(confirm_another_from(&mut input, &mut output).unwrap());

        let mut input = Cursor::new("n\n".to_string());
        assert!(!confirm_another_from(&mut input, &mut output).unwrap());

        let mut input = Cursor::new("\n".to_string());
        assert!(!confirm_another_from(&mut input, &mut output).unwrap());

        let mut input = Cursor::new(String::new());
        assert!(!confirm_another_from(&mut input, &mut output).unwrap());
    }

    #[test]
    fn test_load_profile_validates_domains() {
        let dir = std::env::temp_dir();

        let valid = dir.join("health_recommender_profile_valid.json");
        fs::write(
            &valid,
            r#"{"weight_kg": 70.0, "height_cm": 170.0, "age": 25,
                "gender": "female", "exercise_level": "moderate", "water_cups": 6}"#,
        )
        .unwrap();
        assert!(load_profile(&valid).is_ok());
        let _ = fs::remove_file(&valid);

        let invalid = dir.join("health_recommender_profile_invalid.json");
        fs::write(
            &invalid,
            r#"{"weight_kg": 20.0, "height_cm": 170.0, "age": 25,
                "gender": "female", "exercise_level": "moderate", "water_cups": 6}"#,
        )
        .unwrap();
        assert!(load_profile(&invalid).is_err());
        let _ = fs::remove_file(&invalid);
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile("does-not-exist.json").expect_err("must fail");
        assert!(err.to_string().contains("does-not-exist.json"));
    }
}
