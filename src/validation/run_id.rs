//! Run identifier validation and repair.
//!
//! A run identifier names one sequencing run instance as
//! `{date}_{flowcell_side}_{run_number}_{flowcell_id}`: a 6-digit date, a
//! 6-character flowcell side, a 4-digit run number, and a 10-character
//! flowcell id. Exported sheets sometimes carry a 3-digit run number with
//! the leading zero stripped; that shape is repaired rather than rejected.

/// Validate a run identifier, repairing a stripped leading zero in the run
/// number. Returns `None` on any structural violation; the caller keeps the
/// original identifier and records an advisory error.
pub fn validate(run_id: &str) -> Option<String> {
    let parts: Vec<&str> = run_id.split('_').collect();
    if parts.len() != 4 {
        return None;
    }

    let (date, side, number, flowcell) = (parts[0], parts[1], parts[2], parts[3]);
    if !(date.len() == 6 && is_digits(date)) || side.len() != 6 || flowcell.len() != 10 {
        return None;
    }

    let number = if number.len() == 3 && is_digits(number) && !number.starts_with('0') {
        format!("0{number}")
    } else if number.len() == 4 && is_digits(number) {
        number.to_string()
    } else {
        return None;
    };

    Some(format!("{date}_{side}_{number}_{flowcell}"))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
