use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a number from the list")]
    NotAChoice(String),

    #[error("'{0}' is not a date; use YYYY-MM-DD or DD/MM/YYYY")]
    NotADate(String),
}

/// Parses a 1-based menu choice into a 0-based index.
pub fn parse_choice(s: &str) -> Result<usize, InputError> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => {
            tracing::warn!(input = %s, "invalid menu choice");
            Err(InputError::NotAChoice(s.trim().to_string()))
        }
    }
}

/// Parses a comma- or space-separated list of 1-based choices.
/// Empty input gives an empty list.
pub fn parse_choices(s: &str) -> Result<Vec<usize>, InputError> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(parse_choice)
        .collect()
}

/// Accepts ISO dates and the UK day-first form.
pub fn parse_date(s: &str) -> Result<NaiveDate, InputError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|_| InputError::NotADate(trimmed.to_string()))
}

/// "Tuesday 4 June 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A %-d %B %Y").to_string()
}

/// "Tue 4 Jun"
pub fn short_date(date: NaiveDate) -> String {
    date.format("%a %-d %b").to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn choice_is_one_based() {
        assert_eq!(parse_choice(" 1 "), Ok(0));
        assert_eq!(parse_choice("7"), Ok(6));
    }

    #[test]
    fn zero_and_text_are_not_choices() {
        assert_eq!(parse_choice("0"), Err(InputError::NotAChoice("0".to_string())));
        assert!(parse_choice("two").is_err());
    }

    #[test]
    fn choices_accept_commas_and_spaces() {
        assert_eq!(parse_choices("1, 3 4"), Ok(vec![0, 2, 3]));
        assert_eq!(parse_choices("  "), Ok(Vec::new()));
        assert!(parse_choices("1,x").is_err());
    }

    #[test]
    fn dates_in_both_forms() {
        assert_eq!(parse_date("2024-06-04"), Ok(date(2024, 6, 4)));
        assert_eq!(parse_date("04/06/2024"), Ok(date(2024, 6, 4)));
        assert!(parse_date("June 4th").is_err());
    }

    #[test]
    fn date_formats() {
        assert_eq!(long_date(date(2024, 6, 4)), "Tuesday 4 June 2024");
        assert_eq!(short_date(date(2024, 6, 4)), "Tue 4 Jun");
    }
}
