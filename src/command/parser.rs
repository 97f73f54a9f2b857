//! Line grammar for robot commands.
//!
//! ```text
//! line   := PLACE ws args | MOVE | LEFT | RIGHT | REPORT | other
//! args   := int ws? "," ws? int ws? "," ws? facing
//! facing := NORTH | EAST | SOUTH | WEST
//! ```
//!
//! Matching is case-insensitive and ignores surrounding whitespace.

use super::error::{Axis, MalformedPlace, PlaceSyntaxError};
use super::Command;
use crate::core::Direction;

const PLACE: &str = "PLACE";

/// Trim surrounding whitespace and upper-case the line.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Non-blank lines of a script, in order.
///
/// Accepts both `\n` and `\r\n` line endings.
pub fn command_lines(script: &str) -> impl Iterator<Item = &str> {
    script.lines().filter(|line| !line.trim().is_empty())
}

/// Parse one line into a [`Command`].
///
/// Unrecognized text becomes [`Command::Unknown`]. A line that starts with
/// `PLACE` but does not follow the PLACE grammar is returned as
/// [`MalformedPlace`] listing every problem found.
///
/// # Example
///
/// ```rust
/// use toy_robot::command::{parse, Command};
/// use toy_robot::core::Direction;
///
/// assert_eq!(
///     parse("place 1, 2 ,east"),
///     Ok(Command::Place { x: 1, y: 2, facing: Direction::East })
/// );
/// assert_eq!(parse(" move "), Ok(Command::Move));
/// assert_eq!(parse("jump"), Ok(Command::Unknown { raw: "JUMP".to_string() }));
/// assert!(parse("PLACE 1,2").is_err());
/// ```
pub fn parse(raw: &str) -> Result<Command, MalformedPlace> {
    let line = normalize(raw);

    match line.as_str() {
        "MOVE" => return Ok(Command::Move),
        "LEFT" => return Ok(Command::Left),
        "RIGHT" => return Ok(Command::Right),
        "REPORT" => return Ok(Command::Report),
        _ => {}
    }

    if let Some(rest) = line.strip_prefix(PLACE) {
        return place_arguments(rest).map_err(|reasons| MalformedPlace {
            raw: line.clone(),
            reasons,
        });
    }

    Ok(Command::Unknown { raw: line })
}

fn place_arguments(rest: &str) -> Result<Command, Vec<PlaceSyntaxError>> {
    if rest.trim().is_empty() {
        return Err(vec![PlaceSyntaxError::MissingArguments]);
    }
    if !rest.starts_with(char::is_whitespace) {
        return Err(vec![PlaceSyntaxError::MissingSeparator {
            found: rest.to_string(),
        }]);
    }

    let fields: Vec<&str> = rest.split(',').map(str::trim).collect();
    let [x, y, facing] = fields.as_slice() else {
        return Err(vec![PlaceSyntaxError::WrongArity {
            found: fields.len(),
        }]);
    };

    let x = coordinate(Axis::X, x);
    let y = coordinate(Axis::Y, y);
    let facing = facing
        .parse::<Direction>()
        .map_err(PlaceSyntaxError::from);

    match (x, y, facing) {
        (Ok(x), Ok(y), Ok(facing)) => Ok(Command::Place { x, y, facing }),
        (x, y, facing) => Err([x.err(), y.err(), facing.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

/// An optionally signed run of digits. Values beyond `i64` saturate, which
/// keeps them off the table instead of turning them into syntax errors.
fn coordinate(axis: Axis, token: &str) -> Result<i64, PlaceSyntaxError> {
    let digits = token.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlaceSyntaxError::InvalidCoordinate {
            axis,
            token: token.to_string(),
        });
    }

    Ok(token.parse::<i64>().unwrap_or(if token.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParseDirectionError;

    fn reasons(raw: &str) -> Vec<PlaceSyntaxError> {
        parse(raw).unwrap_err().reasons
    }

    #[test]
    fn keywords_map_to_variants() {
        assert_eq!(parse("MOVE"), Ok(Command::Move));
        assert_eq!(parse("LEFT"), Ok(Command::Left));
        assert_eq!(parse("RIGHT"), Ok(Command::Right));
        assert_eq!(parse("REPORT"), Ok(Command::Report));
    }

    #[test]
    fn keywords_are_case_insensitive_and_trimmed() {
        assert_eq!(parse("  move\t"), Ok(Command::Move));
        assert_eq!(parse("Report"), Ok(Command::Report));
    }

    #[test]
    fn place_accepts_flexible_comma_spacing() {
        let expected = Ok(Command::Place {
            x: 1,
            y: 2,
            facing: Direction::East,
        });
        assert_eq!(parse("PLACE 1,2,EAST"), expected);
        assert_eq!(parse("PLACE 1, 2 ,EAST"), expected);
        assert_eq!(parse("place   1 ,2,  east"), expected);
    }

    #[test]
    fn place_accepts_signed_coordinates() {
        assert_eq!(
            parse("PLACE -1,7,NORTH"),
            Ok(Command::Place {
                x: -1,
                y: 7,
                facing: Direction::North
            })
        );
    }

    #[test]
    fn oversized_coordinates_stay_numeric() {
        assert_eq!(
            parse("PLACE 99999999999,0,NORTH"),
            Ok(Command::Place {
                x: 99_999_999_999,
                y: 0,
                facing: Direction::North
            })
        );
        assert_eq!(
            parse("PLACE 1,-99999999999999999999999,EAST"),
            Ok(Command::Place {
                x: 1,
                y: i64::MIN,
                facing: Direction::East
            })
        );
    }

    #[test]
    fn sign_without_digits_is_not_a_coordinate() {
        assert_eq!(
            reasons("PLACE -,1,NORTH"),
            vec![PlaceSyntaxError::InvalidCoordinate {
                axis: Axis::X,
                token: "-".to_string()
            }]
        );
        assert_eq!(
            reasons("PLACE 1,2.5,NORTH"),
            vec![PlaceSyntaxError::InvalidCoordinate {
                axis: Axis::Y,
                token: "2.5".to_string()
            }]
        );
    }

    #[test]
    fn bare_place_is_missing_arguments() {
        assert_eq!(reasons("PLACE"), vec![PlaceSyntaxError::MissingArguments]);
        assert_eq!(reasons("place   "), vec![PlaceSyntaxError::MissingArguments]);
    }

    #[test]
    fn place_needs_whitespace_after_keyword() {
        assert_eq!(
            reasons("PLACE1,2,NORTH"),
            vec![PlaceSyntaxError::MissingSeparator {
                found: "1,2,NORTH".to_string()
            }]
        );
    }

    #[test]
    fn place_with_wrong_field_count_is_malformed() {
        assert_eq!(
            reasons("PLACE 1,2"),
            vec![PlaceSyntaxError::WrongArity { found: 2 }]
        );
        assert_eq!(
            reasons("PLACE 1,2,NORTH,EXTRA"),
            vec![PlaceSyntaxError::WrongArity { found: 4 }]
        );
    }

    #[test]
    fn place_collects_every_bad_argument() {
        assert_eq!(
            reasons("PLACE a, b, UP"),
            vec![
                PlaceSyntaxError::InvalidCoordinate {
                    axis: Axis::X,
                    token: "A".to_string()
                },
                PlaceSyntaxError::InvalidCoordinate {
                    axis: Axis::Y,
                    token: "B".to_string()
                },
                PlaceSyntaxError::InvalidDirection(ParseDirectionError {
                    token: "UP".to_string()
                }),
            ]
        );
    }

    #[test]
    fn malformed_place_keeps_normalized_line() {
        let err = parse("  place 1,x,north ").unwrap_err();
        assert_eq!(err.raw, "PLACE 1,X,NORTH");
        assert_eq!(
            err.to_string(),
            "malformed PLACE command 'PLACE 1,X,NORTH': y coordinate 'X' is not an integer"
        );
    }

    #[test]
    fn other_text_is_unknown_upper_cased() {
        assert_eq!(
            parse(" jump high "),
            Ok(Command::Unknown {
                raw: "JUMP HIGH".to_string()
            })
        );
        assert_eq!(
            parse("MOVE 2"),
            Ok(Command::Unknown {
                raw: "MOVE 2".to_string()
            })
        );
    }

    #[test]
    fn command_lines_skips_blank_lines() {
        let script = "PLACE 0,0,NORTH\r\n\n   \nMOVE\n\tREPORT\n";
        let lines: Vec<&str> = command_lines(script).collect();
        assert_eq!(lines, vec!["PLACE 0,0,NORTH", "MOVE", "\tREPORT"]);
    }

    #[test]
    fn display_renders_canonical_text() {
        let place = parse("place 3 , 4 , south").unwrap();
        assert_eq!(place.to_string(), "PLACE 3,4,SOUTH");
        assert_eq!(Command::Left.to_string(), "LEFT");
    }
}
