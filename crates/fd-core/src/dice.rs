//! Six-sided dice with arbitrary integer faces.
//!
//! A die is parsed once from a comma-separated configuration such as
//! `"2,2,4,4,9,9"` and never changes afterwards. Faces may repeat and
//! may be negative.

use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Number of faces on every die.
pub const FACE_COUNT: usize = 6;

/// Minimum number of dice a match is configured with.
pub const MIN_DICE: usize = 3;

/// An immutable die with exactly [`FACE_COUNT`] faces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dice {
    faces: [i64; FACE_COUNT],
}

impl Dice {
    /// Build a die from a list of face values.
    pub fn new(faces: &[i64]) -> CoreResult<Self> {
        let faces: [i64; FACE_COUNT] =
            faces.try_into().map_err(|_| CoreError::InvalidFaceCount {
                expected: FACE_COUNT,
                found: faces.len(),
            })?;
        Ok(Self { faces })
    }

    /// The face values in configuration order.
    pub fn faces(&self) -> &[i64; FACE_COUNT] {
        &self.faces
    }

    /// The value on the face at `index` (taken modulo the face count).
    pub fn face(&self, index: usize) -> i64 {
        self.faces[index % FACE_COUNT]
    }
}

impl FromStr for Dice {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let faces = s
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<i64>()
                    .map_err(|_| CoreError::InvalidFace(token.to_string()))
            })
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(&faces)
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(i64::to_string).collect();
        write!(f, "[{}]", faces.join(","))
    }
}

/// Parse every configuration into a die, requiring at least [`MIN_DICE`] of them.
///
/// The count is checked before any configuration is parsed.
pub fn parse_dice_set<S: AsRef<str>>(configs: &[S]) -> CoreResult<Vec<Dice>> {
    if configs.len() < MIN_DICE {
        return Err(CoreError::NotEnoughDice {
            found: configs.len(),
            required: MIN_DICE,
        });
    }
    configs.iter().map(|c| c.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_faces() {
        let dice: Dice = "1,2,3,4,5,6".parse().unwrap();
        assert_eq!(dice.faces(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn rejects_five_faces() {
        let err = "1,2,3,4,5".parse::<Dice>().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidFaceCount {
                expected: 6,
                found: 5
            }
        ));
    }

    #[test]
    fn rejects_seven_faces() {
        assert!("1,2,3,4,5,6,7".parse::<Dice>().is_err());
    }

    #[test]
    fn rejects_non_integer_face() {
        let err = "1,2,three,4,5,6".parse::<Dice>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidFace(ref t) if t == "three"));
    }

    #[test]
    fn accepts_negative_and_duplicate_faces() {
        let dice: Dice = "-1, -1, 0, 7, 7, 7".parse().unwrap();
        assert_eq!(dice.faces(), &[-1, -1, 0, 7, 7, 7]);
    }

    #[test]
    fn face_wraps_index() {
        let dice: Dice = "10,20,30,40,50,60".parse().unwrap();
        assert_eq!(dice.face(0), 10);
        assert_eq!(dice.face(5), 60);
        assert_eq!(dice.face(6), 10);
    }

    #[test]
    fn display() {
        let dice: Dice = "2,2,4,4,9,9".parse().unwrap();
        assert_eq!(dice.to_string(), "[2,2,4,4,9,9]");
    }

    #[test]
    fn dice_set_needs_three() {
        let err = parse_dice_set(&["1,2,3,4,5,6", "1,2,3,4,5,6"]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotEnoughDice {
                found: 2,
                required: 3
            }
        ));
    }

    #[test]
    fn dice_set_propagates_parse_errors() {
        let err = parse_dice_set(&["1,2,3,4,5,6", "1,2,3", "1,2,3,4,5,6"]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFaceCount { found: 3, .. }));
    }

    #[test]
    fn dice_set_parses_all() {
        let set = parse_dice_set(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set[2].faces(), &[7, 5, 3, 7, 5, 3]);
    }
}
