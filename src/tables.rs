//! Static sprite-ID-to-name tables for the Classic episodes
//!
//! These are game data, not codec behavior: the decoders never consult
//! them. Callers (an editor, the CLI) pass whichever table matches the
//! game whose maps they are viewing.

/// Sprite names for the first Classic episode
pub const EPISODE1_SPRITES: &[(u16, &str)] = &[
    (1, "Yorp"),
    (2, "Garg"),
    (3, "Vort"),
    (4, "Can"),
    (5, "Tank"),
    (6, "CannonUpRight"),
    (7, "CannonUp"),
    (8, "CannonDown"),
    (9, "CannonUpLeft"),
    (10, "Thread"),
    (255, "Keen"),
];

/// Sprite names for the second Classic episode
pub const EPISODE2_SPRITES: &[(u16, &str)] = &[
    (1, "Grunt"),
    (2, "Youth"),
    (3, "Elite"),
    (4, "Scrub"),
    (5, "Guard"),
    (6, "Platform"),
    (7, "Spark"),
    (255, "Keen"),
];

/// Sprite names for the third Classic episode
pub const EPISODE3_SPRITES: &[(u16, &str)] = &[
    (1, "Grunt"),
    (2, "Youth"),
    (3, "Woman"),
    (4, "Meep"),
    (5, "Ninja"),
    (6, "Foob"),
    (7, "Ball"),
    (8, "Cube"),
    (9, "Platform"),
    (10, "Elevator"),
    (11, "Grunt"),
    (12, "Spark"),
    (13, "Heart"),
    (14, "WestTurret"),
    (15, "NorthTurret"),
    (16, "Arm"),
    (17, "LeftLeg"),
    (18, "RightLeg"),
    (255, "Keen"),
];

/// Look up a sprite name in a table, by ID.
pub fn sprite_name(table: &[(u16, &'static str)], id: u16) -> Option<&'static str> {
    table.iter().find(|&&(k, _)| k == id).map(|&(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(sprite_name(EPISODE1_SPRITES, 1), Some("Yorp"));
        assert_eq!(sprite_name(EPISODE2_SPRITES, 255), Some("Keen"));
        assert_eq!(sprite_name(EPISODE3_SPRITES, 14), Some("WestTurret"));
        assert_eq!(sprite_name(EPISODE1_SPRITES, 99), None);
    }
}
