use std::path::Path;

use star_courier::sprite::{ShipSprite, SpriteError, SPRITE_SIZE};

/// A 16×16 sprite with a single lit pixel at (x, y).
fn one_pixel(x: usize, y: usize) -> String {
    (0..SPRITE_SIZE)
        .map(|row| {
            let mut line: String = (0..SPRITE_SIZE)
                .map(|col| if row == y && col == x { '#' } else { '.' })
                .collect();
            line.push('\n');
            line
        })
        .collect()
}

#[test]
fn parse_round_trips_pixels() {
    let sprite = ShipSprite::parse(&one_pixel(3, 7)).unwrap();
    assert!(sprite.pixel(3, 7));
    assert!(!sprite.pixel(7, 3));
    assert!(!sprite.pixel(0, 0));
    assert!(!sprite.pixel(15, 15));
}

#[test]
fn out_of_range_lookups_are_dark() {
    let sprite = ShipSprite::parse(&one_pixel(15, 15)).unwrap();
    assert!(sprite.pixel(15, 15));
    assert!(!sprite.pixel(16, 15));
    assert!(!sprite.pixel(15, 16));
    assert!(!sprite.pixel(100, 100));
}

#[test]
fn rejects_wrong_row_count() {
    let text = ".".repeat(SPRITE_SIZE) + "\n";
    let err = ShipSprite::parse(&text).unwrap_err();
    assert!(matches!(err, SpriteError::WrongRowCount(1)));
}

#[test]
fn rejects_wrong_row_width() {
    let mut text = one_pixel(0, 0);
    text = text.replacen(&".".repeat(SPRITE_SIZE), "...", 1);
    let err = ShipSprite::parse(&text).unwrap_err();
    assert!(matches!(
        err,
        SpriteError::WrongRowWidth { row: 1, len: 3 }
    ));
}

#[test]
fn rejects_invalid_cell() {
    let text = one_pixel(0, 0).replacen('.', "x", 1);
    let err = ShipSprite::parse(&text).unwrap_err();
    assert!(matches!(
        err,
        SpriteError::BadCell {
            row: 0,
            col: 1,
            ch: 'x'
        }
    ));
}

#[test]
fn load_reports_missing_file() {
    let err = ShipSprite::load(Path::new("no/such/ship.sprite")).unwrap_err();
    assert!(matches!(err, SpriteError::Read(_)));
}

#[test]
fn shipped_asset_parses() {
    // The asset the binary loads at startup must stay valid.
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/ship.sprite");
    let sprite = ShipSprite::load(&path).unwrap();
    // Nose tip is lit, corners of the canopy gap are dark.
    assert!(sprite.pixel(7, 0));
    assert!(!sprite.pixel(0, 0));
}
