use super::*;

#[test]
fn empty_input_is_mix_of_seed() {
    assert_eq!(lesson_hash("", 0), 0);
    assert_eq!(lesson_hash("", 1), 17);
    assert_eq!(lesson_hash("", 8), 1 + 8 * 17);
}

#[test]
fn single_char_matches_hand_computation() {
    // seed 0: h = 'a' = 97; (97 >> 3) + 97 * 17 = 12 + 1649
    assert_eq!(lesson_hash("a", 0), 1661);
    // seed 1: h = 31 + 97 = 128; 16 + 2176
    assert_eq!(lesson_hash("a", 1), 2192);
}

#[test]
fn long_ids_wrap_like_32_bit_ints() {
    let id = "chemistry_002_with_a_rather_long_identifier";
    let mut h: i64 = 2;
    for unit in id.encode_utf16() {
        h = ((h * 31 + i64::from(unit)) as i32) as i64;
    }
    let h = h as i32;
    let expected = (h >> 3).wrapping_add(h.wrapping_mul(17));
    assert_eq!(lesson_hash(id, 2), expected);
}

#[test]
fn non_bmp_chars_hash_as_surrogate_pairs() {
    // U+1F52C encodes as the pair D83D DD2C.
    let mut h: i32 = 0;
    for unit in [0xD83Du16, 0xDD2C] {
        h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    let expected = (h >> 3).wrapping_add(h.wrapping_mul(17));
    assert_eq!(lesson_hash("\u{1F52C}", 0), expected);
}

#[test]
fn seeds_give_distinct_hashes() {
    let hashes = LessonHashes::new("physics_001");
    assert_ne!(hashes.0[0], hashes.0[1]);
    assert_ne!(hashes.0[1], hashes.0[2]);
    assert_eq!(hashes.0[1], lesson_hash("physics_001", 1));
}

#[test]
fn rows_map_to_bands() {
    let hashes = LessonHashes([10, 20, 30]);
    assert_eq!(hashes.for_row(5, 20), 10);
    assert_eq!(hashes.for_row(6, 20), 20);
    assert_eq!(hashes.for_row(12, 20), 20);
    assert_eq!(hashes.for_row(13, 20), 30);
    assert_eq!(hashes.for_row(19, 20), 30);
}
