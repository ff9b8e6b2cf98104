//! Artist credit normalization
//!
//! Chart providers credit songs to strings like "Drake Featuring Rihanna" or
//! "Bad Bunny x Drake". This module reduces such a credit to the primary
//! artist by cutting it at known multi-artist separators.

use log::debug;

/// Separators that end the primary artist in a chart credit, scanned in this order
pub static MAIN_ARTIST_CUT_OFFS: &[&str] = &[" Featuring", " x ", " X ", " Duet With ", " &", ","];

/// Reduce an artist credit to its primary artist using the default separators
///
/// # Examples
/// ```
/// use lyricscorpora::helpers::artistsplitter::primary_artist;
///
/// assert_eq!(primary_artist("Drake Featuring Rihanna"), "Drake");
/// assert_eq!(primary_artist("Bad Bunny x Drake"), "Bad Bunny");
/// assert_eq!(primary_artist("A, B & C"), "A");
/// ```
pub fn primary_artist(credit: &str) -> String {
    primary_artist_with_separators(credit, MAIN_ARTIST_CUT_OFFS)
}

/// Reduce an artist credit to its primary artist using custom separators
///
/// Each separator is tried once, in order, against what is left of the
/// credit after the previous cuts. A separator that occurs truncates the
/// credit at its first occurrence.
///
/// # Arguments
/// * `credit` - The raw artist credit
/// * `separators` - Separators to cut at
///
/// # Returns
/// * `String` - The primary artist name
pub fn primary_artist_with_separators(credit: &str, separators: &[&str]) -> String {
    let mut name = credit;
    for separator in separators {
        if let Some(pos) = name.find(separator) {
            name = &name[..pos];
        }
    }
    let name = name.trim();
    if name != credit {
        debug!("Normalized artist credit '{}' to '{}'", credit, name);
    }
    name.to_string()
}
