//! Contiguous band partition of a one-sided spectrum
//!
//! L bins split into N bands: every band gets ⌊L/N⌋ bins and the first
//! L mod N bands get one more, so band sizes never differ by more than one.

use crate::error::FeatureError;
use std::ops::Range;
use tracing::warn;

/// Split bin indices `0..num_bins` into `num_bands` contiguous ranges
///
/// # Errors
/// `InvalidBandCount` unless `1 <= num_bands <= num_bins`; larger band
/// counts would leave empty bands with undefined RMS.
pub fn band_partition(num_bins: usize, num_bands: usize) -> Result<Vec<Range<usize>>, FeatureError> {
    if num_bands == 0 || num_bands > num_bins {
        warn!(num_bands, num_bins, "Band count outside the spectrum size");
        return Err(FeatureError::InvalidBandCount {
            bands: num_bands,
            bins: num_bins,
        });
    }

    let base = num_bins / num_bands;
    let remainder = num_bins % num_bands;

    let mut bands = Vec::with_capacity(num_bands);
    let mut start = 0;
    for i in 0..num_bands {
        let size = base + usize::from(i < remainder);
        bands.push(start..start + size);
        start += size;
    }

    Ok(bands)
}

/// Index of the band containing `bin`, if any
pub fn band_of_bin(bands: &[Range<usize>], bin: usize) -> Option<usize> {
    bands.iter().position(|band| band.contains(&bin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split() {
        assert_eq!(band_partition(9, 3).unwrap(), vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn test_remainder_is_front_loaded() {
        // 10 = 3*3 + 1
        assert_eq!(band_partition(10, 3).unwrap(), vec![0..4, 4..7, 7..10]);
        // 11 = 4*2 + 3
        assert_eq!(
            band_partition(11, 4).unwrap(),
            vec![0..3, 3..6, 6..9, 9..11]
        );
    }

    #[test]
    fn test_one_band_per_bin() {
        let bands = band_partition(5, 5).unwrap();
        assert!(bands.iter().all(|b| b.len() == 1));
    }

    #[test]
    fn test_invalid_band_counts() {
        assert_eq!(
            band_partition(9, 0),
            Err(FeatureError::InvalidBandCount { bands: 0, bins: 9 })
        );
        assert_eq!(
            band_partition(9, 10),
            Err(FeatureError::InvalidBandCount { bands: 10, bins: 9 })
        );
    }

    #[test]
    fn test_band_of_bin() {
        let bands = band_partition(10, 3).unwrap();
        assert_eq!(band_of_bin(&bands, 0), Some(0));
        assert_eq!(band_of_bin(&bands, 4), Some(1));
        assert_eq!(band_of_bin(&bands, 9), Some(2));
        assert_eq!(band_of_bin(&bands, 10), None);
    }

    proptest! {
        #[test]
        fn partition_covers_every_bin_once(num_bins in 1usize..2000, bands_seed in 0usize..2000) {
            let num_bands = bands_seed % num_bins + 1;
            let bands = band_partition(num_bins, num_bands).unwrap();

            prop_assert_eq!(bands.len(), num_bands);

            // Contiguous, ordered, non-empty, covering 0..num_bins
            let mut next = 0;
            for band in &bands {
                prop_assert_eq!(band.start, next);
                prop_assert!(!band.is_empty());
                next = band.end;
            }
            prop_assert_eq!(next, num_bins);

            // Exactly L mod N bands of ceil(L/N), the rest floor(L/N)
            let floor = num_bins / num_bands;
            let remainder = num_bins % num_bands;
            let ceil = (num_bins + num_bands - 1) / num_bands;
            let large = bands.iter().filter(|b| b.len() == ceil && ceil != floor).count();
            if remainder == 0 {
                prop_assert!(bands.iter().all(|b| b.len() == floor));
            } else {
                prop_assert_eq!(large, remainder);
                prop_assert!(bands[..remainder].iter().all(|b| b.len() == ceil));
                prop_assert!(bands[remainder..].iter().all(|b| b.len() == floor));
            }
        }
    }
}
