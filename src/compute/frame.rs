//! Per-frame marker position and color state.

use super::ColorArray;
use crate::schema::Rgba;

/// Height of the marker for a frame: a triangular wave over `[0, depth - 1]`.
///
/// For a depth of 5 the frames 0..=8 map to 0,1,2,3,4,3,2,1,0.
#[inline]
pub fn z_position(frame_index: usize, depth: usize) -> usize {
    let peak = depth.saturating_sub(1);
    if frame_index <= peak {
        frame_index
    } else {
        (2 * peak).saturating_sub(frame_index)
    }
}

/// Fresh copy of `base` with the marker cell recolored.
pub fn frame_colors(
    base: &ColorArray,
    column: (usize, usize),
    z: usize,
    highlight: Rgba,
) -> ColorArray {
    let mut colors = base.clone();
    colors.set(column.0, column.1, z, highlight);
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_z_sequence() {
        let zs: Vec<usize> = (0..9).map(|f| z_position(f, 5)).collect();
        assert_eq!(zs, vec![0, 1, 2, 3, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_z_sequence_shape() {
        let zs: Vec<usize> = (0..9).map(|f| z_position(f, 5)).collect();

        assert_eq!(zs[0], 0);
        assert_eq!(zs[8], 0);
        assert_eq!(zs.iter().filter(|&&z| z == 4).count(), 1);
        assert_eq!(zs.iter().max(), Some(&4));

        let reversed: Vec<usize> = zs.iter().rev().copied().collect();
        assert_eq!(zs, reversed);
    }

    #[test]
    fn test_single_layer_grid() {
        assert_eq!(z_position(0, 1), 0);
    }

    #[test]
    fn test_frame_colors_leaves_base_untouched() {
        let base_color = Rgba::new(0.5, 0.5, 1.0, 0.6);
        let red = Rgba::new(1.0, 0.0, 0.0, 0.8);
        let base = ColorArray::uniform(5, 5, 5, base_color);

        let colors = frame_colors(&base, (1, 3), 2, red);

        assert_eq!(colors.get(1, 3, 2), red);
        assert_eq!(base.get(1, 3, 2), base_color);
    }

    proptest! {
        #[test]
        fn prop_exactly_one_cell_differs(frame in 0usize..9) {
            let base = ColorArray::uniform(5, 5, 5, Rgba::new(0.5, 0.5, 1.0, 0.6));
            let z = z_position(frame, 5);
            let colors = frame_colors(&base, (1, 3), z, Rgba::new(1.0, 0.0, 0.0, 0.8));

            prop_assert_eq!(base.differing_cells(&colors), vec![(1, 3, z)]);
        }

        #[test]
        fn prop_mirror_frames_match(frame in 0usize..9) {
            prop_assert_eq!(z_position(frame, 5), z_position(8 - frame, 5));
        }

        #[test]
        fn prop_z_stays_in_grid(depth in 1usize..16, frame in 0usize..31) {
            prop_assume!(frame < 2 * depth - 1);
            prop_assert!(z_position(frame, depth) < depth);
        }
    }
}
