//! Ground snow heightmap

use rand::Rng;

use crate::constants::{DEPOSIT_SPREAD, SMOOTH_CENTER_WEIGHT, SMOOTH_SIDE_WEIGHT};

/// Settled snow depth per pixel column, clamped to `[0, max_height]`.
#[derive(Clone, Debug)]
pub struct AccumulationField {
    heights: Vec<f32>,
    max_height: f32,
}

/// Column a horizontal position falls into. May be out of the field.
#[inline]
pub fn column_of(x: f32) -> isize {
    x.floor() as isize
}

/// Parabolic falloff of a deposit: 1 at the centre, 0 at `DEPOSIT_SPREAD`.
#[inline]
pub fn deposit_weight(distance: usize) -> f32 {
    let t = 1.0 - distance as f32 / DEPOSIT_SPREAD as f32;
    if t <= 0.0 {
        0.0
    } else {
        t * t
    }
}

impl AccumulationField {
    pub fn new(width: usize, max_height: f32) -> Self {
        Self {
            heights: vec![0.0; width],
            max_height,
        }
    }

    /// Field for a surface of fractional pixel width.
    pub fn for_surface(width: f32, max_height: f32) -> Self {
        Self::new(width.max(0.0).ceil() as usize, max_height)
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn height_at(&self, column: isize) -> f32 {
        usize::try_from(column)
            .ok()
            .and_then(|i| self.heights.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn deposit(&mut self, column: isize, rate: f32) {
        let Ok(center) = usize::try_from(column) else {
            return;
        };
        if center >= self.heights.len() {
            return;
        }

        let start = center.saturating_sub(DEPOSIT_SPREAD);
        let end = (center + DEPOSIT_SPREAD).min(self.heights.len() - 1);
        for i in start..=end {
            let weight = deposit_weight(i.abs_diff(center));
            if weight > 0.0 {
                self.heights[i] = (self.heights[i] + rate * weight).min(self.max_height);
            }
        }
    }

    /// Deposits and then smooths with the given probability.
    pub fn accumulate<R: Rng + ?Sized>(
        &mut self,
        column: isize,
        rate: f32,
        smoothing_probability: f32,
        rng: &mut R,
    ) {
        self.deposit(column, rate);
        if rng.gen::<f32>() < smoothing_probability {
            self.smooth();
        }
    }

    /// One 3-tap blur pass over the interior columns.
    pub fn smooth(&mut self) {
        let len = self.heights.len();
        if len < 3 {
            return;
        }

        let mut prev = self.heights[0];
        let mut current = self.heights[1];
        for i in 1..len - 1 {
            let next = self.heights[i + 1];
            self.heights[i] =
                prev * SMOOTH_SIDE_WEIGHT + current * SMOOTH_CENTER_WEIGHT + next * SMOOTH_SIDE_WEIGHT;
            prev = current;
            current = next;
        }
    }

    /// Drops all accumulated snow.
    pub fn resize(&mut self, width: usize) {
        self.heights = vec![0.0; width];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    #[test]
    fn test_height_at_out_of_bounds_is_zero() {
        let mut field = AccumulationField::new(10, 50.0);
        field.deposit(5, 3.0);
        assert_eq!(field.height_at(-1), 0.0);
        assert_eq!(field.height_at(10), 0.0);
        assert_eq!(field.height_at(isize::MAX), 0.0);
        assert!(field.height_at(5) > 0.0);
    }

    #[test]
    fn test_column_of_floors() {
        assert_eq!(column_of(400.9), 400);
        assert_eq!(column_of(0.0), 0);
        assert_eq!(column_of(-0.5), -1);
    }

    #[test]
    fn test_for_surface_rounds_width_up() {
        let field = AccumulationField::for_surface(799.2, 50.0);
        assert_eq!(field.len(), 800);
        assert_eq!(field.max_height(), 50.0);
        assert_eq!(AccumulationField::for_surface(-3.0, 50.0).len(), 0);
    }

    // -------------------------------------------------------------------------
    // Deposit
    // -------------------------------------------------------------------------

    #[test]
    fn test_deposit_weight_profile() {
        assert_eq!(deposit_weight(0), 1.0);
        assert_eq!(deposit_weight(DEPOSIT_SPREAD), 0.0);
        assert_eq!(deposit_weight(DEPOSIT_SPREAD + 5), 0.0);
        for d in 1..=DEPOSIT_SPREAD {
            assert!(
                deposit_weight(d) < deposit_weight(d - 1),
                "weight must fall off with distance at {d}"
            );
        }
    }

    #[test]
    fn test_deposit_spreads_symmetrically() {
        let mut field = AccumulationField::new(100, 50.0);
        field.deposit(50, 1.0);
        assert_eq!(field.height_at(50), 1.0);
        assert_eq!(field.height_at(30), 0.0);
        assert_eq!(field.height_at(70), 0.0);
        assert_eq!(field.height_at(29), 0.0);
        for d in 1..20 {
            assert_eq!(field.height_at(50 - d), field.height_at(50 + d));
            assert!(field.height_at(50 + d) < field.height_at(50 + d - 1));
        }
    }

    #[test]
    fn test_deposit_near_edge_is_truncated() {
        let mut field = AccumulationField::new(10, 50.0);
        field.deposit(0, 2.0);
        assert_eq!(field.height_at(0), 2.0);
        assert!(field.height_at(9) > 0.0);
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn test_deposit_out_of_bounds_is_noop() {
        let mut field = AccumulationField::new(10, 50.0);
        field.deposit(-3, 5.0);
        field.deposit(10, 5.0);
        assert!(field.heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_deposit_clamps_to_max_height() {
        let mut field = AccumulationField::new(60, 5.0);
        for _ in 0..100 {
            field.deposit(30, 0.6);
        }
        assert_eq!(field.height_at(30), 5.0);
        assert!(field.heights().iter().all(|&h| (0.0..=5.0).contains(&h)));
    }

    #[test]
    fn test_heights_stay_in_range_under_random_deposits() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut field = AccumulationField::new(200, 12.0);
        for _ in 0..5_000 {
            let column = rng.gen_range(-30..230);
            field.accumulate(column, 0.6, 0.3, &mut rng);
        }
        assert!(field.heights().iter().all(|&h| (0.0..=12.0).contains(&h)));
    }

    // -------------------------------------------------------------------------
    // Smoothing
    // -------------------------------------------------------------------------

    #[test]
    fn test_smooth_keeps_boundary_columns() {
        let mut field = AccumulationField::new(5, 50.0);
        field.heights = vec![10.0, 0.0, 5.0, 0.0, 10.0];
        field.smooth();
        assert_eq!(field.heights[0], 10.0);
        assert_eq!(field.heights[4], 10.0);
    }

    #[test]
    fn test_smooth_reads_pre_pass_neighbours() {
        let mut field = AccumulationField::new(5, 50.0);
        field.heights = vec![0.0, 10.0, 0.0, 0.0, 0.0];
        field.smooth();
        assert!((field.heights[1] - 6.0).abs() < 1e-6);
        // Uses the old value 10.0 at column 1, not the smoothed 6.0.
        assert!((field.heights[2] - 2.0).abs() < 1e-6);
        assert_eq!(field.heights[3], 0.0);
    }

    #[test]
    fn test_smooth_constant_field_is_fixed_point() {
        let mut field = AccumulationField::new(32, 50.0);
        field.heights = vec![7.5; 32];
        field.smooth();
        assert!(field.heights.iter().all(|&h| (h - 7.5).abs() < 1e-5));
    }

    #[test]
    fn test_smooth_short_field_untouched() {
        let mut field = AccumulationField::new(2, 50.0);
        field.heights = vec![1.0, 9.0];
        field.smooth();
        assert_eq!(field.heights, vec![1.0, 9.0]);
    }

    #[test]
    fn test_accumulate_smoothing_trigger_is_injectable() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut never = AccumulationField::new(100, 50.0);
        let mut always = AccumulationField::new(100, 50.0);
        never.accumulate(50, 1.0, 0.0, &mut rng);
        always.accumulate(50, 1.0, 1.0, &mut rng);
        assert_eq!(never.height_at(50), 1.0);
        assert!(always.height_at(50) < 1.0);
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    #[test]
    fn test_resize_discards_snow() {
        let mut field = AccumulationField::new(800, 50.0);
        field.deposit(400, 3.0);
        field.resize(500);
        assert_eq!(field.len(), 500);
        assert!(field.heights().iter().all(|&h| h == 0.0));
        field.resize(500);
        assert_eq!(field.len(), 500);
    }
}
