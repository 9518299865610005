//! Nominal pipe sizes (ASME B36.10M)
//!
//! Outside diameter and standard-weight wall for the sizes commonly used as
//! nozzle necks. UG-45 compares the nozzle neck against 87.5% of the
//! standard wall to allow for the mill under-tolerance.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One row of the pipe size table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSize {
    /// Nominal pipe size (e.g., 2.0 for NPS 2, 0.5 for NPS 1/2)
    pub nps: f64,
    /// Outside diameter (in)
    pub outside_diameter_in: f64,
    /// Standard weight (STD) wall thickness (in)
    pub standard_wall_in: f64,
}

impl PipeSize {
    /// Inside diameter with a standard wall (in)
    pub fn standard_inside_diameter_in(&self) -> f64 {
        self.outside_diameter_in - 2.0 * self.standard_wall_in
    }
}

// (NPS, OD, STD wall)
const PIPE_SIZES: &[(f64, f64, f64)] = &[
    (0.5, 0.840, 0.109),
    (0.75, 1.050, 0.113),
    (1.0, 1.315, 0.133),
    (1.25, 1.660, 0.140),
    (1.5, 1.900, 0.145),
    (2.0, 2.375, 0.154),
    (2.5, 2.875, 0.203),
    (3.0, 3.500, 0.216),
    (4.0, 4.500, 0.237),
    (6.0, 6.625, 0.280),
    (8.0, 8.625, 0.322),
    (10.0, 10.750, 0.365),
    (12.0, 12.750, 0.375),
    (14.0, 14.000, 0.375),
    (16.0, 16.000, 0.375),
    (18.0, 18.000, 0.375),
    (20.0, 20.000, 0.375),
    (24.0, 24.000, 0.375),
];

/// All tabulated pipe sizes, smallest first
pub fn pipe_sizes() -> impl Iterator<Item = PipeSize> {
    PIPE_SIZES.iter().map(|&(nps, od, wall)| PipeSize {
        nps,
        outside_diameter_in: od,
        standard_wall_in: wall,
    })
}

/// Look up a nominal pipe size.
pub fn standard_wall(nps: f64) -> CalcResult<PipeSize> {
    pipe_sizes()
        .find(|p| (p.nps - nps).abs() < 1e-6)
        .ok_or_else(|| {
            CalcError::invalid_input(
                "nozzle.nps",
                nps.to_string(),
                "Not a tabulated nominal pipe size (NPS 1/2 through 24)",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let nps2 = standard_wall(2.0).unwrap();
        assert_eq!(nps2.outside_diameter_in, 2.375);
        assert_eq!(nps2.standard_wall_in, 0.154);
        assert!((nps2.standard_inside_diameter_in() - 2.067).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_size() {
        assert!(standard_wall(5.0).is_err());
        assert!(standard_wall(0.0).is_err());
    }

    #[test]
    fn test_table_ascending() {
        let sizes: Vec<PipeSize> = pipe_sizes().collect();
        for pair in sizes.windows(2) {
            assert!(pair[0].nps < pair[1].nps);
            assert!(pair[0].outside_diameter_in < pair[1].outside_diameter_in);
        }
    }
}
