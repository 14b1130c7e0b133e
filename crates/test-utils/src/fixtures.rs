//! Fixed values shared by tests so encodes are reproducible.

use chrono::{DateTime, TimeZone, Utc};

/// Timestamp used wherever a test needs a generation time.
pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Tool name recorded by test encodes.
pub const TEST_TOOL_NAME: &str = "bts-writer-tests";

/// Tool version recorded by test encodes.
pub const TEST_TOOL_VERSION: &str = "0.0.1";

/// Common grid scenarios for testing.
pub mod grid {
    /// Grid dimensions and spacing.
    #[derive(Debug, Clone, Copy)]
    pub struct GridScenario {
        pub ny: usize,
        pub nz: usize,
        pub nt: usize,
        pub dy: f64,
        pub dz: f64,
        pub dt: f64,
    }

    /// 2 × 3 grid, 4 steps: dy = 5, dz = 10, dt = 0.1.
    pub const SMALL: GridScenario = GridScenario {
        ny: 2,
        nz: 3,
        nt: 4,
        dy: 5.0,
        dz: 10.0,
        dt: 0.1,
    };

    /// A single point with a short series.
    pub const SINGLE_POINT: GridScenario = GridScenario {
        ny: 1,
        nz: 1,
        nt: 8,
        dy: 0.0,
        dz: 0.0,
        dt: 0.05,
    };

    /// A column of points at one lateral position.
    pub const SINGLE_COLUMN: GridScenario = GridScenario {
        ny: 1,
        nz: 5,
        nt: 6,
        dy: 0.0,
        dz: 20.0,
        dt: 0.25,
    };

    /// A typical rotor-sized grid.
    pub const ROTOR: GridScenario = GridScenario {
        ny: 15,
        nz: 15,
        nt: 256,
        dy: 10.0,
        dz: 10.0,
        dt: 0.05,
    };
}

/// Hub override used by the explicit-hub tests.
pub const EXPLICIT_HUB: (f64, f64) = (8.3, 90.0);
