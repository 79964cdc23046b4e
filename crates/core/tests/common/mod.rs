//! Shared fixtures for integration tests
#![allow(dead_code)]

use ctor::ctor;
use resgrid_core::{
    CaseConfig, Grid, GridHierarchy, GridKind, Ijk, PorosityModel, ReservoirCase, SubGridRange,
    Vec3d,
};
use tracing_subscriber::EnvFilter;

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Unit-cell box grid at `origin`
pub fn cartesian_main(dimensions: Ijk, origin: Vec3d) -> Grid {
    Grid::cartesian(
        "main",
        GridKind::Main,
        dimensions,
        origin,
        Vec3d::new(1.0, 1.0, 1.0),
    )
    .expect("valid cartesian grid")
}

/// 2x2x2 case whose bottom layer (cells 0..4) is matrix-active
pub fn two_by_two_case() -> ReservoirCase {
    let hierarchy = GridHierarchy::new(cartesian_main(Ijk::new(2, 2, 2), Vec3d::zeros()))
        .expect("main grid");
    let mut case = ReservoirCase::new(CaseConfig::named("2x2x2"), hierarchy);
    case.set_active_flags(
        PorosityModel::Matrix,
        &[true, true, true, true, false, false, false, false],
    )
    .expect("one flag per cell");
    case
}

/// 3x3x1 main grid (100 m cells at UTM-like coordinates) whose centre cell is
/// refined by a 2x2x2 LGR
pub fn hierarchy_with_lgr() -> GridHierarchy {
    let origin = Vec3d::new(456_000.0, 6_780_000.0, 1500.0);
    let main = Grid::cartesian(
        "main",
        GridKind::Main,
        Ijk::new(3, 3, 1),
        origin,
        Vec3d::new(100.0, 100.0, 20.0),
    )
    .expect("main grid");
    let mut hierarchy = GridHierarchy::new(main).expect("main grid");

    let lgr = Grid::cartesian(
        "LGR-C",
        GridKind::Sub(SubGridRange {
            parent_grid: 0,
            min: Ijk::new(1, 1, 0),
            max: Ijk::new(1, 1, 0),
        }),
        Ijk::new(2, 2, 2),
        origin + Vec3d::new(100.0, 100.0, 0.0),
        Vec3d::new(50.0, 50.0, 10.0),
    )
    .expect("lgr");
    hierarchy.add_sub_grid(lgr).expect("lgr fits parent");
    hierarchy
}
