//! End-to-end scenarios on small hand-checkable cases

mod common;

use approx::assert_relative_eq;
use resgrid_core::{
    BoundingBox, CaseConfig, FaceType, Ijk, PorosityModel, ReservoirCase, StorageLayout, Vec3d,
    WellResultCell, WellResultFrame, WellResults, UNDEFINED_INDEX,
};

#[test]
fn test_bottom_layer_active_in_matrix_only() {
    let mut case = common::two_by_two_case();

    let matrix = case.active_cell_info(PorosityModel::Matrix);
    assert_eq!(matrix.active_cell_count(), 4);
    for cell in 0..4 {
        assert_eq!(matrix.cell_result_index(cell), Some(cell));
    }
    for cell in 4..8 {
        assert_eq!(matrix.cell_result_index(cell), None);
    }
    assert_eq!(
        case.active_cell_info(PorosityModel::Fracture).active_cell_count(),
        0
    );

    let fracture = case.active_cell_bounds(PorosityModel::Fracture);
    assert_eq!(*fracture.geometry_bounding_box(), BoundingBox::origin());

    let matrix = case.active_cell_bounds(PorosityModel::Matrix).clone();
    assert_eq!(matrix.cell_range().min(), Ijk::new(0, 0, 0));
    assert_eq!(matrix.cell_range().max(), Ijk::new(1, 1, 0));
    assert_relative_eq!(matrix.geometry_bounding_box().max(), Vec3d::new(2.0, 2.0, 1.0));
    assert_eq!(case.display_offset(), Vec3d::zeros());
}

#[test]
fn test_well_through_i_neighbors() {
    let mut case = common::two_by_two_case();
    // Upper layer: cell 4 is (0,0,1), cell 5 its +I neighbor, cell 7 diagonal to both
    let head = WellResultCell::new(0, 4);
    let next = WellResultCell::new(0, 5);
    let diagonal = WellResultCell::new(0, 7);
    assert_eq!(
        case.grid(0).unwrap().ijk_from_cell_index(5).unwrap(),
        Ijk::new(1, 0, 1)
    );

    case.set_well_results(vec![WellResults::new(
        "P1",
        vec![WellResultFrame::new(0, head).with_branch(vec![head, next])],
    )]);

    let membership = case.well_cells_in_grid(0).unwrap().to_vec();
    assert_eq!(
        membership,
        vec![false, false, false, false, true, true, false, false]
    );
    assert!(case.cell_for_well_result_cell(&next).unwrap().is_well_cell());
    assert!(!case.cell_for_well_result_cell(&diagonal).unwrap().is_well_cell());

    assert_eq!(case.find_shared_face(&head, &next).unwrap(), Some(FaceType::PosI));
    assert_eq!(case.find_shared_face(&next, &head).unwrap(), Some(FaceType::NegI));
    assert_eq!(case.find_shared_face(&head, &diagonal).unwrap(), None);
}

#[test]
fn test_dense_and_compacted_reads_at_inactive_cell() {
    let mut case = common::two_by_two_case();
    let results = case.results_mut(PorosityModel::Matrix);
    let poro = results.find_or_add_result("PORO", StorageLayout::Dense);
    let soil = results.find_or_add_result("SOIL", StorageLayout::Compacted);

    let dense: Vec<f64> = (0..8).map(|cell| 0.1 * f64::from(cell)).collect();
    case.set_scalar_values(PorosityModel::Matrix, poro, 0, dense).unwrap();
    case.set_scalar_values(PorosityModel::Matrix, soil, 0, vec![0.9, 0.8, 0.7, 0.6])
        .unwrap();

    let inactive = 6;
    let poro_access = case
        .data_accessor(0, PorosityModel::Matrix, 0, poro)
        .unwrap()
        .unwrap();
    assert_relative_eq!(poro_access.cell_scalar(inactive).unwrap(), 0.6);

    let soil_access = case
        .data_accessor(0, PorosityModel::Matrix, 0, soil)
        .unwrap()
        .unwrap();
    assert_eq!(soil_access.cell_scalar(inactive), None);
    assert_eq!(soil_access.cell_scalar(2), Some(0.7));

    assert!(case
        .data_accessor(0, PorosityModel::Matrix, UNDEFINED_INDEX, soil)
        .unwrap()
        .is_none());
    assert!(case
        .data_accessor(0, PorosityModel::Fracture, 0, poro)
        .unwrap()
        .is_none());
}

#[test]
fn test_display_offset_follows_active_geometry() {
    let hierarchy = common::hierarchy_with_lgr();
    let cells = hierarchy.total_cell_count();
    let mut case = ReservoirCase::new(CaseConfig::named("utm"), hierarchy);

    // Only the refined centre column and its LGR are active
    let mut flags = vec![false; cells];
    flags[4] = true;
    for flag in &mut flags[9..] {
        *flag = true;
    }
    case.set_active_flags(PorosityModel::Matrix, &flags).unwrap();
    case.compute_cached_data();

    let expected_min = Vec3d::new(456_100.0, 6_780_100.0, 1500.0);
    assert_relative_eq!(case.display_offset(), expected_min);

    let bounds = case.active_cell_bounds(PorosityModel::Matrix);
    assert_relative_eq!(
        bounds.geometry_bounding_box().max(),
        Vec3d::new(456_200.0, 6_780_200.0, 1520.0)
    );
    assert_eq!(bounds.grid_range(0).unwrap().min(), Ijk::new(1, 1, 0));
    assert_eq!(bounds.grid_range(1).unwrap().max(), Ijk::new(1, 1, 1));
    assert_eq!(bounds.cell_range().max(), Ijk::new(1, 1, 1));

    let display = case
        .grid_hierarchy()
        .display_coordinate(&Vec3d::new(456_150.0, 6_780_150.0, 1510.0));
    assert_relative_eq!(display, Vec3d::new(50.0, 50.0, 10.0));
}
