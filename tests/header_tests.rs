use nifti2bids::simulate::SimulatedHeader;
use nifti2bids::{extract_metadata, CoreError, SliceAxis};

#[test]
fn test_functional_header_roundtrip() {
    let header = SimulatedHeader::functional([64, 64, 40], 240, 1.5);
    let meta = extract_metadata(&header).unwrap();

    assert_eq!(meta.n_slices(), 40);
    assert_eq!(meta.n_volumes(), 240);
    assert_eq!(meta.tr(), 1.5);
    assert_eq!(meta.slice_axis(), SliceAxis::Z);
}

#[test]
fn test_anatomical_header_is_single_volume() {
    let header = SimulatedHeader::anatomical([256, 256, 176]);
    let meta = extract_metadata(&header).unwrap();

    assert_eq!(meta.n_volumes(), 1);
    assert_eq!(meta.n_slices(), 176);
}

#[test]
fn test_slice_axis_follows_thickness() {
    let header = SimulatedHeader::functional([48, 64, 64], 100, 2.0)
        .with_spacings(vec![3.6, 1.8, 1.8, 2.0])
        .with_slice_thickness(3.6);
    let meta = extract_metadata(&header).unwrap();

    assert_eq!(meta.slice_axis(), SliceAxis::X);
    assert_eq!(meta.n_slices(), 48);
}

#[test]
fn test_garbage_repetition_time_rejected() {
    let header = SimulatedHeader::functional([64, 64, 32], 100, 2.0).with_repetition_time(-0.5);

    assert!(matches!(
        extract_metadata(&header),
        Err(CoreError::InvalidHeader(_))
    ));
}
