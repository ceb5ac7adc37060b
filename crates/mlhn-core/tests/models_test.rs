use mlhn_core::models::*;
use proptest::prelude::*;

#[test]
fn dataset_rows_pair_features_with_labels() {
    let ds = MultiLabelDataset::new(
        vec![vec![0.1, 0.2], vec![0.3, 0.4]],
        vec![vec![true, false, true], vec![false, false, true]],
    )
    .unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.num_features(), 2);
    assert_eq!(ds.num_labels(), 3);
    let rows: Vec<_> = ds.rows().collect();
    assert_eq!(rows[1].0, &[0.3, 0.4]);
    assert_eq!(rows[1].1, &[false, false, true]);
}

#[test]
fn dataset_rejects_mismatched_record_counts() {
    assert!(MultiLabelDataset::new(vec![vec![0.0]], vec![vec![true], vec![false]]).is_err());
}

#[test]
fn label_names_must_cover_every_label() {
    let ds = MultiLabelDataset::new(vec![vec![0.0]], vec![vec![true, false]]).unwrap();
    assert!(ds.clone().with_label_names(vec!["a".into()]).is_err());
    let named = ds.with_label_names(vec!["a".into(), "b".into()]).unwrap();
    assert_eq!(named.label_names(), &["a".to_string(), "b".to_string()]);
}

#[test]
fn output_thresholds_strictly() {
    let out = MultiLabelOutput::from_confidences(vec![0.5, 0.51, 0.2], 0.5);
    assert_eq!(out.bipartition, vec![false, true, false]);
    assert!(MultiLabelOutput::new(vec![true], vec![0.1, 0.2]).is_err());
}

#[test]
fn processed_record_from_output_keeps_truth_separate() {
    let out = MultiLabelOutput::from_confidences(vec![0.9, 0.1], 0.5);
    let truth: LabelVector = vec![true, true];
    let r = ProcessedRecord::from_output(&out, Some(truth.clone())).unwrap();
    assert_eq!(r.vertex_values().len(), 4);
    assert_eq!(r.truth(), Some(truth.as_slice()));
    assert_eq!(r.predicted_label(0), Some(true));
    assert_eq!(r.predicted_label(2), None);
    assert!(ProcessedRecord::from_output(&out, Some(vec![true])).is_err());
}

proptest! {
    #[test]
    fn flat_rows_round_trip_vertex_values(
        confidences in prop::collection::vec(0.0f64..1.0, 1..8),
    ) {
        let l = confidences.len();
        let predicted: Vec<bool> = confidences.iter().map(|&c| c > 0.5).collect();
        let record = ProcessedRecord::new(&predicted, &confidences, None).unwrap();
        let back = ProcessedRecord::from_flat(record.vertex_values(), l, 0).unwrap();
        prop_assert_eq!(back, record);
    }
}
