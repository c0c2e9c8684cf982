use std::fs;

use knn_classifier::evaluation::{train_and_evaluate, EvalOptions};
use knn_classifier::io::{dataset_from_path, CsvOptions};
use knn_classifier::{Class, KnnClassifier, KnnError};

const TRAINING: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
4.9,3.0,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.4,3.2,4.5,1.5,versicolor
6.3,3.3,6.0,2.5,virginica
5.8,2.7,5.1,1.9,virginica
";

const TEST: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.0,3.4,1.5,0.2,setosa
6.9,3.1,4.9,1.5,versicolor
6.5,3.0,5.8,2.2,virginica
";

#[test]
fn loads_csv_files_and_evaluates() {
    knn_classifier::logging::init();
    let dir = tempfile::tempdir().unwrap();
    let training_path = dir.path().join("training.csv");
    let test_path = dir.path().join("test.csv");
    fs::write(&training_path, TRAINING).unwrap();
    fs::write(&test_path, TEST).unwrap();

    let training = dataset_from_path(&training_path, 4, CsvOptions::for_path(&training_path)).unwrap();
    let test = dataset_from_path(&test_path, 4, CsvOptions::for_path(&test_path)).unwrap();
    assert_eq!(training.num_rows(), 6);
    assert_eq!(training.num_features(), 4);
    assert_eq!(test.row(2).unwrap().target(), Some(&Class::from("virginica")));

    let mut classifier = KnnClassifier::new(1).unwrap();
    let report = train_and_evaluate(&mut classifier, &training, &test, &EvalOptions::default()).unwrap();
    assert_eq!(report.correct, 3);
    assert!((report.accuracy - 1.0).abs() < 0.001);
}

#[test]
fn loads_tab_separated_files_with_leading_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("many_features.tsv");
    fs::write(&path, "label\tf0\tf1\n1\t0.0\t0.0\n0\t9.0\t9.0\n").unwrap();

    let dataset = dataset_from_path(&path, 0, CsvOptions::for_path(&path)).unwrap();
    assert_eq!(dataset.num_features(), 2);
    assert_eq!(dataset.row(0).unwrap().target(), Some(&Class::Integer(1)));
    assert_eq!(dataset.row(1).unwrap().features(), &[9.0, 9.0]);
}

#[test]
fn target_column_out_of_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training.csv");
    fs::write(&path, TRAINING).unwrap();

    let result = dataset_from_path(&path, 5, CsvOptions::default());
    assert!(matches!(result, Err(KnnError::Schema(_))));
}
