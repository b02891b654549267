use fixspread::cluster::Dbscan;
use fixspread::stats::pearson;
use fixspread::{
    points_from_fixes, AnalysisConfig, AnalysisRunner, Axis, EllipseClassifier, Error, Fix, Point,
    PointMultiset,
};

#[test]
fn identical_points_have_no_correlation() {
    let xs = [0.0, 0.0, 0.0, 0.0];
    let ys = [0.0, 0.0, 0.0, 0.0];
    assert_eq!(
        pearson(&xs, &ys).unwrap_err(),
        Error::DegenerateInput { axis: Axis::X }
    );
}

#[test]
fn unit_square_ellipse() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
    ];

    let result = EllipseClassifier::new(0.9).classify(&points).unwrap();
    assert_eq!(result.mean, Point::new(0.5, 0.5));
    assert_eq!(result.alpha, 0.0);
    assert!(result.inside.iter().all(|&b| b == result.inside[0]));

    let wide = EllipseClassifier::new(0.99).classify(&points).unwrap();
    assert_eq!(wide.inside, vec![true; 4]);
}

#[test]
fn tight_fixes_cluster_and_far_fix_is_noise() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.000_000_5),
        Point::new(0.0, 0.000_001_0),
        Point::new(10.0, 10.0),
    ];

    let result = Dbscan::new(0.000_002, 2).fit(&points).unwrap();

    assert_eq!(result.n_clusters(), 1);
    assert_eq!(result.clusters[0].members, vec![0, 1, 2]);
    assert_eq!(result.noise, vec![3]);
}

#[test]
fn empty_input_clusters_to_nothing() {
    let result = Dbscan::new(0.000_002, 2).fit(&[]).unwrap();
    assert!(result.clusters.is_empty());
    assert!(result.noise.is_empty());
}

#[test]
fn receiver_log_end_to_end() {
    // A stationary receiver: repeated fixes around one spot and two jumps.
    let origin = Fix::new(55.653_42, 37.551_96);
    let mut fixes = Vec::new();
    for i in 0..30 {
        let jitter = (i % 5) as f64 * 0.000_000_4;
        fixes.push(Fix::new(55.653_421 + jitter, 37.551_962 - jitter));
        if i % 3 == 0 {
            // Repeated position, common for a receiver holding its last fix.
            fixes.push(Fix::new(55.653_421, 37.551_962));
        }
    }
    fixes.push(Fix::new(55.653_600, 37.552_300));
    fixes.push(Fix::new(55.653_100, 37.551_500));
    let points = points_from_fixes(&fixes, origin);

    let config: AnalysisConfig = serde_json::from_str(
        r#"{
            "confidence_levels": [0.9, 0.999999],
            "clustering": [{ "epsilon": 0.000002, "min_pts": 3 }]
        }"#,
    )
    .unwrap();
    let report = AnalysisRunner::new(config).unwrap().run(&points);

    assert_eq!(report.n_points, points.len());

    let clustering = report.clusterings[0].outcome.as_ref().unwrap();
    assert_eq!(clustering.n_clusters(), 1);
    let n = points.len();
    assert_eq!(clustering.noise, vec![n - 2, n - 1]);

    let narrow = report.ellipses[0].outcome.as_ref().unwrap();
    let wide = report.ellipses[1].outcome.as_ref().unwrap();
    assert!(wide.inside_count() >= narrow.inside_count());
    assert!(!wide.inside[n - 2]);

    // Renderer view: one glyph per location, sized by count.
    let tally = PointMultiset::with_flags(&points, &wide.inside).unwrap();
    assert_eq!(tally.total(), n);
    assert!(tally.count(points[0]) > 1);
}

#[test]
fn config_rejects_out_of_range_levels() {
    let config: AnalysisConfig =
        serde_json::from_str(r#"{ "confidence_levels": [1.5] }"#).unwrap();
    assert!(AnalysisRunner::new(config).is_err());

    let level: Result<fixspread::ConfidenceLevel, _> = serde_json::from_str("0.0");
    assert!(level.is_err());
}
