use std::sync::Arc;

use oxidestats::error::AnalyzerError;
use oxidestats::render::canvas::ChartStyle;
use oxidestats::render::chart::ChartKind;
use oxidestats::state::analyzer::StatisticalAnalyzer;
use oxidestats::state::theme::Theme;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn central_tendency_of_one_to_five() {
    let analyzer = StatisticalAnalyzer::new();
    let outcome = analyzer.load(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    assert_eq!(outcome.count, 5);

    let ct = analyzer.central_tendency().unwrap();
    assert!(approx(ct.mean, 3.0, 1e-12));
    assert!(approx(ct.median, 3.0, 1e-12));
    assert_eq!(ct.mode, 1.0);
    assert_eq!(ct.mode_count, 1);
}

#[test]
fn repeated_value_is_the_mode() {
    let analyzer = StatisticalAnalyzer::new();
    analyzer.load(vec![2.0, 2.0, 3.0, 4.0]).unwrap();
    let ct = analyzer.central_tendency().unwrap();
    assert_eq!(ct.mode, 2.0);
    assert_eq!(ct.mode_count, 2);
}

#[test]
fn dispersion_of_one_to_five() {
    let analyzer = StatisticalAnalyzer::new();
    analyzer.load(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let d = analyzer.dispersion().unwrap();
    assert!(approx(d.variance, 2.5, 1e-12));
    assert!(approx(d.std_dev, 1.5811, 1e-4));
    assert!(approx(d.range, 4.0, 1e-12));
    assert!(approx(d.iqr, 2.0, 1e-12));
    assert_eq!(d.min, 1.0);
    assert_eq!(d.max, 5.0);
}

#[test]
fn single_value_dispersion_is_insufficient_data() {
    let analyzer = StatisticalAnalyzer::new();
    analyzer.load(vec![42.0]).unwrap();
    let err = analyzer.dispersion().unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::InsufficientData {
            required: 2,
            actual: 1
        }
    ));
}

#[test]
fn every_read_fails_before_load() {
    let analyzer = StatisticalAnalyzer::new();
    assert!(matches!(
        analyzer.central_tendency(),
        Err(AnalyzerError::NoDatasetLoaded)
    ));
    assert!(matches!(analyzer.dispersion(), Err(AnalyzerError::NoDatasetLoaded)));
    assert!(matches!(analyzer.summary(), Err(AnalyzerError::NoDatasetLoaded)));
    for kind in ChartKind::ALL {
        assert!(matches!(
            analyzer.render_chart(kind, &ChartStyle::default()),
            Err(AnalyzerError::NoDatasetLoaded)
        ));
    }
}

#[test]
fn empty_load_is_rejected() {
    let analyzer = StatisticalAnalyzer::new();
    assert!(matches!(
        analyzer.load(Vec::new()),
        Err(AnalyzerError::NoDataProvided)
    ));
    assert!(!analyzer.is_loaded());
}

#[test]
fn pie_is_not_a_chart_kind() {
    let err = "pie".parse::<ChartKind>().unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidChartKind { .. }));
    assert_eq!(err.to_string(), "Invalid chart type: pie");
}

#[test]
fn every_chart_kind_is_a_valid_png() {
    let analyzer = StatisticalAnalyzer::new();
    analyzer
        .load(vec![12.0, 15.5, 9.3, 11.1, 14.2, 10.0, 13.7, 30.0])
        .unwrap();
    let style = ChartStyle {
        width: 500,
        height: 300,
        theme: Theme::Light,
    };

    for kind in ChartKind::ALL {
        let png = analyzer.render_chart(kind, &style).unwrap();
        assert!(!png.is_empty());
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n", "{kind}");
        let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (500, 300));
    }
}

#[test]
fn second_load_replaces_first() {
    let analyzer = StatisticalAnalyzer::new();
    analyzer.load(vec![1.0, 2.0, 3.0]).unwrap();
    analyzer.load(vec![100.0, 200.0]).unwrap();

    let ct = analyzer.central_tendency().unwrap();
    assert!(approx(ct.mean, 150.0, 1e-12));
    let d = analyzer.dispersion().unwrap();
    assert_eq!(d.min, 100.0);
    assert_eq!(d.max, 200.0);
    assert_eq!(analyzer.info().unwrap().count, 2);
}

#[test]
fn summary_is_union_of_both_groups() {
    let analyzer = StatisticalAnalyzer::new();
    analyzer.load(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let summary = analyzer.summary().unwrap();
    assert_eq!(summary.central_tendency, analyzer.central_tendency().unwrap());
    assert_eq!(summary.dispersion, analyzer.dispersion().unwrap());
}

#[test]
fn concurrent_readers_never_see_a_mixed_dataset() {
    let analyzer = Arc::new(StatisticalAnalyzer::new());
    let low: Vec<f64> = vec![1.0; 500];
    let high: Vec<f64> = vec![9.0; 500];
    analyzer.load(low.clone()).unwrap();

    std::thread::scope(|scope| {
        let writer = Arc::clone(&analyzer);
        scope.spawn(move || {
            for i in 0..200 {
                let next = if i % 2 == 0 { high.clone() } else { low.clone() };
                writer.load(next).unwrap();
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&analyzer);
            scope.spawn(move || {
                for _ in 0..200 {
                    let ct = reader.central_tendency().unwrap();
                    // A whole dataset is either all 1s or all 9s.
                    assert!(ct.mean == 1.0 || ct.mean == 9.0, "torn read: {}", ct.mean);
                    assert_eq!(ct.mode_count, 500);
                }
            });
        }
    });
}
