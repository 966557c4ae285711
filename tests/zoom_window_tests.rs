use abtest_chart::core::{
    AggregationMode, Dataset, RawRecord, VariationInfo, ZoomRange, ZoomTuning,
};
use abtest_chart::render::NullRenderer;
use abtest_chart::{ChartView, ChartViewConfig};
use chrono::{Days, NaiveDate};

fn daily_dataset(days: u64) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let data = (0..days)
        .map(|offset| {
            let date = start + Days::new(offset);
            RawRecord::new(date.format("%Y-%m-%d").to_string())
                .with_counts("a", 100, offset % 10)
                .with_counts("b", 100, 5)
        })
        .collect();
    Dataset::new(data, vec![VariationInfo::named("a"), VariationInfo::named("b")])
}

fn view_with_days(days: u64) -> ChartView<NullRenderer> {
    let mut view =
        ChartView::new(NullRenderer::default(), ChartViewConfig::default()).expect("view init");
    view.load_dataset(daily_dataset(days));
    view
}

fn range(start: usize, end: usize) -> ZoomRange {
    ZoomRange::new(start, end).expect("ordered range")
}

#[test]
fn first_zoom_in_focuses_most_recent_periods() {
    let mut view = view_with_days(100);
    assert_eq!(view.periods().len(), 100);
    assert!(view.can_zoom_in());
    assert!(!view.can_zoom_out());

    assert!(view.zoom_in());
    assert_eq!(view.zoom_range(), Some(range(30, 99)));
    assert_eq!(view.visible_periods().len(), 70);
    assert_eq!(view.visible_periods()[0], "2024-01-31");
    assert_eq!(view.zoomed_points().len(), 140);
    assert!(view.can_zoom_out());
}

#[test]
fn repeated_zoom_in_converges_to_min_window() {
    let mut view = view_with_days(200);
    let mut previous_width = usize::MAX;

    while view.can_zoom_in() {
        assert!(view.zoom_in());
        let width = view.zoom_range().expect("zoom active").width();
        assert!(width <= previous_width);
        previous_width = width;
    }

    assert!(previous_width <= 15);
    let settled = view.zoom_range();
    assert!(!view.zoom_in());
    assert_eq!(view.zoom_range(), settled);
}

#[test]
fn repeated_zoom_out_collapses_to_full_range() {
    let mut view = view_with_days(200);
    for _ in 0..6 {
        view.zoom_in();
    }
    let mut previous_width = view.zoom_range().expect("zoom active").width();

    let mut steps = 0;
    while view.can_zoom_out() {
        assert!(view.zoom_out());
        steps += 1;
        match view.zoom_range() {
            Some(active) => {
                assert!(active.width() >= previous_width);
                previous_width = active.width();
            }
            None => break,
        }
        assert!(steps < 200, "zoom out must converge");
    }

    assert_eq!(view.zoom_range(), None);
    assert!(!view.zoom_out());
}

#[test]
fn zoom_out_without_active_zoom_is_noop() {
    let mut view = view_with_days(50);
    assert!(!view.zoom_out());
    assert_eq!(view.zoom_range(), None);
}

#[test]
fn short_timeline_zoom_in_covers_everything_then_stops() {
    let mut view = view_with_days(10);
    assert!(view.zoom_in());
    assert_eq!(view.zoom_range(), Some(range(0, 9)));
    assert!(!view.can_zoom_in());
    assert!(!view.zoom_in());
}

#[test]
fn aggregation_switch_resets_zoom() {
    let mut view = view_with_days(100);
    view.zoom_in();
    assert!(view.zoom_range().is_some());

    assert!(view.set_aggregation(AggregationMode::Week));
    assert_eq!(view.zoom_range(), None);
    assert_eq!(view.periods().len(), 15);
    assert_eq!(view.periods()[0], "2024-01-01");

    assert!(!view.set_aggregation(AggregationMode::Week));
}

#[test]
fn reset_zoom_returns_to_full_range() {
    let mut view = view_with_days(60);
    view.zoom_in();
    view.zoom_in();

    assert!(view.reset_zoom());
    assert_eq!(view.zoom_range(), None);
    assert_eq!(view.zoomed_points().len(), view.points().len());
    assert!(!view.reset_zoom());
}

#[test]
fn direct_range_selection_is_clamped() {
    let mut view = view_with_days(100);

    assert!(view.set_zoom_range(Some(range(20, 400))));
    assert_eq!(view.zoom_range(), Some(range(20, 99)));

    assert!(view.set_zoom_range(Some(range(120, 140))));
    assert_eq!(view.zoom_range(), None);

    assert!(view.set_zoom_range(Some(range(40, 50))));
    assert!(view.set_zoom_range(Some(range(2, 98))));
    assert_eq!(view.zoom_range(), None);
}

#[test]
fn visible_points_are_selected_by_period_label() {
    let mut view = view_with_days(40);
    view.set_zoom_range(Some(range(10, 12)));

    let labels: Vec<String> = view
        .zoomed_points()
        .iter()
        .map(|point| point.period_label().to_owned())
        .collect();
    assert_eq!(
        labels,
        vec![
            "2024-01-11",
            "2024-01-11",
            "2024-01-12",
            "2024-01-12",
            "2024-01-13",
            "2024-01-13"
        ]
    );
}

#[test]
fn empty_dataset_disables_zoom_operations() {
    let mut view =
        ChartView::new(NullRenderer::default(), ChartViewConfig::default()).expect("view init");
    view.load_dataset(Dataset::default());

    assert!(view.can_zoom_in());
    assert!(!view.can_zoom_out());
    assert!(!view.zoom_in());
    assert!(!view.zoom_out());
    assert_eq!(view.zoom_range(), None);
    assert!(view.visible_points().is_empty());
}

#[test]
fn tuning_update_refits_active_window() {
    let mut view = view_with_days(30);
    assert!(view.set_zoom_range(Some(range(2, 20))));

    let relaxed = ZoomTuning {
        min_window: 5,
        ..ZoomTuning::default()
    };
    view.set_zoom_tuning(relaxed).expect("relaxed tuning");
    assert_eq!(view.zoom_range(), Some(range(2, 20)));
    assert_eq!(view.zoom_tuning(), relaxed);
    assert_eq!(view.config().zoom, relaxed);

    // 18 of 30 periods now counts as nearly everything.
    let eager_collapse = ZoomTuning {
        zoom_in_initial_ratio: 0.4,
        collapse_ratio: 0.5,
        ..ZoomTuning::default()
    };
    view.set_zoom_tuning(eager_collapse).expect("eager collapse tuning");
    assert_eq!(view.zoom_range(), None);
    assert!(!view.can_zoom_out());
}

#[test]
fn rejected_tuning_leaves_view_unchanged() {
    let mut view = view_with_days(30);
    assert!(view.set_zoom_range(Some(range(2, 10))));

    let out_of_range = ZoomTuning {
        collapse_ratio: 1.5,
        ..ZoomTuning::default()
    };
    assert!(view.set_zoom_tuning(out_of_range).is_err());

    let collapses_on_first_zoom = ZoomTuning {
        zoom_in_initial_ratio: 0.95,
        ..ZoomTuning::default()
    };
    assert!(view.set_zoom_tuning(collapses_on_first_zoom).is_err());

    assert_eq!(view.zoom_tuning(), ZoomTuning::default());
    assert_eq!(view.config().zoom, ZoomTuning::default());
    assert_eq!(view.zoom_range(), Some(range(2, 10)));
}
