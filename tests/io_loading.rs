//! Loading item lists from disk and laying them out.

use std::fs;

use static_timeline::config::LayoutConfig;
use static_timeline::io::{import_csv, load_items};
use static_timeline::layout::TimelineLayout;
use static_timeline::model::{Rgba, YearMonth};
use static_timeline::TimelineError;

#[test]
fn json_file_lays_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("career.json");
    fs::write(
        &path,
        r##"[
            {"title": "Employment1", "start": {"year": 2012, "month": 8}, "end": {"year": 2013, "month": 12}},
            {"title": "Employment2", "start": {"year": 2014, "month": 5}, "end": {"year": 2015, "month": 12}, "color": "#00ff00"}
        ]"##,
    )
    .unwrap();

    let items = load_items(&path).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].color, Some(Rgba::rgb(0, 255, 0)));

    let layout = TimelineLayout::compute(&items, &LayoutConfig::default()).unwrap();
    assert_eq!(layout.row_count(), 1);
    assert_eq!(layout.placement(1).unwrap().color, Rgba::rgb(0, 255, 0));
}

#[test]
fn missing_json_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_items(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, TimelineError::Io(_)));
}

#[test]
fn csv_import_skips_bad_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.csv");
    fs::write(
        &path,
        "title,start,end,summary\n\
         Employment1,2012-08,2013-12,Did some cool stuff\n\
         Broken,someday,2014-01,\n\
         Graduate School,2012-02,2016-08,Learned things\n",
    )
    .unwrap();

    let (items, skipped) = import_csv(&path).unwrap();
    assert_eq!(skipped, 1);
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].start, YearMonth::new(2012, 2));

    let layout = TimelineLayout::compute(&items, &LayoutConfig::default()).unwrap();
    assert_eq!(layout.levels.rows, vec![vec![0], vec![1]]);
}

#[test]
fn csv_without_usable_rows_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "title,start,end\nOnly,never,never\n").unwrap();
    assert!(matches!(
        import_csv(&path),
        Err(TimelineError::NoItems { skipped: 1, .. })
    ));
}

#[test]
fn csv_without_date_columns_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "name,notes\nA,B\n").unwrap();
    assert!(matches!(
        import_csv(&path),
        Err(TimelineError::MissingColumns { .. })
    ));
}
