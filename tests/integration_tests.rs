use std::collections::BTreeSet;
use std::io::Write;

use bike_dashboard::charts::{self, ChartBody};
use bike_dashboard::data::filter::{apply_filter, filtered_indices, FilterSelection};
use bike_dashboard::data::loader::load_file;
use bike_dashboard::data::{DataLoadError, RentalDataset, Season, Weather};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

const DAY_CSV: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985
2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801
3,2011-01-03,1,0,1,0,1,1,1,0.196364,0.189405,0.437273,0.248309,120,1229,1349
4,2011-01-17,1,0,1,1,1,0,2,0.175833,0.176771,0.5375,0.194017,117,883,1000
5,2011-07-04,3,0,7,1,1,0,2,0.726667,0.665417,0.637917,0.0814792,3065,2978,6043
6,2011-10-29,4,0,10,0,6,0,3,0.254167,0.227913,0.8825,0.351371,57,570,627
7,2012-04-21,2,1,4,0,6,0,1,0.4725,0.464,0.503333,0.235075,3252,3605,6857
8,2012-06-02,2,1,6,0,6,0,1,0.6175,0.583325,0.373333,0.146142,2795,5325,8120
9,2012-09-15,3,1,9,0,6,0,1,0.608333,0.585867,0.501667,0.247521,3160,5554,8714
10,2012-12-26,1,1,12,0,3,1,3,0.243333,0.220333,0.823333,0.316546,9,432,441
";

fn fixture() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(DAY_CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load() -> RentalDataset {
    let file = fixture();
    load_file(file.path()).expect("fixture should load")
}

#[test]
fn test_load_derives_labels_and_keeps_invariant() {
    let ds = load();
    assert_eq!(ds.len(), 10);
    assert_eq!(ds.years, BTreeSet::from([2011, 2012]));
    assert_eq!(ds.seasons, BTreeSet::from(Season::ALL));
    assert_eq!(
        ds.weathers,
        BTreeSet::from([Weather::Clear, Weather::Mist, Weather::LightSnow])
    );
    for rec in &ds.records {
        assert_eq!(rec.casual + rec.registered, rec.total);
    }
    assert!(ds.records[3].is_holiday);
}

#[test]
fn test_filter_properties() {
    let ds = load();

    let all = FilterSelection::all(&ds);
    assert_eq!(apply_filter(&ds.records, &all), ds.records);

    let mut sel = all.clone();
    sel.years = BTreeSet::from([2012]);
    sel.weathers = BTreeSet::from([Weather::Clear]);
    let view = apply_filter(&ds.records, &sel);
    assert_eq!(filtered_indices(&ds, &sel), vec![6, 7, 8]);
    for rec in &view {
        assert!(sel.matches(rec));
        assert_eq!(rec.casual + rec.registered, rec.total);
    }

    let mut none = all;
    none.seasons.clear();
    assert!(apply_filter(&ds.records, &none).is_empty());
}

#[test]
fn test_charts_on_full_and_empty_views() {
    let ds = load();
    let sections = charts::build_all(&ds.records);

    let weather = &sections[3].chart;
    let ChartBody::Bars(cs) = &weather.body else {
        panic!("weather chart should be bars");
    };
    // Clear days average far above light-snow days
    assert_eq!(cs.categories.first().map(String::as_str), Some("Clear"));
    assert_eq!(cs.categories.last().map(String::as_str), Some("Light Snow"));

    let monthly = &sections[1].chart;
    let casual = &monthly.series("Casual").unwrap().values;
    assert_eq!(casual.len(), 12);
    assert!(casual[1].is_none());
    assert_eq!(casual[6], Some(3065.0));

    let empty = charts::build_all(&[]);
    assert_eq!(
        empty[3].chart.body,
        ChartBody::Placeholder("No data available for the selected filters".to_string())
    );
    assert_eq!(empty[2].chart.body, ChartBody::Empty);
}

#[test]
fn test_cluster_partition_is_reproducible() {
    let ds = load();
    let a = charts::cluster::assign_clusters(&ds.records);
    let b = charts::cluster::assign_clusters(&ds.records);
    assert_eq!(a, b);
    assert_eq!(a.iter().collect::<BTreeSet<_>>().len(), 3);
}

#[test]
fn test_malformed_inputs_fail_whole_load() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "dteday,season,yr,mnth,holiday,weathersit,temp,hum,windspeed,casual,registered,cnt").unwrap();
    writeln!(file, "2011-01-01,1,0,1,0,1,0.3,0.5,0.2,10,20,30").unwrap();
    writeln!(file, "2011-01-02,7,0,1,0,1,0.3,0.5,0.2,10,20,30").unwrap();
    file.flush().unwrap();

    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::InvalidValue {
            row: 1,
            column: "season",
            ..
        }
    ));
}
