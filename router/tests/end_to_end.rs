//! End-to-end runs of the search on the reference boards.

use pinboard_common::db::case::Case;
use pinboard_common::db::cluster::cluster;
use pinboard_common::db::indices::CaseId;
use pinboard_common::db::parser::case_file;
use pinboard_common::geom::point::Point;
use pinboard_common::util::config::SearchConfig;
use pinboard_router::{search, solve_case};

fn pins(raw: &[(u32, u32)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn seeded() -> SearchConfig {
    SearchConfig {
        seed: Some(2024),
        ..SearchConfig::default()
    }
}

#[test]
fn four_pin_board_meets_target_thirteen() {
    let pins = pins(&[(0, 1), (4, 4), (8, 3), (2, 5)]);
    let outcome = search(&pins, 13, &seeded()).unwrap();

    assert!(outcome.reached_target);
    assert!(outcome.paths.len() <= 13);
    assert!(outcome.paths.iter().all(|s| s.is_unit()));

    let clusters = cluster(outcome.paths.as_slice(), &pins).unwrap();
    assert!(clusters.is_connected());
    assert_eq!(clusters.pins.len(), 4);
}

#[test]
fn solve_case_reports_success() {
    let case = Case {
        id: CaseId::default(),
        name: "schwierigkeit-mittel_size-10_pins-7_kanten-22".to_string(),
        difficulty: "mittel".to_string(),
        size: 10,
        target: 30,
        pins: pins(&[(3, 5), (3, 10), (5, 5), (5, 7), (7, 2), (10, 2), (10, 8)]),
    };
    let report = solve_case(&case, &seeded()).unwrap();

    assert!(report.is_success);
    assert!(report.reached_target);
    assert!(report.paths_used <= 30);
    assert_eq!(report.paths_used, report.paths.unique_len());
}

#[test]
fn unseeded_run_reports_a_seed_that_replays_it() {
    let case = Case {
        id: CaseId::default(),
        name: "replay".to_string(),
        difficulty: String::new(),
        size: 10,
        target: 0,
        pins: pins(&[(1, 2), (1, 5), (2, 7), (3, 4), (4, 2), (5, 6)]),
    };
    let stages = SearchConfig::default().stages[..2].to_vec();
    let unseeded = SearchConfig {
        stages: stages.clone(),
        seed: None,
        ..SearchConfig::default()
    };
    let first = solve_case(&case, &unseeded).unwrap();

    let replay = SearchConfig {
        stages,
        seed: Some(first.base_seed),
        ..SearchConfig::default()
    };
    let second = solve_case(&case, &replay).unwrap();

    assert_eq!(second.base_seed, first.base_seed);
    assert_eq!(second.iterations, first.iterations);
    assert_eq!(second.paths, first.paths);
}

#[test]
fn solve_case_rejects_pins_off_the_board() {
    let case = Case {
        id: CaseId::default(),
        name: "off".to_string(),
        difficulty: String::new(),
        size: 5,
        target: 10,
        pins: pins(&[(0, 0), (6, 1)]),
    };
    assert!(solve_case(&case, &seeded()).is_err());
}

#[test]
fn bundled_cases_parse_and_connect() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../cases/example.toml");
    let set = case_file::parse(path, 10).unwrap();
    assert!(!set.is_empty());

    let config = SearchConfig {
        stages: seeded().stages[..3].to_vec(),
        ..seeded()
    };
    for case in set.iter() {
        let report = solve_case(case, &config).unwrap();
        assert!(report.is_success, "case {} not connected", case.name);
    }
}
