use super::*;

fn session(rows: usize, cols: usize, rule: Rule) -> Session {
    let mut config = SessionConfig::new(rows, cols, rule);
    config.threads = Some(3);
    config.density = 0.0;
    Session::new(config).unwrap()
}

#[test]
fn test_session_new() {
    let s = session(12, 20, Rule::ConwayStandard);
    assert_eq!((12, 20), (s.grid().rows(), s.grid().cols()));
    assert_eq!((12, 20), (s.highlight().rows(), s.highlight().cols()));
    assert_eq!(0, s.generation());
    assert_eq!(0, s.alive_count());
    assert_eq!(1, s.history().len());
    assert_eq!(Some(s.grid()), s.history().previous());

    let mut bad = SessionConfig::new(0, 20, Rule::ConwayStandard);
    assert!(matches!(Session::new(bad.clone()), Err(ConfigError::SizeOutOfRange { .. })));
    bad.rows = 5;
    bad.threads = Some(0);
    assert!(matches!(Session::new(bad), Err(ConfigError::NoThreads)));
}

#[test]
fn test_history_lags_one_step() {
    let mut s = session(10, 10, Rule::ConwayStandard);
    s.load_text(
        "10x10\n0100000000\n0010000000\n1110000000\n0000000000\n0000000000\n\
         0000000000\n0000000000\n0000000000\n0000000000\n0000000000\n",
    )
    .unwrap();

    let mut generations = vec![s.grid().clone()];
    for _ in 0..3 {
        s.step();
        generations.push(s.grid().clone());
    }
    assert_eq!(3, s.generation());
    assert_eq!(5, s.alive_count());
    assert_eq!(2, s.history().len());
    assert_eq!(Some(&generations[2]), s.history().previous());
    assert_eq!(Some(&generations[1]), s.history().oldest());
    assert_ne!(s.history().previous(), Some(s.grid()));
}

#[test]
fn test_tick_detects_blinker_transition() {
    let mut s = session(9, 9, Rule::ConwayStandard);
    for x in 3..6 {
        s.set_cell(x, 4, true);
    }
    assert_eq!(3, s.alive_count());

    // Before the first step the previous generation is the current one, so a
    // blinker cannot have just changed phase.
    let report = s.detect(&[PatternId::Blinker]);
    assert_eq!(Some(0), report.count(PatternId::Blinker));
    assert_eq!(0, s.highlight().count());

    let report = s.tick(&[PatternId::Blinker, PatternId::Block]);
    assert!(report.is_complete());
    assert_eq!(1, report.generation);
    assert_eq!(3, report.alive);
    assert_eq!(Some(1), report.detect.count(PatternId::Blinker));
    assert_eq!(Some(0), report.detect.count(PatternId::Block));
    assert_eq!(
        vec![(4, 3), (4, 4), (4, 5)],
        s.highlight().iter_marked().collect::<Vec<_>>()
    );
}

#[test]
fn test_highlight_cleared_each_pass() {
    let mut s = session(8, 8, Rule::ConwayStandard);
    s.load_text("4x4\n0000\n0110\n0110\n0000\n").unwrap();
    s.detect(&[PatternId::Block]);
    assert_eq!(4, s.highlight().count());
    s.detect(&[]);
    assert_eq!(0, s.highlight().count());
    s.tick(&[PatternId::Block]);
    assert_eq!(4, s.highlight().count());
}

#[test]
fn test_failed_load_leaves_session_untouched() {
    let mut s = session(6, 7, Rule::ConwayVariant);
    s.randomize(0.5, 11).unwrap();
    s.step();
    s.detect(&PatternId::ALL);
    let grid = s.grid().clone();
    let highlight: Vec<_> = s.highlight().iter_marked().collect();
    let history = s.history().previous().cloned();
    let (generation, alive) = (s.generation(), s.alive_count());

    for bad in ["", "3x3\n000\n010", "3x3\n000\n020\n000", "2x2\n00\n00\n11\n"] {
        assert!(s.load_text(bad).is_err(), "{:?} should not load", bad);
    }
    assert!(s.load_file("/nonexistent/lifescan/grid.txt").is_err());

    assert_eq!(&grid, s.grid());
    assert_eq!(highlight, s.highlight().iter_marked().collect::<Vec<_>>());
    assert_eq!(history.as_ref(), s.history().previous());
    assert_eq!((generation, alive), (s.generation(), s.alive_count()));
    assert_eq!((6, 7), (s.config().rows, s.config().cols));
}

#[test]
fn test_load_adopts_size() {
    let mut s = session(6, 7, Rule::ConwayStandard);
    s.step();
    s.load_text("2x3\n101\n010\n").unwrap();
    assert_eq!((2, 3), (s.config().rows, s.config().cols));
    assert_eq!((2, 3), (s.highlight().rows(), s.highlight().cols()));
    assert_eq!(0, s.generation());
    assert_eq!(3, s.alive_count());
    assert_eq!(1, s.history().len());
    assert_eq!("2x3\n101\n010\n", s.save_text());
}

#[test]
fn test_reset() {
    let mut s = session(10, 10, Rule::ConwayStandard);
    s.randomize(0.4, 3).unwrap();
    s.tick(&PatternId::ALL);
    s.tick(&PatternId::ALL);
    s.reset();
    assert_eq!(0, s.grid().population());
    assert_eq!(0, s.highlight().count());
    assert_eq!((0, 0), (s.generation(), s.alive_count()));
    assert_eq!(1, s.history().len());
    assert_eq!(Some(s.grid()), s.history().previous());
}

#[test]
fn test_reconfigure() {
    let mut s = session(10, 10, Rule::ConwayStandard);
    s.randomize(0.3, 5).unwrap();

    let bad = SessionConfig::new(10, 6000, Rule::Rule30);
    assert!(s.reconfigure(bad).is_err());
    assert_eq!(Rule::ConwayStandard, s.rule());
    assert_eq!(10, s.grid().cols());

    let mut config = SessionConfig::new(4, 9, Rule::Rule30);
    config.threads = Some(2);
    config.density = 0.0;
    s.reconfigure(config).unwrap();
    assert_eq!(Rule::Rule30, s.rule());
    assert_eq!((4, 9), (s.grid().rows(), s.grid().cols()));
    assert_eq!(0, s.alive_count());

    s.set_cell(4, 0, true);
    s.step();
    assert_eq!(
        "....#....\n...###...\n.........\n.........",
        s.grid().to_string()
    );
}

#[test]
fn test_initial_density() {
    let mut config = SessionConfig::new(50, 50, Rule::ConwayStandard);
    config.threads = Some(2);
    config.density = 0.5;
    config.seed = Some(9);
    let a = Session::new(config.clone()).unwrap();
    let b = Session::new(config.clone()).unwrap();
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.grid().population(), a.alive_count());
    assert!((1000..1500).contains(&a.alive_count()), "{}", a.alive_count());
    assert_eq!(Some(a.grid()), a.history().previous());

    let mut s = session(10, 10, Rule::ConwayStandard);
    assert_eq!(0, s.alive_count());
    s.reconfigure(config.clone()).unwrap();
    assert_eq!(a.grid(), s.grid());
    assert_eq!(a.alive_count(), s.alive_count());

    config.density = 1.0;
    config.seed = None;
    s.reconfigure(config).unwrap();
    assert_eq!(2500, s.alive_count());
}

#[test]
fn test_randomize() {
    let mut a = session(30, 30, Rule::ConwayStandard);
    let mut b = session(30, 30, Rule::ConwayStandard);
    a.randomize(0.2, 42).unwrap();
    b.randomize(0.2, 42).unwrap();
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.grid().population(), a.alive_count());
    assert!(a.alive_count() > 0 && a.alive_count() < 900);

    assert_eq!(Err(ConfigError::BadDensity(-0.1)), a.randomize(-0.1, 1));
}

#[test]
fn test_cell_edits() {
    let mut s = session(5, 5, Rule::ConwayStandard);
    assert!(s.toggle_cell(1, 2));
    s.set_cell(1, 2, true);
    s.set_cell(3, 3, true);
    assert_eq!(2, s.alive_count());
    assert!(!s.toggle_cell(3, 3));
    s.set_cell(1, 2, false);
    assert_eq!(0, s.alive_count());
}
