use proptest::prelude::*;

use super::*;

#[test]
fn test_text_beehive() {
    const TEXT: &str = "3x4\n0110\n1001\n0110\n";
    let grid = parse(TEXT).unwrap();
    assert_eq!((3, 4), (grid.rows(), grid.cols()));
    assert_eq!(".##.\n#..#\n.##.", grid.to_string());
    assert_eq!(TEXT, to_string(&grid));
}

#[test]
fn test_text_lenient_whitespace() {
    let grid = parse(" 2 X 3 \r\n101\r\n  010  \r\n\r\n\n").unwrap();
    assert_eq!(vec![(0, 0), (2, 0), (1, 1)], grid.iter_alive().collect::<Vec<_>>());
}

#[test]
fn test_text_errors() {
    assert!(matches!(parse(""), Err(LoadError::Empty)));
    assert!(matches!(parse("\n0\n"), Err(LoadError::Empty)));
    assert!(matches!(
        parse("2y2\n00\n00"),
        Err(LoadError::BadHeader(ConfigError::BadSizeSyntax(_)))
    ));
    assert!(matches!(
        parse("0x2\n"),
        Err(LoadError::BadHeader(ConfigError::SizeOutOfRange { rows: 0, cols: 2 }))
    ));
    assert!(matches!(
        parse("5001x1\n"),
        Err(LoadError::BadHeader(ConfigError::SizeOutOfRange { .. }))
    ));
    assert!(matches!(
        parse("3x2\n00\n11"),
        Err(LoadError::MissingRows {
            expected: 3,
            found: 2
        })
    ));
    assert!(matches!(
        parse("2x3\n000\n0000"),
        Err(LoadError::BadRowLength {
            row: 1,
            expected: 3,
            found: 4
        })
    ));
    assert!(matches!(
        parse("2x3\n000\n0x0"),
        Err(LoadError::BadCell {
            row: 1,
            col: 1,
            ch: 'x'
        })
    ));
    assert!(matches!(
        parse("1x1\n1\n1\n"),
        Err(LoadError::TrailingData { rows: 1 })
    ));
}

#[test]
fn test_file_roundtrip() {
    let path = std::env::temp_dir()
        .join(format!("lifescan-text-test-{}.txt", std::process::id()));
    let grid = BitGrid::with_cells(7, 19, vec![(0, 0), (18, 6), (9, 3)]);
    crate::io::save_file(&grid, &path).unwrap();
    let loaded = crate::io::load_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(grid, loaded);

    assert!(matches!(crate::io::load_file(&path), Err(LoadError::Io(_))));
}

#[test]
fn test_text_largest_strips() {
    let wide = BitGrid::with_cells(1, 5000, vec![(0, 0), (7, 0), (8, 0), (4999, 0)]);
    let text = to_string(&wide);
    assert!(text.starts_with("1x5000\n1000000110"));
    assert_eq!("1x5000\n".len() + 5001, text.len());
    assert_eq!(wide, parse(&text).unwrap());

    let tall = BitGrid::with_cells(5000, 1, vec![(0, 0), (0, 2500), (0, 4999)]);
    let text = to_string(&tall);
    assert_eq!(5001, text.lines().count());
    assert_eq!(Some("1"), text.lines().last());
    let loaded = parse(&text).unwrap();
    assert_eq!(tall, loaded);
    assert_eq!(vec![(0, 0), (0, 2500), (0, 4999)], loaded.iter_alive().collect::<Vec<_>>());

    assert!(matches!(
        parse("1x5001\n"),
        Err(LoadError::BadHeader(ConfigError::SizeOutOfRange { rows: 1, cols: 5001 }))
    ));
}

proptest! {
    #[test]
    fn test_text_roundtrip(
        cells in proptest::collection::vec(any::<bool>(), 1..500),
        cols in 1..40_usize,
    ) {
        let rows = (cells.len() + cols - 1) / cols;
        let mut grid = BitGrid::new(rows, cols);
        for (i, &alive) in cells.iter().enumerate() {
            grid.set(i % cols, i / cols, alive);
        }
        let reloaded = parse(&to_string(&grid)).unwrap();
        prop_assert_eq!(grid, reloaded);
    }
}
