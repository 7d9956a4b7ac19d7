use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;

use crate::{diagnostics, highlight, parse};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "zephyr" {
                    let expected = path.with_extension("tree");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

fn dump(text: &str) -> String {
    let tree = parse(text);
    let mut actual = tree.to_string();

    actual.push_str("Highlights:\n");
    for span in highlight(&tree) {
        writeln!(actual, "  {}@{:?}", span.tag, span.range).unwrap();
    }

    actual.push_str("Errors:\n");
    for diagnostic in diagnostics(&tree) {
        writeln!(actual, "  {}", diagnostic.message()).unwrap();
    }

    actual
}

#[test]
fn parse_test_data() {
    let test_cases = TestCase::list();
    assert!(!test_cases.is_empty(), "no test cases found");

    for case in test_cases {
        expect_file![&case.expected].assert_eq(&dump(&case.text));
    }
}

#[test]
fn root_spans_whole_document() {
    for case in TestCase::list() {
        let tree = parse(&case.text);
        let root = tree.records().next_back().unwrap();

        assert_eq!(u32::from(root.start), 0, "{}", case.input.display());
        assert_eq!(u32::from(root.end) as usize, case.text.len(), "{}", case.input.display());
        assert_eq!(root.size as usize, tree.buffer().len(), "{}", case.input.display());
    }
}
