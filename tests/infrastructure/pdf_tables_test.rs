use docmark::infrastructure::extraction::pdf_tables::detect_tables;

#[test]
fn given_aligned_columns_when_detecting_then_returns_one_table() {
    let text = "Quarterly figures\nRegion    Sales    Growth\nNorth    120    4%\nSouth    95    2%\nEnd of report";

    let tables = detect_tables(text);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].len(), 3);
    assert_eq!(tables[0][0], vec!["Region", "Sales", "Growth"]);
    assert_eq!(tables[0][2], vec!["South", "95", "2%"]);
}

#[test]
fn given_tab_separated_lines_when_detecting_then_splits_on_tabs() {
    let tables = detect_tables("a\tb\nc\td");

    assert_eq!(tables, vec![vec![vec!["a", "b"], vec!["c", "d"]]]);
}

#[test]
fn given_single_aligned_line_when_detecting_then_no_table() {
    assert!(detect_tables("Name    Value\nplain prose follows here").is_empty());
}

#[test]
fn given_column_count_change_when_detecting_then_starts_new_table() {
    let text = "a  b\nc  d\ne  f  g\nh  i  j";

    let tables = detect_tables(text);

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[1][0], vec!["e", "f", "g"]);
}
