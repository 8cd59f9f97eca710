use std::time::{Duration, Instant};

use mdscan::inline::plain_text;
use mdscan::{parse, Block, InlineRun, InlineScanner};

fn scan(line: &str) -> Vec<InlineRun> {
    InlineScanner::new().scan(line)
}

fn plain(text: &str) -> InlineRun {
    InlineRun::plain(text)
}

#[test]
fn bold_and_italic_line_in_paragraph() {
    let doc = parse("**bold** and *italic*").unwrap();
    assert_eq!(
        doc.blocks()[0],
        Block::Paragraph {
            lines: vec![vec![
                InlineRun::Bold(vec![plain("bold")]),
                plain(" and "),
                InlineRun::Italic(vec![plain("italic")]),
            ]]
        }
    );
}

#[test]
fn bold_inside_italic() {
    assert_eq!(
        scan("*a **b** c*"),
        vec![InlineRun::Italic(vec![
            plain("a "),
            InlineRun::Bold(vec![plain("b")]),
            plain(" c"),
        ])]
    );
}

#[test]
fn strikethrough_containing_bold() {
    assert_eq!(
        scan("~~old **news**~~"),
        vec![InlineRun::Strikethrough(vec![
            plain("old "),
            InlineRun::Bold(vec![plain("news")]),
        ])]
    );
}

#[test]
fn code_span_hides_markup() {
    assert_eq!(
        scan("`**not bold**`"),
        vec![InlineRun::InlineCode("**not bold**".into())]
    );
}

#[test]
fn code_span_inside_bold() {
    assert_eq!(
        scan("**use `x*y`**"),
        vec![InlineRun::Bold(vec![
            plain("use "),
            InlineRun::InlineCode("x*y".into()),
        ])]
    );
}

#[test]
fn unmatched_opener_is_literal() {
    assert_eq!(scan("**open and *closed*"), vec![
        plain("**open and "),
        InlineRun::Italic(vec![plain("closed")]),
    ]);
}

#[test]
fn closer_after_space_does_not_close() {
    assert_eq!(scan("*a *"), vec![plain("*a *")]);
}

#[test]
fn escaped_markers() {
    assert_eq!(scan("\\*\\*lit\\*\\* \\`x\\`"), vec![plain("**lit** `x`")]);
}

#[test]
fn underscore_inside_words() {
    assert_eq!(scan("my_var_name"), vec![plain("my_var_name")]);
    assert_eq!(
        scan("an _em_ word"),
        vec![plain("an "), InlineRun::Italic(vec![plain("em")]), plain(" word")]
    );
}

#[test]
fn intraword_star_emphasis() {
    assert_eq!(
        scan("un*frigging*believable"),
        vec![
            plain("un"),
            InlineRun::Italic(vec![plain("frigging")]),
            plain("believable"),
        ]
    );
}

#[test]
fn deep_nesting_degrades_to_text() {
    let depth = 40;
    let line = format!("{}x{}", "*a ".repeat(depth).trim_end(), " a*".repeat(depth));
    let runs = scan(&line);
    assert!(!runs.is_empty());
    assert_eq!(plain_text(&runs).matches('x').count(), 1);
}

#[test]
fn plain_text_strips_markup() {
    let runs = scan("**a** *b* `c` ~~d~~");
    assert_eq!(plain_text(&runs), "a b c d");
}

#[test]
fn multibyte_text_is_preserved() {
    assert_eq!(
        scan("日本語 **太字** ✓"),
        vec![
            plain("日本語 "),
            InlineRun::Bold(vec![plain("太字")]),
            plain(" ✓"),
        ]
    );
}

#[test]
fn triple_run_picks_outer_by_closer() {
    assert_eq!(
        scan("***a** b*"),
        vec![InlineRun::Italic(vec![
            InlineRun::Bold(vec![plain("a")]),
            plain(" b"),
        ])]
    );
    assert_eq!(
        scan("***a***"),
        vec![InlineRun::Bold(vec![InlineRun::Italic(vec![plain("a")])])]
    );
}

#[test]
fn link_in_list_item() {
    let doc = parse("- see [docs](https://example.com/a_b)").unwrap();
    assert_eq!(
        doc.blocks()[0],
        Block::Bullet {
            content: vec![
                plain("see "),
                InlineRun::Link {
                    text: vec![plain("docs")],
                    url: "https://example.com/a_b".into(),
                },
            ]
        }
    );
}

#[test]
fn image_with_and_without_title() {
    assert_eq!(
        scan(r#"![Logo](img/logo.png "The logo") ![x](y.gif)"#),
        vec![
            InlineRun::Image {
                alt: "Logo".into(),
                url: "img/logo.png".into(),
                title: Some("The logo".into()),
            },
            plain(" "),
            InlineRun::Image {
                alt: "x".into(),
                url: "y.gif".into(),
                title: None,
            },
        ]
    );
}

#[test]
fn broken_links_stay_literal() {
    for line in ["[a](b", "[a] (b)", "![a]", "[a](b c)", "a ! b [ c ]"] {
        assert_eq!(scan(line), vec![plain(line)], "{line:?}");
    }
}

#[test]
fn markup_inside_link_destination_is_kept() {
    assert_eq!(
        scan("[x](a*b*c)"),
        vec![InlineRun::Link {
            text: vec![plain("x")],
            url: "a*b*c".into(),
        }]
    );
}

#[test]
fn unclosed_openers_scan_in_linear_time() {
    for unit in ["x *a", "x **a", "x _a", "x ~~a", "x `a", "x [a](b", "x ![a"] {
        let line = unit.repeat(100_000);
        let start = Instant::now();
        let runs = scan(&line);
        let elapsed = start.elapsed();
        assert_eq!(runs, vec![plain(&line)], "{unit:?}");
        assert!(elapsed < Duration::from_secs(3), "{unit:?} took {elapsed:?}");
    }
}

#[test]
fn closed_spans_after_many_unclosed_openers() {
    let line = format!("{}**end** `c`", "x *a ".repeat(20_000));
    let runs = scan(&line);
    assert_eq!(runs.len(), 4);
    assert_eq!(runs[1], InlineRun::Bold(vec![plain("end")]));
    assert_eq!(runs[3], InlineRun::InlineCode("c".into()));
}
