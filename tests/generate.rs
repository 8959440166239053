use mla_formatter::{
    CitationRecord, DocumentInput, Error, MlaGenerator, QuoteInput, TableInput,
};
use pretty_assertions::assert_eq;

fn paper() -> DocumentInput {
    DocumentInput {
        header: vec![
            "Jane Doe".into(),
            "Professor Smith".into(),
            "English 101".into(),
            "12 March 2024".into(),
        ],
        title: "The River in American Fiction".into(),
        content: vec![
            "Rivers carry meaning.".into(),
            "Twain knew this better than anyone.".into(),
        ],
        ..Default::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn exactly_one_title_element_with_escaped_title() {
    init_tracing();
    let mut input = paper();
    input.title = "Fish & <Chips>".into();
    let html = MlaGenerator::new().generate_html(&input).unwrap();

    assert_eq!(html.matches("<title>").count(), 1);
    assert!(html.contains("<title>Fish &amp; &lt;Chips&gt;</title>"));
}

#[test]
fn missing_header_is_named() {
    let input = DocumentInput {
        title: "T".into(),
        content: vec!["a".into()],
        ..Default::default()
    };
    let err = MlaGenerator::new().generate_html(&input).unwrap_err();

    match err {
        Error::Validation(e) => {
            assert_eq!(e.missing, vec!["header"]);
            assert!(e.to_string().contains("header"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn every_missing_field_is_listed() {
    let err = MlaGenerator::new()
        .generate_html(&DocumentInput::default())
        .unwrap_err();
    let message = err.to_string();

    for field in ["header", "title", "content"] {
        assert!(message.contains(field), "{} not in {}", field, message);
    }
}

#[test]
fn three_line_header_fails() {
    let mut input = paper();
    input.header.truncate(3);
    assert!(matches!(
        MlaGenerator::new().generate_html(&input),
        Err(Error::Validation(_))
    ));
}

#[test]
fn works_cited_only_with_citations() {
    let mut generator = MlaGenerator::new();
    let html = generator.generate_html(&paper()).unwrap();
    assert!(!html.contains("Works Cited"));

    let mut input = paper();
    input.citations = vec![
        CitationRecord::Book {
            author: "Smith, J.".into(),
            title: "A Study".into(),
            publisher: "Acme Press".into(),
            year: "2020".into(),
        },
        CitationRecord::Website {
            author: String::new(),
            title: "River Facts".into(),
            website: "USGS".into(),
            publisher: String::new(),
            date: "2 Jan. 2023".into(),
            url: "usgs.gov/rivers".into(),
        },
    ];
    let html = generator.generate_html(&input).unwrap();

    assert_eq!(html.matches("<h2>Works Cited</h2>").count(), 1);
    let heading = html.find("<h2>Works Cited</h2>").unwrap();
    let first = html.find("Smith, J.. A Study. Acme Press, 2020.").unwrap();
    let second = html
        .find("&quot;River Facts.&quot; USGS, 2 Jan. 2023, usgs.gov/rivers.")
        .unwrap();
    assert!(heading < first && first < second);
}

#[test]
fn repeated_table_keeps_its_number() {
    let mut generator = MlaGenerator::new();
    let table = TableInput {
        headers: vec!["Novel".into(), "Year".into()],
        rows: vec![vec!["Huckleberry Finn".into(), "1884".into()]],
        caption: Some("Twain's river novels".into()),
    };

    let first = generator.create_table(&table).unwrap();
    let second = generator.create_table(&table).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.html, second.html);

    let other = TableInput {
        caption: Some("Other".into()),
        ..table
    };
    assert_eq!(generator.create_table(&other).unwrap().id, "table-2");
}

#[test]
fn quote_length_boundary_is_strict() {
    let mut generator = MlaGenerator::new();
    let forty = QuoteInput {
        text: vec!["word"; 40].join(" "),
        ..Default::default()
    };
    let forty_one = QuoteInput {
        text: vec!["word"; 41].join(" "),
        ..Default::default()
    };

    assert!(!generator.format_block_quote(&forty).unwrap().is_long_quote);
    assert!(generator.format_block_quote(&forty_one).unwrap().is_long_quote);
}

#[test]
fn script_in_paragraph_is_escaped() {
    let mut input = paper();
    input.content.push("Beware <script>alert('x')</script> tags.".into());
    let html = MlaGenerator::new().generate_html(&input).unwrap();

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
}

#[test]
fn unsupported_citation_type_is_named() {
    let err = CitationRecord::from_fields("podcast", &["Host", "Episode"]).unwrap_err();
    match err {
        Error::UnsupportedCitationType { kind, .. } => assert_eq!(kind, "podcast"),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(
        CitationRecord::from_fields("podcast", &["Host"])
            .unwrap_err()
            .to_string()
            .contains("\"podcast\"")
    );
}

#[test]
fn generation_is_deterministic() {
    let mut input = paper();
    input.tables.push(TableInput {
        headers: vec!["A".into()],
        rows: vec![vec!["1".into()]],
        caption: None,
    });
    input.quotes.push(QuoteInput {
        text: "Short quote.".into(),
        author: Some("Someone".into()),
        citation: Some("12".into()),
    });

    let mut generator = MlaGenerator::new();
    let first = generator.generate_html(&input).unwrap();
    let second = generator.generate_html(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn json_input_end_to_end() {
    let input = DocumentInput::from_json(
        r#"{
            "header": ["Jane Doe", "Professor Smith", "English 101", "12 March 2024"],
            "title": "From JSON",
            "content": ["  Spaced    out  text. "],
            "citations": [{"type": "journal", "author": "Lee, Ana", "title": "Tides",
                           "journal": "Ocean Review", "volume": "12", "year": "2019"}]
        }"#,
    )
    .unwrap();
    let html = mla_formatter::generate_html(&input).unwrap();

    assert!(html.contains("<div class=\"paragraph\">Spaced out text.</div>"));
    assert!(html.contains("Lee, Ana. &quot;Tides.&quot; Ocean Review, vol. 12, 2019."));
}

#[test]
fn unsupported_citation_type_in_json_is_named() {
    let err = DocumentInput::from_json(
        r#"{"title": "T", "content": ["a"], "citations": [{"type": "podcast"}]}"#,
    )
    .unwrap_err();

    match err {
        Error::UnsupportedCitationType { kind, supported } => {
            assert_eq!(kind, "podcast");
            assert_eq!(supported, vec!["book", "journal", "website"]);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn style_values_cannot_inject_markup() {
    let mut generator = MlaGenerator::new();
    let err = generator
        .styles_mut()
        .set_style("x", [("font", "x;}</style><script>")])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidProperty(keys) if keys == vec!["font"]));

    generator.set_style(Some("x"));
    let html = generator.generate_html(&paper()).unwrap();
    assert!(!html.contains("<script>"));
}
