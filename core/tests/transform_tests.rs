use topicfmt::{convert, rank, DocOrder, Error, Vocabulary};

fn lines_of(adj: &topicfmt::Adjacency) -> Vec<String> {
    let mut out = Vec::new();
    adj.write_to(&mut out, DocOrder::FirstSeen, "mem").unwrap();
    String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn converts_small_corpus() {
    let adj = convert("2\n3\n2\n1 1 5\n2 2 3\n".as_bytes(), "mem", 3).unwrap();
    let lines = lines_of(&adj);
    assert!(lines.contains(&"0 1:5".to_string()));
    assert!(lines.contains(&"1 2:3".to_string()));
    assert_eq!(lines.len(), 2);
}

#[test]
fn every_document_is_shifted_down_by_one() {
    let input = "9\n9\n9\n4 1 1\n7 2 2\n4 3 3\n9 1 1\n";
    let adj = convert(input.as_bytes(), "mem", 3).unwrap();
    let ids: Vec<u64> = adj.documents().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![3, 6, 8]);
}

#[test]
fn pairs_match_triples_exactly() {
    let input = "x\nx\nx\n1 3 2\n2 5 0\n1 3 2\n1 8 4\n";
    let adj = convert(input.as_bytes(), "mem", 3).unwrap();
    assert_eq!(adj.get(0).unwrap().words, vec![(3, 2), (3, 2), (8, 4)]);
    assert_eq!(adj.get(1).unwrap().words, vec![(5, 0)]);
    assert_eq!(adj.triples(), 4);
}

#[test]
fn header_content_never_matters() {
    let body = "1 1 1\n2 2 2\n";
    let a = convert(format!("2\n2\n2\n{body}").as_bytes(), "mem", 3).unwrap();
    let b = convert(format!("garbage\n# nothing\n\n{body}").as_bytes(), "mem", 3).unwrap();
    assert_eq!(lines_of(&a), lines_of(&b));
}

#[test]
fn missing_documents_leave_gaps() {
    let adj = convert("3\n3\n2\n1 1 1\n3 2 1\n".as_bytes(), "mem", 3).unwrap();
    let ids: Vec<u64> = adj.ordered(DocOrder::Sorted).iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![0, 2]);
}

#[test]
fn short_line_is_parse_error() {
    let err = convert("1\n1\n1\n1 1\n".as_bytes(), "docword.txt", 3).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("docword.txt:4"));
}

#[test]
fn ranks_top_two() {
    let vocab = Vocabulary::load("cat\ndog\nfish\n".as_bytes(), "vocab").unwrap();
    let ranked = rank(&vocab, "header\n1,T0,0.9\n2,T0,0.5\n3,T0,0.1\n".as_bytes(), "model", 2).unwrap();
    assert_eq!(ranked.get("T0").unwrap().to_string(), "T0 cat:0.9 dog:0.5");
}

#[test]
fn unknown_index_is_dropped_not_an_error() {
    let vocab = Vocabulary::load("cat\ndog\nfish\n".as_bytes(), "vocab").unwrap();
    let weights = "header\n4,T0,0.99\n1,T0,0.2\n2,T1,0.3\n";
    let ranked = rank(&vocab, weights.as_bytes(), "model", 10).unwrap();
    assert_eq!(ranked.summary.rows, 3);
    assert_eq!(ranked.summary.dropped, 1);
    assert_eq!(ranked.get("T0").unwrap().to_string(), "T0 cat:0.2");
    assert_eq!(ranked.get("T1").unwrap().to_string(), "T1 dog:0.3");
}

#[test]
fn topic_only_seen_through_dropped_rows_is_absent() {
    let vocab = Vocabulary::from_words(["cat"]);
    let ranked = rank(&vocab, "h\n5,T9,1.0\n".as_bytes(), "model", 3).unwrap();
    assert!(ranked.get("T9").is_none());
    assert!(ranked.topics.is_empty());
}

#[test]
fn rankings_are_bounded_and_non_increasing() {
    let vocab = Vocabulary::from_words((1..=20).map(|i| format!("w{i}")));
    let mut weights = String::from("index,topic,weight\n");
    for i in 1..=20 {
        weights.push_str(&format!("{i},A,{}\n", (i * 37 % 11) as f64 - 5.0));
        if i % 4 == 0 {
            weights.push_str(&format!("{i},B,{}\n", i as f64 / 10.0));
        }
    }
    let ranked = rank(&vocab, weights.as_bytes(), "model", 7).unwrap();
    let a = ranked.get("A").unwrap();
    let b = ranked.get("B").unwrap();
    assert_eq!(a.words.len(), 7);
    assert_eq!(b.words.len(), 5);
    for t in [a, b] {
        assert!(t.words.windows(2).all(|w| w[0].weight >= w[1].weight));
    }
}

#[test]
fn zero_top_k_gives_empty_rankings() {
    let vocab = Vocabulary::from_words(["cat", "dog"]);
    let ranked = rank(&vocab, "h\n1,T0,0.4\n2,T1,0.1\n".as_bytes(), "model", 0).unwrap();
    assert_eq!(ranked.topics.len(), 2);
    assert!(ranked.topics.iter().all(|t| t.words.is_empty()));
    assert_eq!(ranked.get("T0").unwrap().to_string(), "T0");
}

#[test]
fn malformed_weight_row_reports_line() {
    let vocab = Vocabulary::from_words(["cat"]);
    let err = rank(&vocab, "h\n1,T0,0.4\n1;T0;0.4\n".as_bytes(), "model.csv", 3).unwrap_err();
    match err {
        Error::Parse { source_name, line, .. } => {
            assert_eq!(source_name, "model.csv");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}
