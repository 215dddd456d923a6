use lexrank_core::{tokenize, BagOfWords, Vocabulary};

#[test]
fn it_lowercases_and_strips_punctuation() {
    let words = tokenize("Running, RUNNER's run! 42 times.");
    assert_eq!(words, vec!["running", "runners", "run", "42", "times"]);
}

#[test]
fn it_drops_non_ascii_letters() {
    // Letters outside a-z are removed, not folded to ASCII.
    assert_eq!(tokenize("The café's menu"), vec!["the", "cafs", "menu"]);
    assert!(tokenize("日本語").is_empty());
}

#[test]
fn it_keeps_stopwords_and_does_not_stem() {
    let words = tokenize("The quick brown fox and the lazy dogs");
    assert!(words.contains(&"the".to_string()));
    assert!(words.contains(&"and".to_string()));
    assert!(words.contains(&"dogs".to_string()));
}

#[test]
fn encoding_uses_the_same_normalization() {
    let vocab = Vocabulary::build(&["Hello world"]);
    let bow = BagOfWords::encode("HELLO, hello... World? planet", &vocab);
    assert_eq!(bow.count("hello"), 2);
    assert_eq!(bow.count("world"), 1);
    assert_eq!(bow.count("planet"), 0);
}
