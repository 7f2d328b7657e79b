//! Tokenizer and inverted index properties.

use std::collections::HashSet;

use downsample::{
    build_inverted_index, textual_columns, tokenize, Column, StopWords, Table, Value,
};
use proptest::prelude::*;

use crate::common::text_table;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Word-like tokens, some of them stop words.
fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::string::string_regex("[a-z0-9]{2,8}").unwrap(),
        1 => prop::sample::select(vec!["the", "and", "of", "a", "is"]).prop_map(String::from),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 0..8).prop_map(|words| words.join(" "))
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text_strategy(), 1..30)
}

fn stop_words_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-z]{1,6}").unwrap(), 1..10)
}

fn build(texts: &[String]) -> Table {
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    text_table(&refs)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every posting list is strictly ascending, in range and non-empty.
    #[test]
    fn prop_postings_sorted_and_in_range(texts in corpus_strategy()) {
        let table = build(&texts);
        let index = build_inverted_index(&table, StopWords::bundled()).unwrap();

        prop_assert_eq!(index.row_count(), table.len());
        for (_, postings) in index.iter() {
            prop_assert!(!postings.is_empty());
            prop_assert!(postings.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(postings.iter().all(|&p| p < table.len()));
        }
    }

    /// Row `r` is in the posting list of `t` exactly when `t` is one of its tokens.
    #[test]
    fn prop_index_matches_tokenizer(texts in corpus_strategy()) {
        let table = build(&texts);
        let stop_words = StopWords::bundled();
        let textual = textual_columns(&table).unwrap();
        let index = build_inverted_index(&table, stop_words).unwrap();

        let mut expected_postings = 0;
        for (pos, row) in table.rows().iter().enumerate() {
            let tokens = tokenize(row, &textual, stop_words);
            expected_postings += tokens.len();
            for token in &tokens {
                prop_assert!(index.postings(token).binary_search(&pos).is_ok());
            }
        }
        prop_assert_eq!(index.total_postings(), expected_postings);
    }

    /// Tokens never include stop words, empty strings or uppercase letters.
    #[test]
    fn prop_tokens_clean(text in "[A-Za-z ]{0,60}", words in stop_words_strategy()) {
        let stop_words = StopWords::from_words(&words);
        let table = text_table(&[text.as_str()]);
        let tokens = tokenize(&table.rows()[0], &[1], &stop_words);

        for token in &tokens {
            prop_assert!(!token.is_empty());
            prop_assert!(!stop_words.contains(token));
            prop_assert_eq!(token.clone(), token.to_lowercase());
        }
    }

    /// A row with no textual columns tokenizes exactly like a row of stop words.
    #[test]
    fn prop_no_textual_columns_same_as_only_stop_words(
        words in stop_words_strategy(),
        n in 0i64..1000,
    ) {
        let stop_words = StopWords::from_words(&words);

        let numeric = Table::new(
            vec![Column::numeric("n")],
            vec![vec![Value::Integer(n)]],
        ).unwrap();
        let textual = textual_columns(&numeric).unwrap();
        let from_numeric = tokenize(&numeric.rows()[0], &textual, &stop_words);

        let only_stop = text_table(&[words.join(" ").as_str()]);
        let from_stop = tokenize(&only_stop.rows()[0], &[1], &stop_words);

        prop_assert!(from_numeric.is_empty());
        prop_assert_eq!(from_numeric, from_stop);
    }

    /// Tokenizing is insensitive to case and to repeated tokens.
    #[test]
    fn prop_tokenize_case_and_repeat_insensitive(text in text_strategy()) {
        let stop_words = StopWords::bundled();
        let upper = text.to_uppercase();
        let doubled = format!("{} {}", text, text);
        let table = text_table(&[text.as_str(), upper.as_str(), doubled.as_str()]);

        let sets: Vec<HashSet<String>> = table
            .rows()
            .iter()
            .map(|row| tokenize(row, &[1], stop_words))
            .collect();
        prop_assert_eq!(&sets[0], &sets[1]);
        prop_assert_eq!(&sets[0], &sets[2]);
    }
}
