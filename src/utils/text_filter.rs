/// Stock phrases and punctuation stripped from subjects in concise output, applied in order.
pub const REDUNDANT_WORDS: &[&str] = &[
    "請", "核示", "函", "為", "申請", "辦理", "鑒核", "簽", "。", "，", "檢陳", "申辦", "「", "」",
];

/// Strip every [`REDUNDANT_WORDS`] entry from `text`.
pub fn remove_redundant_words(text: &str) -> String {
    remove_words(text, REDUNDANT_WORDS.iter().copied())
}

/// Same as [`remove_redundant_words`], then strips `extra` as well.
pub fn remove_redundant_words_with(text: &str, extra: &[String]) -> String {
    remove_words(
        text,
        REDUNDANT_WORDS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str)),
    )
}

fn remove_words<'a>(text: &str, words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .filter(|word| !word.is_empty())
        .fold(text.to_string(), |acc, word| acc.replace(word, ""))
}
