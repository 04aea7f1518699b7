use pretty_assertions::assert_eq;
use unitidy_core::{all_categories, clean_text, detect_issues, is_problematic, lookup};
use unitidy_core::{CategoryFilter, CategorySet, CharacterCategory, ClassificationTable};

/// Inputs mixing every category with ASCII, non-ASCII letters and whitespace
fn samples() -> Vec<String> {
    vec![
        String::new(),
        "plain ascii text\nwith two lines".to_string(),
        "caf\u{e9}\u{2013}bar".to_string(),
        "\u{201C}Hello\u{201D}".to_string(),
        "a\u{200B}b".to_string(),
        "100\u{FF05}".to_string(),
        "5\u{2034}".to_string(),
        "a   b\n\n\n\nc".to_string(),
        "\u{FEFF}\u{00A0}\u{2003}\u{3000}".to_string(),
        " \u{00A0} x \u{2009}\t\n\n\n\n\u{200B}\n".to_string(),
        "\u{2026}\u{2034}\u{2022}\u{00B7}\u{00AB}q\u{00BB}".to_string(),
        "\u{FF21}\u{FF22}\u{FF23}\u{FF01}\u{FF5B}\u{FF5D}".to_string(),
        "emoji\u{2764}\u{FE0F} and \u{1F600} stay".to_string(),
        "\u{202E}evil\u{202C} \u{2212}1 \u{2015}\u{2015}".to_string(),
        ClassificationTable::global()
            .iter()
            .map(|info| info.character)
            .collect(),
    ]
}

#[test]
fn literal_cases() {
    let issues = detect_issues("caf\u{e9}\u{2013}bar", CharacterCategory::Dashes.into());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].start, 4);
    assert_eq!(
        clean_text("caf\u{e9}\u{2013}bar", CharacterCategory::Dashes.into()),
        "café-bar"
    );

    assert_eq!(
        clean_text("\u{201C}Hello\u{201D}", CharacterCategory::Quotes.into()),
        "\"Hello\""
    );

    let issues = detect_issues("a\u{200B}b", CharacterCategory::HiddenControl.into());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].info.category, CharacterCategory::HiddenControl);
    assert!(issues[0].info.replacement.is_empty());
    assert_eq!(
        clean_text("a\u{200B}b", CharacterCategory::HiddenControl.into()),
        "ab"
    );

    assert_eq!(
        clean_text("100\u{FF05}", CharacterCategory::FullWidth.into()),
        "100%"
    );

    assert_eq!(
        clean_text("a   b\n\n\n\nc", CategoryFilter::All),
        "a b\n\nc"
    );
}

#[test]
fn triple_prime_expands() {
    let text = "5\u{2034}";
    let issues = detect_issues(text, CategoryFilter::All);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].info.replacement, "'''");

    let cleaned = clean_text(text, CategoryFilter::All);
    assert_eq!(cleaned, "5'''");
    assert!(cleaned.chars().count() > text.chars().count());
    assert!(detect_issues(&cleaned, CategoryFilter::All).is_empty());
}

#[test]
fn expanding_replacements_keep_earlier_offsets() {
    let text = "\u{2034}a\u{2026}b\u{2034}";
    assert_eq!(clean_text(text, CategoryFilter::All), "'''a...b'''");
}

#[test]
fn issues_are_single_char_and_ascending() {
    for text in samples() {
        let issues = detect_issues(&text, CategoryFilter::All);
        for issue in &issues {
            assert_eq!(issue.end, issue.start + 1);
            assert_eq!(
                text.chars().nth(issue.start),
                Some(issue.info.character),
                "start must index the matched character"
            );
            assert_eq!(
                &text[issue.byte_range.clone()],
                issue.info.character.to_string()
            );
            assert!(issue.context.chars().count() <= 20);
            assert!(issue.context.contains(issue.info.character));
        }
        assert!(issues.windows(2).all(|pair| pair[0].start < pair[1].start));
    }
}

#[test]
fn clean_is_idempotent() {
    for text in samples() {
        let once = clean_text(&text, CategoryFilter::All);
        assert_eq!(clean_text(&once, CategoryFilter::All), once);
        assert!(detect_issues(&once, CategoryFilter::All).is_empty());

        for category in CharacterCategory::ALL {
            let once = clean_text(&text, category.into());
            assert_eq!(clean_text(&once, category.into()), once);
        }
    }
}

#[test]
fn filtered_equals_unfiltered_restricted() {
    let sets = [
        CategorySet::empty(),
        CategorySet::only(CharacterCategory::Quotes),
        [CharacterCategory::Space, CharacterCategory::HiddenControl]
            .into_iter()
            .collect(),
        [
            CharacterCategory::FullWidth,
            CharacterCategory::Variation,
            CharacterCategory::Dashes,
        ]
        .into_iter()
        .collect(),
        CategorySet::all(),
    ];

    for text in samples() {
        let unfiltered = detect_issues(&text, CategoryFilter::All);
        for set in sets {
            let filtered = detect_issues(&text, set.into());
            assert!(filtered.iter().all(|i| set.contains(i.info.category)));

            let restricted: Vec<_> = unfiltered
                .iter()
                .filter(|i| set.contains(i.info.category))
                .cloned()
                .collect();
            assert_eq!(filtered, restricted);
        }
    }
}

#[test]
fn no_false_positives_on_ascii() {
    let text = "fn main() {\n    let x = \"quoted\" - 'c';\n}\n";
    assert!(detect_issues(text, CategoryFilter::All).is_empty());
    assert_eq!(
        clean_text(text, CategoryFilter::All),
        "fn main() {\n let x = \"quoted\" - 'c';\n}"
    );
    assert_eq!(clean_text(text, CategorySet::all().into()), text);

    let normalized = "already tidy\n\nascii";
    assert_eq!(clean_text(normalized, CategoryFilter::All), normalized);
}

#[test]
fn empty_category_set_is_a_no_op() {
    for text in samples() {
        assert_eq!(clean_text(&text, CategorySet::empty().into()), text);
    }
}

#[test]
fn lookups() {
    assert!(is_problematic('\u{00A0}'));
    assert!(!is_problematic(' '));
    assert_eq!(
        lookup('\u{2212}').map(|i| i.replacement.as_str()),
        Some("-")
    );
    assert!(lookup('\u{1F600}').is_none());
    assert!(all_categories().iter().eq(CharacterCategory::ALL));
}

#[test]
fn concurrent_use() {
    let texts = samples();
    let expected: Vec<String> = texts
        .iter()
        .map(|t| clean_text(t, CategoryFilter::All))
        .collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (text, expected) in texts.iter().zip(&expected) {
                    assert_eq!(&clean_text(text, CategoryFilter::All), expected);
                }
            });
        }
    });
}
